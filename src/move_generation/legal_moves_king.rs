//! King move generation: adjacent steps plus castling.
//!
//! Castling is gated on rights, emptiness of the squares between king and
//! rook, and the king's origin/transit/destination squares not being
//! attacked, so an emitted castling move never needs the self-check filter.

use crate::game_state::chess_rules::{BLACK_KING_HOME, WHITE_KING_HOME};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::offset_square;
use crate::move_generation::move_descriptions::{
    pack_move, MoveDescription, FLAG_CAPTURE, FLAG_CASTLING,
};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub fn generate_king_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    for (file_delta, rank_delta) in KING_OFFSETS {
        let Some(to) = offset_square(from, file_delta, rank_delta) else {
            continue;
        };
        let target = game_state.piece_on(to);
        if target.is_empty() {
            out.push(pack_move(from, to, PieceKind::King, None, None, 0));
        } else if !target.belongs_to(color) {
            out.push(pack_move(
                from,
                to,
                PieceKind::King,
                target.kind(),
                None,
                FLAG_CAPTURE,
            ));
        }
    }

    generate_castling_moves(game_state, color, from, out);
}

fn generate_castling_moves(
    game_state: &GameState,
    color: Color,
    king_from: Square,
    out: &mut Vec<MoveDescription>,
) {
    let (home, kingside_right, queenside_right) = match color {
        Color::White => (WHITE_KING_HOME, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (BLACK_KING_HOME, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };
    if king_from != home {
        return;
    }

    let enemy = color.opposite();

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    if (game_state.castling_rights & kingside_right) != 0 {
        let transit = home + 1; // F-file
        let destination = home + 2; // G-file
        if game_state.piece_on(transit).is_empty()
            && game_state.piece_on(destination).is_empty()
            && !is_square_attacked(game_state, transit, enemy)
            && !is_square_attacked(game_state, destination, enemy)
        {
            out.push(pack_move(
                king_from,
                destination,
                PieceKind::King,
                None,
                None,
                FLAG_CASTLING,
            ));
        }
    }

    if (game_state.castling_rights & queenside_right) != 0 {
        let transit = home - 1; // D-file
        let destination = home - 2; // C-file
        let knight_square = home - 3; // B-file must be empty but may be attacked
        if game_state.piece_on(transit).is_empty()
            && game_state.piece_on(destination).is_empty()
            && game_state.piece_on(knight_square).is_empty()
            && !is_square_attacked(game_state, transit, enemy)
            && !is_square_attacked(game_state, destination, enemy)
        {
            out.push(pack_move(
                king_from,
                destination,
                PieceKind::King,
                None,
                None,
                FLAG_CASTLING,
            ));
        }
    }
}
