//! Successor-position construction.
//!
//! `apply_move` copies the position and replays one move: capture removal
//! (including the en-passant victim behind the target square), promotion
//! replacement, castling rook relocation, castling-rights revocation and the
//! en-passant target update. It performs no legality checking; the legal
//! generator filters self-check afterwards.

use crate::game_state::chess_rules::{
    BLACK_KINGSIDE_ROOK_HOME, BLACK_QUEENSIDE_ROOK_HOME, WHITE_KINGSIDE_ROOK_HOME,
    WHITE_QUEENSIDE_ROOK_HOME,
};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{MoveGenResult, MoveGenerationError};
use crate::move_generation::legal_move_shared::offset_square;
use crate::move_generation::move_descriptions::{
    move_from, move_promotion_piece, move_to, MoveDescription, FLAG_CASTLING,
    FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

pub fn apply_move(
    game_state: &GameState,
    move_description: MoveDescription,
) -> MoveGenResult<GameState> {
    let from = move_from(move_description);
    let to = move_to(move_description);

    let piece = game_state.piece_on(from);
    let Some(mover) = piece.color() else {
        return Err(MoveGenerationError::InvalidState(format!(
            "no piece on from-square {from}"
        )));
    };

    let mut next = game_state.clone();
    next.set_piece(from, Piece::EMPTY);

    // En-passant removes the pawn behind the landing square.
    if (move_description & FLAG_EN_PASSANT) != 0 {
        let victim = offset_square(to, 0, -mover.forward()).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("en-passant victim off board behind {to}"))
        })?;
        next.set_piece(victim, Piece::EMPTY);
    }

    // Place the piece, replacing it on promotion.
    let placed = match move_promotion_piece(move_description) {
        Some(promo) => Piece::new(mover, promo),
        None => piece,
    };
    next.set_piece(to, placed);

    // Castling relocates the matching rook.
    if (move_description & FLAG_CASTLING) != 0 {
        let rook = Piece::new(mover, PieceKind::Rook);
        match (mover, from, to) {
            (Color::White, 4, 6) => relocate(&mut next, 7, 5, rook),
            (Color::White, 4, 2) => relocate(&mut next, 0, 3, rook),
            (Color::Black, 60, 62) => relocate(&mut next, 63, 61, rook),
            (Color::Black, 60, 58) => relocate(&mut next, 56, 59, rook),
            _ => {}
        }
    }

    update_castling_rights(&mut next, mover, piece.kind(), from, to);

    // The target square between origin and destination of a double push.
    next.en_passant_square = if (move_description & FLAG_DOUBLE_PAWN_PUSH) != 0 {
        Some((from + to) / 2)
    } else {
        None
    };

    next.side_to_move = mover.opposite();
    Ok(next)
}

fn relocate(game_state: &mut GameState, from: Square, to: Square, rook: Piece) {
    game_state.set_piece(from, Piece::EMPTY);
    game_state.set_piece(to, rook);
}

fn update_castling_rights(
    game_state: &mut GameState,
    mover: Color,
    moved_kind: Option<PieceKind>,
    from: Square,
    to: Square,
) {
    if moved_kind == Some(PieceKind::King) {
        game_state.castling_rights &= match mover {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    if moved_kind == Some(PieceKind::Rook) {
        game_state.castling_rights &= !right_for_rook_home(from);
    }

    // Anything landing on a rook home square means that rook is gone or was
    // never there; either way the right is dead.
    game_state.castling_rights &= !right_for_rook_home(to);
}

fn right_for_rook_home(square: Square) -> CastlingRights {
    match square {
        WHITE_QUEENSIDE_ROOK_HOME => CASTLE_WHITE_QUEENSIDE,
        WHITE_KINGSIDE_ROOK_HOME => CASTLE_WHITE_KINGSIDE,
        BLACK_QUEENSIDE_ROOK_HOME => CASTLE_BLACK_QUEENSIDE,
        BLACK_KINGSIDE_ROOK_HOME => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
