//! Attack detection, computed outward from the probed square.
//!
//! Rays and offset probes from the target square find attackers without
//! enumerating the attacker's moves, and the board alone decides the
//! answer: castling state is never consulted.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{
    offset_square, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS,
};
use crate::move_generation::legal_moves_king::KING_OFFSETS;
use crate::move_generation::legal_moves_knight::KNIGHT_OFFSETS;

pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let king = Piece::new(color, PieceKind::King);
    (0..64u8).find(|&sq| game_state.piece_on(sq) == king)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    match king_square(game_state, color) {
        Some(sq) => is_square_attacked(game_state, sq, color.opposite()),
        None => false,
    }
}

/// True iff any piece of `attacker_color` could capture on `square` in one
/// ply.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    // Knights.
    for (file_delta, rank_delta) in KNIGHT_OFFSETS {
        if let Some(origin) = offset_square(square, file_delta, rank_delta) {
            if game_state.piece_on(origin).is(attacker_color, PieceKind::Knight) {
                return true;
            }
        }
    }

    // Enemy king.
    for (file_delta, rank_delta) in KING_OFFSETS {
        if let Some(origin) = offset_square(square, file_delta, rank_delta) {
            if game_state.piece_on(origin).is(attacker_color, PieceKind::King) {
                return true;
            }
        }
    }

    // Pawns attack diagonally forward, so the attacker sits one rank back
    // from the probed square relative to its own advance direction.
    for file_delta in [-1i8, 1] {
        if let Some(origin) = offset_square(square, file_delta, -attacker_color.forward()) {
            if game_state.piece_on(origin).is(attacker_color, PieceKind::Pawn) {
                return true;
            }
        }
    }

    // Orthogonal rays: rook or queen at the first occupied square.
    if ray_hits_attacker(
        game_state,
        square,
        attacker_color,
        &ORTHOGONAL_DIRECTIONS,
        PieceKind::Rook,
    ) {
        return true;
    }

    // Diagonal rays: bishop or queen.
    ray_hits_attacker(
        game_state,
        square,
        attacker_color,
        &DIAGONAL_DIRECTIONS,
        PieceKind::Bishop,
    )
}

fn ray_hits_attacker(
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(file_delta, rank_delta) in directions {
        let mut current = square;
        while let Some(next) = offset_square(current, file_delta, rank_delta) {
            let piece = game_state.piece_on(next);
            if piece.is_empty() {
                current = next;
                continue;
            }
            if piece.belongs_to(attacker_color) {
                let kind = piece.kind();
                if kind == Some(slider) || kind == Some(PieceKind::Queen) {
                    return true;
                }
            }
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked, king_square};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::coordinate_to_square;

    fn attacked(fen: &str, square: &str, by: Color) -> bool {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        is_square_attacked(
            &game,
            coordinate_to_square(square).expect("square should parse"),
            by,
        )
    }

    #[test]
    fn sliders_attack_through_empty_squares_only() {
        let fen = "4k3/8/8/8/8/2n5/8/R3K3 w - - 0 1";
        assert!(attacked(fen, "A8", Color::White), "open file");
        assert!(!attacked(fen, "H1", Color::White), "king blocks the rank");
        assert!(attacked(fen, "B1", Color::Black), "knight hits B1");
        assert!(!attacked(fen, "C2", Color::Black), "knight does not hit C2");
    }

    #[test]
    fn pawns_attack_only_diagonally_toward_their_advance() {
        let fen = "4k3/8/8/3p4/8/8/8/4K3 w - - 0 1";
        assert!(attacked(fen, "C4", Color::Black));
        assert!(attacked(fen, "E4", Color::Black));
        assert!(!attacked(fen, "D4", Color::Black), "push square is not an attack");
        assert!(!attacked(fen, "C6", Color::Black), "pawns never attack backwards");
    }

    #[test]
    fn adjacent_enemy_king_counts_as_attacker() {
        let fen = "8/8/8/8/8/8/2k5/K7 w - - 0 1";
        assert!(attacked(fen, "B1", Color::Black));
        assert!(attacked(fen, "B2", Color::White));
    }

    #[test]
    fn check_detection_finds_the_king_wherever_it_stands() {
        let game = GameState::from_fen("4k3/8/8/7b/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(
            king_square(&game, Color::White),
            Some(coordinate_to_square("E1").expect("square should parse"))
        );
        assert!(!is_king_in_check(&game, Color::White), "bishop is off the diagonal");

        let checked = GameState::from_fen("4k3/8/8/8/8/6b1/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(is_king_in_check(&checked, Color::White));
    }
}
