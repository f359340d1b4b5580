//! Full legal move generation pipeline.
//!
//! Scans the board once, dispatches to the per-piece pseudo-legal
//! generators, applies each candidate and drops the ones that leave the
//! mover's king attacked. Successor positions ride along in
//! [`GeneratedMove`] so search never re-applies a move.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_descriptions::MoveDescription;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    NotImplemented,
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::NotImplemented => {
                write!(f, "move generation is not implemented")
            }
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid game state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub move_description: MoveDescription,
    pub game_after_move: GameState,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        let mut pseudo = Vec::<MoveDescription>::with_capacity(64);
        generate_pseudo_legal_moves(game_state, game_state.side_to_move, &mut pseudo);

        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for move_description in pseudo {
            let next = apply_move(game_state, move_description)?;

            // Illegal if the mover's own king is attacked afterwards.
            if is_king_in_check(&next, game_state.side_to_move) {
                continue;
            }

            legal.push(GeneratedMove {
                move_description,
                game_after_move: next,
            });
        }

        Ok(legal)
    }
}

/// Always-failing generator, for exercising error propagation in tests.
pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn generate_legal_moves(&self, _game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        Err(MoveGenerationError::NotImplemented)
    }
}

/// Enumerate pseudo-legal moves for `color` regardless of whose turn the
/// state says it is; the evaluator counts both sides' mobility this way.
pub fn generate_pseudo_legal_moves(
    game_state: &GameState,
    color: Color,
    out: &mut Vec<MoveDescription>,
) {
    for from in 0..64u8 {
        let piece = game_state.piece_on(from);
        if !piece.belongs_to(color) {
            continue;
        }
        match piece.kind() {
            Some(PieceKind::Pawn) => generate_pawn_moves(game_state, color, from, out),
            Some(PieceKind::Knight) => generate_knight_moves(game_state, color, from, out),
            Some(PieceKind::Bishop) => generate_bishop_moves(game_state, color, from, out),
            Some(PieceKind::Rook) => generate_rook_moves(game_state, color, from, out),
            Some(PieceKind::Queen) => generate_queen_moves(game_state, color, from, out),
            Some(PieceKind::King) => generate_king_moves(game_state, color, from, out),
            None => {}
        }
    }
}

pub fn count_pseudo_legal_moves(game_state: &GameState, color: Color) -> usize {
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal_moves(game_state, color, &mut moves);
    moves.len()
}

#[cfg(test)]
mod tests {
    use super::{
        count_pseudo_legal_moves, LegalMoveGenerator, MoveGenerationError, MoveGenerator,
        NullMoveGenerator,
    };
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_descriptions::{move_from, move_promotion_piece, move_to};
    use crate::utils::algebraic::{coordinate_to_square, move_key};

    #[test]
    fn start_position_has_twenty_legal_moves_per_side() {
        let game = GameState::new_game();
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        assert_eq!(moves.len(), 20);

        assert_eq!(count_pseudo_legal_moves(&game, Color::White), 20);
        assert_eq!(count_pseudo_legal_moves(&game, Color::Black), 20);
    }

    #[test]
    fn pinned_piece_may_not_expose_its_king() {
        // The D2 knight is pinned to the king by the D8 rook.
        let game = GameState::from_fen("3rk3/8/8/8/8/8/3N4/3K4 w - - 0 1")
            .expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");

        let d2 = coordinate_to_square("D2").expect("square should parse");
        assert!(moves.iter().all(|m| move_from(m.move_description) != d2));
    }

    #[test]
    fn check_must_be_answered() {
        // White king on E1 checked by a rook on E8; only king steps off the
        // E-file (or blocks) are legal and there is no blocker.
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");

        assert!(!moves.is_empty());
        let e_file: Vec<String> = moves
            .iter()
            .filter(|m| {
                let to = move_to(m.move_description);
                to % 8 == 4
            })
            .map(|m| move_key(m.move_description))
            .collect();
        assert!(e_file.is_empty(), "king cannot stay on the E-file: {e_file:?}");
    }

    #[test]
    fn promotion_produces_exactly_four_legal_variants() {
        let game = GameState::from_fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1").expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");

        let e7 = coordinate_to_square("E7").expect("square should parse");
        let promotions: Vec<_> = moves
            .iter()
            .filter(|m| move_from(m.move_description) == e7)
            .collect();
        assert_eq!(promotions.len(), 4);
        assert!(promotions
            .iter()
            .all(|m| move_promotion_piece(m.move_description).is_some()));
    }

    #[test]
    fn stalemated_side_has_no_legal_moves() {
        let game = GameState::from_fen("8/8/8/8/8/1Q6/2K5/k7 b - - 0 1")
            .expect("FEN should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        assert!(moves.is_empty());
    }

    #[test]
    fn null_generator_surfaces_not_implemented() {
        let err = NullMoveGenerator
            .generate_legal_moves(&GameState::new_game())
            .expect_err("null generator should error");
        assert_eq!(err, MoveGenerationError::NotImplemented);
    }
}
