//! Pluggable static evaluation.
//!
//! Search delegates position scoring to the [`BoardScorer`] trait so
//! heuristics can be swapped without touching search code. The baseline
//! scorer is material plus a small mobility term.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::count_pseudo_legal_moves;

/// Terminal score magnitude; the same order as the king's material value so
/// mate always dominates any reachable material swing.
pub const MATE_SCORE: i32 = 20_000;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; positive is good for it.
    fn score(&self, game_state: &GameState, perspective: Color) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialMobilityScorer;

impl MaterialMobilityScorer {
    const MOBILITY_WEIGHT: i32 = 2;

    fn material_balance(game_state: &GameState, perspective: Color) -> i32 {
        let mut score = 0i32;
        for square in 0..64u8 {
            let piece = game_state.piece_on(square);
            let Some((color, kind)) = piece.color().zip(piece.kind()) else {
                continue;
            };
            if color == perspective {
                score += piece_value(kind);
            } else {
                score -= piece_value(kind);
            }
        }
        score
    }

    fn mobility_balance(game_state: &GameState, perspective: Color) -> i32 {
        // Castling and en-passant do not contribute to mobility.
        let mut probe = game_state.clone();
        probe.castling_rights = 0;
        probe.en_passant_square = None;

        let own = count_pseudo_legal_moves(&probe, perspective) as i32;
        let opponent = count_pseudo_legal_moves(&probe, perspective.opposite()) as i32;
        (own - opponent) * Self::MOBILITY_WEIGHT
    }
}

impl BoardScorer for MaterialMobilityScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        Self::material_balance(game_state, perspective)
            + Self::mobility_balance(game_state, perspective)
    }
}
