//! Helpers shared by the per-piece generators: bounds-checked square
//! stepping and the sliding-piece ray walk.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_descriptions::{pack_move, MoveDescription, FLAG_CAPTURE};

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Step from a square by file/rank deltas; `None` when the step leaves the
/// board.
#[inline]
pub fn offset_square(square: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = square_file(square) as i8 + file_delta;
    let rank = square_rank(square) as i8 + rank_delta;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(make_square(file as u8, rank as u8))
    } else {
        None
    }
}

/// Walk each direction until blocked: empty squares are quiet moves, an
/// enemy square is a capture that ends the ray, a friendly square ends the
/// ray without a move.
pub fn generate_slide_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    moved_piece: PieceKind,
    directions: &[(i8, i8)],
    out: &mut Vec<MoveDescription>,
) {
    for &(file_delta, rank_delta) in directions {
        let mut current = from;
        while let Some(to) = offset_square(current, file_delta, rank_delta) {
            let target = game_state.piece_on(to);
            if target.is_empty() {
                out.push(pack_move(from, to, moved_piece, None, None, 0));
                current = to;
                continue;
            }
            if !target.belongs_to(color) {
                out.push(pack_move(from, to, moved_piece, target.kind(), None, FLAG_CAPTURE));
            }
            break;
        }
    }
}
