//! Knight move generation and the shared offset table.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::offset_square;
use crate::move_generation::move_descriptions::{pack_move, MoveDescription, FLAG_CAPTURE};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub fn generate_knight_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    for (file_delta, rank_delta) in KNIGHT_OFFSETS {
        let Some(to) = offset_square(from, file_delta, rank_delta) else {
            continue;
        };
        let target = game_state.piece_on(to);
        if target.is_empty() {
            out.push(pack_move(from, to, PieceKind::Knight, None, None, 0));
        } else if !target.belongs_to(color) {
            out.push(pack_move(
                from,
                to,
                PieceKind::Knight,
                target.kind(),
                None,
                FLAG_CAPTURE,
            ));
        }
    }
}
