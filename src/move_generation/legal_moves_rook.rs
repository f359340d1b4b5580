use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{generate_slide_moves, ORTHOGONAL_DIRECTIONS};
use crate::move_generation::move_descriptions::MoveDescription;

pub fn generate_rook_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    generate_slide_moves(
        game_state,
        color,
        from,
        PieceKind::Rook,
        &ORTHOGONAL_DIRECTIONS,
        out,
    );
}
