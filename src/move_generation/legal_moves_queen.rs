use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{
    generate_slide_moves, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS,
};
use crate::move_generation::move_descriptions::MoveDescription;

pub fn generate_queen_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    generate_slide_moves(
        game_state,
        color,
        from,
        PieceKind::Queen,
        &ORTHOGONAL_DIRECTIONS,
        out,
    );
    generate_slide_moves(
        game_state,
        color,
        from,
        PieceKind::Queen,
        &DIAGONAL_DIRECTIONS,
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::generate_queen_moves;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::coordinate_to_square;

    #[test]
    fn open_board_queen_reaches_twenty_seven_squares() {
        let game = GameState::from_fen("4k3/8/8/3Q4/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_queen_moves(
            &game,
            Color::White,
            coordinate_to_square("D5").expect("square should parse"),
            &mut moves,
        );
        assert_eq!(moves.len(), 27);
    }
}
