use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::{generate_slide_moves, DIAGONAL_DIRECTIONS};
use crate::move_generation::move_descriptions::MoveDescription;

pub fn generate_bishop_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    generate_slide_moves(
        game_state,
        color,
        from,
        PieceKind::Bishop,
        &DIAGONAL_DIRECTIONS,
        out,
    );
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_descriptions::{is_capture, move_to};
    use crate::utils::algebraic::coordinate_to_square;

    #[test]
    fn bishop_slides_until_blocked_and_captures_the_blocker() {
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/B7/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mut moves = Vec::new();
        generate_bishop_moves(
            &game,
            Color::White,
            coordinate_to_square("A2").expect("square should parse"),
            &mut moves,
        );

        let d5 = coordinate_to_square("D5").expect("square should parse");
        assert!(moves.iter().any(|&md| move_to(md) == d5 && is_capture(md)));
        // The ray stops at the captured pawn; E6 is unreachable.
        let e6 = coordinate_to_square("E6").expect("square should parse");
        assert!(moves.iter().all(|&md| move_to(md) != e6));
    }
}
