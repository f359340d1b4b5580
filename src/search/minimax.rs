//! Bounded-depth minimax with alpha-beta pruning.
//!
//! The maximizing side stays fixed for the whole tree while the side to move
//! alternates with the position, so horizon evaluations always score from
//! the searching engine's perspective. Moves are MVV-LVA ordered, results
//! are cached per depth in the caller's transposition table, and the stop
//! control short-circuits the whole tree with a discarded value.

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    GeneratedMove, MoveGenResult, MoveGenerator,
};
use crate::move_generation::move_descriptions::{
    is_capture, move_captured_piece, move_moved_piece, MoveDescription,
};
use crate::search::board_scoring::{piece_value, BoardScorer, MATE_SCORE};
use crate::search::threading::SearchControl;
use crate::search::transposition_table::TranspositionTable;
use crate::search::zobrist::compute_zobrist_key;

#[allow(clippy::too_many_arguments)]
pub fn minimax<G: MoveGenerator, S: BoardScorer>(
    game_state: &GameState,
    maximizing_color: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    ply: u8,
    control: &SearchControl,
    table: &mut TranspositionTable,
    generator: &G,
    scorer: &S,
) -> MoveGenResult<i32> {
    if control.should_stop() {
        return Ok(0);
    }

    if depth == 0 {
        return Ok(scorer.score(game_state, maximizing_color));
    }

    let key = compute_zobrist_key(game_state);
    if let Some(score) = table.probe(key, depth) {
        return Ok(score);
    }

    let mut moves = generator.generate_legal_moves(game_state)?;
    if moves.is_empty() {
        return Ok(terminal_score(game_state, maximizing_color, ply));
    }
    order_moves(&mut moves);

    let maximizing_node = game_state.side_to_move == maximizing_color;
    let mut value = if maximizing_node { i32::MIN } else { i32::MAX };

    for mv in &moves {
        if control.should_stop() {
            return Ok(0);
        }

        let score = minimax(
            &mv.game_after_move,
            maximizing_color,
            depth - 1,
            alpha,
            beta,
            ply.saturating_add(1),
            control,
            table,
            generator,
            scorer,
        )?;

        if maximizing_node {
            value = value.max(score);
            alpha = alpha.max(value);
        } else {
            value = value.min(score);
            beta = beta.min(value);
        }
        if alpha >= beta {
            break;
        }
    }

    // A stopped subtree produced garbage; cache nothing.
    if control.should_stop() {
        return Ok(0);
    }
    table.store(key, depth, value);

    Ok(value)
}

/// No legal moves: mate scored against the side to move, biased so nearer
/// mates dominate; stalemate is a dead draw.
fn terminal_score(game_state: &GameState, maximizing_color: Color, ply: u8) -> i32 {
    if is_king_in_check(game_state, game_state.side_to_move) {
        let magnitude = MATE_SCORE - i32::from(ply);
        if game_state.side_to_move == maximizing_color {
            -magnitude
        } else {
            magnitude
        }
    } else {
        0
    }
}

/// MVV-LVA: captures first, most valuable victim with least valuable
/// attacker leading; quiet moves keep generator order behind them.
pub fn order_moves(moves: &mut [GeneratedMove]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(ordering_score(mv.move_description)));
}

fn ordering_score(move_description: MoveDescription) -> i32 {
    if !is_capture(move_description) {
        return 0;
    }
    let victim = move_captured_piece(move_description).map_or(0, piece_value);
    let attacker = move_moved_piece(move_description).map_or(0, piece_value);
    // Offset keeps every capture ahead of every quiet move.
    1_000_000 + 10 * victim - attacker
}
