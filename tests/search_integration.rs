//! End-to-end scenarios driving the root dispatcher through the public API.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rowan_chess::game_state::chess_types::Color;
use rowan_chess::game_state::game_state::GameState;
use rowan_chess::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use rowan_chess::move_generation::move_descriptions::move_from;
use rowan_chess::search::board_scoring::{BoardScorer, MaterialMobilityScorer, MATE_SCORE};
use rowan_chess::search::root_search::{
    search_best_move, search_best_move_with, SearchOptions, SearchOutcome,
};
use rowan_chess::utils::algebraic::{coordinate_to_square, move_key};

fn options(depth: u8) -> SearchOptions {
    SearchOptions {
        depth,
        tt_log2_entries: 12,
        ..SearchOptions::default()
    }
}

#[test]
fn fools_mate_is_found_at_depth_two() {
    // After 1.f3 e5 2.g4: black mates with the queen to H4.
    let game =
        GameState::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
            .expect("FEN should parse");

    let outcome = search_best_move(&game, &options(2), None);
    assert_eq!(outcome.best_move_key().as_deref(), Some("D8H4"));
    let score = outcome.score.expect("score should be present");
    assert!(score >= MATE_SCORE - 2, "mate must dominate, got {score}");
}

#[test]
fn stalemate_returns_no_move_and_no_score() {
    // Black king on A1 boxed in by the queen on B3 and king on C2.
    let game = GameState::from_fen("8/8/8/8/8/1Q6/2K5/k7 b - - 0 1").expect("FEN should parse");

    let legal = LegalMoveGenerator
        .generate_legal_moves(&game)
        .expect("move generation should succeed");
    assert!(legal.is_empty());

    let outcome = search_best_move(&game, &options(1), None);
    assert_eq!(outcome, SearchOutcome::default());

    // A caller scoring the terminal statically sees a dead draw in material.
    assert_eq!(MaterialMobilityScorer.score(&game, Color::Black), 0);
}

#[test]
fn en_passant_capture_is_available_and_preferred_after_a_double_push() {
    // White pawn on E5; black answers D7D5, passing over D6.
    let before =
        GameState::from_fen("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2")
            .expect("FEN should parse");
    let d7 = coordinate_to_square("D7").expect("square should parse");
    let double_push = LegalMoveGenerator
        .generate_legal_moves(&before)
        .expect("move generation should succeed")
        .into_iter()
        .find(|mv| move_key(mv.move_description) == "D7D5")
        .expect("D7D5 should be legal");
    assert_eq!(move_from(double_push.move_description), d7);

    let after = double_push.game_after_move;
    assert_eq!(
        after.en_passant_square,
        Some(coordinate_to_square("D6").expect("square should parse"))
    );

    // The en-passant capture is a root move, and applying it removes the
    // black pawn from D5.
    let capture = LegalMoveGenerator
        .generate_legal_moves(&after)
        .expect("move generation should succeed")
        .into_iter()
        .find(|mv| move_key(mv.move_description) == "E5D6")
        .expect("E5D6 should be legal");
    let d5 = coordinate_to_square("D5").expect("square should parse");
    assert!(capture.game_after_move.piece_on(d5).is_empty());
}

#[test]
fn castling_is_excluded_while_the_transit_square_is_attacked() {
    let attacked = GameState::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1")
        .expect("FEN should parse");
    let keys: Vec<String> = LegalMoveGenerator
        .generate_legal_moves(&attacked)
        .expect("move generation should succeed")
        .iter()
        .map(|mv| move_key(mv.move_description))
        .collect();
    assert!(!keys.contains(&"E1G1".to_owned()), "F1 is attacked: {keys:?}");

    let clear = GameState::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
    let keys: Vec<String> = LegalMoveGenerator
        .generate_legal_moves(&clear)
        .expect("move generation should succeed")
        .iter()
        .map(|mv| move_key(mv.move_description))
        .collect();
    assert!(keys.contains(&"E1G1".to_owned()));
}

/// Evaluation throttled enough that no root subtree can finish before the
/// monitor reacts to an announced move.
#[derive(Debug, Clone, Copy, Default)]
struct ThrottledScorer;

impl BoardScorer for ThrottledScorer {
    fn score(&self, game_state: &GameState, perspective: Color) -> i32 {
        thread::sleep(Duration::from_millis(5));
        MaterialMobilityScorer.score(game_state, perspective)
    }
}

#[test]
fn announcing_a_root_move_cancels_every_other_worker() {
    let game = GameState::new_game();
    let (tx, rx) = mpsc::channel::<String>();
    // Announced before the search starts, with sloppy formatting on purpose.
    tx.send(" e2e4 ".to_owned()).expect("send should succeed");

    let outcome = search_best_move_with(
        &game,
        &options(2),
        Some(&rx),
        Arc::new(LegalMoveGenerator),
        Arc::new(ThrottledScorer),
    );

    // Only the E2E4 worker may run to completion; the cancelled siblings
    // publish nothing, so aggregation can only pick the announced move.
    assert_eq!(outcome.best_move_key().as_deref(), Some("E2E4"));
    assert!(outcome.score.is_some());
}

#[test]
fn announcing_a_non_root_move_aborts_the_whole_search() {
    let game = GameState::new_game();
    let (tx, rx) = mpsc::channel::<String>();
    // A black move can never match one of white's root moves.
    tx.send("E7E5".to_owned()).expect("send should succeed");

    let outcome = search_best_move_with(
        &game,
        &options(3),
        Some(&rx),
        Arc::new(LegalMoveGenerator),
        Arc::new(ThrottledScorer),
    );

    assert_eq!(outcome, SearchOutcome::default());
}

#[test]
fn search_results_are_reproducible_across_runs() {
    let game = GameState::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 1",
    )
    .expect("FEN should parse");

    let first = search_best_move(&game, &options(3), None);
    let second = search_best_move(&game, &options(3), None);
    assert_eq!(first, second);
    assert!(first.best_move.is_some());
}
