//! Perft validation counters.
//!
//! Recursively explores the legal move tree and tallies leaf nodes plus the
//! special-move categories the move encoding can observe. The standard node
//! counts pin down generator, application and legality-filter correctness in
//! one sweep.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::{
    GeneratedMove, LegalMoveGenerator, MoveGenResult, MoveGenerator,
};
use crate::move_generation::move_descriptions::{
    move_promotion_piece, FLAG_CAPTURE, FLAG_CASTLING, FLAG_EN_PASSANT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
}

impl PerftCounts {
    fn record_leaf(&mut self, mv: &GeneratedMove) {
        self.nodes += 1;
        if (mv.move_description & FLAG_CAPTURE) != 0 {
            self.captures += 1;
        }
        if (mv.move_description & FLAG_EN_PASSANT) != 0 {
            self.en_passant += 1;
        }
        if (mv.move_description & FLAG_CASTLING) != 0 {
            self.castles += 1;
        }
        if move_promotion_piece(mv.move_description).is_some() {
            self.promotions += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, &mv, depth, 1, &mut counts)?;
    }

    Ok(counts)
}

pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    perft(&LegalMoveGenerator, game_state, depth)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    target_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == target_depth {
        counts.record_leaf(mv);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.game_after_move)? {
        perft_recurse(generator, &child, target_depth, current_depth + 1, counts)?;
    }

    Ok(())
}
