//! The position value type.
//!
//! `GameState` bundles the 64-square board with the side to move, castling
//! rights and en-passant target. It is value-like: move application produces
//! a fresh successor and never mutates the original, so search workers can
//! share parent positions freely across threads.

use crate::game_state::chess_rules::{infer_castling_rights, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: [Piece; 64],
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [Piece::EMPTY; 64],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        parse_fen(fen)
    }

    /// Build a state from a bare board, inferring castling rights from home
    /// squares and leaving the en-passant target clear.
    pub fn from_board(board: [Piece; 64], side_to_move: Color) -> Self {
        let castling_rights = infer_castling_rights(&board);
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_square: None,
        }
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Piece {
        self.board[square as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        self.board[square as usize] = piece;
    }
}
