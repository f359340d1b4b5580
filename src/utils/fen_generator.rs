//! GameState-to-FEN generator.
//!
//! The core holds no clocks, so the halfmove and fullmove fields are always
//! emitted as `0 1`.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::square_to_coordinate;

pub fn generate_fen(game_state: &GameState) -> String {
    let mut fen = String::with_capacity(90);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let piece = game_state.piece_on(make_square(file, rank));
            match piece_to_fen_char(piece) {
                Some(ch) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    fen.push(ch);
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match game_state.side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    });

    fen.push(' ');
    if game_state.castling_rights == 0 {
        fen.push('-');
    } else {
        if game_state.castling_rights & CASTLE_WHITE_KINGSIDE != 0 {
            fen.push('K');
        }
        if game_state.castling_rights & CASTLE_WHITE_QUEENSIDE != 0 {
            fen.push('Q');
        }
        if game_state.castling_rights & CASTLE_BLACK_KINGSIDE != 0 {
            fen.push('k');
        }
        if game_state.castling_rights & CASTLE_BLACK_QUEENSIDE != 0 {
            fen.push('q');
        }
    }

    fen.push(' ');
    match game_state.en_passant_square {
        Some(sq) => {
            let coord =
                square_to_coordinate(sq).expect("en-passant square is always in range");
            fen.push_str(&coord.to_ascii_lowercase());
        }
        None => fen.push('-'),
    }

    fen.push_str(" 0 1");
    fen
}

fn piece_to_fen_char(piece: Piece) -> Option<char> {
    let (color, kind) = (piece.color()?, piece.kind()?);
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    Some(match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    })
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::game_state::GameState;

    #[test]
    fn starting_position_regenerates_its_fen() {
        let game = GameState::new_game();
        assert_eq!(game.get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn en_passant_target_is_emitted_lower_case() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq d6 0 1";
        let game = GameState::from_fen(fen).expect("FEN should parse");
        assert_eq!(game.get_fen(), fen);
    }
}
