//! ASCII board rendering for debugging output in tests and the binary.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::with_capacity(256);

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');
        for file in 0..8u8 {
            let piece = game_state.piece_on(make_square(file, rank));
            out.push(piece_glyph(piece));
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  A B C D E F G H\n");

    let side = match game_state.side_to_move {
        Color::White => "white",
        Color::Black => "black",
    };
    out.push_str(side);
    out.push_str(" to move\n");

    out
}

fn piece_glyph(piece: Piece) -> char {
    let Some((color, kind)) = piece.color().zip(piece.kind()) else {
        return '.';
    };
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}
