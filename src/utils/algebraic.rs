//! Coordinate notation for squares and root-move keys.
//!
//! Squares print upper-case (`E4`); parsing accepts either case. A move key
//! is the concatenated from/to coordinates plus an optional promotion letter
//! (`E2E4`, `E7E8Q`) and doubles as the result-map key in the root search.

use crate::game_state::chess_types::{make_square, square_file, square_rank, PieceKind, Square};
use crate::move_generation::move_descriptions::{
    move_from, move_promotion_piece, move_to, MoveDescription,
};

/// Convert a coordinate string (for example `E4` or `e4`) to a square index.
pub fn coordinate_to_square(coordinate: &str) -> Result<Square, String> {
    let bytes = coordinate.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid square coordinate: {coordinate}"));
    }

    let file = bytes[0].to_ascii_uppercase();
    let rank = bytes[1];

    if !(b'A'..=b'H').contains(&file) {
        return Err(format!("Invalid file letter: {}", bytes[0] as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid rank digit: {}", rank as char));
    }

    Ok(make_square(file - b'A', rank - b'1'))
}

/// Convert a square index (`0..=63`) to its upper-case coordinate string.
pub fn square_to_coordinate(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'A' + square_file(square));
    let rank_char = char::from(b'1' + square_rank(square));
    Ok(format!("{file_char}{rank_char}"))
}

#[inline]
pub fn promotion_letter(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Queen => Some('Q'),
        PieceKind::Rook => Some('R'),
        PieceKind::Bishop => Some('B'),
        PieceKind::Knight => Some('N'),
        _ => None,
    }
}

/// Format a move as its key string, e.g. `E2E4` or `E7E8Q`.
pub fn move_key(move_description: MoveDescription) -> String {
    let from = square_to_coordinate(move_from(move_description))
        .expect("packed from-square is always in range");
    let to =
        square_to_coordinate(move_to(move_description)).expect("packed to-square is always in range");
    match move_promotion_piece(move_description).and_then(promotion_letter) {
        Some(letter) => format!("{from}{to}{letter}"),
        None => format!("{from}{to}"),
    }
}

/// Normalize an announced user move the way the root monitor matches it:
/// trim surrounding whitespace and upper-case.
#[inline]
pub fn normalize_user_move(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{coordinate_to_square, move_key, normalize_user_move, square_to_coordinate};
    use crate::game_state::chess_types::PieceKind;
    use crate::move_generation::move_descriptions::pack_move;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(coordinate_to_square("A1").expect("A1 should parse"), 0);
        assert_eq!(coordinate_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_coordinate(0).expect("0 should convert"), "A1");
        assert_eq!(square_to_coordinate(63).expect("63 should convert"), "H8");
        assert!(coordinate_to_square("I1").is_err());
        assert!(coordinate_to_square("A9").is_err());
        assert!(coordinate_to_square("A").is_err());
    }

    #[test]
    fn move_keys_carry_promotion_letters() {
        let quiet = pack_move(12, 28, PieceKind::Pawn, None, None, 0);
        assert_eq!(move_key(quiet), "E2E4");

        let promo = pack_move(52, 60, PieceKind::Pawn, None, Some(PieceKind::Queen), 0);
        assert_eq!(move_key(promo), "E7E8Q");
    }

    #[test]
    fn user_move_normalization_trims_and_uppercases() {
        assert_eq!(normalize_user_move("  e2e4 \n"), "E2E4");
        assert_eq!(normalize_user_move("e7e8q"), "E7E8Q");
    }
}
