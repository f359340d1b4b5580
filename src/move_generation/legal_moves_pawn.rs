//! Pawn move generation: pushes, double pushes, diagonal captures,
//! en-passant, and promotion expansion.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_shared::offset_square;
use crate::move_generation::move_descriptions::{
    pack_move, MoveDescription, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub fn generate_pawn_moves(
    game_state: &GameState,
    color: Color,
    from: Square,
    out: &mut Vec<MoveDescription>,
) {
    let forward = color.forward();
    let start_rank = if color == Color::White { 1 } else { 6 };
    let promotion_rank = if color == Color::White { 7 } else { 0 };

    // Pushes.
    if let Some(one_step) = offset_square(from, 0, forward) {
        if game_state.piece_on(one_step).is_empty() {
            if square_rank(one_step) == promotion_rank {
                for promo in PROMOTION_KINDS {
                    out.push(pack_move(from, one_step, PieceKind::Pawn, None, Some(promo), 0));
                }
            } else {
                out.push(pack_move(from, one_step, PieceKind::Pawn, None, None, 0));

                if square_rank(from) == start_rank {
                    if let Some(two_step) = offset_square(from, 0, 2 * forward) {
                        if game_state.piece_on(two_step).is_empty() {
                            out.push(pack_move(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                FLAG_DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }
    }

    // Diagonal captures and en-passant.
    for file_delta in [-1i8, 1] {
        let Some(to) = offset_square(from, file_delta, forward) else {
            continue;
        };
        let target = game_state.piece_on(to);

        if !target.is_empty() && !target.belongs_to(color) {
            if square_rank(to) == promotion_rank {
                for promo in PROMOTION_KINDS {
                    out.push(pack_move(
                        from,
                        to,
                        PieceKind::Pawn,
                        target.kind(),
                        Some(promo),
                        FLAG_CAPTURE,
                    ));
                }
            } else {
                out.push(pack_move(
                    from,
                    to,
                    PieceKind::Pawn,
                    target.kind(),
                    None,
                    FLAG_CAPTURE,
                ));
            }
        } else if target.is_empty() && game_state.en_passant_square == Some(to) {
            // The captured pawn sits behind the target square, on the
            // mover's rank.
            let victim_square = offset_square(to, 0, -forward);
            let victim_is_enemy_pawn = victim_square
                .map(|sq| game_state.piece_on(sq).is(color.opposite(), PieceKind::Pawn))
                .unwrap_or(false);
            if victim_is_enemy_pawn {
                out.push(pack_move(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}
