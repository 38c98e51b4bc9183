//! Copy-make: producing the successor of a `(Position, Move)` pair.
//!
//! The position is copied, never mutated in place; the search keeps the
//! parent alive on its stack and undo is simply dropping the child. The
//! update clears whatever sits on the destination square out of every
//! piece set, dispatches on the moving piece, revokes castling rights when
//! a king or rook moves or anything lands on a corner, maintains the
//! en-passant state, flips the side to move, and mirrors every board change
//! into the Zobrist hash so that the incremental hash always equals a full
//! recompute.

use crate::board::{
    Position, EP_CLEAR_MASK, EP_SQ_MASK, EP_SQ_SHIFT, EP_VALID, TURN_WHITE,
};
use crate::core::bitboard::BitBoard;
use crate::core::castle_rights::CastleRights;
use crate::core::masks::{
    CASTLE_ROOK_BLACK_LONG, CASTLE_ROOK_BLACK_SHORT, CASTLE_ROOK_WHITE_LONG,
    CASTLE_ROOK_WHITE_SHORT,
};
use crate::core::piece_move::Move;
use crate::core::sq::SQ;
use crate::core::PieceType;
use crate::helper::zobrist;
use crate::tools::stats;

/// Applies a legal move to a position, returning the new position.
///
/// The move must come from the position's own move generator; applying any
/// other move corrupts the result.
pub fn make(pos: &Position, mv: Move) -> Position {
    let mut next = *pos;

    let src_sq = mv.src();
    let dst_sq = mv.dst();
    let src = src_sq.to_bb();
    let dst = dst_sq.to_bb();
    let piece = mv.piece();
    let mov = src | dst;

    let src_keys = zobrist::square_keys(src_sq);
    let dst_keys = zobrist::square_keys(dst_sq);

    if (dst & (next.p | next.n | next.bq | next.rq)).is_not_empty() {
        stats::inc_captures();
    }

    // hash out whatever is being captured on the destination
    if (next.p & dst).is_not_empty() {
        next.hash ^= dst_keys.p;
    }
    if (next.n & dst).is_not_empty() {
        next.hash ^= dst_keys.n;
    }
    if (next.bq & !next.rq & dst).is_not_empty() {
        next.hash ^= dst_keys.b;
    }
    if (next.rq & !next.bq & dst).is_not_empty() {
        next.hash ^= dst_keys.r;
    }
    if (next.bq & next.rq & dst).is_not_empty() {
        next.hash ^= dst_keys.q;
    }

    next.p &= !dst;
    next.n &= !dst;
    next.bq &= !dst;
    next.rq &= !dst;

    if next.state & TURN_WHITE != 0 {
        next.w ^= mov;
        next.hash ^= src_keys.w ^ dst_keys.w;
    } else {
        // the capture of a white piece is handled here, since the side
        // test is needed anyway
        if (next.w & dst).is_not_empty() {
            next.hash ^= dst_keys.w;
        }
        next.w &= !dst;
    }

    // clear the en-passant state; a double push below re-sets it
    next.state &= EP_CLEAR_MASK;

    match piece {
        PieceType::P => {
            next.p ^= mov;
            next.hash ^= src_keys.p ^ dst_keys.p;

            let prom = mv.prom();
            if prom.is_some() {
                next.p ^= dst;
                next.hash ^= dst_keys.p;
                match prom {
                    PieceType::Q => {
                        next.bq ^= dst;
                        next.rq ^= dst;
                        next.hash ^= dst_keys.q;
                    }
                    PieceType::R => {
                        next.rq ^= dst;
                        next.hash ^= dst_keys.r;
                    }
                    PieceType::B => {
                        next.bq ^= dst;
                        next.hash ^= dst_keys.b;
                    }
                    PieceType::N => {
                        next.n ^= dst;
                        next.hash ^= dst_keys.n;
                    }
                    _ => {}
                }
            }

            // an en-passant capture removes the pawn behind the target
            if pos.state & EP_VALID != 0 {
                let ep = ((pos.state >> EP_SQ_SHIFT) & EP_SQ_MASK) as u8;
                if dst_sq.0 == ep {
                    if pos.state & TURN_WHITE != 0 {
                        let cap = SQ(ep + 8);
                        next.p ^= cap.to_bb();
                        next.hash ^= zobrist::square_keys(cap).p;
                    } else {
                        let cap = SQ(ep - 8);
                        let cap_bb = cap.to_bb();
                        next.p ^= cap_bb;
                        next.w ^= cap_bb;
                        let keys = zobrist::square_keys(cap);
                        next.hash ^= keys.p ^ keys.w;
                    }
                    stats::inc_captures();
                    stats::inc_en_passants();
                }
            }

            // a double push exposes the skipped square to en passant
            if next.state & TURN_WHITE != 0 {
                if src_sq.rank_idx_of_sq() == 6 && dst_sq.rank_idx_of_sq() == 4 {
                    next.state |= EP_VALID | (((src_sq.0 - 8) as u64) << EP_SQ_SHIFT);
                }
            } else if src_sq.rank_idx_of_sq() == 1 && dst_sq.rank_idx_of_sq() == 3 {
                next.state |= EP_VALID | (((src_sq.0 + 8) as u64) << EP_SQ_SHIFT);
            }
        }
        PieceType::N => {
            next.n ^= mov;
            next.hash ^= src_keys.n ^ dst_keys.n;
        }
        PieceType::B => {
            next.bq ^= mov;
            next.hash ^= src_keys.b ^ dst_keys.b;
        }
        PieceType::Q => {
            next.bq ^= mov;
            next.rq ^= mov;
            next.hash ^= src_keys.q ^ dst_keys.q;
        }
        PieceType::R => {
            next.rq ^= mov;
            next.hash ^= src_keys.r ^ dst_keys.r;

            // a rook leaving its corner revokes the matching right
            if next.state & TURN_WHITE != 0 {
                if src_sq == SQ::H1 {
                    next.state &= !CastleRights::WHITE_SHORT.bits();
                } else if src_sq == SQ::A1 {
                    next.state &= !CastleRights::WHITE_LONG.bits();
                }
            } else if src_sq == SQ::H8 {
                next.state &= !CastleRights::BLACK_SHORT.bits();
            } else if src_sq == SQ::A8 {
                next.state &= !CastleRights::BLACK_LONG.bits();
            }
        }
        PieceType::K => {
            next.k ^= mov;
            next.hash ^= src_keys.k ^ dst_keys.k;

            next.state &= if next.state & TURN_WHITE != 0 {
                !CastleRights::WHITE_ALL.bits()
            } else {
                !CastleRights::BLACK_ALL.bits()
            };

            // the castling two-step also shifts the rook
            match (src_sq, dst_sq) {
                (SQ::E1, SQ::G1) => {
                    let rook_mov = BitBoard(CASTLE_ROOK_WHITE_SHORT);
                    next.rq ^= rook_mov;
                    next.w ^= rook_mov;
                    let h1 = zobrist::square_keys(SQ::H1);
                    let f1 = zobrist::square_keys(SQ::F1);
                    next.hash ^= h1.r ^ f1.r ^ h1.w ^ f1.w;
                    stats::inc_castles();
                }
                (SQ::E1, SQ::C1) => {
                    let rook_mov = BitBoard(CASTLE_ROOK_WHITE_LONG);
                    next.rq ^= rook_mov;
                    next.w ^= rook_mov;
                    let a1 = zobrist::square_keys(SQ::A1);
                    let d1 = zobrist::square_keys(SQ::D1);
                    next.hash ^= a1.r ^ d1.r ^ a1.w ^ d1.w;
                    stats::inc_castles();
                }
                (SQ::E8, SQ::G8) => {
                    let rook_mov = BitBoard(CASTLE_ROOK_BLACK_SHORT);
                    next.rq ^= rook_mov;
                    let h8 = zobrist::square_keys(SQ::H8);
                    let f8 = zobrist::square_keys(SQ::F8);
                    next.hash ^= h8.r ^ f8.r;
                    stats::inc_castles();
                }
                (SQ::E8, SQ::C8) => {
                    let rook_mov = BitBoard(CASTLE_ROOK_BLACK_LONG);
                    next.rq ^= rook_mov;
                    let a8 = zobrist::square_keys(SQ::A8);
                    let d8 = zobrist::square_keys(SQ::D8);
                    next.hash ^= a8.r ^ d8.r;
                    stats::inc_castles();
                }
                _ => {}
            }
        }
        PieceType::None => debug_assert!(false, "move without a piece"),
    }

    // a capture landing on a corner revokes that corner's right, no matter
    // which piece captured
    if (dst & BitBoard::CORNERS).is_not_empty() {
        match dst_sq {
            SQ::A8 => next.state &= !CastleRights::BLACK_LONG.bits(),
            SQ::H8 => next.state &= !CastleRights::BLACK_SHORT.bits(),
            SQ::A1 => next.state &= !CastleRights::WHITE_LONG.bits(),
            SQ::H1 => next.state &= !CastleRights::WHITE_SHORT.bits(),
            _ => {}
        }
    }

    next.hash ^= zobrist::z_ep(pos.state) ^ zobrist::z_ep(next.state);
    next.hash ^= zobrist::z_castling(pos.state) ^ zobrist::z_castling(next.state);

    next.state ^= TURN_WHITE;
    next.hash ^= zobrist::z_turn();

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use crate::helper::zobrist::compute;

    fn assert_consistent(pos: &Position) {
        assert!(pos.is_okay(), "after make:\n{}", pos);
    }

    #[test]
    fn pawn_push_and_double_push() {
        let pos = Position::start_pos();
        let single = make(&pos, Move::new(PieceType::P, SQ::E2, SQ::E3));
        assert_consistent(&single);
        assert!(!single.ep_valid());
        assert_eq!(single.turn(), Player::Black);

        let double = make(&pos, Move::new(PieceType::P, SQ::E2, SQ::E4));
        assert_consistent(&double);
        assert!(double.ep_valid());
        assert_eq!(double.ep_square(), SQ::E3);
        assert_eq!(
            double.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn capture_clears_every_set() {
        let pos = Position::from_fen("4k3/8/8/3q4/8/4N3/8/4K3 w - - 0 1").unwrap();
        let next = make(&pos, Move::new(PieceType::N, SQ::E3, SQ::D5));
        assert_consistent(&next);
        assert_eq!(next.piece_at(SQ::D5), Some((Player::White, PieceType::N)));
        assert!((next.bq | next.rq).is_empty());
    }

    #[test]
    fn white_short_castle_moves_the_rook() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let next = make(&pos, Move::new(PieceType::K, SQ::E1, SQ::G1));
        assert_consistent(&next);
        assert_eq!(next.piece_at(SQ::G1), Some((Player::White, PieceType::K)));
        assert_eq!(next.piece_at(SQ::F1), Some((Player::White, PieceType::R)));
        assert_eq!(next.piece_at(SQ::H1), None);
        assert_eq!(next.castle_rights(), CastleRights::empty());
    }

    #[test]
    fn black_long_castle_moves_the_rook() {
        let pos = Position::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
        let next = make(&pos, Move::new(PieceType::K, SQ::E8, SQ::C8));
        assert_consistent(&next);
        assert_eq!(next.piece_at(SQ::C8), Some((Player::Black, PieceType::K)));
        assert_eq!(next.piece_at(SQ::D8), Some((Player::Black, PieceType::R)));
        assert_eq!(next.piece_at(SQ::A8), None);
    }

    #[test]
    fn en_passant_removes_the_pawn_behind() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let next = make(&pos, Move::new(PieceType::P, SQ::E5, SQ::D6));
        assert_consistent(&next);
        assert_eq!(next.piece_at(SQ::D6), Some((Player::White, PieceType::P)));
        assert_eq!(next.piece_at(SQ::D5), None);
        assert!(next.p.count_bits() == 1);
    }

    #[test]
    fn promotion_swaps_the_pawn() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let next = make(&pos, Move::new_promotion(SQ::A7, SQ::A8, PieceType::Q));
        assert_consistent(&next);
        assert_eq!(next.piece_at(SQ::A8), Some((Player::White, PieceType::Q)));
        assert!(next.p.is_empty());
    }

    #[test]
    fn rook_capture_on_corner_revokes_rights() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = make(&pos, Move::new(PieceType::R, SQ::A1, SQ::A8));
        assert_consistent(&next);
        // white long (rook left a1) and black long (capture on a8) are gone
        assert_eq!(
            next.castle_rights(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_SHORT
        );
    }

    #[test]
    fn incremental_hash_matches_recompute() {
        let pos = Position::from_fen(crate::board::fen::KIWIPETE_FEN).unwrap();
        for mv in [
            Move::new(PieceType::P, SQ::A2, SQ::A4),
            Move::new(PieceType::N, SQ::C3, SQ::B5),
            Move::new(PieceType::K, SQ::E1, SQ::G1),
            Move::new(PieceType::K, SQ::E1, SQ::C1),
            Move::new(PieceType::Q, SQ::F3, SQ::F6),
        ]
        .iter()
        {
            let next = make(&pos, *mv);
            assert_eq!(next.hash, compute(&next), "move {}", mv);
        }
    }
}
