//! Legal move generation.
//!
//! Eight sub-generators, one per concern (pawns, knights, bishops, rooks,
//! queens, king, castling, and check evasions), each appending to a shared
//! [`MoveStack`]. Legality is decided during generation: unpinned pieces
//! move freely, pinned pieces are restricted to the axis of their pin, and
//! king moves are masked by the protection area. When the king is in check
//! the normal generators are replaced by the evasion generator: king moves,
//! captures of a single checker, and interpositions against a checking
//! slider.
//!
//! Every generator has a counting dual returning the number of moves it
//! would emit without materializing them. The bulk-counted leaf frontier of
//! the perft recursion runs entirely on the counters, which is where most
//! of the search's time goes. For every position and generator,
//! `count_* == generate_*`'s emitted length.
//!
//! All functions are monomorphized over the side to move through
//! [`PlayerTrait`]; no colour branch survives into the emitted code.
//!
//! [`MoveStack`]: ../../core/move_stack/struct.MoveStack.html
//! [`PlayerTrait`]: ../../core/mono_traits/trait.PlayerTrait.html

use crate::board::pins::Pins;
use crate::board::Position;
use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::PlayerTrait;
use crate::core::move_stack::MoveStack;
use crate::core::piece_move::Move;
use crate::core::sq::SQ;
use crate::core::PieceType;
use crate::helper::prelude::{
    between_bb, bishop_moves, king_moves, knight_moves, rays, rook_moves, senw_attacks,
    sn_attacks, swne_attacks, we_attacks,
};

/// Generates every legal move: the seven piece generators when the king is
/// safe, the evasion generator when `checkers` is non-empty.
pub fn generate_all<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    checkers: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    if checkers.is_not_empty() {
        generate_evasions::<P>(pos, occ, p_area, checkers, pins, stack);
    } else {
        generate_pawn_moves::<P>(pos, occ, pins, stack);
        generate_knight_moves::<P>(pos, occ, pins.any(), stack);
        generate_bishop_moves::<P>(pos, occ, pins, stack);
        generate_rook_moves::<P>(pos, occ, pins, stack);
        generate_queen_moves::<P>(pos, occ, pins, stack);
        generate_king_moves::<P>(pos, occ, p_area, stack);
        generate_castling::<P>(pos, occ, p_area, stack);
    }
}

/// Counting dual of [`generate_all`](fn.generate_all.html).
pub fn count_all<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    checkers: BitBoard,
    pins: &Pins,
) -> u64 {
    if checkers.is_not_empty() {
        count_evasions::<P>(pos, occ, p_area, checkers, pins)
    } else {
        count_pawn_moves::<P>(pos, occ, pins)
            + count_knight_moves::<P>(pos, occ, pins.any())
            + count_bishop_moves::<P>(pos, occ, pins)
            + count_rook_moves::<P>(pos, occ, pins)
            + count_queen_moves::<P>(pos, occ, pins)
            + count_king_moves::<P>(pos, occ, p_area)
            + count_castling::<P>(pos, occ, p_area)
    }
}

#[inline]
fn push_promotions(stack: &mut MoveStack, src: SQ, dst: SQ) {
    stack.push(Move::new_promotion(src, dst, PieceType::N));
    stack.push(Move::new_promotion(src, dst, PieceType::B));
    stack.push(Move::new_promotion(src, dst, PieceType::R));
    stack.push(Move::new_promotion(src, dst, PieceType::Q));
}

// ---------------------------------------------------------------------
// pawns

/// Generates pawn pushes, double pushes, captures, promotions and en
/// passant. Pinned pawns only move along their pin axis.
pub fn generate_pawn_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let them = occ & !us;
    let empty = !occ;
    let pawns = pos.p & us;
    let any = pins.any();
    let ok_sn = !any | pins.sn;
    let ok_senw = !any | pins.senw;
    let ok_swne = !any | pins.swne;

    // single pushes
    let mut pcs = pawns & !P::PROMO_SRC_RANK & P::shift_down(empty) & ok_sn;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::P, src, P::up(src)));
    }

    // double pushes, over two empty squares
    let mut pcs = pawns
        & P::DOUBLE_SRC_RANK
        & P::shift_down(empty)
        & P::shift_down(P::shift_down(empty))
        & ok_sn;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::P, src, P::up(P::up(src))));
    }

    // captures
    let mut pcs = pawns & !P::PROMO_SRC_RANK & P::shift_down_senw(them) & ok_senw;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::P, src, P::up_senw(src)));
    }

    let mut pcs = pawns & !P::PROMO_SRC_RANK & P::shift_down_swne(them) & ok_swne;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::P, src, P::up_swne(src)));
    }

    // promotions, also capturing ones
    let mut pcs = pawns & P::PROMO_SRC_RANK & P::shift_down(empty) & ok_sn;
    while let Some(src) = pcs.pop_some_lsb() {
        push_promotions(stack, src, P::up(src));
    }

    let mut pcs = pawns & P::PROMO_SRC_RANK & P::shift_down_senw(them) & ok_senw;
    while let Some(src) = pcs.pop_some_lsb() {
        push_promotions(stack, src, P::up_senw(src));
    }

    let mut pcs = pawns & P::PROMO_SRC_RANK & P::shift_down_swne(them) & ok_swne;
    while let Some(src) = pcs.pop_some_lsb() {
        push_promotions(stack, src, P::up_swne(src));
    }

    // en passant
    if pos.ep_valid() {
        let mut srcs = legal_ep_sources::<P>(pos, occ, pins);
        let ep = pos.ep_square();
        while let Some(src) = srcs.pop_some_lsb() {
            stack.push(Move::new(PieceType::P, src, ep));
        }
    }
}

/// Counting dual of [`generate_pawn_moves`](fn.generate_pawn_moves.html).
pub fn count_pawn_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, pins: &Pins) -> u64 {
    let us = P::us(pos.w, occ);
    let them = occ & !us;
    let empty = !occ;
    let pawns = pos.p & us;
    let any = pins.any();

    let mut count: u64 = 0;

    let pushable = pawns & P::shift_down(empty) & (!any | pins.sn);
    count += (pushable & !P::PROMO_SRC_RANK).count_bits() as u64;
    count += (pushable & P::DOUBLE_SRC_RANK & P::shift_down(P::shift_down(empty))).count_bits()
        as u64;

    let senw_caps = pawns & P::shift_down_senw(them) & (!any | pins.senw);
    count += (senw_caps & !P::PROMO_SRC_RANK).count_bits() as u64;

    let swne_caps = pawns & P::shift_down_swne(them) & (!any | pins.swne);
    count += (swne_caps & !P::PROMO_SRC_RANK).count_bits() as u64;

    // promotions emit all four pieces
    count += (pushable & P::PROMO_SRC_RANK).count_bits() as u64 * 4;
    count += (senw_caps & P::PROMO_SRC_RANK).count_bits() as u64 * 4;
    count += (swne_caps & P::PROMO_SRC_RANK).count_bits() as u64 * 4;

    if pos.ep_valid() {
        count += legal_ep_sources::<P>(pos, occ, pins).count_bits() as u64;
    }

    count
}

/// The pawns that may legally capture en passant right now: the attackers
/// of the en-passant square, pin-filtered, minus the horizontal
/// discovered-check case.
fn legal_ep_sources<P: PlayerTrait>(pos: &Position, occ: BitBoard, pins: &Pins) -> BitBoard {
    debug_assert!(pos.ep_valid());
    let us = P::us(pos.w, occ);
    let pawns = pos.p & us;
    let any = pins.any();
    let ep = pos.ep_square();
    let ep_bb = ep.to_bb();
    let captured = P::down(ep);
    let ksq = (pos.k & us).to_sq();
    let king_on_ep_rank = ksq.rank_idx_of_sq() == P::EP_RANK_IDX;

    let mut srcs = BitBoard::EMPTY;

    let cand = pawns & P::shift_down_senw(ep_bb) & (!any | pins.senw);
    if cand.is_not_empty()
        && !(king_on_ep_rank && ep_rank_discovery(pos, occ, us, cand.to_sq(), captured, ksq))
    {
        srcs |= cand;
    }

    let cand = pawns & P::shift_down_swne(ep_bb) & (!any | pins.swne);
    if cand.is_not_empty()
        && !(king_on_ep_rank && ep_rank_discovery(pos, occ, us, cand.to_sq(), captured, ksq))
    {
        srcs |= cand;
    }

    srcs
}

/// An en-passant capture removes both the capturing and the captured pawn
/// from one rank. If the king shares that rank and the two pawns were the
/// only pieces between it and an enemy rook or queen, the capture exposes
/// the king and is illegal.
fn ep_rank_discovery(
    pos: &Position,
    occ: BitBoard,
    us: BitBoard,
    src: SQ,
    captured: SQ,
    ksq: SQ,
) -> bool {
    let (west_from, east_from) = if src.0 < captured.0 {
        (src, captured)
    } else {
        (captured, src)
    };
    let left = BitBoard(rays(west_from).w) & occ;
    let right = BitBoard(rays(east_from).e) & occ;
    let enemy_orth = pos.rq & !us;

    if left.is_not_empty() && left.bit_scan_reverse() == ksq {
        return right.is_not_empty() && (right.lsb() & enemy_orth).is_not_empty();
    }
    if right.is_not_empty() && right.bit_scan_forward() == ksq {
        return left.is_not_empty() && (left.msb() & enemy_orth).is_not_empty();
    }
    false
}

// ---------------------------------------------------------------------
// knights

/// Generates knight moves. A pinned knight can never move.
pub fn generate_knight_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    any_pins: BitBoard,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let mut pcs = pos.n & us & !any_pins;
    while let Some(src) = pcs.pop_some_lsb() {
        let mut sqrs = knight_moves(src) & !us;
        while let Some(dst) = sqrs.pop_some_lsb() {
            stack.push(Move::new(PieceType::N, src, dst));
        }
    }
}

/// Counting dual of
/// [`generate_knight_moves`](fn.generate_knight_moves.html).
pub fn count_knight_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, any_pins: BitBoard) -> u64 {
    let us = P::us(pos.w, occ);
    let mut count = 0;
    let mut pcs = pos.n & us & !any_pins;
    while let Some(src) = pcs.pop_some_lsb() {
        count += (knight_moves(src) & !us).count_bits() as u64;
    }
    count
}

// ---------------------------------------------------------------------
// sliders

/// Generates bishop moves. A diagonally pinned bishop keeps its pin axis;
/// one pinned on a rank or file cannot move.
pub fn generate_bishop_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let mut pcs = pos.bq & !pos.rq & us & !(pins.sn | pins.we);
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let mut sqrs = if ((pins.senw | pins.swne) & src_bb).is_empty() {
            bishop_moves(occ, src)
        } else if (pins.senw & src_bb).is_not_empty() {
            senw_attacks(src, occ)
        } else {
            swne_attacks(src, occ)
        };
        sqrs &= !us;
        while let Some(dst) = sqrs.pop_some_lsb() {
            stack.push(Move::new(PieceType::B, src, dst));
        }
    }
}

/// Counting dual of
/// [`generate_bishop_moves`](fn.generate_bishop_moves.html).
pub fn count_bishop_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, pins: &Pins) -> u64 {
    let us = P::us(pos.w, occ);
    let mut count = 0;
    let mut pcs = pos.bq & !pos.rq & us & !(pins.sn | pins.we);
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let sqrs = if ((pins.senw | pins.swne) & src_bb).is_empty() {
            bishop_moves(occ, src)
        } else if (pins.senw & src_bb).is_not_empty() {
            senw_attacks(src, occ)
        } else {
            swne_attacks(src, occ)
        };
        count += (sqrs & !us).count_bits() as u64;
    }
    count
}

/// Generates rook moves. A rank- or file-pinned rook keeps its pin axis;
/// one pinned diagonally cannot move.
pub fn generate_rook_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let mut pcs = pos.rq & !pos.bq & us & !(pins.senw | pins.swne);
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let mut sqrs = if ((pins.sn | pins.we) & src_bb).is_empty() {
            rook_moves(occ, src)
        } else if (pins.sn & src_bb).is_not_empty() {
            sn_attacks(src, occ)
        } else {
            we_attacks(src, occ)
        };
        sqrs &= !us;
        while let Some(dst) = sqrs.pop_some_lsb() {
            stack.push(Move::new(PieceType::R, src, dst));
        }
    }
}

/// Counting dual of [`generate_rook_moves`](fn.generate_rook_moves.html).
pub fn count_rook_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, pins: &Pins) -> u64 {
    let us = P::us(pos.w, occ);
    let mut count = 0;
    let mut pcs = pos.rq & !pos.bq & us & !(pins.senw | pins.swne);
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let sqrs = if ((pins.sn | pins.we) & src_bb).is_empty() {
            rook_moves(occ, src)
        } else if (pins.sn & src_bb).is_not_empty() {
            sn_attacks(src, occ)
        } else {
            we_attacks(src, occ)
        };
        count += (sqrs & !us).count_bits() as u64;
    }
    count
}

/// Generates queen moves. A pinned queen keeps exactly its pin axis.
pub fn generate_queen_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let any = pins.any();
    let mut pcs = pos.bq & pos.rq & us;
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let mut sqrs = if (any & src_bb).is_empty() {
            bishop_moves(occ, src) | rook_moves(occ, src)
        } else if (pins.sn & src_bb).is_not_empty() {
            sn_attacks(src, occ)
        } else if (pins.we & src_bb).is_not_empty() {
            we_attacks(src, occ)
        } else if (pins.swne & src_bb).is_not_empty() {
            swne_attacks(src, occ)
        } else {
            senw_attacks(src, occ)
        };
        sqrs &= !us;
        while let Some(dst) = sqrs.pop_some_lsb() {
            stack.push(Move::new(PieceType::Q, src, dst));
        }
    }
}

/// Counting dual of [`generate_queen_moves`](fn.generate_queen_moves.html).
pub fn count_queen_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, pins: &Pins) -> u64 {
    let us = P::us(pos.w, occ);
    let any = pins.any();
    let mut count = 0;
    let mut pcs = pos.bq & pos.rq & us;
    while let Some(src) = pcs.pop_some_lsb() {
        let src_bb = src.to_bb();
        let sqrs = if (any & src_bb).is_empty() {
            bishop_moves(occ, src) | rook_moves(occ, src)
        } else if (pins.sn & src_bb).is_not_empty() {
            sn_attacks(src, occ)
        } else if (pins.we & src_bb).is_not_empty() {
            we_attacks(src, occ)
        } else if (pins.swne & src_bb).is_not_empty() {
            swne_attacks(src, occ)
        } else {
            senw_attacks(src, occ)
        };
        count += (sqrs & !us).count_bits() as u64;
    }
    count
}

// ---------------------------------------------------------------------
// king

/// Generates king steps into squares that are neither own-occupied nor in
/// the protection area.
pub fn generate_king_moves<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let src = (pos.k & us).to_sq();
    let mut sqrs = king_moves(src) & !us & !p_area;
    while let Some(dst) = sqrs.pop_some_lsb() {
        stack.push(Move::new(PieceType::K, src, dst));
    }
}

/// Counting dual of [`generate_king_moves`](fn.generate_king_moves.html).
pub fn count_king_moves<P: PlayerTrait>(pos: &Position, occ: BitBoard, p_area: BitBoard) -> u64 {
    let us = P::us(pos.w, occ);
    let src = (pos.k & us).to_sq();
    (king_moves(src) & !us & !p_area).count_bits() as u64
}

/// Generates castling, encoded as the king's two-step move. A castle
/// requires the right to be present, the path to be empty, and the king's
/// square plus every transit square to be out of the protection area.
pub fn generate_castling<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    stack: &mut MoveStack,
) {
    let rights = pos.castle_rights();
    if rights.contains(P::CASTLE_SHORT_RIGHT)
        && (p_area & P::CASTLE_SHORT_ATT).is_empty()
        && (occ & P::CASTLE_SHORT_OCC).is_empty()
    {
        stack.push(Move::new(PieceType::K, P::KING_START, P::CASTLE_SHORT_DST));
    }
    if rights.contains(P::CASTLE_LONG_RIGHT)
        && (p_area & P::CASTLE_LONG_ATT).is_empty()
        && (occ & P::CASTLE_LONG_OCC).is_empty()
    {
        stack.push(Move::new(PieceType::K, P::KING_START, P::CASTLE_LONG_DST));
    }
}

/// Counting dual of [`generate_castling`](fn.generate_castling.html).
pub fn count_castling<P: PlayerTrait>(pos: &Position, occ: BitBoard, p_area: BitBoard) -> u64 {
    let rights = pos.castle_rights();
    let mut count = 0;
    if rights.contains(P::CASTLE_SHORT_RIGHT)
        && (p_area & P::CASTLE_SHORT_ATT).is_empty()
        && (occ & P::CASTLE_SHORT_OCC).is_empty()
    {
        count += 1;
    }
    if rights.contains(P::CASTLE_LONG_RIGHT)
        && (p_area & P::CASTLE_LONG_ATT).is_empty()
        && (occ & P::CASTLE_LONG_OCC).is_empty()
    {
        count += 1;
    }
    count
}

// ---------------------------------------------------------------------
// check evasions

/// Generates the restricted move set of a position in check: all legal
/// king moves, and against a single checker also its captures and, for a
/// checking slider, interpositions. Double check allows king moves only.
pub fn generate_evasions<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    checkers: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    debug_assert!(checkers.is_not_empty());
    generate_king_moves::<P>(pos, occ, p_area, stack);

    if !checkers.more_than_one() {
        let csq = checkers.to_sq();
        generate_moves_to::<P>(pos, csq, occ, pins, stack);
        if (checkers & (pos.bq | pos.rq)).is_not_empty() {
            generate_moves_in_between::<P>(pos, csq, occ, pins, stack);
        }
    }
}

/// Counting dual of [`generate_evasions`](fn.generate_evasions.html).
pub fn count_evasions<P: PlayerTrait>(
    pos: &Position,
    occ: BitBoard,
    p_area: BitBoard,
    checkers: BitBoard,
    pins: &Pins,
) -> u64 {
    debug_assert!(checkers.is_not_empty());
    let mut count = count_king_moves::<P>(pos, occ, p_area);

    if !checkers.more_than_one() {
        let csq = checkers.to_sq();
        count += count_moves_to::<P>(pos, csq, occ, pins);
        if (checkers & (pos.bq | pos.rq)).is_not_empty() {
            count += count_moves_in_between::<P>(pos, csq, occ, pins);
        }
    }
    count
}

/// Generates every non-king move landing on `dst`: captures when the square
/// is occupied, blocks (including pawn double pushes and promotions) when
/// it is empty, and the en-passant capture of a double-pushed checker.
/// King arrivals are excluded; they are generated as king moves.
pub fn generate_moves_to<P: PlayerTrait>(
    pos: &Position,
    dst: SQ,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let pawns = pos.p & us;
    let any = pins.any();
    let ok_sn = !any | pins.sn;
    let ok_senw = !any | pins.senw;
    let ok_swne = !any | pins.swne;
    let dst_bb = dst.to_bb();
    let is_capture = (occ & dst_bb).is_not_empty();

    if is_capture {
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down_senw(dst_bb) & ok_senw).is_not_empty() {
            stack.push(Move::new(PieceType::P, P::down_senw(dst), dst));
        }
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down_swne(dst_bb) & ok_swne).is_not_empty() {
            stack.push(Move::new(PieceType::P, P::down_swne(dst), dst));
        }

        // the target may be a just-double-pushed pawn, capturable en passant
        if pos.ep_valid() && (dst_bb & pos.p & P::EP_PAWN_RANK).is_not_empty() {
            let ep = pos.ep_square();
            if P::down(ep) == dst {
                let ep_bb = ep.to_bb();
                if (pawns & P::shift_down_senw(ep_bb) & ok_senw).is_not_empty() {
                    stack.push(Move::new(PieceType::P, P::down_senw(ep), ep));
                }
                if (pawns & P::shift_down_swne(ep_bb) & ok_swne).is_not_empty() {
                    stack.push(Move::new(PieceType::P, P::down_swne(ep), ep));
                }
            }
        }

        if (pawns & P::PROMO_SRC_RANK & P::shift_down_senw(dst_bb) & ok_senw).is_not_empty() {
            push_promotions(stack, P::down_senw(dst), dst);
        }
        if (pawns & P::PROMO_SRC_RANK & P::shift_down_swne(dst_bb) & ok_swne).is_not_empty() {
            push_promotions(stack, P::down_swne(dst), dst);
        }
    } else {
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down(dst_bb) & ok_sn).is_not_empty() {
            stack.push(Move::new(PieceType::P, P::down(dst), dst));
        }
        if (pawns
            & P::DOUBLE_SRC_RANK
            & P::shift_down(P::shift_down(dst_bb))
            & P::shift_down(!occ)
            & ok_sn)
            .is_not_empty()
        {
            stack.push(Move::new(PieceType::P, P::down(P::down(dst)), dst));
        }
        if (pawns & P::PROMO_SRC_RANK & P::shift_down(dst_bb) & ok_sn).is_not_empty() {
            push_promotions(stack, P::down(dst), dst);
        }
    }

    let mut pcs = pos.n & us & knight_moves(dst) & !any;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::N, src, dst));
    }

    let swne = swne_attacks(dst, occ);
    let senw = senw_attacks(dst, occ);
    let we = we_attacks(dst, occ);
    let sn = sn_attacks(dst, occ);

    let bishops = pos.bq & !pos.rq & us;
    let mut pcs = bishops & swne & ok_swne;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::B, src, dst));
    }
    let mut pcs = bishops & senw & ok_senw;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::B, src, dst));
    }

    let rooks = pos.rq & !pos.bq & us;
    let mut pcs = rooks & we & (!any | pins.we);
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::R, src, dst));
    }
    let mut pcs = rooks & sn & ok_sn;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::R, src, dst));
    }

    let queens = pos.bq & pos.rq & us;
    let mut pcs = queens & swne & ok_swne;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::Q, src, dst));
    }
    let mut pcs = queens & senw & ok_senw;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::Q, src, dst));
    }
    let mut pcs = queens & we & (!any | pins.we);
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::Q, src, dst));
    }
    let mut pcs = queens & sn & ok_sn;
    while let Some(src) = pcs.pop_some_lsb() {
        stack.push(Move::new(PieceType::Q, src, dst));
    }

    // king arrivals are generated as king moves
}

/// Counting dual of [`generate_moves_to`](fn.generate_moves_to.html).
pub fn count_moves_to<P: PlayerTrait>(pos: &Position, dst: SQ, occ: BitBoard, pins: &Pins) -> u64 {
    let us = P::us(pos.w, occ);
    let pawns = pos.p & us;
    let any = pins.any();
    let ok_sn = !any | pins.sn;
    let ok_senw = !any | pins.senw;
    let ok_swne = !any | pins.swne;
    let dst_bb = dst.to_bb();
    let is_capture = (occ & dst_bb).is_not_empty();

    let mut count: u64 = 0;

    if is_capture {
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down_senw(dst_bb) & ok_senw).is_not_empty() {
            count += 1;
        }
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down_swne(dst_bb) & ok_swne).is_not_empty() {
            count += 1;
        }

        if pos.ep_valid() && (dst_bb & pos.p & P::EP_PAWN_RANK).is_not_empty() {
            let ep = pos.ep_square();
            if P::down(ep) == dst {
                let ep_bb = ep.to_bb();
                if (pawns & P::shift_down_senw(ep_bb) & ok_senw).is_not_empty() {
                    count += 1;
                }
                if (pawns & P::shift_down_swne(ep_bb) & ok_swne).is_not_empty() {
                    count += 1;
                }
            }
        }

        if (pawns & P::PROMO_SRC_RANK & P::shift_down_senw(dst_bb) & ok_senw).is_not_empty() {
            count += 4;
        }
        if (pawns & P::PROMO_SRC_RANK & P::shift_down_swne(dst_bb) & ok_swne).is_not_empty() {
            count += 4;
        }
    } else {
        if (pawns & !P::PROMO_SRC_RANK & P::shift_down(dst_bb) & ok_sn).is_not_empty() {
            count += 1;
        }
        if (pawns
            & P::DOUBLE_SRC_RANK
            & P::shift_down(P::shift_down(dst_bb))
            & P::shift_down(!occ)
            & ok_sn)
            .is_not_empty()
        {
            count += 1;
        }
        if (pawns & P::PROMO_SRC_RANK & P::shift_down(dst_bb) & ok_sn).is_not_empty() {
            count += 4;
        }
    }

    count += (pos.n & us & knight_moves(dst) & !any).count_bits() as u64;

    let swne = swne_attacks(dst, occ);
    let senw = senw_attacks(dst, occ);
    let we = we_attacks(dst, occ);
    let sn = sn_attacks(dst, occ);

    let bishops = pos.bq & !pos.rq & us;
    count += (bishops & swne & ok_swne).count_bits() as u64;
    count += (bishops & senw & ok_senw).count_bits() as u64;

    let rooks = pos.rq & !pos.bq & us;
    count += (rooks & we & (!any | pins.we)).count_bits() as u64;
    count += (rooks & sn & ok_sn).count_bits() as u64;

    let queens = pos.bq & pos.rq & us;
    count += (queens & swne & ok_swne).count_bits() as u64;
    count += (queens & senw & ok_senw).count_bits() as u64;
    count += (queens & we & (!any | pins.we)).count_bits() as u64;
    count += (queens & sn & ok_sn).count_bits() as u64;

    count
}

/// Generates every move landing strictly between the king and a checking
/// slider.
pub fn generate_moves_in_between<P: PlayerTrait>(
    pos: &Position,
    checker: SQ,
    occ: BitBoard,
    pins: &Pins,
    stack: &mut MoveStack,
) {
    let us = P::us(pos.w, occ);
    let ksq = (pos.k & us).to_sq();
    let mut between = between_bb(ksq, checker);
    while let Some(sq) = between.pop_some_lsb() {
        generate_moves_to::<P>(pos, sq, occ, pins, stack);
    }
}

/// Counting dual of
/// [`generate_moves_in_between`](fn.generate_moves_in_between.html).
pub fn count_moves_in_between<P: PlayerTrait>(
    pos: &Position,
    checker: SQ,
    occ: BitBoard,
    pins: &Pins,
) -> u64 {
    let us = P::us(pos.w, occ);
    let ksq = (pos.k & us).to_sq();
    let mut between = between_bb(ksq, checker);
    let mut count = 0;
    while let Some(sq) = between.pop_some_lsb() {
        count += count_moves_to::<P>(pos, sq, occ, pins);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::pins::{pins_and_checkers, protection_area};
    use crate::core::mono_traits::{BlackType, WhiteType};
    use crate::core::Player;

    fn generate(pos: &Position) -> Vec<Move> {
        let occ = pos.occupied();
        let mut stack = MoveStack::with_capacity(256);
        match pos.turn() {
            Player::White => {
                let (pins, checkers) = pins_and_checkers::<WhiteType>(pos, occ);
                let p_area = protection_area::<WhiteType>(pos, occ);
                generate_all::<WhiteType>(pos, occ, p_area, checkers, &pins, &mut stack);
            }
            Player::Black => {
                let (pins, checkers) = pins_and_checkers::<BlackType>(pos, occ);
                let p_area = protection_area::<BlackType>(pos, occ);
                generate_all::<BlackType>(pos, occ, p_area, checkers, &pins, &mut stack);
            }
        }
        stack.slice_from(0).to_vec()
    }

    #[test]
    fn start_pos_has_twenty_moves() {
        let moves = generate(&Position::start_pos());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn kiwipete_has_forty_eight_moves() {
        let pos = Position::from_fen(crate::board::fen::KIWIPETE_FEN).unwrap();
        let moves = generate(&pos);
        assert_eq!(moves.len(), 48);
        // both castles are available
        assert!(moves.iter().any(|m| m.to_string() == "e1g1"));
        assert!(moves.iter().any(|m| m.to_string() == "e1c1"));
    }

    #[test]
    fn pinned_knight_cannot_move() {
        let pos = Position::from_fen("4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let moves = generate(&pos);
        assert!(moves.iter().all(|m| m.src() != SQ::E4));
    }

    #[test]
    fn double_check_allows_king_moves_only() {
        // rook on e8 and bishop on h4 both check the king on e1
        let pos = Position::from_fen("4r2k/8/8/8/7b/8/8/4K3 w - - 0 1").unwrap();
        let moves = generate(&pos);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.piece() == PieceType::K));
    }

    #[test]
    fn checkmate_generates_nothing() {
        // back-rank mate
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4r1K1 w - - 0 1").unwrap();
        let moves = generate(&pos);
        assert!(moves.is_empty());
    }

    #[test]
    fn stalemate_generates_nothing() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let moves = generate(&pos);
        assert!(moves.is_empty());
    }

    #[test]
    fn promotions_emit_all_four_pieces() {
        let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let moves = generate(&pos);
        let promos: Vec<&Move> = moves.iter().filter(|m| m.is_promotion()).collect();
        assert_eq!(promos.len(), 4);
        assert!(promos.iter().all(|m| m.src() == SQ::A7 && m.dst() == SQ::A8));
    }

    #[test]
    fn ep_horizontal_discovery_is_illegal() {
        // king and both pawns share rank 5 with a black rook: exd6 e.p.
        // would expose the king
        let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1").unwrap();
        let moves = generate(&pos);
        assert!(moves.iter().all(|m| m.to_string() != "e5d6"));
    }

    #[test]
    fn ep_capture_is_generated_when_legal() {
        let pos = Position::from_fen("8/8/8/3pP3/8/8/8/K6k w - d6 0 1").unwrap();
        let moves = generate(&pos);
        assert!(moves.iter().any(|m| m.to_string() == "e5d6"));
    }
}
