//! Pin and check analysis, and the protection area.
//!
//! From the side-to-move's king, [`pins_and_checkers`] finds every enemy
//! piece giving check and classifies own pieces pinned to the king along
//! one of the four axes: the file (south–north), the rank (west–east) and
//! the two diagonals. A piece sits in at most one axis set.
//!
//! [`protection_area`] is the set of squares attacked by the side *not* to
//! move, computed with the defending king removed from the occupancy so
//! that the king cannot step away along the line of a checking slider. It
//! masks illegal king destinations and forbids castling through or into
//! attack.
//!
//! [`pins_and_checkers`]: fn.pins_and_checkers.html
//! [`protection_area`]: fn.protection_area.html

use crate::board::Position;
use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::PlayerTrait;
use crate::helper::prelude::{bishop_moves, king_moves, knight_moves, rays, rook_moves};

/// Own pieces pinned to the king, split by the axis they are pinned along.
/// A pinned piece may only move on its axis.
#[derive(Copy, Clone, Default, Debug)]
pub struct Pins {
    /// Pinned along the file (south–north) axis.
    pub sn: BitBoard,
    /// Pinned along the rank (west–east) axis.
    pub we: BitBoard,
    /// Pinned along the southwest–northeast diagonal.
    pub swne: BitBoard,
    /// Pinned along the southeast–northwest diagonal.
    pub senw: BitBoard,
}

impl Pins {
    /// Union of all four axis sets.
    #[inline(always)]
    pub fn any(&self) -> BitBoard {
        self.sn | self.we | self.swne | self.senw
    }
}

// Walks one king ray: the first blocker may be a checking slider; an own
// first blocker backed by an enemy slider on the same ray is pinned.
macro_rules! scan_ray {
    ($ray:expr, $scan:ident, $sliders:expr, $occ:expr, $us:expr,
     $axis:expr, $checkers:expr) => {
        let ray: BitBoard = $ray;
        if (ray & $sliders).is_not_empty() {
            let blockers = ray & $occ;
            let first = blockers.$scan().to_bb();
            $checkers |= first & $sliders;
            let pinned = first & $us;
            if pinned.is_not_empty() {
                let rest = blockers & !pinned;
                if rest.is_not_empty() && (rest.$scan().to_bb() & $sliders).is_not_empty() {
                    $axis |= pinned;
                }
            }
        }
    };
}

/// Finds the enemy pieces checking the side-to-move's king and the own
/// pieces pinned to it, in a single pass over the king's rays.
///
/// Pawns and knights are tested by pattern; for each ray the first blocker
/// is either a checker (enemy slider of the compatible type) or, when own
/// and backed by such a slider, a pinned piece.
pub fn pins_and_checkers<P: PlayerTrait>(pos: &Position, occ: BitBoard) -> (Pins, BitBoard) {
    let us = P::us(pos.w, occ);
    let them = occ & !us;
    let king = pos.k & us;
    let ksq = king.to_sq();

    let mut checkers =
        pos.p & them & (P::shift_up_senw(king) | P::shift_up_swne(king));
    checkers |= pos.n & them & knight_moves(ksq);

    let diag = pos.bq & them;
    let orth = pos.rq & them;
    let mut pins = Pins::default();

    let r = rays(ksq);
    scan_ray!(BitBoard(r.se), bit_scan_forward, diag, occ, us, pins.senw, checkers);
    scan_ray!(BitBoard(r.nw), bit_scan_reverse, diag, occ, us, pins.senw, checkers);
    scan_ray!(BitBoard(r.sw), bit_scan_forward, diag, occ, us, pins.swne, checkers);
    scan_ray!(BitBoard(r.ne), bit_scan_reverse, diag, occ, us, pins.swne, checkers);
    scan_ray!(BitBoard(r.s), bit_scan_forward, orth, occ, us, pins.sn, checkers);
    scan_ray!(BitBoard(r.n), bit_scan_reverse, orth, occ, us, pins.sn, checkers);
    scan_ray!(BitBoard(r.e), bit_scan_forward, orth, occ, us, pins.we, checkers);
    scan_ray!(BitBoard(r.w), bit_scan_reverse, orth, occ, us, pins.we, checkers);

    // a king cannot pin or check

    (pins, checkers)
}

/// The squares attacked by the side not to move, with the defending king
/// removed from the occupancy.
pub fn protection_area<P: PlayerTrait>(pos: &Position, occ: BitBoard) -> BitBoard {
    let us = P::us(pos.w, occ);
    let them = occ & !us;

    // enemy pawns attack towards our side
    let their_pawns = pos.p & them;
    let mut area =
        <P::Opp>::shift_up_senw(their_pawns) | <P::Opp>::shift_up_swne(their_pawns);

    let mut pcs = pos.n & them;
    while let Some(sq) = pcs.pop_some_lsb() {
        area |= knight_moves(sq);
    }

    // the defending king doesn't block the sliders' reach
    let occ_no_king = occ ^ (pos.k & us);

    let mut pcs = pos.bq & them;
    while let Some(sq) = pcs.pop_some_lsb() {
        area |= bishop_moves(occ_no_king, sq);
    }

    let mut pcs = pos.rq & them;
    while let Some(sq) = pcs.pop_some_lsb() {
        area |= rook_moves(occ_no_king, sq);
    }

    area |= king_moves((pos.k & them).to_sq());

    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mono_traits::{BlackType, WhiteType};
    use crate::core::sq::SQ;

    #[test]
    fn start_pos_has_no_pins_or_checkers() {
        let pos = Position::start_pos();
        let occ = pos.occupied();
        let (pins, checkers) = pins_and_checkers::<WhiteType>(&pos, occ);
        assert!(pins.any().is_empty());
        assert!(checkers.is_empty());
    }

    #[test]
    fn rook_pin_on_a_file() {
        // black rook on e8 pins the white knight on e4 against the king on e1
        let pos = Position::from_fen("4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let occ = pos.occupied();
        let (pins, checkers) = pins_and_checkers::<WhiteType>(&pos, occ);
        assert!(checkers.is_empty());
        assert_eq!(pins.sn, SQ::E4.to_bb());
        assert!(pins.we.is_empty());
        assert!((pins.swne | pins.senw).is_empty());
    }

    #[test]
    fn bishop_pin_on_a_diagonal() {
        // black bishop on a8 pins the white pawn on d5 against the king on g2
        let pos = Position::from_fen("b6k/8/8/3P4/8/8/6K1/8 w - - 0 1").unwrap();
        let occ = pos.occupied();
        let (pins, checkers) = pins_and_checkers::<WhiteType>(&pos, occ);
        assert!(checkers.is_empty());
        assert_eq!(pins.senw, SQ::D5.to_bb());
        assert!(pins.any().count_bits() == 1);
    }

    #[test]
    fn checker_detection() {
        // white queen on h4 checks the black king on e7 along the diagonal
        let pos = Position::from_fen("8/4k3/8/8/7Q/8/8/4K3 b - - 0 1").unwrap();
        let occ = pos.occupied();
        let (pins, checkers) = pins_and_checkers::<BlackType>(&pos, occ);
        assert!(pins.any().is_empty());
        assert_eq!(checkers, SQ::H4.to_bb());
    }

    #[test]
    fn pawn_and_knight_checkers() {
        // white pawn on d6 and knight on f5 both check the black king on e7
        let pos = Position::from_fen("8/4k3/3P4/5N2/8/8/8/4K3 b - - 0 1").unwrap();
        let occ = pos.occupied();
        let (_, checkers) = pins_and_checkers::<BlackType>(&pos, occ);
        assert_eq!(checkers, SQ::D6.to_bb() | SQ::F5.to_bb());
    }

    #[test]
    fn protection_area_sees_through_the_king() {
        // black rook on e8; the white king on e4 cannot retreat to e3
        let pos = Position::from_fen("4r2k/8/8/8/4K3/8/8/8 w - - 0 1").unwrap();
        let occ = pos.occupied();
        let area = protection_area::<WhiteType>(&pos, occ);
        assert!((area & SQ::E3.to_bb()).is_not_empty());
        assert!((area & SQ::E5.to_bb()).is_not_empty());
        assert!((area & SQ::D4.to_bb()).is_empty());
    }
}
