//! Default functions for accessing the statically computed tables.
//!
//! # Safety
//!
//! The lookups assume [`init_statics`] has run. Position constructors call
//! it; code bypassing them must call it once itself.
//!
//! [`init_statics`]: fn.init_statics.html

use super::boards;
use super::magic;
use super::zobrist;

use crate::core::bitboard::BitBoard;
use crate::core::sq::SQ;

use std::sync::atomic::{compiler_fence, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the static lookup tables. Guaranteed to only run once.
#[cold]
pub fn init_statics() {
    INIT.call_once(|| {
        compiler_fence(Ordering::SeqCst);
        zobrist::init_zobrist();
        magic::init_magics();
        boards::init_boards();
        compiler_fence(Ordering::SeqCst);
    });
}

// BOARD FUNCTIONS

/// Generate Knight moves `BitBoard` from a source square.
#[inline(always)]
pub fn knight_moves(sq: SQ) -> BitBoard {
    boards::knight_moves(sq)
}

/// Generate King moves `BitBoard` from a source square.
#[inline(always)]
pub fn king_moves(sq: SQ) -> BitBoard {
    boards::king_moves(sq)
}

/// The eight directional ray masks leaving a square.
#[inline(always)]
pub fn rays(sq: SQ) -> &'static boards::Rays {
    boards::rays(sq)
}

/// Get the `BitBoard` of squares strictly between two squares, if they
/// share a rank, file or diagonal.
#[inline(always)]
pub fn between_bb(sq_one: SQ, sq_two: SQ) -> BitBoard {
    boards::between_bb(sq_one, sq_two)
}

// MAGIC FUNCTIONS

/// Generate Bishop moves `BitBoard` from a bishop square and all occupied
/// squares on the board. The resulting `BitBoard` includes captures of both
/// sides' pieces and must be AND'd with the inverse of the moving player's
/// occupancy.
#[inline(always)]
pub fn bishop_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::bishop_attacks(occupied.0, sq.0))
}

/// Generate Rook moves `BitBoard` from a rook square and all occupied
/// squares on the board. The resulting `BitBoard` includes captures of both
/// sides' pieces and must be AND'd with the inverse of the moving player's
/// occupancy.
#[inline(always)]
pub fn rook_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::rook_attacks(occupied.0, sq.0))
}

/// Generate Queen moves `BitBoard` from a queen square and all occupied
/// squares on the board.
#[inline(always)]
pub fn queen_moves(occupied: BitBoard, sq: SQ) -> BitBoard {
    debug_assert!(sq.is_okay());
    BitBoard(magic::rook_attacks(occupied.0, sq.0) | magic::bishop_attacks(occupied.0, sq.0))
}

// AXIS FUNCTIONS

/// Sliding attacks restricted to the file axis.
#[inline(always)]
pub fn sn_attacks(sq: SQ, occupied: BitBoard) -> BitBoard {
    boards::sn_attacks(sq, occupied)
}

/// Sliding attacks restricted to the rank axis.
#[inline(always)]
pub fn we_attacks(sq: SQ, occupied: BitBoard) -> BitBoard {
    boards::we_attacks(sq, occupied)
}

/// Sliding attacks restricted to the southwest–northeast diagonal.
#[inline(always)]
pub fn swne_attacks(sq: SQ, occupied: BitBoard) -> BitBoard {
    boards::swne_attacks(sq, occupied)
}

/// Sliding attacks restricted to the southeast–northwest diagonal.
#[inline(always)]
pub fn senw_attacks(sq: SQ, occupied: BitBoard) -> BitBoard {
    boards::senw_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_union_is_full_slider() {
        init_statics();
        let occ = BitBoard(0x0024_0010_4200_0810);
        for sq in (0..64u8).map(SQ) {
            assert_eq!(
                swne_attacks(sq, occ) | senw_attacks(sq, occ),
                bishop_moves(occ, sq)
            );
            assert_eq!(sn_attacks(sq, occ) | we_attacks(sq, occ), rook_moves(occ, sq));
        }
    }
}
