//! Zobrist keys for position hashing.
//!
//! Every square owns eight keys: one per piece kind (pawn, knight, bishop,
//! rook, queen, king), one for the square being occupied by White, and one
//! state key. The state keys do double duty: square 0's state key is the
//! white-to-move key, squares 1 through 4 carry the four castling rights,
//! an en-passant square hashes with its own state key, and square 11's
//! state key marks that an en-passant square is present at all.
//!
//! The table is filled once from a fixed-seed PRNG, so a position hashes
//! identically on every run.

use crate::board::{Position, EP_SQ_MASK, EP_SQ_SHIFT, EP_VALID, TURN_WHITE};
use crate::core::bitboard::BitBoard;
use crate::core::castle_rights::CastleRights;
use crate::core::sq::SQ;
use crate::tools::prng::PRNG;

/// Seed for the Zobrist pseudo-random number generator.
const ZOBRIST_SEED: u64 = 0xACDC_ABBA;

/// The eight keys belonging to one square.
#[derive(Copy, Clone)]
#[repr(align(64))]
pub struct SquareKeys {
    pub p: u64,
    pub n: u64,
    pub b: u64,
    pub r: u64,
    pub q: u64,
    pub k: u64,
    pub w: u64,
    pub state: u64,
}

impl SquareKeys {
    const EMPTY: SquareKeys = SquareKeys {
        p: 0,
        n: 0,
        b: 0,
        r: 0,
        q: 0,
        k: 0,
        w: 0,
        state: 0,
    };
}

static mut KEYS: [SquareKeys; 64] = [SquareKeys::EMPTY; 64];

/// Fills the key table. Called once at startup through
/// `prelude::init_statics`.
#[cold]
pub fn init_zobrist() {
    let mut rng = PRNG::init(ZOBRIST_SEED);
    unsafe {
        for keys in KEYS.iter_mut() {
            keys.p = rng.rand();
            keys.n = rng.rand();
            keys.b = rng.rand();
            keys.r = rng.rand();
            keys.q = rng.rand();
            keys.k = rng.rand();
            keys.w = rng.rand();
            keys.state = rng.rand();
        }
    }
}

/// Returns the keys of a square.
#[inline(always)]
pub fn square_keys(sq: SQ) -> &'static SquareKeys {
    debug_assert!(sq.is_okay());
    unsafe { KEYS.get_unchecked(sq.0 as usize) }
}

/// Returns the white-to-move key.
#[inline(always)]
pub fn z_turn() -> u64 {
    unsafe { KEYS[0].state }
}

/// Returns the combined key of the castling rights set in a state word.
#[inline]
pub fn z_castling(state: u64) -> u64 {
    let rights = CastleRights::from_state(state);
    let mut hash = 0;
    if rights.contains(CastleRights::WHITE_SHORT) {
        hash ^= unsafe { KEYS[1].state };
    }
    if rights.contains(CastleRights::WHITE_LONG) {
        hash ^= unsafe { KEYS[2].state };
    }
    if rights.contains(CastleRights::BLACK_SHORT) {
        hash ^= unsafe { KEYS[3].state };
    }
    if rights.contains(CastleRights::BLACK_LONG) {
        hash ^= unsafe { KEYS[4].state };
    }
    hash
}

/// Returns the en-passant key of a state word: the EP square's own state
/// key plus the EP-present marker, or zero when no EP square is set.
///
/// The EP square is always on rank 6 or rank 3 (squares 16–23 or 40–47),
/// so its state key never collides with the turn, castling or marker keys.
#[inline]
pub fn z_ep(state: u64) -> u64 {
    if state & EP_VALID != 0 {
        let ep = (state >> EP_SQ_SHIFT) & EP_SQ_MASK;
        unsafe { KEYS.get_unchecked(ep as usize).state ^ KEYS[11].state }
    } else {
        0
    }
}

/// Recomputes a position's hash from scratch. The incremental updates in
/// `make` must always agree with this.
pub fn compute(pos: &Position) -> u64 {
    let mut hash = 0;

    let mut fold = |mut pcs: BitBoard, key: fn(&SquareKeys) -> u64| {
        while let Some(sq) = pcs.pop_some_lsb() {
            hash ^= key(square_keys(sq));
        }
    };

    fold(pos.p, |k| k.p);
    fold(pos.n, |k| k.n);
    fold(pos.bq & !pos.rq, |k| k.b);
    fold(pos.rq & !pos.bq, |k| k.r);
    fold(pos.bq & pos.rq, |k| k.q);
    fold(pos.k, |k| k.k);
    fold(pos.w, |k| k.w);

    if pos.state & TURN_WHITE != 0 {
        hash ^= z_turn();
    }
    hash ^= z_castling(pos.state);
    hash ^= z_ep(pos.state);

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::prelude::init_statics;

    #[test]
    fn state_deltas_are_self_inverse() {
        init_statics();
        let with_rights: u64 = 0b11110;
        let no_rights: u64 = 0;
        let delta = z_castling(with_rights) ^ z_castling(no_rights);
        assert_eq!(delta, z_castling(with_rights));
        assert_ne!(z_castling(with_rights), 0);

        let ep_state = EP_VALID | (20 << EP_SQ_SHIFT);
        assert_ne!(z_ep(ep_state), 0);
        assert_eq!(z_ep(0), 0);
        assert_ne!(z_ep(ep_state), z_ep(EP_VALID | (21 << EP_SQ_SHIFT)));
    }

    #[test]
    fn start_pos_hash_is_stable() {
        init_statics();
        let a = compute(&crate::board::Position::start_pos());
        let b = compute(&crate::board::Position::start_pos());
        assert_eq!(a, b);
        assert_ne!(a, 0);
    }
}
