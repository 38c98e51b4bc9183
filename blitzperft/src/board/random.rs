//! Random-position generation for fuzzing the move generator.
//!
//! The builder produces positions satisfying the constraints the fuzz
//! suites rely on: at most 16 pieces per side, kings present and not
//! adjacent, no pawn on a back rank, no castling rights or en-passant
//! square, and a side to move that cannot capture the enemy king. Seeded
//! runs are fully deterministic.

use crate::board::pins::pins_and_checkers;
use crate::board::{Position, TURN_WHITE};
use crate::core::bitboard::BitBoard;
use crate::core::mono_traits::{BlackType, WhiteType};
use crate::core::sq::SQ;
use crate::core::Player;
use crate::helper::prelude::init_statics;
use crate::helper::zobrist;
use crate::tools::prng::PRNG;

/// Builder for random, structurally legal positions.
pub struct RandPosition {
    prng: PRNG,
    max_extra_per_side: u8,
}

impl Default for RandPosition {
    /// A builder seeded from the thread-local entropy source.
    fn default() -> RandPosition {
        RandPosition {
            prng: PRNG::init(rand::random::<u64>() | 1),
            max_extra_per_side: 15,
        }
    }
}

impl RandPosition {
    /// Switches the builder to a fixed seed, making its output
    /// reproducible.
    pub fn pseudo_random(mut self, seed: u64) -> Self {
        self.prng = PRNG::init(if seed == 0 { 1 } else { seed });
        self
    }

    /// Caps the number of non-king pieces per side (at most 15).
    pub fn max_extra_pieces(mut self, max: u8) -> Self {
        self.max_extra_per_side = max.min(15);
        self
    }

    /// Returns a single random position.
    pub fn one(mut self) -> Position {
        self.go()
    }

    /// Returns a vector of `amount` random positions.
    pub fn many(mut self, amount: usize) -> Vec<Position> {
        let mut positions = Vec::with_capacity(amount);
        for _ in 0..amount {
            positions.push(self.go());
        }
        positions
    }

    fn rand_sq(&mut self) -> SQ {
        SQ((self.prng.rand() % 64) as u8)
    }

    fn go(&mut self) -> Position {
        init_statics();
        loop {
            let mut pos = Position {
                p: BitBoard::EMPTY,
                n: BitBoard::EMPTY,
                bq: BitBoard::EMPTY,
                rq: BitBoard::EMPTY,
                k: BitBoard::EMPTY,
                w: BitBoard::EMPTY,
                state: 0,
                hash: 0,
            };

            // kings first, apart from each other
            let wk = self.rand_sq();
            let bk = loop {
                let sq = self.rand_sq();
                if sq.distance(wk) > 1 {
                    break sq;
                }
            };
            pos.k = wk.to_bb() | bk.to_bb();
            pos.w = wk.to_bb();

            for &player in [Player::White, Player::Black].iter() {
                let extra = (self.prng.rand() % (self.max_extra_per_side as u64 + 1)) as u8;
                for _ in 0..extra {
                    let sq = self.rand_sq();
                    let bb = sq.to_bb();
                    if (pos.occupied() & bb).is_not_empty() {
                        continue;
                    }
                    let rank = sq.rank_idx_of_sq();
                    match self.prng.rand() % 10 {
                        0..=4 => {
                            // no pawns on a back rank
                            if rank == 0 || rank == 7 {
                                continue;
                            }
                            pos.p |= bb;
                        }
                        5 | 6 => pos.n |= bb,
                        7 => pos.bq |= bb,
                        8 => pos.rq |= bb,
                        _ => {
                            pos.bq |= bb;
                            pos.rq |= bb;
                        }
                    }
                    if player == Player::White {
                        pos.w |= bb;
                    }
                }
            }

            if self.prng.rand() & 1 != 0 {
                pos.state |= TURN_WHITE;
            }

            // the idle side's king must not be capturable by the mover
            let occ = pos.occupied();
            let idle_checked = match pos.turn() {
                Player::White => pins_and_checkers::<BlackType>(&pos, occ).1.is_not_empty(),
                Player::Black => pins_and_checkers::<WhiteType>(&pos, occ).1.is_not_empty(),
            };
            if idle_checked {
                continue;
            }

            pos.hash = zobrist::compute(&pos);
            return pos;
        }
    }
}
