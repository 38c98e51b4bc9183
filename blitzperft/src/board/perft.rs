//! perft, or Performance Test, Move Path Enumeration: counts the exact
//! number of leaf nodes reachable by legal move sequences of a fixed
//! length. The counts are absolute and must match the published reference
//! values bit for bit, which makes perft the canonical correctness test for
//! everything between move generation and make.
//!
//! The recursion is monomorphized over the side to move and flips colour
//! through `PlayerTrait::Opp`. At depth 1 it bulk-counts with the counting
//! generators instead of materializing moves, which is where the bulk of
//! the runtime lives. Above [`MIN_HASH_DEPTH`] it probes and fills the
//! optional transposition table.
//!
//! [`MIN_HASH_DEPTH`]: constant.MIN_HASH_DEPTH.html

use crate::board::make::make;
use crate::board::movegen;
use crate::board::pins::{pins_and_checkers, protection_area};
use crate::board::Position;
use crate::core::mono_traits::{BlackType, PlayerTrait, WhiteType};
use crate::core::move_stack::MoveStack;
use crate::core::Player;
use crate::tools::stats;
use crate::tools::tt::TranspositionTable;
use crate::tools::PreFetchable;

/// Minimum depth at which the transposition table is probed and filled.
/// Below it the recompute is cheaper than the memory traffic.
pub const MIN_HASH_DEPTH: u16 = 2;

/// Returns the number of leaf nodes at `depth` from the given position.
pub fn perft(pos: &Position, depth: u16) -> u64 {
    let mut stack = MoveStack::default();
    perft_into(pos, depth, &mut stack, None)
}

/// [`perft`](fn.perft.html) with a transposition table caching sub-tree
/// counts. The result is identical with or without the table.
pub fn perft_with_table(pos: &Position, depth: u16, tt: &TranspositionTable) -> u64 {
    let mut stack = MoveStack::default();
    perft_into(pos, depth, &mut stack, Some(tt))
}

/// Counts leaf nodes using a caller-supplied move stack and an optional
/// transposition table. The stack is returned at its entry length.
pub fn perft_into(
    pos: &Position,
    depth: u16,
    stack: &mut MoveStack,
    tt: Option<&TranspositionTable>,
) -> u64 {
    if depth == 0 {
        return 1;
    }
    match pos.turn() {
        Player::White => inner_perft::<WhiteType>(pos, depth, stack, tt),
        Player::Black => inner_perft::<BlackType>(pos, depth, stack, tt),
    }
}

fn inner_perft<P: PlayerTrait>(
    pos: &Position,
    depth: u16,
    stack: &mut MoveStack,
    tt: Option<&TranspositionTable>,
) -> u64 {
    if depth >= MIN_HASH_DEPTH {
        if let Some(table) = tt {
            stats::inc_hash_probes();
            if let Some(count) = table.find(pos.hash, depth) {
                stats::inc_hash_hits();
                return count;
            }
        }
    }

    let occ = pos.occupied();
    let (pins, checkers) = pins_and_checkers::<P>(pos, occ);
    let p_area = protection_area::<P>(pos, occ);

    // bulk-count the leaf frontier without materializing any moves
    if depth == 1 {
        let count = movegen::count_all::<P>(pos, occ, p_area, checkers, &pins);
        if count == 0 && checkers.is_not_empty() {
            stats::inc_checkmates();
        }
        return count;
    }

    let base = stack.len();
    movegen::generate_all::<P>(pos, occ, p_area, checkers, &pins, stack);
    if stack.len() == base {
        if checkers.is_not_empty() {
            stats::inc_checkmates();
        }
        return 0;
    }

    let mut count: u64 = 0;
    while stack.len() > base {
        let mv = stack.pop();
        let next = make(pos, mv);
        if let Some(table) = tt {
            if depth - 1 >= MIN_HASH_DEPTH {
                table.prefetch(next.hash);
            }
        }
        count += inner_perft::<P::Opp>(&next, depth - 1, stack, tt);
    }

    if depth >= MIN_HASH_DEPTH {
        if let Some(table) = tt {
            stats::inc_hash_write_tries();
            if table.insert(pos.hash, depth, count) {
                stats::inc_hash_writes();
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen::*;

    #[test]
    fn start_pos_perft() {
        let pos = Position::start_pos();
        assert_eq!(1, perft(&pos, 0));
        assert_eq!(20, perft(&pos, 1));
        assert_eq!(400, perft(&pos, 2));
        assert_eq!(8902, perft(&pos, 3));
        assert_eq!(197_281, perft(&pos, 4));
        assert_eq!(4_865_609, perft(&pos, 5));
    }

    // Passes, but slow enough to keep out of the default run.
    #[ignore]
    #[test]
    fn start_pos_perft_deep() {
        let pos = Position::start_pos();
        assert_eq!(119_060_324, perft(&pos, 6));
    }

    #[test]
    fn perft_kiwipete() {
        let pos = Position::from_fen(KIWIPETE_FEN).unwrap();
        assert_eq!(48, perft(&pos, 1));
        assert_eq!(2039, perft(&pos, 2));
        assert_eq!(97_862, perft(&pos, 3));
        assert_eq!(4_085_603, perft(&pos, 4));
    }

    #[ignore]
    #[test]
    fn perft_kiwipete_deep() {
        let pos = Position::from_fen(KIWIPETE_FEN).unwrap();
        assert_eq!(193_690_690, perft(&pos, 5));
    }

    #[test]
    fn perft_endgame() {
        let pos = Position::from_fen(ENDGAME_FEN).unwrap();
        assert_eq!(14, perft(&pos, 1));
        assert_eq!(191, perft(&pos, 2));
        assert_eq!(2812, perft(&pos, 3));
        assert_eq!(43_238, perft(&pos, 4));
        assert_eq!(674_624, perft(&pos, 5));
        assert_eq!(11_030_083, perft(&pos, 6));
    }

    #[test]
    fn perft_ep_check() {
        let pos = Position::from_fen(EP_CHECK_FEN).unwrap();
        assert_eq!(6, perft(&pos, 1));
        assert_eq!(264, perft(&pos, 2));
        assert_eq!(9467, perft(&pos, 3));
        assert_eq!(422_333, perft(&pos, 4));
    }

    #[test]
    fn perft_position_5() {
        let pos = Position::from_fen(POSITION_5_FEN).unwrap();
        assert_eq!(44, perft(&pos, 1));
        assert_eq!(1486, perft(&pos, 2));
        assert_eq!(62_379, perft(&pos, 3));
        assert_eq!(2_103_487, perft(&pos, 4));
    }

    #[test]
    fn perft_position_6() {
        let pos = Position::from_fen(POSITION_6_FEN).unwrap();
        assert_eq!(46, perft(&pos, 1));
        assert_eq!(2079, perft(&pos, 2));
        assert_eq!(89_890, perft(&pos, 3));
        assert_eq!(3_894_594, perft(&pos, 4));
    }

    #[test]
    fn mirrored_positions_count_the_same() {
        for fen in STANDARD_PERFT_FENS.iter() {
            let pos = Position::from_fen(fen).unwrap();
            let flipped = pos.flipped();
            for depth in 1..=3 {
                assert_eq!(
                    perft(&pos, depth),
                    perft(&flipped, depth),
                    "{} at depth {}",
                    fen,
                    depth
                );
            }
        }
    }

    #[test]
    fn table_does_not_change_counts() {
        let tt = TranspositionTable::new(16);
        for fen in STANDARD_PERFT_FENS.iter() {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(perft(&pos, 4), perft_with_table(&pos, 4, &tt), "{}", fen);
            // once warm, the cached answer must still be the real one
            assert_eq!(perft(&pos, 4), perft_with_table(&pos, 4, &tt), "{}", fen);
        }
    }
}
