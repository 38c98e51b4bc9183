//! The work-stealing worker pool and the splitting perft recursion.
//!
//! A [`PerftPool`] owns one queue and one thread per worker. The submitting
//! thread drops the root work item into worker 0's queue, flips the run
//! state to `Running`, and polls the root result's outstanding counter.
//! Workers pop their own queue head first; when it is empty they try one
//! uniformly random peer, and yield if that fails too.
//!
//! While recursing, a worker that is still above
//! [`MIN_WORK_ITEM_DEPTH`] does not loop over its moves sequentially.
//! Instead it pushes one work item per child onto its own queue head —
//! under a single lock, remembering the pre-push head as a marker — and
//! then drains items back while the marker guards it from wandering onto
//! older work. Anything it does not get to was stolen, so it busy-waits on
//! the sub-tree's outstanding counter before folding the result. At or
//! below the threshold the worker finishes the sub-tree itself with the
//! sequential, table-assisted recursion.
//!
//! [`PerftPool`]: struct.PerftPool.html
//! [`MIN_WORK_ITEM_DEPTH`]: ../consts/constant.MIN_WORK_ITEM_DEPTH.html

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use blitzperft::board::movegen::generate_all;
use blitzperft::board::pins::{pins_and_checkers, protection_area};
use blitzperft::core::mono_traits::{BlackType, PlayerTrait, WhiteType};
use blitzperft::tools::stats;
use blitzperft::{
    make, perft_into, MoveStack, Player, Position, TranspositionTable, MOVE_STACK_CAPACITY,
};

use crate::consts::{MAX_WORKER_THREADS, MAX_WORK_QUEUE_SIZE, MIN_WORK_ITEM_DEPTH, STEAL_RNG_SEED};
use crate::queue::{WorkItem, WorkQueue, WorkResult};

/// Lifecycle of the pool: workers spin-yield while `Initializing`, process
/// and steal work while `Running`, and leave their loop on `Exiting`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum RunState {
    Initializing = 0,
    Running = 1,
    Exiting = 2,
}

struct Shared {
    queues: Vec<WorkQueue>,
    state: AtomicU8,
    tt: Option<Arc<TranspositionTable>>,
}

impl Shared {
    #[inline]
    fn state(&self) -> RunState {
        match self.state.load(Ordering::Acquire) {
            0 => RunState::Initializing,
            1 => RunState::Running,
            _ => RunState::Exiting,
        }
    }

    #[inline]
    fn set_state(&self, state: RunState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// A fixed pool of perft workers with one work queue each.
///
/// Queues, move stacks and threads are allocated when the pool is built and
/// released when it drops; shutdown is cooperative, workers drain their
/// loop on the next iteration and no in-flight recursion is aborted.
pub struct PerftPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

impl PerftPool {
    /// Spawns `workers` worker threads (clamped to at least one), sharing
    /// an optional transposition table.
    pub fn new(workers: usize, tt: Option<Arc<TranspositionTable>>) -> PerftPool {
        let workers = workers.max(1).min(MAX_WORKER_THREADS);
        let shared = Arc::new(Shared {
            queues: (0..workers)
                .map(|_| WorkQueue::new(MAX_WORK_QUEUE_SIZE))
                .collect(),
            state: AtomicU8::new(RunState::Initializing as u8),
            tt,
        });

        let mut handles = Vec::with_capacity(workers);
        for index in 0..workers {
            let shared = shared.clone();
            let handle = thread::Builder::new()
                .name(format!("blitzperft-worker-{}", index))
                .spawn(move || worker_loop(shared, index))
                .expect("failed to spawn worker thread");
            handles.push(handle);
        }

        PerftPool { shared, handles }
    }

    /// The number of worker threads.
    pub fn workers(&self) -> usize {
        self.shared.queues.len()
    }

    /// Enumerates the leaf count of `pos` at `depth` across the pool,
    /// blocking until the count is complete.
    pub fn perft(&self, pos: &Position, depth: u16) -> u64 {
        if depth == 0 {
            return 1;
        }

        let result = Arc::new(WorkResult::new());
        self.shared.queues[0].push_back(WorkItem {
            pos: *pos,
            depth,
            result: result.clone(),
        });
        self.shared.set_state(RunState::Running);

        while result.work_left() != 0 {
            thread::sleep(Duration::from_millis(5));
        }

        result.count()
    }
}

impl Drop for PerftPool {
    fn drop(&mut self) {
        self.shared.set_state(RunState::Exiting);
        for handle in self.handles.drain(..) {
            handle
                .join()
                .unwrap_or_else(|e| println!("worker thread failed: {:?}", e));
        }
    }
}

fn worker_loop(shared: Arc<Shared>, index: usize) {
    let mut stack = MoveStack::with_capacity(MOVE_STACK_CAPACITY);
    let mut rng = SmallRng::seed_from_u64(STEAL_RNG_SEED + index as u64);
    let workers = shared.queues.len();

    loop {
        match shared.state() {
            RunState::Initializing => thread::yield_now(),
            RunState::Exiting => return,
            RunState::Running => {
                let item = shared.queues[index].try_pop_front().or_else(|| {
                    if workers > 1 {
                        // steal from one uniformly random peer
                        let mut victim = rng.gen_range(0..workers - 1);
                        if victim >= index {
                            victim += 1;
                        }
                        shared.queues[victim].try_pop_front()
                    } else {
                        None
                    }
                });
                match item {
                    Some(item) => {
                        let count = perft_split(&item.pos, item.depth, &mut stack, &shared, index);
                        item.result.add_count(count);
                        item.result.finish_one();
                    }
                    None => thread::yield_now(),
                }
            }
        }
    }
}

/// The splitting recursion: counts `pos` at `depth`, farming sub-trees out
/// through the worker's queue while above the split threshold.
fn perft_split(
    pos: &Position,
    depth: u16,
    stack: &mut MoveStack,
    shared: &Arc<Shared>,
    index: usize,
) -> u64 {
    if depth == 0 {
        return 1;
    }
    match pos.turn() {
        Player::White => inner_split::<WhiteType>(pos, depth, stack, shared, index),
        Player::Black => inner_split::<BlackType>(pos, depth, stack, shared, index),
    }
}

fn inner_split<P: PlayerTrait>(
    pos: &Position,
    depth: u16,
    stack: &mut MoveStack,
    shared: &Arc<Shared>,
    index: usize,
) -> u64 {
    let occ = pos.occupied();
    let (pins, checkers) = pins_and_checkers::<P>(pos, occ);
    let p_area = protection_area::<P>(pos, occ);

    let base = stack.len();
    generate_all::<P>(pos, occ, p_area, checkers, &pins, stack);

    if depth == 1 {
        let count = (stack.len() - base) as u64;
        stack.truncate(base);
        if count == 0 && checkers.is_not_empty() {
            stats::inc_checkmates();
        }
        return count;
    }

    if stack.len() == base {
        if checkers.is_not_empty() {
            stats::inc_checkmates();
        }
        return 0;
    }

    if depth > MIN_WORK_ITEM_DEPTH {
        let result = Arc::new(WorkResult::new());
        let marker;
        {
            let mut queue = shared.queues[index].lock();
            marker = queue.marker();
            while stack.len() > base {
                let mv = stack.pop();
                queue.push_front(WorkItem {
                    pos: make(pos, mv),
                    depth: depth - 1,
                    result: result.clone(),
                });
            }
        }

        // drain our own batch; the marker keeps us off anyone else's items
        while let Some(item) = shared.queues[index].try_pop_front_before(marker) {
            debug_assert!(Arc::ptr_eq(&item.result, &result));
            let count = perft_split(&item.pos, item.depth, stack, shared, index);
            item.result.add_count(count);
            item.result.finish_one();
        }

        // whatever is missing was stolen; wait for the thieves to retire it
        while result.work_left() != 0 {
            thread::yield_now();
        }

        result.count()
    } else {
        let tt = shared.tt.as_deref();
        let mut count: u64 = 0;
        while stack.len() > base {
            let mv = stack.pop();
            count += perft_into(&make(pos, mv), depth - 1, stack, tt);
        }
        count
    }
}
