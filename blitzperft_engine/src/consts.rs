//! Constant values configuring the parallel search.

/// Nodes deeper than this split their children into work items instead of
/// recursing sequentially; at or below it the worker finishes the sub-tree
/// itself. Together with the queue capacity this bounds the number of live
/// items a worker can ever have queued.
pub const MIN_WORK_ITEM_DEPTH: u16 = 4;

/// Capacity of each worker's deque, in work items.
pub const MAX_WORK_QUEUE_SIZE: usize = 256;

/// Worker-thread count used when `-w` is not given.
pub const DEFAULT_WORKER_THREADS: usize = 8;

/// Upper bound on the worker-thread count.
pub const MAX_WORKER_THREADS: usize = 256;

/// Default transposition-table size, as a log2 of the entry count.
pub const DEFAULT_TABLE_SIZE_EXP: i32 = 26;

/// Base seed of the per-worker steal-victim generators; worker `i` seeds
/// with the base plus its index.
pub const STEAL_RNG_SEED: u64 = 0x1234_5678;
