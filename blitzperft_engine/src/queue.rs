//! Per-worker work queues and the shared completion accounting.
//!
//! Each worker owns one bounded double-ended queue of sub-tree work items,
//! guarded by a mutex. A splitting worker batch-pushes its children at the
//! head under a single lock, remembering the head position as a *marker*;
//! the marker-gated pop then only hands back items pushed by that batch (or
//! a deeper one), so the worker stays on its own sub-tree while thieves pop
//! the oldest items from the other end of its frontier.
//!
//! Instead of wrapped ring indices the queue addresses slots by
//! monotonically increasing sequence numbers; the head sequence only grows,
//! which makes the marker comparison a single `<`.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use blitzperft::Position;

/// Accumulator shared by every work item belonging to one root task:
/// the summed leaf count and the number of still-outstanding items.
///
/// `work_left` reaches zero exactly once, after the root item and every
/// transitive child has retired. The release/acquire pairing on it makes
/// every count addition visible to whoever observes the zero.
#[derive(Default)]
pub struct WorkResult {
    count: AtomicU64,
    work_left: AtomicI64,
}

impl WorkResult {
    pub fn new() -> WorkResult {
        WorkResult::default()
    }

    /// Registers one enqueued item. Called under the owning queue's lock.
    #[inline]
    pub fn begin_one(&self) {
        self.work_left.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds a finished item's leaf count.
    #[inline]
    pub fn add_count(&self, count: u64) {
        self.count.fetch_add(count, Ordering::Relaxed);
    }

    /// Retires one item. Must follow its
    /// [`add_count`](#method.add_count).
    #[inline]
    pub fn finish_one(&self) {
        self.work_left.fetch_sub(1, Ordering::Release);
    }

    /// The number of items still outstanding.
    #[inline]
    pub fn work_left(&self) -> i64 {
        self.work_left.load(Ordering::Acquire)
    }

    /// The accumulated leaf count. Final once
    /// [`work_left`](#method.work_left) returns zero.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// One unit of work: enumerate the sub-tree under `pos` to `depth` more
/// plies and fold the count into `result`.
#[derive(Clone)]
pub struct WorkItem {
    pub pos: Position,
    pub depth: u16,
    pub result: Arc<WorkResult>,
}

/// The mutex-held state of a queue. Exposed so a splitting worker can hold
/// the lock across a whole batch of `push_front`s.
pub struct RingBuf {
    buf: Vec<Option<WorkItem>>,
    front: i64,
    back: i64,
}

impl RingBuf {
    fn with_capacity(capacity: usize) -> RingBuf {
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        RingBuf {
            buf,
            front: 0,
            back: 0,
        }
    }

    #[inline]
    fn slot(&self, seq: i64) -> usize {
        seq.rem_euclid(self.buf.len() as i64) as usize
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        (self.back - self.front) as usize
    }

    /// The current head sequence. Recorded before a batch push to gate
    /// later pops onto the batch.
    #[inline]
    pub fn marker(&self) -> i64 {
        self.front
    }

    /// Enqueues at the head and registers the item with its result.
    ///
    /// The queue going full is a programmer error: the capacity and the
    /// split threshold together bound the live item count.
    pub fn push_front(&mut self, item: WorkItem) {
        item.result.begin_one();
        self.front -= 1;
        let slot = self.slot(self.front);
        debug_assert!(self.buf[slot].is_none());
        self.buf[slot] = Some(item);
        assert!(self.len() <= self.buf.len());
    }

    /// Enqueues at the tail and registers the item with its result.
    pub fn push_back(&mut self, item: WorkItem) {
        item.result.begin_one();
        let slot = self.slot(self.back);
        debug_assert!(self.buf[slot].is_none());
        self.buf[slot] = Some(item);
        self.back += 1;
        assert!(self.len() <= self.buf.len());
    }

    fn pop_front(&mut self) -> Option<WorkItem> {
        if self.front == self.back {
            return None;
        }
        let slot = self.slot(self.front);
        self.front += 1;
        self.buf[slot].take()
    }
}

/// A bounded, mutex-guarded double-ended work queue owned by one worker.
/// Local pops and steals both go through the mutex; it is the only blocking
/// primitive in the scheduler's steady state.
pub struct WorkQueue {
    inner: Mutex<RingBuf>,
}

impl WorkQueue {
    pub fn new(capacity: usize) -> WorkQueue {
        WorkQueue {
            inner: Mutex::new(RingBuf::with_capacity(capacity)),
        }
    }

    /// Locks the queue for a batch of head pushes.
    pub fn lock(&self) -> MutexGuard<'_, RingBuf> {
        self.inner.lock().unwrap()
    }

    /// Enqueues a single item at the tail.
    pub fn push_back(&self, item: WorkItem) {
        self.lock().push_back(item);
    }

    /// Dequeues from the head; `None` when empty. This is also the steal
    /// operation, taking the oldest, coarsest work available.
    pub fn try_pop_front(&self) -> Option<WorkItem> {
        self.lock().pop_front()
    }

    /// Dequeues from the head only while the head has not yet reached
    /// `marker`, i.e. only items pushed after the marker was taken.
    pub fn try_pop_front_before(&self, marker: i64) -> Option<WorkItem> {
        let mut queue = self.lock();
        if queue.front < marker {
            queue.pop_front()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(depth: u16, result: &Arc<WorkResult>) -> WorkItem {
        WorkItem {
            pos: Position::start_pos(),
            depth,
            result: result.clone(),
        }
    }

    #[test]
    fn fifo_from_the_front() {
        let queue = WorkQueue::new(8);
        let result = Arc::new(WorkResult::new());
        queue.push_back(item(1, &result));
        queue.push_back(item(2, &result));
        assert_eq!(result.work_left(), 2);
        assert_eq!(queue.try_pop_front().unwrap().depth, 1);
        assert_eq!(queue.try_pop_front().unwrap().depth, 2);
        assert!(queue.try_pop_front().is_none());
    }

    #[test]
    fn head_pushes_pop_lifo_against_tail_pushes() {
        let queue = WorkQueue::new(8);
        let result = Arc::new(WorkResult::new());
        queue.push_back(item(1, &result));
        {
            let mut guard = queue.lock();
            guard.push_front(item(2, &result));
            guard.push_front(item(3, &result));
        }
        assert_eq!(queue.try_pop_front().unwrap().depth, 3);
        assert_eq!(queue.try_pop_front().unwrap().depth, 2);
        assert_eq!(queue.try_pop_front().unwrap().depth, 1);
    }

    #[test]
    fn marker_fences_off_older_items() {
        let queue = WorkQueue::new(8);
        let result = Arc::new(WorkResult::new());
        queue.push_back(item(9, &result)); // someone else's item

        let marker;
        {
            let mut guard = queue.lock();
            marker = guard.marker();
            guard.push_front(item(1, &result));
            guard.push_front(item(2, &result));
        }

        assert_eq!(queue.try_pop_front_before(marker).unwrap().depth, 2);
        assert_eq!(queue.try_pop_front_before(marker).unwrap().depth, 1);
        // the gated pop refuses the older item...
        assert!(queue.try_pop_front_before(marker).is_none());
        // ...while a plain pop (a thief) still takes it
        assert_eq!(queue.try_pop_front().unwrap().depth, 9);
    }

    #[test]
    fn work_left_accounting() {
        let queue = WorkQueue::new(8);
        let result = Arc::new(WorkResult::new());
        for d in 0..4 {
            queue.push_back(item(d, &result));
        }
        assert_eq!(result.work_left(), 4);
        while let Some(popped) = queue.try_pop_front() {
            popped.result.add_count(10);
            popped.result.finish_one();
        }
        assert_eq!(result.work_left(), 0);
        assert_eq!(result.count(), 40);
    }

    #[test]
    fn sequences_wrap_the_backing_buffer() {
        let queue = WorkQueue::new(4);
        let result = Arc::new(WorkResult::new());
        // cycle through more pushes than the capacity
        for round in 0..10 {
            queue.push_back(item(round, &result));
            queue.push_back(item(round, &result));
            assert!(queue.try_pop_front().is_some());
            assert!(queue.try_pop_front().is_some());
        }
        assert!(queue.try_pop_front().is_none());
    }
}
