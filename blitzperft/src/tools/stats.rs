//! Global statistics counters for the optional `-s` reporting.
//!
//! The counters are process-wide relaxed atomics fed by `make` and the
//! perft recursion from every worker thread. They stay dormant until
//! [`enable`] is called, so the common non-statistics run only pays for one
//! relaxed flag load per event.
//!
//! [`enable`]: fn.enable.html

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(false);

static CAPTURES: AtomicU64 = AtomicU64::new(0);
static EN_PASSANTS: AtomicU64 = AtomicU64::new(0);
static CASTLES: AtomicU64 = AtomicU64::new(0);
static CHECKMATES: AtomicU64 = AtomicU64::new(0);
static HASH_PROBES: AtomicU64 = AtomicU64::new(0);
static HASH_HITS: AtomicU64 = AtomicU64::new(0);
static HASH_WRITE_TRIES: AtomicU64 = AtomicU64::new(0);
static HASH_WRITES: AtomicU64 = AtomicU64::new(0);

/// Turns statistics collection on for the rest of the process.
pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Returns if statistics collection is on.
#[inline(always)]
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Resets every counter to zero.
pub fn reset() {
    CAPTURES.store(0, Ordering::Relaxed);
    EN_PASSANTS.store(0, Ordering::Relaxed);
    CASTLES.store(0, Ordering::Relaxed);
    CHECKMATES.store(0, Ordering::Relaxed);
    HASH_PROBES.store(0, Ordering::Relaxed);
    HASH_HITS.store(0, Ordering::Relaxed);
    HASH_WRITE_TRIES.store(0, Ordering::Relaxed);
    HASH_WRITES.store(0, Ordering::Relaxed);
}

macro_rules! counter {
    ($inc:ident, $get:ident, $counter:ident) => {
        #[doc = "Bumps the counter when collection is enabled."]
        #[inline(always)]
        pub fn $inc() {
            if enabled() {
                $counter.fetch_add(1, Ordering::Relaxed);
            }
        }

        #[doc = "Reads the counter."]
        pub fn $get() -> u64 {
            $counter.load(Ordering::Relaxed)
        }
    };
}

counter!(inc_captures, captures, CAPTURES);
counter!(inc_en_passants, en_passants, EN_PASSANTS);
counter!(inc_castles, castles, CASTLES);
counter!(inc_checkmates, checkmates, CHECKMATES);
counter!(inc_hash_probes, hash_probes, HASH_PROBES);
counter!(inc_hash_hits, hash_hits, HASH_HITS);
counter!(inc_hash_write_tries, hash_write_tries, HASH_WRITE_TRIES);
counter!(inc_hash_writes, hash_writes, HASH_WRITES);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_only_move_when_enabled() {
        reset();
        // other tests in the process never enable collection
        let before = captures();
        inc_captures();
        if !enabled() {
            assert_eq!(captures(), before);
        }
        enable();
        inc_captures();
        assert!(captures() > before);
        reset();
    }
}
