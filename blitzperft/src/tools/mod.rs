//! Miscellaneous tools supporting the perft search. Most notably this module
//! contains the [`TranspositionTable`], a lock-free lookup table able to be
//! accessed by multiple threads, and the statistics counters behind the
//! optional `-s` reporting.
//!
//! [`TranspositionTable`]: tt/struct.TranspositionTable.html

pub mod prng;
pub mod stats;
pub mod tt;

/// Allows an object to have its entries pre-fetchable.
pub trait PreFetchable {
    /// Pre-fetches a particular key, bringing its cache line into the cache
    /// for faster access.
    fn prefetch(&self, key: u64);
}

/// Prefetches `ptr` into all levels of the cache.
///
/// On platforms without SSE this compiles down to nothing.
#[inline(always)]
pub fn prefetch_write<T>(ptr: *const T) {
    __prefetch_write::<T>(ptr);
}

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
))]
#[inline(always)]
fn __prefetch_write<T>(ptr: *const T) {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::{_mm_prefetch, _MM_HINT_T0};
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
    unsafe {
        _mm_prefetch::<_MM_HINT_T0>(ptr as *const i8);
    }
}

#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse"
)))]
#[inline(always)]
fn __prefetch_write<T>(_ptr: *const T) {
    // Do nothing
}
