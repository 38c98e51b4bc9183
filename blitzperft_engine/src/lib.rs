//! The parallel perft engine built on the `blitzperft` library: a
//! work-stealing scheduler that farms sub-trees of the perft recursion out
//! to a fixed pool of worker threads, plus the command-line driver around
//! it.
//!
//! This crate is mostly useful as a direct executable; the chess
//! foundations (the board, move generation, make, hashing) live in the
//! library crate `blitzperft`.

#![allow(dead_code)]

extern crate blitzperft;
extern crate num_cpus;
extern crate rand;

pub mod consts;
pub mod parse;
pub mod queue;
pub mod threadpool;

pub use crate::consts::*;
pub use crate::parse::{parse_args, print_usage, PerftParams};
pub use crate::threadpool::{PerftPool, RunState};
