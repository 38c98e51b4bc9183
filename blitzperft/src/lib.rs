//! A chess perft library: bitboard move generation with simultaneous
//! legality filtering, copy-make position updates with incremental Zobrist
//! hashing, and a lock-free transposition table caching sub-tree counts.
//!
//! Perft enumerates the exact number of leaf nodes reachable by legal move
//! sequences of a fixed depth. Because the count is an absolute integer
//! matching published reference values bit for bit, every bug anywhere in
//! move generation, pin filtering, make or the castling/en-passant rules
//! changes the result — which makes it both the canonical correctness test
//! and the canonical benchmark of a move generator.
//!
//! # Usage
//!
//! Counting the moves of the starting position:
//!
//! ```
//! use blitzperft::{perft, Position};
//!
//! let pos = Position::start_pos();
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 3), 8902);
//! ```
//!
//! Positions come from FEN strings:
//!
//! ```
//! use blitzperft::Position;
//!
//! let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -").unwrap();
//! assert_eq!(blitzperft::perft(&pos, 4), 43238);
//! ```
//!
//! The multithreaded search lives in the companion crate
//! `blitzperft_engine`, which drives this library's generators through a
//! work-stealing scheduler.

#![allow(dead_code)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
extern crate rand;

pub mod board;
pub mod core;
pub mod helper;
pub mod tools;

pub use crate::board::make::make;
pub use crate::board::perft::{perft, perft_into, perft_with_table, MIN_HASH_DEPTH};
pub use crate::board::pins::Pins;
pub use crate::board::Position;
pub use crate::core::bitboard::BitBoard;
pub use crate::core::castle_rights::CastleRights;
pub use crate::core::move_stack::{MoveStack, MOVE_STACK_CAPACITY};
pub use crate::core::piece_move::Move;
pub use crate::core::sq::SQ;
pub use crate::core::{PieceType, Player};
pub use crate::tools::tt::TranspositionTable;
