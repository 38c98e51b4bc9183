//! Statically initialized lookup tables: board geometry, magic sliding
//! attacks and Zobrist keys.
//!
//! The tables are built exactly once, the first time
//! [`prelude::init_statics`] runs. Every `Position` constructor calls it,
//! so code going through a `Position` never observes uninitialized tables.
//!
//! [`prelude::init_statics`]: prelude/fn.init_statics.html

pub mod boards;
pub mod magic;
pub mod prelude;
pub mod zobrist;
