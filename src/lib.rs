//! Street Shooter: a single-screen arcade shooter for the terminal.
//!
//! The library holds the game itself (entities, the per-frame tick, timers,
//! the menu state machine, persistence).  The binary adds terminal I/O.

pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use error::{GameError, Result};
