//! Core game logic module for Snake
//!
//! This module contains the whole simulation without any I/O or rendering
//! dependencies: a snake on a wrap-around square field, advanced one tick at
//! a time by whoever owns the [`GameEngine`].

pub mod config;
pub mod difficulty;
pub mod direction;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use difficulty::Difficulty;
pub use direction::Direction;
pub use engine::{GameEngine, Layout, LayoutError, TickOutcome, random_free_cell};
pub use snapshot::{CellKind, Snapshot};
pub use state::{Position, RunState, Snake};
