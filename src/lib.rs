//! Torus Snake - Snake on a wrap-around field
//!
//! This library provides:
//! - Core simulation (game module), free of I/O
//! - Terminal input mapping, keys and mouse swipes (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
