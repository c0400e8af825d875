//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The session is driven one tick at a time by whatever loop embeds it.

pub mod action;
pub mod clock;
pub mod config;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use action::{Direction, Input};
pub use clock::TickClock;
pub use config::GameConfig;
pub use grid::{BoardFull, Grid, MAX_GRID_SIZE, MIN_GRID_SIZE, Position, clamp_dimension};
pub use session::{CollisionType, EndReason, GameSession, SessionState, Snapshot, TickOutcome};
pub use snake::Snake;
