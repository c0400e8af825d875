//! Grid Snake - the classic Snake game in the terminal
//!
//! This library provides:
//! - Core game logic: board, snake, fixed-tick session engine (game module)
//! - Keyboard mapping (input module)
//! - Session factory with preset and custom board sizes (menu module)
//! - TUI rendering (render module)
//! - Per-process play statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod menu;
pub mod metrics;
pub mod modes;
pub mod render;
