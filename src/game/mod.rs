//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it directions and ticks and draw the snapshots it hands back.

pub mod action;
pub mod config;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, InputEvent};
pub use config::GameConfig;
pub use engine::{Cue, GameEngine, TickOutcome};
pub use snapshot::{Cell, CellKind, GameOverOverlay, RenderSnapshot};
pub use state::{CollisionType, GameStatus, Position, Snake};
