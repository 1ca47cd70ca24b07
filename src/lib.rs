//! Snake TUI - the classic single-player snake game in a terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Key mapping and the terminal key reader (input module)
//! - Drawing of game snapshots with ratatui (render module)
//! - Glyph sprites and sound cues (assets and audio modules)
//! - The fixed-period tick source and the interactive loop (scheduler and modes)

pub mod assets;
pub mod audio;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod scheduler;
