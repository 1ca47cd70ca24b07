use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::state::Position;
use crate::assets::CELL_COLUMNS;

/// Longest grid side the renderer can lay out: a bordered row must fit in a `u16`
pub const MAX_GRID_SIDE: usize = (u16::MAX as usize - 2) / CELL_COLUMNS;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Cell of the head when a game starts; the body trails to the left
    pub start: Position,
    /// Milliseconds between two ticks
    pub tick_ms: u64,
    /// Every Nth food eaten plays the major grow cue
    pub major_cue_every: u32,
    /// Segments closer to the head than this index never count as a self-collision
    pub collision_offset: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_snake_length: 3,
            start: Position::new(5, 5),
            tick_ms: 140,
            major_cue_every: 10,
            collision_offset: 3,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Largest number of segments the snake can ever have
    pub fn max_segments(&self) -> usize {
        self.grid_width.saturating_mul(self.grid_height)
    }

    /// Check that a game can actually start with these settings
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_GRID_SIDE).contains(&self.grid_width),
            "grid width must be between 1 and {MAX_GRID_SIDE}, got {}",
            self.grid_width
        );
        ensure!(
            (1..=MAX_GRID_SIDE).contains(&self.grid_height),
            "grid height must be between 1 and {MAX_GRID_SIDE}, got {}",
            self.grid_height
        );
        ensure!(
            (1..=self.grid_width).contains(&self.initial_snake_length),
            "initial snake length must be between 1 and the grid width, got {}",
            self.initial_snake_length
        );
        ensure!(
            self.collision_offset < self.max_segments(),
            "collision offset {} is larger than the grid",
            self.collision_offset
        );
        ensure!(self.tick_ms > 0, "tick period must be positive");
        ensure!(self.major_cue_every > 0, "major cue period must be positive");

        // Sides and length fit in i32 once the checks above have passed
        let width = i32::try_from(self.grid_width)?;
        let height = i32::try_from(self.grid_height)?;
        let length = i32::try_from(self.initial_snake_length)?;
        let tail_x = self.start.x.checked_sub(length - 1);

        ensure!(
            tail_x.is_some_and(|x| x >= 0)
                && self.start.x < width
                && self.start.y >= 0
                && self.start.y < height,
            "starting row ({}, {}) with length {} does not fit a {}x{} grid",
            self.start.x,
            self.start.y,
            self.initial_snake_length,
            self.grid_width,
            self.grid_height
        );
        Ok(())
    }
}
