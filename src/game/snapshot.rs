//! Read-only view of the game handed to the renderer.
//!
//! A snapshot is an owned copy, so it can be drawn while the engine keeps
//! ticking.

use super::state::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
}

/// One occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub kind: CellKind,
}

/// Text shown over the board once the game is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverOverlay {
    pub lines: Vec<String>,
}

impl GameOverOverlay {
    pub fn new(score: usize) -> Self {
        Self {
            lines: vec![
                "Game Over".to_string(),
                format!("MAX: {score}"),
                "Press Enter to Restart".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Snake cells, head first
    pub cells: Vec<Cell>,
    pub food: Position,
    pub length: usize,
    /// Segments gained since the game started
    pub score: usize,
    pub overlay: Option<GameOverOverlay>,
}

impl RenderSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.overlay.is_some()
    }

    /// Snake cell at `pos`, if any. The head wins over a body segment on the same cell.
    pub fn cell_at(&self, pos: Position) -> Option<CellKind> {
        self.cells
            .iter()
            .find(|cell| cell.position == pos)
            .map(|cell| cell.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_lines() {
        let overlay = GameOverOverlay::new(7);
        assert_eq!(
            overlay.lines,
            vec!["Game Over", "MAX: 7", "Press Enter to Restart"]
        );
    }

    #[test]
    fn test_cell_lookup_prefers_head() {
        let snapshot = RenderSnapshot {
            grid_width: 5,
            grid_height: 5,
            cells: vec![
                Cell {
                    position: Position::new(1, 1),
                    kind: CellKind::Head,
                },
                Cell {
                    position: Position::new(1, 1),
                    kind: CellKind::Body,
                },
            ],
            food: Position::new(3, 3),
            length: 2,
            score: 0,
            overlay: None,
        };

        assert_eq!(snapshot.cell_at(Position::new(1, 1)), Some(CellKind::Head));
        assert_eq!(snapshot.cell_at(Position::new(3, 3)), None);
        assert!(!snapshot.is_game_over());
    }
}
