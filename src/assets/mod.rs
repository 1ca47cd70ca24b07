//! Glyph sprites for the head, body and food cells.
//!
//! Each sprite is a small text file whose first line holds the glyph. A missing
//! or unusable file only costs the custom look: the default glyph is used
//! instead and the problem is logged.

use log::{info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

/// Terminal columns used to draw one grid cell
pub const CELL_COLUMNS: usize = 2;

pub const HEAD_FILE: &str = "head.txt";
pub const BODY_FILE: &str = "body.txt";
pub const FOOD_FILE: &str = "food.txt";

#[derive(Debug)]
pub enum AssetError {
    Read { path: PathBuf, source: std::io::Error },
    Empty { path: PathBuf },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Read { path, source } => {
                write!(f, "failed to load {}: {source}", path.display())
            }
            AssetError::Empty { path } => write!(f, "{} has no glyph", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Read { source, .. } => Some(source),
            AssetError::Empty { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprites {
    pub head: String,
    pub body: String,
    pub food: String,
}

impl Default for Sprites {
    fn default() -> Self {
        Self {
            head: "■ ".to_string(),
            body: "□ ".to_string(),
            food: "O ".to_string(),
        }
    }
}

impl Sprites {
    /// Load all three sprites from `dir`, keeping the default for any that fail
    pub fn load(dir: &Path) -> Self {
        let defaults = Self::default();
        let sprites = Self {
            head: load_or_default(&dir.join(HEAD_FILE), defaults.head),
            body: load_or_default(&dir.join(BODY_FILE), defaults.body),
            food: load_or_default(&dir.join(FOOD_FILE), defaults.food),
        };
        info!("sprites loaded from {}", dir.display());
        sprites
    }
}

fn load_or_default(path: &Path, default: String) -> String {
    match load_sprite(path) {
        Ok(glyph) => glyph,
        Err(err) => {
            warn!("{err}; using the default glyph");
            default
        }
    }
}

/// Read one glyph, padded or cut to exactly one cell's width
pub fn load_sprite(path: &Path) -> Result<String, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let glyph: String = text
        .lines()
        .next()
        .map(str::trim_end)
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control())
        .take(CELL_COLUMNS)
        .collect();

    if glyph.trim().is_empty() {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(format!("{glyph:<width$}", width = CELL_COLUMNS))
}
