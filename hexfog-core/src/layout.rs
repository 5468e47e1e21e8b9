//! MapLayout - serializable traversability description a grid is built from

use crate::error::GridError;
use crate::grid::HexGrid;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Glyph for a traversable tile
pub const OPEN_GLYPH: char = '.';
/// Glyph for a blocked tile
pub const BLOCKED_GLYPH: char = '#';

/// Rows of tile glyphs in storage order: `rows[r]` is storage row `r`, its
/// `c`-th character storage column `c`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    #[serde(default = "unnamed")]
    pub name: String,
    pub rows: Vec<String>,
}

fn unnamed() -> String {
    "unnamed".to_string()
}

impl MapLayout {
    /// Obstacle-free layout
    pub fn open(name: &str, width: usize, height: usize) -> Self {
        Self {
            name: name.to_string(),
            rows: vec![OPEN_GLYPH.to_string().repeat(width); height],
        }
    }

    /// Layout with each tile independently blocked with probability `blocked_ratio`.
    ///
    /// The ratio is clamped to `[0, 1]`; NaN counts as 0.
    pub fn random<R: Rng>(rng: &mut R, name: &str, width: usize, height: usize, blocked_ratio: f64) -> Self {
        let ratio = if blocked_ratio.is_nan() {
            0.0
        } else {
            blocked_ratio.clamp(0.0, 1.0)
        };
        let rows = (0..height)
            .map(|_| {
                (0..width)
                    .map(|_| if rng.gen_bool(ratio) { BLOCKED_GLYPH } else { OPEN_GLYPH })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            rows,
        }
    }

    /// Capture a grid's current traversability
    pub fn from_grid(name: &str, grid: &HexGrid) -> Self {
        let rows = (0..grid.height())
            .map(|row| {
                (0..grid.width())
                    .map(|col| {
                        let open = grid
                            .hex_at_storage(col, row)
                            .map_or(false, |hex| grid.is_traversable(hex));
                        if open { OPEN_GLYPH } else { BLOCKED_GLYPH }
                    })
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.chars().count())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Decode glyphs into a traversability matrix
    pub fn to_rows(&self) -> Result<Vec<Vec<bool>>, GridError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, glyph)| match glyph {
                        OPEN_GLYPH => Ok(true),
                        BLOCKED_GLYPH => Ok(false),
                        _ => Err(GridError::UnknownGlyph { row, col, glyph }),
                    })
                    .collect()
            })
            .collect()
    }
}

impl std::str::FromStr for MapLayout {
    type Err = GridError;

    /// Parse one row per line; blank lines and trailing whitespace are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<String> = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let layout = Self { name: unnamed(), rows };
        // Validate glyphs up front
        layout.to_rows()?;
        Ok(layout)
    }
}

impl HexGrid {
    /// Build a grid from a layout; fails on empty, ragged, or unknown glyphs
    pub fn from_layout(layout: &MapLayout) -> Result<Self, GridError> {
        Self::from_rows(&layout.to_rows()?)
    }
}
