//! Grid construction errors

/// Failures while building or resizing a grid.
///
/// These are the only fatal conditions in the crate; lookups, searches and
/// occupant moves report absence instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("layout has no rows")]
    NoRows,

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}
