//! Error types for notation parsing, layout and configuration.
//!
//! Chord, bar and passage parsing never fail. Only repeat construction
//! (missing delimiters) and layout (unusable page geometry) can.

use thiserror::Error;

/// A repeat string was not wrapped in its delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("repeat '{input}' must start with '{open}' and end with '{close}'")]
pub struct FormatError {
    /// The offending notation string, verbatim.
    pub input: String,
    pub open: char,
    pub close: char,
}

/// Page geometry that cannot hold a staff row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeometryError {
    #[error("usable width must be a positive number, got {0}")]
    UsableWidth(f64),

    #[error("column count must be at least 1")]
    ZeroColumns,

    #[error("rows per page must be at least 1")]
    ZeroRows,

    /// Header plus rows run past the bottom margin.
    #[error("{rows} rows need {needed} units of page height but only {available} fit")]
    RowsOverflowPage { rows: usize, needed: f64, available: f64 },

    #[error("barline width must be a non-negative number, got {0}")]
    BarlineWidth(f64),

    /// Barlines alone use up the whole row.
    #[error("row of {bars} bars needs {barlines} units of barlines but only {usable} are usable")]
    RowTooNarrow { bars: usize, barlines: f64, usable: f64 },
}

/// Top-level error for the public API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("malformed notation: {0}")]
    Format(#[from] FormatError),

    #[error("invalid page geometry: {0}")]
    Geometry(#[from] InvalidGeometryError),

    #[error("invalid sheet configuration: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(String),
}
