//! Error types for the level simulation.
//!
//! Only setup-time failures (bad level data, exhausted registry) are errors.
//! Degraded simulation results such as "no path" are plain `Option`s.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for the simulation core.
#[derive(Debug, Error)]
pub enum GameError {
    /// Level map contains a character with no tile mapping.
    #[error("Unknown map glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Text row (0 = top of the map).
        row: usize,
        /// Text column.
        column: usize,
    },

    /// Level map rows differ in width.
    #[error("Map row {row} has width {width}, expected {expected}")]
    RaggedMap {
        /// Text row (0 = top of the map).
        row: usize,
        /// Actual row width.
        width: usize,
        /// Width of the first row.
        expected: usize,
    },

    /// Level map has no rows or no columns.
    #[error("Level map is empty")]
    EmptyMap,

    /// Level map lacks a required warehouse.
    #[error("Level map has no {0} warehouse")]
    MissingWarehouse(&'static str),

    /// Level map has more than one warehouse of a kind.
    #[error("Level map has more than one {0} warehouse")]
    DuplicateWarehouse(&'static str),

    /// Data file parsing error.
    #[error("Failed to parse level data: {0}")]
    DataParse(String),

    /// Every entity slot is occupied.
    #[error("Entity registry full ({capacity} slots)")]
    RegistryFull {
        /// Registry capacity.
        capacity: usize,
    },

    /// A level design names a kind that cannot be used where it appears.
    #[error("Unknown or unusable entity kind '{0}'")]
    UnknownEntityKind(String),

    /// Shop items cannot be spawned as entities.
    #[error("'{0}' is not a spawnable entity kind")]
    NotAnEntity(&'static str),
}
