//! Errors surfaced by the headless driver.

use thiserror::Error;

use td_core::error::GameError;

/// Result type alias using [`HeadlessError`].
pub type Result<T> = std::result::Result<T, HeadlessError>;

/// Everything that can stop a headless run before it starts.
#[derive(Debug, Error)]
pub enum HeadlessError {
    /// Reading or writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A RON level or config file did not parse.
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Writing a JSON report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The simulation rejected the data.
    #[error(transparent)]
    Core(#[from] GameError),
}
