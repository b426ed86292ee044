//! Error types for parsing engine input.
//!
//! Planning never fails: only the entry points that turn engine text into
//! typed data return [`Result`].

/// Errors raised while reading configuration, snapshots or action frames.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not valid JSON, or did not match the expected shape.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// An action frame was missing its event table.
    #[error("malformed action frame: {0}")]
    Frame(String),

    /// A turn snapshot was missing a required section.
    #[error("malformed turn snapshot: {0}")]
    Snapshot(String),

    /// A strategy or layout value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A coordinate pair outside the 28x28 board grid.
    #[error("location ({x}, {y}) is off the board")]
    OffBoard { x: u8, y: u8 },

    /// The game config did not describe the unit at this index.
    #[error("game config has no unit information at index {0}")]
    MissingUnit(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
