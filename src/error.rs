//! Crate-level error types.
//!
//! Only construction and option I/O can fail. Runtime operations on the
//! grid report rejection through boolean returns instead.

use std::fmt;

/// Errors produced by the tilecast crate.
#[derive(Debug)]
pub enum TilecastError {
    /// Grid dimensions cannot hold any instance.
    InvalidGrid(String),
    /// Content entries do not fit the grid.
    Content(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for TilecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid(msg) => write!(f, "invalid grid: {msg}"),
            Self::Content(msg) => write!(f, "content error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for TilecastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TilecastError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
