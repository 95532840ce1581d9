//! Errors raised while loading snapshots and configuration.
//!
//! Move decisions never fail; these only surface at the harness boundary.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HexflagError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Grid is {width}x{height} but has {cells} cells")]
    GridSize {
        width: usize,
        height: usize,
        cells: usize,
    },

    #[error("Direction must be 1-6, got {0}")]
    InvalidDirection(u8),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown team color: {0}")]
    UnknownTeam(String),

    #[error("Arena setup incomplete: {0}")]
    Setup(String),
}

impl HexflagError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        HexflagError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
