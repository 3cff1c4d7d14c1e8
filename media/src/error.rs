//! Error types for external media tooling.

use thiserror::Error;

/// Result type alias for media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for media operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required external binary was not found on PATH.
    #[error("{0} not found on PATH")]
    ToolNotFound(&'static str),

    /// An external tool exited with a failure status.
    #[error("{tool} failed: {stderr}")]
    Tool {
        tool: &'static str,
        stderr: String,
    },

    /// Tool output could not be interpreted.
    #[error("unexpected {tool} output: {detail}")]
    Parse {
        tool: &'static str,
        detail: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
