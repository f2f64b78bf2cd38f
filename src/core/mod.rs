use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Error types for the horloge application.
///
/// Covers the programming-error class of failures (drawing or running before
/// the pieces are wired together) plus the I/O that the shell cannot recover
/// from. Optional-resource failures never surface here; they are logged and
/// replaced by defaults where they happen.
#[derive(Error, Debug)]
pub enum ClockError {
    /// A component was used before `initialize` wired it up
    #[error("{component} used before initialize")]
    NotInitialized {
        /// Component that was used too early
        component: &'static str,
    },

    /// Hands were drawn after the face was cleared and before it was redrawn
    #[error("clock face must be rendered before hands can be drawn")]
    FaceNotRendered,

    /// An operation is not valid in the shell's current lifecycle state
    #[error("cannot {operation} while the shell is {state}")]
    InvalidState {
        /// The operation that was attempted
        operation: &'static str,
        /// Name of the state the shell was in
        state: &'static str,
    },

    /// The theme catalog has nothing the shell could display
    #[error("no theme available (requested '{requested}')")]
    NoTheme {
        /// Theme name that was asked for
        requested: String,
    },

    /// Presenting a frame failed
    #[error("failed to present frame on {target}: {details}")]
    Present {
        /// Output the presenter writes to
        target: PathBuf,
        /// Underlying error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for horloge operations.
pub type Result<T> = result::Result<T, ClockError>;

impl ClockError {
    /// Creates a presentation error for the given output target.
    pub fn present(error: impl std::fmt::Display, target: impl Into<PathBuf>) -> Self {
        ClockError::Present {
            target: target.into(),
            details: error.to_string(),
        }
    }
}
