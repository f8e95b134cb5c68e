//! Shared error types for the services crate.

use thiserror::Error;

use lingua_core::CatalogError;

/// Errors emitted by a `SpeechEngine`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
    #[error("speech rate must be between 0.1 and 10.0, got {0}")]
    InvalidRate(f32),
}

/// Errors emitted by the session controller.
///
/// Everything else a learner can do wrong (acting on a locked lesson,
/// completing twice, stopping when idle) is a silent no-op, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    NotFound(#[from] CatalogError),
}
