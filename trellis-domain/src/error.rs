//! Error module for the Trellis domain layer.

use crate::validation::ValidationError;
use thiserror::Error;
use trellis_core::CoreError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Core error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Validation engine resolution or registration error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Other error.
    #[error("Domain error: {0}")]
    Other(String),
}
