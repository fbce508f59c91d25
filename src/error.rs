//! Top-level error type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Errors returned by [`TimetableEngine`](crate::engine::TimetableEngine).
///
/// An unsatisfiable request is not an error: it yields an empty result.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Invalid request: {}", summarize(.0))]
    InvalidRequest(Vec<ValidationError>),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TimetableError {
    /// Validation issues, if this is an invalid request.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidRequest(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidRequest(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
