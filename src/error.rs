//! Crate-wide error type
//!
//! Stage errors keep their own types so callers can match on them; this enum
//! only aggregates them for code that runs the whole pipeline.

use crate::config::ValidationError;
use crate::data::{FormatError, SchemaViolation};
use crate::features::FeatureError;

/// Result type alias for costcast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised anywhere in the pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Schema(#[from] SchemaViolation),

    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the caller should fix the input data rather than the setup
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Format(_) | Self::Schema(_) | Self::Feature(_) | Self::Csv(_)
        )
    }
}
