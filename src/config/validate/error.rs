//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Training data path does not exist: {0}")]
    TrainDataNotFound(String),

    #[error("Reference data path does not exist: {0}")]
    ReferenceDataNotFound(String),

    #[error("Candidate data path does not exist: {0}")]
    CandidateDataNotFound(String),

    #[error("Training data path is empty")]
    EmptyTrainPath,

    #[error("Invalid train ratio: {0} (must be > 0.0 and < 1.0)")]
    InvalidTrainRatio(f64),

    #[error("Invalid drift threshold: {0} (must be > 0.0 and < 1.0)")]
    InvalidThreshold(f64),

    #[error("Invalid scale factor for {field}: {value} (must be finite and >= 0.0)")]
    InvalidScaleFactor { field: String, value: f64 },

    #[error("Total row label cannot be empty")]
    EmptyTotalLabel,
}
