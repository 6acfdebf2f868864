//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::PipelineSpec;

/// Validate a pipeline specification
///
/// Checks:
/// - Data paths exist
/// - Ratios and thresholds lie strictly between 0 and 1
/// - Scale factors are finite and non-negative
pub fn validate_config(spec: &PipelineSpec) -> Result<(), ValidationError> {
    if spec.data.train.as_os_str().is_empty() {
        return Err(ValidationError::EmptyTrainPath);
    }

    // Validate data paths (skip in tests where files may not exist)
    #[cfg(not(test))]
    {
        if !spec.data.train.exists() {
            return Err(ValidationError::TrainDataNotFound(
                spec.data.train.display().to_string(),
            ));
        }

        if let Some(path) = &spec.data.reference {
            if !path.exists() {
                return Err(ValidationError::ReferenceDataNotFound(
                    path.display().to_string(),
                ));
            }
        }

        if let Some(path) = &spec.data.candidate {
            if !path.exists() {
                return Err(ValidationError::CandidateDataNotFound(
                    path.display().to_string(),
                ));
            }
        }
    }

    let ratio = spec.split.train_ratio;
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ValidationError::InvalidTrainRatio(ratio));
    }

    let threshold = spec.drift.threshold;
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(ValidationError::InvalidThreshold(threshold));
    }

    for (field, value) in spec.normalize.scale.entries() {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidScaleFactor {
                field: field.to_string(),
                value,
            });
        }
    }

    if spec.normalize.total_label.trim().is_empty() {
        return Err(ValidationError::EmptyTotalLabel);
    }

    Ok(())
}
