//! Drift detector implementation.

use super::statistical::{ks_statistic, ks_two_sample_p_value};
use super::types::{DriftReport, FeatureDrift, DEFAULT_THRESHOLD};
use crate::data::{Table, USAGE_FEATURES};

/// Compares candidate tables against a fixed reference table.
///
/// The reference is captured at construction and never changes, so a detector
/// can be shared across threads and every comparison is reproducible.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    reference: Table,
    features: Vec<String>,
}

impl DriftDetector {
    /// Create a detector over the raw usage features
    pub fn new(reference: Table) -> Self {
        Self::with_features(reference, &USAGE_FEATURES)
    }

    /// Create a detector over an explicit feature list
    pub fn with_features(reference: Table, features: &[&str]) -> Self {
        Self {
            reference,
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn reference(&self) -> &Table {
        &self.reference
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Compare `candidate` against the reference using [`DEFAULT_THRESHOLD`]
    pub fn detect_default(&self, candidate: &Table) -> DriftReport {
        self.detect(candidate, DEFAULT_THRESHOLD)
    }

    /// Run a two-sample Kolmogorov-Smirnov test per feature.
    ///
    /// Features missing from either table are skipped. A feature drifts when
    /// its p-value is strictly below `threshold`. Non-numeric cells are
    /// ignored; a feature with no numeric cells on either side gets p = 1.
    pub fn detect(&self, candidate: &Table, threshold: f64) -> DriftReport {
        let mut report = DriftReport::new(threshold);

        for feature in &self.features {
            let (Some(reference), Some(current)) = (
                self.reference.numeric_column(feature),
                candidate.numeric_column(feature),
            ) else {
                log::debug!("Skipping '{feature}': not present in both tables");
                continue;
            };

            let result = ks_test(&reference, &current, threshold);
            log::debug!(
                "{feature}: D={:.4} p={:.4} drift={}",
                result.statistic,
                result.p_value,
                result.drift
            );
            report.record(feature, result);
        }

        if report.drift_detected {
            log::warn!("Drift detected in {:?}", report.drifted_features());
        } else {
            log::info!("No drift across {} feature(s)", report.evaluated());
        }
        report
    }
}

/// Kolmogorov-Smirnov test for one continuous feature
fn ks_test(reference: &[f64], current: &[f64], threshold: f64) -> FeatureDrift {
    if reference.is_empty() || current.is_empty() {
        return FeatureDrift {
            statistic: 0.0,
            p_value: 1.0,
            drift: false,
        };
    }

    let statistic = ks_statistic(reference, current);
    let p_value = ks_two_sample_p_value(statistic, reference.len(), current.len());

    FeatureDrift {
        statistic,
        p_value,
        drift: p_value < threshold,
    }
}
