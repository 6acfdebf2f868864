//! Type definitions for drift detection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Significance level used when the caller does not pick one
pub const DEFAULT_THRESHOLD: f64 = 0.05;

/// Outcome of the two-sample test for one feature
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    /// Kolmogorov-Smirnov statistic (max CDF gap)
    pub statistic: f64,
    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
    /// Whether `p_value` fell below the threshold
    pub drift: bool,
}

/// Drift comparison result for one candidate table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// True iff any evaluated feature drifted
    pub drift_detected: bool,
    /// Significance level used for every feature
    pub threshold: f64,
    /// Per-feature results, keyed by feature name
    pub feature_drifts: BTreeMap<String, FeatureDrift>,
}

impl DriftReport {
    pub(crate) fn new(threshold: f64) -> Self {
        Self {
            drift_detected: false,
            threshold,
            feature_drifts: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, feature: &str, result: FeatureDrift) {
        self.drift_detected |= result.drift;
        self.feature_drifts.insert(feature.to_string(), result);
    }

    /// Names of the features flagged as drifted
    pub fn drifted_features(&self) -> Vec<&str> {
        self.feature_drifts
            .iter()
            .filter(|(_, r)| r.drift)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Number of features that were evaluated
    pub fn evaluated(&self) -> usize {
        self.feature_drifts.len()
    }

    /// Percentage of evaluated features that drifted
    pub fn drift_percentage(&self) -> f64 {
        if self.feature_drifts.is_empty() {
            0.0
        } else {
            100.0 * self.drifted_features().len() as f64 / self.feature_drifts.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(p_value: f64, drift: bool) -> FeatureDrift {
        FeatureDrift {
            statistic: 0.1,
            p_value,
            drift,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = DriftReport::new(DEFAULT_THRESHOLD);
        assert!(!report.drift_detected);
        assert_eq!(report.evaluated(), 0);
        assert!(report.drifted_features().is_empty());
        assert!((report.drift_percentage() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_record_aggregates_with_or() {
        let mut report = DriftReport::new(0.05);
        report.record("a", result(0.5, false));
        assert!(!report.drift_detected);
        report.record("b", result(0.01, true));
        assert!(report.drift_detected);
        report.record("c", result(0.9, false));
        assert!(report.drift_detected);

        assert_eq!(report.drifted_features(), vec!["b"]);
        assert!((report.drift_percentage() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = DriftReport::new(0.05);
        report.record("ec2_hours", result(0.01, true));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["drift_detected"], true);
        assert_eq!(json["threshold"], 0.05);
        assert_eq!(json["feature_drifts"]["ec2_hours"]["drift"], true);
        assert_eq!(json["feature_drifts"]["ec2_hours"]["p_value"], 0.01);
    }

    #[test]
    fn test_report_serde_roundtrip() {
        let mut report = DriftReport::new(0.05);
        report.record("rds_usage", result(0.3, false));
        let json = serde_json::to_string(&report).unwrap();
        let back: DriftReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
