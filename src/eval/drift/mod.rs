//! Drift Detection Module
//!
//! Checks whether newly observed usage data has drifted from a reference
//! dataset, one feature at a time, with the two-sample Kolmogorov-Smirnov
//! test. Results are collected into a serializable [`DriftReport`].

mod detector;
mod statistical;
mod types;


pub use detector::DriftDetector;
pub use types::{DriftReport, FeatureDrift, DEFAULT_THRESHOLD};

// Re-export statistical functions for testing/advanced use
pub use statistical::{
    ks_asymptotic_p_value, ks_exact_p_value, ks_p_value, ks_statistic, ks_two_sample_p_value,
    EXACT_MAX_N,
};
