//! Data evaluation
//!
//! - `drift`: distribution drift between a reference and a candidate dataset

pub mod drift;

pub use drift::{DriftDetector, DriftReport, FeatureDrift, DEFAULT_THRESHOLD};
