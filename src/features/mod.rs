//! Time-aware feature engineering
//!
//! Every derived value for a row is computed from that row and rows strictly
//! earlier in time, so no future information leaks into the past:
//!
//! - `lag_1`: previous day's cost (0 for the first row)
//! - `rolling_3` / `rolling_7`: mean cost over the prior 3 / 7 rows
//!   (the row's own cost until the window is full)
//! - `is_weekend`: 1 for Saturday and Sunday

mod dataset;
mod engineer;

#[cfg(test)]
mod tests;

pub use dataset::{split_index, TrainingSet, DEFAULT_TRAIN_RATIO, FEATURE_COLUMNS, TARGET};
pub use engineer::{
    engineer, is_weekend, lag_feature, trailing_mean, FeatureError, DERIVED_COLUMNS, IS_WEEKEND,
    LAG_1, ROLLING_3, ROLLING_7,
};
