//! Evaluation metrics for baseline forecasts
//!
//! - Regression: MAE, RMSE

mod regression;
mod trait_def;


pub use regression::{MAE, RMSE};
pub use trait_def::Metric;
