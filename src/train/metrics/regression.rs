//! Regression metrics: MAE, RMSE

use super::Metric;

/// Mean Absolute Error (MAE) metric
///
/// MAE = mean(|y - y_pred|)
///
/// # Example
///
/// ```
/// use costcast::train::{Metric, MAE};
///
/// let mae = MAE.compute(&[1.0, 2.0, 3.0], &[1.5, 2.5, 3.5]);
/// assert!((mae - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MAE;

impl Metric for MAE {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        let total: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).abs())
            .sum();
        total / predictions.len() as f64
    }

    fn name(&self) -> &'static str {
        "MAE"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

/// Root Mean Squared Error (RMSE) metric
///
/// RMSE = sqrt(mean((y - y_pred)²))
///
/// # Example
///
/// ```
/// use costcast::train::{Metric, RMSE};
///
/// let rmse = RMSE.compute(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
/// assert!(rmse < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RMSE;

impl Metric for RMSE {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        let sq: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(p, t)| (t - p).powi(2))
            .sum();
        (sq / predictions.len() as f64).sqrt()
    }

    fn name(&self) -> &'static str {
        "RMSE"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}
