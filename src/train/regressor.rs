//! Regressor seam and the built-in baselines

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::metrics::{Metric, MAE, RMSE};
use crate::error::{Error, Result};
use crate::features::{TrainingSet, FEATURE_COLUMNS, LAG_1};

/// A model that maps a feature matrix to daily cost predictions.
///
/// Feature columns follow [`FEATURE_COLUMNS`] order.
pub trait Regressor {
    /// Learn from training rows
    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> Result<()>;

    /// Predict one value per row
    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>>;

    /// Short model name for reports
    fn name(&self) -> &str;
}

fn check_width(features: ArrayView2<'_, f64>) -> Result<()> {
    if features.ncols() != FEATURE_COLUMNS.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} feature columns, got {}",
            FEATURE_COLUMNS.len(),
            features.ncols()
        )));
    }
    Ok(())
}

fn check_rows(features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> Result<()> {
    check_width(features)?;
    if features.nrows() != target.len() {
        return Err(Error::InvalidInput(format!(
            "{} feature rows but {} targets",
            features.nrows(),
            target.len()
        )));
    }
    Ok(())
}

/// Predicts tomorrow's cost as today's: the `lag_1` column, unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceRegressor;

impl Regressor for PersistenceRegressor {
    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> Result<()> {
        check_rows(features, target)
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        check_width(features)?;
        let lag = FEATURE_COLUMNS
            .iter()
            .position(|c| *c == LAG_1)
            .ok_or_else(|| Error::InvalidInput(format!("'{LAG_1}' is not a feature column")))?;
        Ok(features.column(lag).to_owned())
    }

    fn name(&self) -> &str {
        "persistence"
    }
}

/// Predicts the mean training cost for every row
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanRegressor {
    mean: Option<f64>,
}

impl Regressor for MeanRegressor {
    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> Result<()> {
        check_rows(features, target)?;
        self.mean = target.mean();
        if self.mean.is_none() {
            return Err(Error::InvalidInput("cannot fit on zero rows".to_string()));
        }
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        check_width(features)?;
        let mean = self
            .mean
            .ok_or_else(|| Error::InvalidInput("model has not been fitted".to_string()))?;
        Ok(Array1::from_elem(features.nrows(), mean))
    }

    fn name(&self) -> &str {
        "mean"
    }
}

/// Held-out error of a model trained on a chronological split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub model: String,
    pub n_train: usize,
    pub n_test: usize,
    pub mae: f64,
    pub rmse: f64,
}

/// Fit `model` on `train` and score it on `test`.
///
/// Both sets must be non-empty.
pub fn evaluate<R: Regressor + ?Sized>(
    model: &mut R,
    train: &TrainingSet,
    test: &TrainingSet,
) -> Result<EvalReport> {
    if train.is_empty() || test.is_empty() {
        return Err(Error::InvalidInput(format!(
            "need rows on both sides of the split, got {} train and {} test",
            train.len(),
            test.len()
        )));
    }

    model.fit(train.features.view(), train.target.view())?;
    let predictions = model.predict(test.features.view())?;
    let predictions = predictions.to_vec();
    let targets = test.target.to_vec();

    let report = EvalReport {
        model: model.name().to_string(),
        n_train: train.len(),
        n_test: test.len(),
        mae: MAE.compute(&predictions, &targets),
        rmse: RMSE.compute(&predictions, &targets),
    };
    log::info!(
        "{}: {} train / {} test rows, MAE={:.4} RMSE={:.4}",
        report.model,
        report.n_train,
        report.n_test,
        report.mae,
        report.rmse
    );
    Ok(report)
}
