//! Feature matrix and target vector handed to the training collaborator

use chrono::NaiveDate;
use ndarray::{s, Array1, Array2, ArrayView1};

use super::engineer::{
    date_cells, numeric_cells, require_columns, FeatureError, IS_WEEKEND, LAG_1, ROLLING_3,
    ROLLING_7,
};
use crate::data::{
    Table, DAILY_COST, DATA_TRANSFER_GB, DATE, EC2_HOURS, LAMBDA_INVOCATIONS, RDS_USAGE,
    STORAGE_GB,
};
use crate::error::{Error, Result};

/// Model input columns, in matrix order
pub const FEATURE_COLUMNS: [&str; 9] = [
    EC2_HOURS,
    STORAGE_GB,
    DATA_TRANSFER_GB,
    RDS_USAGE,
    LAMBDA_INVOCATIONS,
    LAG_1,
    ROLLING_3,
    ROLLING_7,
    IS_WEEKEND,
];

/// Prediction target column
pub const TARGET: &str = DAILY_COST;

/// Default share of rows used for training in a chronological split
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Row-aligned, time-ordered features and target
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    /// One row per day, columns in [`FEATURE_COLUMNS`] order
    pub features: Array2<f64>,
    pub target: Array1<f64>,
    pub dates: Vec<NaiveDate>,
}

impl TrainingSet {
    /// Extract features and target from an engineered table.
    ///
    /// Rows are taken in table order, which [`super::engineer`] leaves sorted
    /// by date.
    pub fn from_features(table: &Table) -> std::result::Result<Self, FeatureError> {
        let mut required: Vec<&str> = vec![DATE];
        required.extend(FEATURE_COLUMNS);
        required.push(TARGET);
        require_columns(table, &required)?;

        let columns = FEATURE_COLUMNS
            .iter()
            .map(|name| numeric_cells(table, name))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let target = numeric_cells(table, TARGET)?;
        let dates = date_cells(table)?;

        let features =
            Array2::from_shape_fn((table.len(), FEATURE_COLUMNS.len()), |(i, j)| columns[j][i]);

        Ok(Self {
            features,
            target: Array1::from(target),
            dates,
        })
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// View of a single feature column by name
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == name)
            .map(|j| self.features.column(j))
    }

    /// Split into training and held-out sets without shuffling.
    ///
    /// The first `floor(len * train_ratio)` rows train; the rest are held out,
    /// so every held-out row is later in time than every training row.
    pub fn split_chronological(&self, train_ratio: f64) -> Result<(Self, Self)> {
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            return Err(Error::InvalidInput(format!(
                "train ratio must be in (0, 1), got {train_ratio}"
            )));
        }
        let cut = split_index(self.len(), train_ratio);
        Ok((self.rows(0, cut), self.rows(cut, self.len())))
    }

    fn rows(&self, start: usize, end: usize) -> Self {
        Self {
            features: self.features.slice(s![start..end, ..]).to_owned(),
            target: self.target.slice(s![start..end]).to_owned(),
            dates: self.dates[start..end].to_vec(),
        }
    }
}

/// Row index where the held-out portion begins
pub fn split_index(len: usize, train_ratio: f64) -> usize {
    ((len as f64 * train_ratio).floor() as usize).min(len)
}
