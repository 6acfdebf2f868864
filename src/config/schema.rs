//! YAML schema for declarative pipeline configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::NormalizeOptions;
use crate::eval::DEFAULT_THRESHOLD;
use crate::features::DEFAULT_TRAIN_RATIO;

/// Baseline model used by the `train` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Yesterday's cost
    #[default]
    Persistence,
    /// Mean training cost
    Mean,
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "persistence" | "naive" => Ok(ModelKind::Persistence),
            "mean" => Ok(ModelKind::Mean),
            _ => Err(format!(
                "Unknown model: {s}. Valid models: persistence, mean"
            )),
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Persistence => write!(f, "persistence"),
            ModelKind::Mean => write!(f, "mean"),
        }
    }
}

/// Complete pipeline specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Input files
    pub data: DataConfig,

    /// Layout normalization knobs
    #[serde(default)]
    pub normalize: NormalizeOptions,

    /// Chronological train/test split
    #[serde(default)]
    pub split: SplitConfig,

    /// Drift detection settings
    #[serde(default)]
    pub drift: DriftConfig,

    /// Baseline model for evaluation
    #[serde(default)]
    pub model: ModelKind,
}

/// Data file locations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Usage history to engineer and split
    pub train: PathBuf,

    /// Reference window for drift checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,

    /// Newly observed window for drift checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of the earliest rows used for training
    pub train_ratio: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// p-value below which a feature counts as drifted
    pub threshold: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
