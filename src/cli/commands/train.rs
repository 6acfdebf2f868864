//! Train command implementation

use serde_json::json;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::{apply_overrides, TrainArgs};
use crate::config::{load_config, validate_config, ModelKind, OutputFormat, PipelineSpec};
use crate::data::load_dataset;
use crate::eval::{DriftDetector, DriftReport};
use crate::features::{engineer, TrainingSet};
use crate::train::{evaluate, EvalReport, MeanRegressor, PersistenceRegressor, Regressor};

fn build_model(kind: ModelKind) -> Box<dyn Regressor> {
    match kind {
        ModelKind::Persistence => Box::new(PersistenceRegressor),
        ModelKind::Mean => Box::new(MeanRegressor::default()),
    }
}

/// Run normalize → features → split → evaluate for a spec
pub fn run_pipeline(spec: &PipelineSpec) -> crate::error::Result<EvalReport> {
    let table = load_dataset(&spec.data.train, &spec.normalize)?;
    let features = engineer(&table)?;
    let set = TrainingSet::from_features(&features)?;
    let (train, test) = set.split_chronological(spec.split.train_ratio)?;

    let mut model = build_model(spec.model);
    evaluate(model.as_mut(), &train, &test)
}

/// Drift check between the configured reference and candidate files, if both are set
pub fn run_configured_drift(spec: &PipelineSpec) -> crate::error::Result<Option<DriftReport>> {
    let (Some(reference), Some(candidate)) = (&spec.data.reference, &spec.data.candidate) else {
        return Ok(None);
    };
    let reference = load_dataset(reference, &spec.normalize)?;
    let candidate = load_dataset(candidate, &spec.normalize)?;
    Ok(Some(
        DriftDetector::new(reference).detect(&candidate, spec.drift.threshold),
    ))
}

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Running pipeline: {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    let drift = run_configured_drift(&spec).map_err(|e| format!("Drift check failed: {e}"))?;
    let report = run_pipeline(&spec).map_err(|e| format!("Pipeline failed: {e}"))?;

    match args.format {
        OutputFormat::Json => {
            let result = json!({
                "evaluation": report,
                "drift": drift,
            });
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| format!("Failed to serialize report: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &format!("  Model: {}", report.model));
            log(
                level,
                LogLevel::Normal,
                &format!("  Train rows: {}  Test rows: {}", report.n_train, report.n_test),
            );
            log(level, LogLevel::Normal, &format!("  MAE: {:.4}", report.mae));
            log(level, LogLevel::Normal, &format!("  RMSE: {:.4}", report.rmse));
            if let Some(drift) = &drift {
                let drifted = drift.drifted_features();
                let status = if drifted.is_empty() {
                    "none".to_string()
                } else {
                    drifted.join(", ")
                };
                log(level, LogLevel::Normal, &format!("  Drifted features: {status}"));
            }
        }
    }

    Ok(())
}
