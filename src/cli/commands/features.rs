//! Features command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::FeaturesArgs;
use crate::data::{load_dataset, NormalizeOptions};
use crate::features::engineer;

pub fn run_features(args: FeaturesArgs, level: LogLevel) -> Result<(), String> {
    if !args.input.exists() {
        return Err(format!("File not found: {}", args.input.display()));
    }

    let table = load_dataset(&args.input, &NormalizeOptions::default())
        .map_err(|e| format!("Failed to load {}: {e}", args.input.display()))?;
    let features = engineer(&table).map_err(|e| format!("Feature engineering failed: {e}"))?;

    match &args.output {
        Some(path) => {
            features
                .to_csv_path(path)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Wrote {} rows x {} columns to {}",
                    features.len(),
                    features.columns().len(),
                    path.display()
                ),
            );
        }
        None => {
            features
                .to_csv_writer(std::io::stdout().lock())
                .map_err(|e| format!("Failed to write features: {e}"))?;
        }
    }

    Ok(())
}
