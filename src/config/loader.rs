//! Loading pipeline specs from YAML

use std::fs;
use std::path::Path;

use super::schema::PipelineSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};

/// Parse a pipeline spec from YAML text without validating it
pub fn parse_config(yaml: &str) -> Result<PipelineSpec> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Load and validate a pipeline spec from a YAML file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec = parse_config(&yaml_content)?;
    validate_config(&spec)?;
    log::debug!("Loaded config from {}", config_path.as_ref().display());

    Ok(spec)
}
