//! Config file loading and validation.

use crate::ConfigError;
use crate::model::PricecraftConfig;
use log::debug;
use std::fs;
use std::path::Path;

/// Load and validate config from a json5 file.
pub fn load_config(path: &Path) -> Result<PricecraftConfig, ConfigError> {
    debug!("loading config (path={})", path.display());
    let contents = fs::read_to_string(path)?;
    let config: PricecraftConfig = json5::from_str(&contents)?;
    validate(&config)?;
    Ok(config)
}

/// Load config from an optional path, falling back to defaults.
pub fn load_optional_config(path: Option<&Path>) -> Result<PricecraftConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            debug!("no config path given, using defaults");
            Ok(PricecraftConfig::default())
        }
    }
}

/// Validate field-level constraints the schema cannot express.
fn validate(config: &PricecraftConfig) -> Result<(), ConfigError> {
    if config.attachments.max_size_bytes == 0 {
        return Err(invalid(
            "attachments.max_size_bytes",
            "must be greater than zero",
        ));
    }
    if config.attachments.max_files == 0 {
        return Err(invalid("attachments.max_files", "must be greater than zero"));
    }
    if config.attachments.allowed_types.is_empty() {
        return Err(invalid("attachments.allowed_types", "must not be empty"));
    }
    for kind in &config.attachments.allowed_types {
        if !kind.contains('/') {
            return Err(invalid(
                "attachments.allowed_types",
                &format!("{kind:?} is not a MIME type"),
            ));
        }
    }
    if config.server.host.is_empty() {
        return Err(invalid("server.host", "must not be empty"));
    }
    Ok(())
}

fn invalid(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}
