use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{FormatterError, Result};

/// Shell-side settings. The normalization rules themselves are fixed and are
/// never read from configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default file name for the cleaned CSV.
    pub output_file: String,
    /// How many normalized rows to print after a conversion.
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: "cleaned_registration_upload.csv".to_string(),
            preview_rows: 50,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to the
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        if !Path::new(config_path).exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            FormatterError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
