#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::output::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

/// Effective settings for one run, after merging the config file and flags.
#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub dataset: String,
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub timeout: Option<Duration>,
    pub labels: Vec<String>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Validate for EnrichSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dataset", &self.dataset)?;
        validation::validate_file_extension("dataset", &self.dataset, &["json", "toml"])?;
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output", output_path)?;
        }
        for uid in &self.labels {
            validation::validate_path("label", uid)?;
        }
        Ok(())
    }
}
