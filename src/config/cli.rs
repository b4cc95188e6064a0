use crate::config::{EnrichSettings, TomlConfig};
use crate::core::output::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "label-enrich")]
#[command(about = "Enrich stored labels with resource, creator and organization summaries")]
pub struct CliConfig {
    /// Dataset file (.json or .toml) with organizations, creators, resources and labels
    #[arg(long)]
    pub dataset: Option<String>,

    /// TOML configuration file; flags given here take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Label uid to enrich, in order; repeat for more. Defaults to every label
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    /// Output format: json or csv
    #[arg(long)]
    pub format: Option<String>,

    /// Directory to write labels.<format> into; prints to stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Deadline for the whole run, in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merges flags over the optional config file.
    pub fn resolve(&self) -> Result<EnrichSettings> {
        let file = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };
        let section = file.as_ref().map(|c| &c.enrich);

        let dataset = self
            .dataset
            .clone()
            .or_else(|| section.and_then(|s| s.dataset.clone()));
        let dataset = validation::validate_required_field("dataset", &dataset)?.clone();

        let format = self
            .format
            .as_deref()
            .or_else(|| section.and_then(|s| s.format.as_deref()))
            .map(str::parse::<OutputFormat>)
            .transpose()?
            .unwrap_or_default();

        let timeout_ms = self
            .timeout_ms
            .or_else(|| section.and_then(|s| s.timeout_ms));
        if let Some(timeout_ms) = timeout_ms {
            validation::validate_range("timeout_ms", timeout_ms, 1, 3_600_000)?;
        }

        let settings = EnrichSettings {
            dataset,
            format,
            output_path: self
                .output
                .clone()
                .or_else(|| section.and_then(|s| s.output_path.clone())),
            timeout: timeout_ms.map(Duration::from_millis),
            labels: self.labels.clone(),
            log_level: file.as_ref().and_then(|c| c.log_level().map(str::to_string)),
            log_json: file.as_ref().map(|c| c.log_json()).unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }
}
