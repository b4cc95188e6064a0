pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{Dataset, InMemoryStore, LocalStorage};
pub use config::{EnrichSettings, TomlConfig};
pub use crate::core::{enricher::LabelEnricher, output::OutputFormat, runner::EnrichRunner};
pub use domain::context::EnrichContext;
pub use utils::error::{EnrichError, ErrorSeverity, Result};
