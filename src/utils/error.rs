use crate::domain::model::ResourceRef;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("{entity} not found: {uid}")]
    NotFound { entity: &'static str, uid: String },

    #[error("resource schema not found for label {label_uid} (resource {resource})")]
    ResourceSchemaNotFound {
        label_uid: String,
        resource: ResourceRef,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<EnrichError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EnrichError {
    /// Wraps an error with the name of the operation it surfaced from.
    pub fn within(operation: &'static str, source: EnrichError) -> Self {
        EnrichError::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through operation wrappers.
    pub fn root(&self) -> &EnrichError {
        match self {
            EnrichError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Only context failures are transient; everything else repeats on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root(),
            EnrichError::Cancelled | EnrichError::DeadlineExceeded
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.root() {
            EnrichError::Cancelled | EnrichError::DeadlineExceeded => ErrorSeverity::Medium,
            EnrichError::NotFound { .. }
            | EnrichError::ConfigError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::MissingConfigError { .. }
            | EnrichError::TomlError(_)
            | EnrichError::SerializationError(_) => ErrorSeverity::High,
            EnrichError::ResourceSchemaNotFound { .. }
            | EnrichError::IoError(_)
            | EnrichError::CsvError(_) => ErrorSeverity::Critical,
            EnrichError::Operation { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            EnrichError::Cancelled | EnrichError::DeadlineExceeded => {
                "Retry the whole batch, or raise --timeout-ms"
            }
            EnrichError::NotFound { .. } => {
                "Check that every creator and organization referenced by the labels exists in the dataset"
            }
            EnrichError::ResourceSchemaNotFound { .. } => {
                "The resource resolver dropped a referenced resource; this is a bug, not a transient failure"
            }
            EnrichError::ConfigError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::MissingConfigError { .. }
            | EnrichError::TomlError(_) => "Fix the configuration and run again",
            EnrichError::SerializationError(_) => "Check that the dataset is valid JSON",
            EnrichError::IoError(_) | EnrichError::CsvError(_) => {
                "Check file paths and permissions"
            }
            EnrichError::Operation { .. } => "See the underlying error",
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
