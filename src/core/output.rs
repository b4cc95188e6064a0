use crate::core::LabelView;
use crate::utils::error::{EnrichError, Result};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EnrichError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(EnrichError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: json, csv".to_string(),
            }),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    label_uid: &'a str,
    resource_type: &'static str,
    resource_uid: &'a str,
    resource_name: &'a str,
    key: &'a str,
    value: &'a str,
    creator: &'a str,
    organization: &'a str,
    created_at: String,
}

impl<'a> From<&'a LabelView> for CsvRow<'a> {
    fn from(view: &'a LabelView) -> Self {
        Self {
            label_uid: &view.label_uid,
            resource_type: view.resource_type.as_str(),
            resource_uid: &view.resource_uid,
            resource_name: view.resource.name(),
            key: &view.key,
            value: &view.value,
            creator: &view.creator.name,
            organization: &view.organization.name,
            created_at: view.created_at.to_rfc3339(),
        }
    }
}

pub fn render(views: &[LabelView], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(views)?),
        OutputFormat::Csv => render_csv(views),
    }
}

fn render_csv(views: &[LabelView]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if views.is_empty() {
        // serialize() only emits the header alongside the first row
        writer.write_record([
            "label_uid",
            "resource_type",
            "resource_uid",
            "resource_name",
            "key",
            "value",
            "creator",
            "organization",
            "created_at",
        ])?;
    }
    for view in views {
        writer.serialize(CsvRow::from(view))?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        EnrichError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    String::from_utf8(bytes)
        .map_err(|e| EnrichError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
