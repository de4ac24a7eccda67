use crate::domain::model::SearchOutcome;
use crate::utils::error::{FinderError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
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

#[derive(Serialize)]
struct PoiRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    latitude: f64,
    longitude: f64,
    address: &'a str,
    connectors: String,
    status: &'a str,
    source: &'a str,
}

pub fn render(outcome: &SearchOutcome, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => render_json(outcome),
        OutputFormat::Csv => render_csv(outcome),
    }
}

pub fn render_json(outcome: &SearchOutcome) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(outcome)?)
}

/// One row per POI; connector labels are joined with "; ".
pub fn render_csv(outcome: &SearchOutcome) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for poi in &outcome.pois {
        writer.serialize(PoiRow {
            id: &poi.id,
            name: &poi.name,
            category: poi.category.as_str(),
            latitude: poi.location.latitude,
            longitude: poi.location.longitude,
            address: &poi.address,
            connectors: poi.connectors.as_deref().unwrap_or_default().join("; "),
            status: poi.status.as_deref().unwrap_or_default(),
            source: &poi.source,
        })?;
    }

    writer.into_inner().map_err(|e| FinderError::IoError(e.into_error()))
}
