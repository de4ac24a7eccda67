pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::domain::model::{GeocodedPoint, SearchRequest};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;

pub use toml_config::FinderConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "poi-finder")]
#[command(about = "Find EV chargers, hospitals, restaurants and fuel stations near a place or along a route")]
pub struct CliConfig {
    /// Start location as "latitude,longitude"
    #[arg(long, allow_hyphen_values = true)]
    pub start: String,

    /// Optional destination as "latitude,longitude"; enables route search
    #[arg(long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// TOML configuration file; API keys are read from the environment when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Fix the jitter source so synthetic routes and placeholders are reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn search_request(&self) -> Result<SearchRequest> {
        let start = GeocodedPoint::parse_lat_lng(&self.start)?;
        let end = self
            .end
            .as_deref()
            .map(GeocodedPoint::parse_lat_lng)
            .transpose()?;
        Ok(SearchRequest { start, end })
    }

    pub fn load_finder_config(&self) -> Result<FinderConfig> {
        let config = match &self.config {
            Some(path) => FinderConfig::from_file(path)?,
            None => FinderConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.search_request().map(|_| ())
    }
}
