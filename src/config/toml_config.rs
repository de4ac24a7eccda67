use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CHARGING_API_KEY_ENV: &str = "OPEN_CHARGE_MAP_API_KEY";
pub const CATEGORY_SEARCH_API_KEY_ENV: &str = "TOMTOM_API_KEY";
pub const DIRECTIONS_TOKEN_ENV: &str = "MAPBOX_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub search: SearchConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub point_radius_km: f64,
    pub max_concurrent_requests: usize,
    pub aggregation_timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            point_radius_km: 5.0,
            max_concurrent_requests: 5,
            aggregation_timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub request_timeout_seconds: u64,
    pub charging: ChargingConfig,
    pub category_search: CategorySearchConfig,
    pub directions: DirectionsConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            charging: ChargingConfig::default(),
            category_search: CategorySearchConfig::default(),
            directions: DirectionsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargingConfig {
    pub base_url: String,
    pub api_key: String,
    pub max_results: u32,
}

impl Default for ChargingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openchargemap.io".to_string(),
            api_key: String::new(),
            max_results: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySearchConfig {
    pub base_url: String,
    pub api_key: String,
    pub limit: u32,
}

impl Default for CategorySearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.tomtom.com".to_string(),
            api_key: String::new(),
            limit: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub access_token: String,
    pub profile: String,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            access_token: String::new(),
            profile: "driving".to_string(),
        }
    }
}

impl FinderConfig {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML, substituting `${VAR}` placeholders first
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FinderError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Defaults, with API keys taken from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.providers.charging.api_key = env_or_empty(CHARGING_API_KEY_ENV);
        config.providers.category_search.api_key = env_or_empty(CATEGORY_SEARCH_API_KEY_ENV);
        config.providers.directions.access_token = env_or_empty(DIRECTIONS_TOKEN_ENV);
        config
    }

    /// Unset variables become empty strings, so a missing key is sent as an
    /// empty credential and rejected upstream like any other bad key.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FinderError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::debug!("Environment variable {} is not set", var_name);
                String::new()
            })
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("providers.charging.base_url", &self.providers.charging.base_url)?;
        validate_url(
            "providers.category_search.base_url",
            &self.providers.category_search.base_url,
        )?;
        validate_url(
            "providers.directions.base_url",
            &self.providers.directions.base_url,
        )?;

        validate_positive_number(
            "search.max_concurrent_requests",
            self.search.max_concurrent_requests,
            1,
        )?;
        validate_range("search.point_radius_km", self.search.point_radius_km, 0.1, 50.0)?;
        validate_range(
            "search.aggregation_timeout_seconds",
            self.search.aggregation_timeout_seconds,
            1,
            600,
        )?;
        validate_range(
            "providers.request_timeout_seconds",
            self.providers.request_timeout_seconds,
            1,
            120,
        )?;

        if self.providers.directions.profile.trim().is_empty() {
            return Err(FinderError::MissingConfigError {
                field: "providers.directions.profile".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.request_timeout_seconds)
    }

    pub fn aggregation_timeout(&self) -> Duration {
        Duration::from_secs(self.search.aggregation_timeout_seconds)
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
