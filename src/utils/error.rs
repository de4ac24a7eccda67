use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid provider URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{provider} responded with HTTP {status}")]
    ProviderStatus { provider: String, status: u16 },

    #[error("Directions service returned no route")]
    NoRouteFound,

    #[error("Route geometry is unusable: {message}")]
    InvalidGeometry { message: String },

    #[error("All {failed} provider calls failed")]
    AllProvidersFailed { failed: usize },

    #[error("Aggregation did not finish within {seconds}s")]
    AggregationTimeout { seconds: u64 },

    #[error("Invalid location '{input}': {reason}")]
    InvalidLocation { input: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Provider,
    Configuration,
    Data,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ApiError(_) | FinderError::AggregationTimeout { .. } => {
                ErrorCategory::Network
            }
            FinderError::ProviderStatus { .. }
            | FinderError::NoRouteFound
            | FinderError::AllProvidersFailed { .. } => ErrorCategory::Provider,
            FinderError::UrlError(_)
            | FinderError::ConfigError { .. }
            | FinderError::ConfigValidationError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FinderError::CsvError(_)
            | FinderError::IoError(_)
            | FinderError::SerializationError(_)
            | FinderError::InvalidGeometry { .. } => ErrorCategory::Data,
            FinderError::InvalidLocation { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Provider => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity or raise the request timeouts",
            ErrorCategory::Provider => "Verify the provider API keys and try again later",
            ErrorCategory::Configuration => "Review the configuration file and environment variables",
            ErrorCategory::Data => "Check the output path and the provider response format",
            ErrorCategory::Input => "Pass locations as \"latitude,longitude\", e.g. \"12.9716,77.5946\"",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::InvalidLocation { input, .. } => {
                format!("Could not understand the location '{}'", input)
            }
            FinderError::MissingConfigError { field } => {
                format!("The configuration is missing '{}'", field)
            }
            FinderError::ConfigValidationError { field, .. }
            | FinderError::InvalidConfigValueError { field, .. } => {
                format!("The configuration value for '{}' is not valid", field)
            }
            FinderError::IoError(_) | FinderError::CsvError(_) => {
                "Could not write the search results".to_string()
            }
            _ => "Search providers are currently unavailable".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
