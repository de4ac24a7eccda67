pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{build_finder, HttpPoiFinder};
pub use config::{cli::LocalStorage, FinderConfig};
pub use crate::core::finder::PoiFinder;
pub use domain::model::{
    GeocodedPoint, PoiCategory, PointOfInterest, ResultOrigin, Route, SearchCenter, SearchOutcome,
    SearchRequest,
};
pub use utils::error::{FinderError, Result};
