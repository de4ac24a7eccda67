pub mod aggregator;
pub mod classify;
pub mod dedup;
pub mod fallback;
pub mod finder;
pub mod route_resolver;
pub mod sampling;

pub use crate::domain::model::{
    GeocodedPoint, PoiCategory, PointOfInterest, Route, SearchCenter, SearchOutcome, SearchRequest,
};
pub use crate::domain::ports::{
    CategorySearchProvider, ChargingProvider, DirectionsProvider, ProviderOutcome, Storage,
};
pub use crate::utils::error::Result;
