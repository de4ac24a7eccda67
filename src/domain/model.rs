use crate::utils::error::{FinderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (longitude, latitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeocodedPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Parses the "latitude,longitude" form emitted by browser geolocation
    /// and typed into location inputs.
    pub fn parse_lat_lng(input: &str) -> Result<Self> {
        let invalid = |reason: &str| FinderError::InvalidLocation {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (lat, lng) = input
            .split_once(',')
            .ok_or_else(|| invalid("expected \"latitude,longitude\""))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        let point = Self::new(longitude, latitude);
        if !point.is_valid() {
            return Err(invalid("coordinates are out of range"));
        }
        Ok(point)
    }
}

impl From<[f64; 2]> for GeocodedPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl fmt::Display for GeocodedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoiCategory {
    ChargingStation,
    Hospital,
    Restaurant,
    FuelStation,
    Other,
}

impl PoiCategory {
    /// Categories queried through the generic search provider for every
    /// search center. Charging comes last as a cross-check against the
    /// dedicated charging registry.
    pub const GENERIC_SEARCH: [PoiCategory; 4] = [
        PoiCategory::Hospital,
        PoiCategory::Restaurant,
        PoiCategory::FuelStation,
        PoiCategory::ChargingStation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PoiCategory::ChargingStation => "charging-station",
            PoiCategory::Hospital => "hospital",
            PoiCategory::Restaurant => "restaurant",
            PoiCategory::FuelStation => "fuel-station",
            PoiCategory::Other => "other",
        }
    }
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub category: PoiCategory,
    pub location: GeocodedPoint,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub geometry: Vec<GeocodedPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_text: String,
    pub duration_text: String,
    /// Set when the directions service was unavailable and the path was
    /// interpolated locally.
    pub synthetic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchCenter {
    pub point: GeocodedPoint,
    pub radius_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRequest {
    pub start: GeocodedPoint,
    pub end: Option<GeocodedPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub route: Option<Route>,
    pub centers: Vec<SearchCenter>,
    pub pois: Vec<PointOfInterest>,
    pub origin: ResultOrigin,
    /// Provider calls planned for the search centers.
    pub total_calls: usize,
    /// Calls that failed. When aggregation timed out, every planned call is
    /// counted here since none of their answers were used.
    pub failed_calls: usize,
}
