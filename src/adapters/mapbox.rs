//! Directions adapter (Mapbox Directions API v5).

use crate::adapters::endpoint;
use crate::config::toml_config::DirectionsConfig;
use crate::core::route_resolver::{format_distance, format_duration};
use crate::domain::model::{GeocodedPoint, Route};
use crate::domain::ports::DirectionsProvider;
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const PROVIDER: &str = "mapbox";

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    pub geometry: LineString,
    pub distance: f64,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

/// Converts the first candidate route. Fails on an empty route list or a
/// geometry with fewer than two points.
pub fn first_route(response: DirectionsResponse) -> Result<Route> {
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(FinderError::NoRouteFound)?;

    if route.geometry.coordinates.len() < 2 {
        return Err(FinderError::InvalidGeometry {
            message: format!(
                "expected at least 2 points, got {}",
                route.geometry.coordinates.len()
            ),
        });
    }

    let distance_meters = route.distance.max(0.0);
    let duration_seconds = route.duration.max(0.0);

    Ok(Route {
        geometry: route
            .geometry
            .coordinates
            .into_iter()
            .map(GeocodedPoint::from)
            .collect(),
        distance_meters,
        duration_seconds,
        distance_text: format_distance(distance_meters),
        duration_text: format_duration(duration_seconds),
        synthetic: false,
    })
}

pub struct MapboxDirectionsClient {
    client: Client,
    base_url: String,
    access_token: String,
    profile: String,
}

impl MapboxDirectionsClient {
    pub fn new(client: Client, config: &DirectionsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
            profile: config.profile.clone(),
        }
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirectionsClient {
    async fn directions(&self, start: GeocodedPoint, end: GeocodedPoint) -> Result<Route> {
        let waypoints = format!(
            "{},{};{},{}",
            start.longitude, start.latitude, end.longitude, end.latitude
        );
        let url = endpoint(
            &self.base_url,
            &["directions", "v5", "mapbox", &self.profile, &waypoints],
        )?;
        tracing::debug!("Requesting {} route {} -> {}", self.profile, start, end);

        let response = self
            .client
            .get(url)
            .query(&[
                ("geometries", "geojson"),
                ("overview", "full"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", PROVIDER, status);
        if !status.is_success() {
            return Err(FinderError::ProviderStatus {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
            });
        }

        let body: DirectionsResponse = response.json().await?;
        first_route(body)
    }
}
