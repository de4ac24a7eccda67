//! Generic category-search adapter (TomTom Search API `categorySearch`).

use crate::adapters::endpoint;
use crate::config::toml_config::CategorySearchConfig;
use crate::core::classify::{classify, search_term};
use crate::domain::model::{GeocodedPoint, PoiCategory, PointOfInterest, SearchCenter};
use crate::domain::ports::{CategorySearchProvider, ProviderOutcome};
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const PROVIDER: &str = "tomtom";

#[derive(Debug, Deserialize)]
pub struct TomTomSearchResponse {
    pub results: Vec<TomTomSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct TomTomSearchResult {
    pub id: String,
    pub poi: Option<TomTomPoi>,
    pub position: TomTomPosition,
    pub address: Option<TomTomAddress>,
}

#[derive(Debug, Deserialize)]
pub struct TomTomPoi {
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct TomTomPosition {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct TomTomAddress {
    #[serde(rename = "freeformAddress")]
    pub freeform_address: Option<String>,
}

pub fn normalize_result(result: TomTomSearchResult, queried_term: &str) -> PointOfInterest {
    let (name, label) = match result.poi {
        Some(poi) => (
            poi.name,
            poi.categories.and_then(|c| c.into_iter().next()),
        ),
        None => (None, None),
    };

    PointOfInterest {
        id: format!("tomtom-{}", result.id),
        name: name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown Location".to_string()),
        category: classify(label.as_deref(), queried_term),
        location: GeocodedPoint::new(result.position.lon, result.position.lat),
        address: result
            .address
            .and_then(|a| a.freeform_address)
            .unwrap_or_default(),
        connectors: None,
        status: None,
        source: PROVIDER.to_string(),
    }
}

pub struct TomTomSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    limit: u32,
}

impl TomTomSearchClient {
    pub fn new(client: Client, config: &CategorySearchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            limit: config.limit,
        }
    }

    async fn fetch(&self, center: &SearchCenter, term: &str) -> Result<Vec<PointOfInterest>> {
        let file = format!("{}.json", term);
        let url = endpoint(&self.base_url, &["search", "2", "categorySearch", &file])?;
        let radius_meters = (center.radius_km * 1000.0).round() as u64;
        tracing::debug!(
            "Searching '{}' near {} within {} m",
            term,
            center.point,
            radius_meters
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", center.point.latitude.to_string()),
                ("lon", center.point.longitude.to_string()),
                ("radius", radius_meters.to_string()),
                ("limit", self.limit.to_string()),
                ("key", self.api_key.clone()),
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

        let body: TomTomSearchResponse = response.json().await?;
        Ok(body
            .results
            .into_iter()
            .map(|r| normalize_result(r, term))
            .filter(|poi| poi.location.is_valid())
            .collect())
    }
}

#[async_trait]
impl CategorySearchProvider for TomTomSearchClient {
    async fn search(&self, center: &SearchCenter, category: PoiCategory) -> ProviderOutcome {
        let Some(term) = search_term(category) else {
            tracing::debug!("No search term for category {}", category);
            return ProviderOutcome::Found(Vec::new());
        };
        ProviderOutcome::from_result(PROVIDER, self.fetch(center, term).await)
    }
}
