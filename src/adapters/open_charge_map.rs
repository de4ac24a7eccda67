//! Charging-registry adapter (Open Charge Map `/v3/poi`).

use crate::adapters::endpoint;
use crate::config::toml_config::ChargingConfig;
use crate::domain::model::{GeocodedPoint, PoiCategory, PointOfInterest, SearchCenter};
use crate::domain::ports::{ChargingProvider, ProviderOutcome};
use crate::utils::error::{FinderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const PROVIDER: &str = "openchargemap";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmStation {
    #[serde(rename = "ID")]
    pub id: i64,
    pub address_info: Option<OcmAddress>,
    pub connections: Option<Vec<OcmConnection>>,
    pub status_type: Option<OcmTitled>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmAddress {
    pub title: Option<String>,
    pub address_line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmConnection {
    pub connection_type: Option<OcmTitled>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OcmTitled {
    pub title: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Maps one registry record to a POI. Records without a usable position are
/// dropped.
pub fn normalize_station(station: OcmStation) -> Option<PointOfInterest> {
    let Some(address) = station.address_info else {
        tracing::debug!("Skipping station {} without address info", station.id);
        return None;
    };
    let location = match (address.longitude, address.latitude) {
        (Some(lon), Some(lat)) => GeocodedPoint::new(lon, lat),
        _ => {
            tracing::debug!("Skipping station {} without coordinates", station.id);
            return None;
        }
    };
    if !location.is_valid() {
        tracing::debug!("Skipping station {} at invalid {}", station.id, location);
        return None;
    }

    let address_text = [
        &address.address_line1,
        &address.town,
        &address.state_or_province,
        &address.postcode,
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect::<Vec<_>>()
    .join(", ");

    let connectors = station
        .connections
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| c.connection_type.and_then(|t| t.title))
        .filter(|label| !label.trim().is_empty())
        .collect();

    let status = station
        .status_type
        .and_then(|s| s.title)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Some(PointOfInterest {
        id: format!("ocm-{}", station.id),
        name: non_empty(&address.title)
            .unwrap_or("Unknown Station")
            .to_string(),
        category: PoiCategory::ChargingStation,
        location,
        address: address_text,
        connectors: Some(connectors),
        status: Some(status),
        source: PROVIDER.to_string(),
    })
}

pub struct OpenChargeMapClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_results: u32,
}

impl OpenChargeMapClient {
    pub fn new(client: Client, config: &ChargingConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        }
    }

    async fn fetch(&self, center: &SearchCenter) -> Result<Vec<PointOfInterest>> {
        let url = endpoint(&self.base_url, &["v3", "poi", ""])?;
        tracing::debug!(
            "Requesting charging stations near {} within {} km",
            center.point,
            center.radius_km
        );

        let response = self
            .client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .query(&[
                ("output", "json".to_string()),
                ("latitude", center.point.latitude.to_string()),
                ("longitude", center.point.longitude.to_string()),
                ("distance", center.radius_km.to_string()),
                ("distanceunit", "km".to_string()),
                ("maxresults", self.max_results.to_string()),
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

        let stations: Vec<OcmStation> = response.json().await?;
        Ok(stations.into_iter().filter_map(normalize_station).collect())
    }
}

#[async_trait]
impl ChargingProvider for OpenChargeMapClient {
    async fn stations_near(&self, center: &SearchCenter) -> ProviderOutcome {
        ProviderOutcome::from_result(PROVIDER, self.fetch(center).await)
    }
}
