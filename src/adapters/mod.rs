// Adapters layer: HTTP clients for the external geodata providers, and the
// wiring that turns a FinderConfig into a ready PoiFinder.

pub mod mapbox;
pub mod open_charge_map;
pub mod tomtom;

use crate::config::toml_config::FinderConfig;
use crate::core::aggregator::Aggregator;
use crate::core::fallback::FallbackCatalog;
use crate::core::finder::PoiFinder;
use crate::core::route_resolver::RouteResolver;
use crate::utils::error::{FinderError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub use mapbox::MapboxDirectionsClient;
pub use open_charge_map::OpenChargeMapClient;
pub use tomtom::TomTomSearchClient;

pub type HttpPoiFinder = PoiFinder<MapboxDirectionsClient, OpenChargeMapClient, TomTomSearchClient>;

/// Appends percent-encoded path segments to a provider base URL.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| FinderError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: "URL cannot carry a path".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// One client shared by every adapter; its timeout bounds each provider call.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("poi-finder/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Builds the HTTP-backed finder. `seed` fixes the jitter used for synthetic
/// routes and fallback placeholders.
pub fn build_finder(config: &FinderConfig, seed: Option<u64>) -> Result<HttpPoiFinder> {
    let client = build_http_client(config.request_timeout())?;
    let seed = seed.unwrap_or_else(rand::random);

    let resolver = RouteResolver::new(
        MapboxDirectionsClient::new(client.clone(), &config.providers.directions),
        StdRng::seed_from_u64(seed),
    );
    let aggregator = Aggregator::new(
        OpenChargeMapClient::new(client.clone(), &config.providers.charging),
        TomTomSearchClient::new(client, &config.providers.category_search),
        config.search.max_concurrent_requests,
    );

    Ok(PoiFinder::new(
        resolver,
        aggregator,
        FallbackCatalog::default(),
        StdRng::seed_from_u64(seed.wrapping_add(1)),
    )
    .with_point_radius_km(config.search.point_radius_km)
    .with_aggregation_timeout(config.aggregation_timeout()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint(
            "https://api.tomtom.com",
            &["search", "2", "categorySearch", "petrol station.json"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.tomtom.com/search/2/categorySearch/petrol%20station.json"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_trailing_slash() {
        let url = endpoint("http://localhost:8080/proxy", &["v3", "poi", ""]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/proxy/v3/poi/");
    }

    #[test]
    fn test_build_finder_from_defaults() {
        assert!(build_finder(&FinderConfig::default(), Some(1)).is_ok());
    }
}
