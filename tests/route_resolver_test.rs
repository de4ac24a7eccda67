use httpmock::prelude::*;
use poi_finder::adapters::{build_http_client, MapboxDirectionsClient};
use poi_finder::config::toml_config::DirectionsConfig;
use poi_finder::core::route_resolver::RouteResolver;
use poi_finder::GeocodedPoint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const START: GeocodedPoint = GeocodedPoint {
    longitude: 77.5946,
    latitude: 12.9716,
};
const END: GeocodedPoint = GeocodedPoint {
    longitude: 77.7,
    latitude: 13.1,
};

fn resolver(base_url: String) -> RouteResolver<MapboxDirectionsClient> {
    let config = DirectionsConfig {
        base_url,
        access_token: "mb-test-token".to_string(),
        profile: "driving".to_string(),
    };
    let client = build_http_client(Duration::from_secs(5)).unwrap();
    RouteResolver::new(
        MapboxDirectionsClient::new(client, &config),
        StdRng::seed_from_u64(42),
    )
}

fn assert_synthetic(route: &poi_finder::Route) {
    assert!(route.synthetic);
    assert_eq!(route.geometry.len(), 21);
    assert_eq!(route.geometry[0], START);
    assert_eq!(route.geometry[20], END);
    assert_eq!(route.distance_meters, 10_000.0);
    assert!(route.distance_text.ends_with(" km"));
}

#[tokio::test]
async fn test_resolver_uses_provider_route() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path_contains("/directions/v5/mapbox/driving/")
            .query_param("geometries", "geojson")
            .query_param("overview", "full")
            .query_param("access_token", "mb-test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "code": "Ok",
                "routes": [{
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[77.5946, 12.9716], [77.64, 13.03], [77.7, 13.1]]
                    },
                    "distance": 24_300.0,
                    "duration": 2_700.0
                }]
            }));
    });

    let route = resolver(server.base_url()).resolve(START, END).await;

    api_mock.assert();
    assert!(!route.synthetic);
    assert_eq!(route.geometry.len(), 3);
    assert_eq!(route.distance_meters, 24_300.0);
    assert_eq!(route.distance_text, "24.3 km");
    assert_eq!(route.duration_text, "45 min");
}

#[tokio::test]
async fn test_resolver_synthesizes_on_server_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/directions/v5/");
        then.status(500).body("upstream unavailable");
    });

    let route = resolver(server.base_url()).resolve(START, END).await;

    api_mock.assert();
    assert_synthetic(&route);
}

#[tokio::test]
async fn test_resolver_synthesizes_when_no_route_found() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/directions/v5/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"code": "NoRoute", "routes": []}));
    });

    let route = resolver(server.base_url()).resolve(START, END).await;

    api_mock.assert();
    assert_synthetic(&route);
}

#[tokio::test]
async fn test_resolver_synthesizes_when_host_unreachable() {
    let route = resolver("http://127.0.0.1:1".to_string())
        .resolve(START, END)
        .await;
    assert_synthetic(&route);
}
