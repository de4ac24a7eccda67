//! Turns a start point, or a resolved route, into search centers.
//!
//! Route sampling is index-based: the samples sit at fixed fractions of the
//! coordinate sequence, not of the travelled distance, so densely vertexed
//! stretches of a route attract more of them.

use crate::domain::model::{GeocodedPoint, Route, SearchCenter};

pub const POINT_RADIUS_KM: f64 = 5.0;
pub const MIN_ROUTE_RADIUS_KM: f64 = 3.0;
pub const MAX_ROUTE_RADIUS_KM: f64 = 10.0;

/// Positions along the geometry, as fractions of the point count.
pub const ROUTE_SAMPLE_FRACTIONS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn point_center(point: GeocodedPoint, radius_km: f64) -> SearchCenter {
    SearchCenter { point, radius_km }
}

/// Radius for route mode: a tenth of the route length, clamped to 3..=10 km.
pub fn route_radius_km(distance_meters: f64) -> f64 {
    (distance_meters / 1000.0 / 10.0).clamp(MIN_ROUTE_RADIUS_KM, MAX_ROUTE_RADIUS_KM)
}

pub fn sample_indices(point_count: usize) -> Vec<usize> {
    if point_count == 0 {
        return Vec::new();
    }
    let last = point_count - 1;
    ROUTE_SAMPLE_FRACTIONS
        .iter()
        .map(|fraction| ((fraction * point_count as f64).floor() as usize).min(last))
        .collect()
}

pub fn route_centers(route: &Route) -> Vec<SearchCenter> {
    let radius_km = route_radius_km(route.distance_meters);
    sample_indices(route.geometry.len())
        .into_iter()
        .map(|index| SearchCenter {
            point: route.geometry[index],
            radius_km,
        })
        .collect()
}

/// Search centers for a request: route samples when a usable route is
/// present, otherwise a single center at `start`.
pub fn plan_search(
    start: GeocodedPoint,
    route: Option<&Route>,
    point_radius_km: f64,
) -> Vec<SearchCenter> {
    match route {
        Some(route) if !route.geometry.is_empty() => route_centers(route),
        _ => vec![point_center(start, point_radius_km)],
    }
}
