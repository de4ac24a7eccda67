use crate::domain::model::{GeocodedPoint, Route};
use crate::domain::ports::DirectionsProvider;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::{Mutex, PoisonError};

/// Segments in a synthetic route; the path has one more point than this.
pub const SYNTHETIC_SEGMENTS: usize = 20;
/// Largest offset, in degrees, applied to interior synthetic points.
pub const SYNTHETIC_JITTER_DEGREES: f64 = 0.005;
/// Distance reported to the radius policy for synthetic routes.
pub const SYNTHETIC_NOMINAL_METERS: f64 = 10_000.0;

/// "12.3 km"
pub fn format_distance(distance_meters: f64) -> String {
    format!("{:.1} km", distance_meters / 1000.0)
}

/// "H hr M min" from an hour upwards, otherwise "M min".
pub fn format_duration(duration_seconds: f64) -> String {
    let total_minutes = (duration_seconds / 60.0).round().max(0.0) as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Straight-line path from `start` to `end` with small jitter on interior
/// points and a plausible randomized distance (10-60 km) and duration
/// (30-90 min). `distance_meters` holds the fixed nominal value.
pub fn synthesize_route<R: Rng + ?Sized>(
    start: GeocodedPoint,
    end: GeocodedPoint,
    rng: &mut R,
) -> Route {
    let geometry = (0..=SYNTHETIC_SEGMENTS)
        .map(|i| {
            if i == 0 {
                return start;
            }
            if i == SYNTHETIC_SEGMENTS {
                return end;
            }
            let ratio = i as f64 / SYNTHETIC_SEGMENTS as f64;
            let lon = start.longitude
                + (end.longitude - start.longitude) * ratio
                + rng.random_range(-SYNTHETIC_JITTER_DEGREES..=SYNTHETIC_JITTER_DEGREES);
            let lat = start.latitude
                + (end.latitude - start.latitude) * ratio
                + rng.random_range(-SYNTHETIC_JITTER_DEGREES..=SYNTHETIC_JITTER_DEGREES);
            GeocodedPoint::new(lon, lat)
        })
        .collect();

    let display_km: u32 = rng.random_range(10..=60);
    let minutes: u32 = rng.random_range(30..=90);
    let duration_seconds = f64::from(minutes) * 60.0;

    Route {
        geometry,
        distance_meters: SYNTHETIC_NOMINAL_METERS,
        duration_seconds,
        distance_text: format_distance(f64::from(display_km) * 1000.0),
        duration_text: format_duration(duration_seconds),
        synthetic: true,
    }
}

/// Resolves driving routes and never fails: when the directions provider
/// errors, a synthetic route is returned instead.
pub struct RouteResolver<D: DirectionsProvider> {
    directions: D,
    rng: Mutex<StdRng>,
}

impl<D: DirectionsProvider> RouteResolver<D> {
    pub fn new(directions: D, rng: StdRng) -> Self {
        Self {
            directions,
            rng: Mutex::new(rng),
        }
    }

    pub async fn resolve(&self, start: GeocodedPoint, end: GeocodedPoint) -> Route {
        match self.directions.directions(start, end).await {
            Ok(route) => {
                tracing::debug!(
                    "Resolved route {} -> {}: {} ({} points)",
                    start,
                    end,
                    route.distance_text,
                    route.geometry.len()
                );
                route
            }
            Err(e) => {
                tracing::warn!("Route calculation failed, using synthetic route: {}", e);
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                synthesize_route(start, end, &mut *rng)
            }
        }
    }
}
