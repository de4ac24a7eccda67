use crate::core::aggregator::{planned_call_count, Aggregator};
use crate::core::fallback::FallbackCatalog;
use crate::core::route_resolver::RouteResolver;
use crate::core::sampling::{plan_search, POINT_RADIUS_KM};
use crate::domain::model::{ResultOrigin, SearchOutcome, SearchRequest};
use crate::domain::ports::{CategorySearchProvider, ChargingProvider, DirectionsProvider};
use crate::utils::error::FinderError;
use rand::rngs::StdRng;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_AGGREGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Entry point of the search: resolve the route, pick search centers, query
/// providers, and fall back to placeholder POIs if aggregation fails.
pub struct PoiFinder<D, C, G>
where
    D: DirectionsProvider,
    C: ChargingProvider,
    G: CategorySearchProvider,
{
    resolver: RouteResolver<D>,
    aggregator: Aggregator<C, G>,
    fallback: FallbackCatalog,
    rng: Mutex<StdRng>,
    point_radius_km: f64,
    aggregation_timeout: Duration,
}

impl<D, C, G> PoiFinder<D, C, G>
where
    D: DirectionsProvider,
    C: ChargingProvider,
    G: CategorySearchProvider,
{
    pub fn new(
        resolver: RouteResolver<D>,
        aggregator: Aggregator<C, G>,
        fallback: FallbackCatalog,
        rng: StdRng,
    ) -> Self {
        Self {
            resolver,
            aggregator,
            fallback,
            rng: Mutex::new(rng),
            point_radius_km: POINT_RADIUS_KM,
            aggregation_timeout: DEFAULT_AGGREGATION_TIMEOUT,
        }
    }

    pub fn with_point_radius_km(mut self, radius_km: f64) -> Self {
        self.point_radius_km = radius_km;
        self
    }

    pub fn with_aggregation_timeout(mut self, timeout: Duration) -> Self {
        self.aggregation_timeout = timeout;
        self
    }

    pub async fn find(&self, request: SearchRequest) -> SearchOutcome {
        let route = match request.end {
            Some(end) => Some(self.resolver.resolve(request.start, end).await),
            None => None,
        };

        let centers = plan_search(request.start, route.as_ref(), self.point_radius_km);
        let planned_calls = planned_call_count(&centers);
        tracing::info!(
            "Searching around {} center(s), radius {:.1} km",
            centers.len(),
            centers.first().map(|c| c.radius_km).unwrap_or_default()
        );

        let aggregation =
            match tokio::time::timeout(self.aggregation_timeout, self.aggregator.collect(&centers))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(FinderError::AggregationTimeout {
                    seconds: self.aggregation_timeout.as_secs(),
                }),
            };

        match aggregation {
            Ok(aggregation) => SearchOutcome {
                route,
                centers,
                pois: aggregation.pois,
                origin: ResultOrigin::Live,
                total_calls: aggregation.calls,
                failed_calls: aggregation.failed_calls,
            },
            Err(e) => {
                tracing::error!("POI aggregation failed, serving fallback catalog: {}", e);
                let failed_calls = match e {
                    FinderError::AllProvidersFailed { failed } => failed,
                    _ => planned_calls,
                };
                let pois = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    self.fallback.generate(request.start, &mut *rng)
                };
                SearchOutcome {
                    route,
                    centers,
                    pois,
                    origin: ResultOrigin::Fallback,
                    total_calls: planned_calls,
                    failed_calls,
                }
            }
        }
    }
}
