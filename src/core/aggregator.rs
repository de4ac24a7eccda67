use crate::core::dedup::deduplicate;
use crate::domain::model::{PoiCategory, PointOfInterest, SearchCenter};
use crate::domain::ports::{CategorySearchProvider, ChargingProvider, ProviderOutcome};
use crate::utils::error::{FinderError, Result};
use futures::stream::{self, StreamExt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProviderCall {
    Charging(SearchCenter),
    Category(SearchCenter, PoiCategory),
}

/// Number of calls `plan_calls` produces for these centers.
pub fn planned_call_count(centers: &[SearchCenter]) -> usize {
    centers.len() * (1 + PoiCategory::GENERIC_SEARCH.len())
}

/// Provider calls for a set of centers, in merge order: per center the
/// charging registry first, then each generic category.
pub fn plan_calls(centers: &[SearchCenter]) -> Vec<ProviderCall> {
    centers
        .iter()
        .flat_map(|center| {
            std::iter::once(ProviderCall::Charging(*center)).chain(
                PoiCategory::GENERIC_SEARCH
                    .iter()
                    .map(move |category| ProviderCall::Category(*center, *category)),
            )
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub pois: Vec<PointOfInterest>,
    pub calls: usize,
    pub failed_calls: usize,
}

pub struct Aggregator<C: ChargingProvider, G: CategorySearchProvider> {
    charging: C,
    search: G,
    max_concurrent: usize,
}

impl<C: ChargingProvider, G: CategorySearchProvider> Aggregator<C, G> {
    pub fn new(charging: C, search: G, max_concurrent: usize) -> Self {
        Self {
            charging,
            search,
            max_concurrent: max_concurrent.max(1),
        }
    }

    async fn dispatch(&self, call: ProviderCall) -> ProviderOutcome {
        match call {
            ProviderCall::Charging(center) => self.charging.stations_near(&center).await,
            ProviderCall::Category(center, category) => {
                self.search.search(&center, category).await
            }
        }
    }

    /// Queries every provider for every center and merges the results.
    ///
    /// Calls run concurrently but results are merged in plan order, so the
    /// dedup tie-break does not depend on response timing. Fails only when
    /// every single call failed; empty answers are a valid result.
    pub async fn collect(&self, centers: &[SearchCenter]) -> Result<Aggregation> {
        let calls = plan_calls(centers);
        tracing::debug!(
            "Issuing {} provider calls for {} search centers",
            calls.len(),
            centers.len()
        );

        let outcomes: Vec<ProviderOutcome> = stream::iter(calls)
            .map(|call| self.dispatch(call))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let total = outcomes.len();
        let failed_calls = outcomes.iter().filter(|o| o.is_failure()).count();
        if total > 0 && failed_calls == total {
            return Err(FinderError::AllProvidersFailed {
                failed: failed_calls,
            });
        }

        let merged: Vec<PointOfInterest> = outcomes
            .into_iter()
            .flat_map(ProviderOutcome::into_pois)
            .collect();
        let fetched = merged.len();
        let pois = deduplicate(merged);

        tracing::info!(
            "Aggregated {} POIs ({} before dedup, {}/{} calls failed)",
            pois.len(),
            fetched,
            failed_calls,
            total
        );

        Ok(Aggregation {
            pois,
            calls: total,
            failed_calls,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GeocodedPoint;
    use async_trait::async_trait;
    use std::collections::HashSet;

    fn poi(id: &str, name: &str, category: PoiCategory, source: &str) -> PointOfInterest {
        PointOfInterest {
            id: id.to_string(),
            name: name.to_string(),
            category,
            location: GeocodedPoint::new(77.6, 12.9),
            address: String::new(),
            connectors: None,
            status: None,
            source: source.to_string(),
        }
    }

    fn failed(provider: &str) -> ProviderOutcome {
        ProviderOutcome::Failed {
            provider: provider.to_string(),
            reason: "connection refused".to_string(),
        }
    }

    struct StaticCharging(ProviderOutcome);

    #[async_trait]
    impl ChargingProvider for StaticCharging {
        async fn stations_near(&self, _center: &SearchCenter) -> ProviderOutcome {
            self.0.clone()
        }
    }

    struct StaticSearch {
        failing: bool,
    }

    #[async_trait]
    impl CategorySearchProvider for StaticSearch {
        async fn search(&self, _center: &SearchCenter, category: PoiCategory) -> ProviderOutcome {
            if self.failing {
                return failed("tomtom");
            }
            match category {
                PoiCategory::ChargingStation => ProviderOutcome::Found(vec![poi(
                    "tomtom-ev",
                    "Hub",
                    PoiCategory::ChargingStation,
                    "tomtom",
                )]),
                PoiCategory::Hospital => ProviderOutcome::Found(vec![poi(
                    "tomtom-h",
                    "Hub",
                    PoiCategory::Hospital,
                    "tomtom",
                )]),
                _ => ProviderOutcome::Found(Vec::new()),
            }
        }
    }

    fn center(lon: f64) -> SearchCenter {
        SearchCenter {
            point: GeocodedPoint::new(lon, 12.9),
            radius_km: 5.0,
        }
    }

    #[test]
    fn test_plan_calls_per_center() {
        let calls = plan_calls(&[center(77.0), center(78.0)]);
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0], ProviderCall::Charging(center(77.0)));
        assert_eq!(
            calls[1..5],
            [
                ProviderCall::Category(center(77.0), PoiCategory::Hospital),
                ProviderCall::Category(center(77.0), PoiCategory::Restaurant),
                ProviderCall::Category(center(77.0), PoiCategory::FuelStation),
                ProviderCall::Category(center(77.0), PoiCategory::ChargingStation),
            ]
        );
        assert_eq!(calls[5], ProviderCall::Charging(center(78.0)));
        assert_eq!(planned_call_count(&[center(77.0), center(78.0)]), calls.len());
    }

    #[tokio::test]
    async fn test_charging_registry_wins_over_generic_search() {
        let aggregator = Aggregator::new(
            StaticCharging(ProviderOutcome::Found(vec![poi(
                "ocm-1",
                "hub ",
                PoiCategory::ChargingStation,
                "openchargemap",
            )])),
            StaticSearch { failing: false },
            3,
        );

        let result = aggregator.collect(&[center(77.6), center(77.6)]).await.unwrap();

        assert_eq!(result.calls, 10);
        assert_eq!(result.failed_calls, 0);
        assert_eq!(result.pois.len(), 1);
        assert_eq!(result.pois[0].id, "ocm-1");
    }

    #[tokio::test]
    async fn test_generic_hospital_replaced_by_later_charging_record() {
        let aggregator = Aggregator::new(
            StaticCharging(ProviderOutcome::Found(Vec::new())),
            StaticSearch { failing: false },
            5,
        );

        let result = aggregator.collect(&[center(77.6)]).await.unwrap();

        let ids: HashSet<&str> = result.pois.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["tomtom-ev"]));
    }

    #[tokio::test]
    async fn test_partial_failure_is_not_an_error() {
        let aggregator = Aggregator::new(
            StaticCharging(failed("openchargemap")),
            StaticSearch { failing: false },
            2,
        );

        let result = aggregator.collect(&[center(77.6)]).await.unwrap();
        assert_eq!(result.failed_calls, 1);
        assert_eq!(result.pois.len(), 1);
    }

    #[tokio::test]
    async fn test_total_failure_is_an_error() {
        let aggregator = Aggregator::new(
            StaticCharging(failed("openchargemap")),
            StaticSearch { failing: true },
            2,
        );

        let err = aggregator.collect(&[center(77.6)]).await.unwrap_err();
        assert!(matches!(err, FinderError::AllProvidersFailed { failed: 5 }));
    }

    #[tokio::test]
    async fn test_empty_answers_are_a_valid_result() {
        let aggregator = Aggregator::new(
            StaticCharging(ProviderOutcome::Found(Vec::new())),
            EmptySearch,
            2,
        );

        let result = aggregator.collect(&[center(77.6)]).await.unwrap();
        assert!(result.pois.is_empty());
        assert_eq!(result.failed_calls, 0);
    }

    struct EmptySearch;

    #[async_trait]
    impl CategorySearchProvider for EmptySearch {
        async fn search(&self, _center: &SearchCenter, _category: PoiCategory) -> ProviderOutcome {
            ProviderOutcome::Found(Vec::new())
        }
    }
}
