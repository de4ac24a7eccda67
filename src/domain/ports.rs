use crate::domain::model::{GeocodedPoint, PoiCategory, PointOfInterest, Route, SearchCenter};
use crate::utils::error::Result;
use async_trait::async_trait;

/// What a single provider call produced. Failures carry the reason so the
/// aggregator can tell "nothing there" apart from "call failed".
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Found(Vec<PointOfInterest>),
    Failed { provider: String, reason: String },
}

impl ProviderOutcome {
    /// Collapses an adapter result, logging the failure as a warning.
    pub fn from_result(provider: &str, result: Result<Vec<PointOfInterest>>) -> Self {
        match result {
            Ok(pois) => ProviderOutcome::Found(pois),
            Err(e) => {
                tracing::warn!("{} request failed: {}", provider, e);
                ProviderOutcome::Failed {
                    provider: provider.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProviderOutcome::Failed { .. })
    }

    pub fn into_pois(self) -> Vec<PointOfInterest> {
        match self {
            ProviderOutcome::Found(pois) => pois,
            ProviderOutcome::Failed { .. } => Vec::new(),
        }
    }
}

#[async_trait]
pub trait ChargingProvider: Send + Sync {
    async fn stations_near(&self, center: &SearchCenter) -> ProviderOutcome;
}

#[async_trait]
pub trait CategorySearchProvider: Send + Sync {
    async fn search(&self, center: &SearchCenter, category: PoiCategory) -> ProviderOutcome;
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Fetches a driving route. Errors are returned, not swallowed; the
    /// route resolver decides how to degrade.
    async fn directions(&self, start: GeocodedPoint, end: GeocodedPoint) -> Result<Route>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
