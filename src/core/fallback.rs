use crate::domain::model::{GeocodedPoint, PoiCategory, PointOfInterest};
use rand::Rng;

/// Largest offset, in degrees per axis, between the search start and a
/// generated placeholder.
pub const FALLBACK_JITTER_DEGREES: f64 = 0.01;

/// Placeholder POIs served when live aggregation fails outright. Template
/// coordinates are ignored; every entry is re-placed around the start point.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    templates: Vec<PointOfInterest>,
}

impl FallbackCatalog {
    pub fn new(templates: Vec<PointOfInterest>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[PointOfInterest] {
        &self.templates
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        start: GeocodedPoint,
        rng: &mut R,
    ) -> Vec<PointOfInterest> {
        self.templates
            .iter()
            .map(|template| {
                let longitude = start.longitude
                    + rng.random_range(-FALLBACK_JITTER_DEGREES..=FALLBACK_JITTER_DEGREES);
                let latitude = start.latitude
                    + rng.random_range(-FALLBACK_JITTER_DEGREES..=FALLBACK_JITTER_DEGREES);
                PointOfInterest {
                    location: GeocodedPoint::new(longitude, latitude),
                    ..template.clone()
                }
            })
            .collect()
    }
}

fn template(
    id: &str,
    name: &str,
    category: PoiCategory,
    address: &str,
    connectors: Option<&[&str]>,
    status: Option<&str>,
) -> PointOfInterest {
    PointOfInterest {
        id: id.to_string(),
        name: name.to_string(),
        category,
        location: GeocodedPoint::new(0.0, 0.0),
        address: address.to_string(),
        connectors: connectors.map(|c| c.iter().map(|s| s.to_string()).collect()),
        status: status.map(str::to_string),
        source: "mock".to_string(),
    }
}

impl Default for FallbackCatalog {
    /// One placeholder per tracked category.
    fn default() -> Self {
        Self::new(vec![
            template(
                "mock-1",
                "Downtown EV Charging Hub",
                PoiCategory::ChargingStation,
                "123 Main St",
                Some(&["CCS", "CHAdeMO", "Type 2"][..]),
                Some("Available"),
            ),
            template(
                "mock-2",
                "City Hospital",
                PoiCategory::Hospital,
                "456 Health Ave",
                None,
                None,
            ),
            template(
                "mock-3",
                "Green Leaf Restaurant",
                PoiCategory::Restaurant,
                "789 Food St",
                None,
                None,
            ),
            template(
                "mock-4",
                "Central Gas Station",
                PoiCategory::FuelStation,
                "321 Fuel Rd",
                None,
                None,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_stays_near_start() {
        let start = GeocodedPoint::new(12.9, 77.6);
        let pois = FallbackCatalog::default().generate(start, &mut StdRng::seed_from_u64(3));

        assert_eq!(pois.len(), 4);
        for poi in &pois {
            assert!((poi.location.longitude - start.longitude).abs() <= FALLBACK_JITTER_DEGREES + 1e-9);
            assert!((poi.location.latitude - start.latitude).abs() <= FALLBACK_JITTER_DEGREES + 1e-9);
            assert_eq!(poi.source, "mock");
        }

        let categories: HashSet<PoiCategory> = pois.iter().map(|p| p.category).collect();
        let expected: HashSet<PoiCategory> = [
            PoiCategory::ChargingStation,
            PoiCategory::Hospital,
            PoiCategory::Restaurant,
            PoiCategory::FuelStation,
        ]
        .into_iter()
        .collect();
        assert_eq!(categories, expected);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let start = GeocodedPoint::new(-74.006, 40.7128);
        let catalog = FallbackCatalog::default();
        let a = catalog.generate(start, &mut StdRng::seed_from_u64(99));
        let b = catalog.generate(start, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_entries_keep_template_fields() {
        let catalog = FallbackCatalog::default();
        let pois = catalog.generate(GeocodedPoint::new(2.35, 48.85), &mut StdRng::seed_from_u64(5));

        assert_eq!(pois.len(), catalog.templates().len());
        for (poi, template) in pois.iter().zip(catalog.templates()) {
            assert_eq!(poi.id, template.id);
            assert_eq!(poi.name, template.name);
            assert_eq!(poi.category, template.category);
            assert_eq!(poi.connectors, template.connectors);
            assert_eq!(poi.status, template.status);
            assert_ne!(poi.location, template.location);
        }
    }

    #[test]
    fn test_custom_catalog_is_used() {
        let catalog = FallbackCatalog::new(vec![template(
            "only",
            "Roadside Clinic",
            PoiCategory::Hospital,
            "NH 44",
            None,
            None,
        )]);
        let pois = catalog.generate(GeocodedPoint::new(1.0, 1.0), &mut StdRng::seed_from_u64(0));
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].name, "Roadside Clinic");
    }
}
