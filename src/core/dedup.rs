use crate::domain::model::{PoiCategory, PointOfInterest};
use std::collections::HashMap;

/// Adding 0.0 folds -0.0 into 0.0 so both print the same.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0 + 0.0
}

/// Identity used to merge POIs across providers: lowercased trimmed name plus
/// coordinates rounded to 4 decimals (~11 m).
pub fn dedup_key(poi: &PointOfInterest) -> String {
    format!(
        "{}_{}_{}",
        poi.name.trim().to_lowercase(),
        round4(poi.location.latitude),
        round4(poi.location.longitude)
    )
}

/// Keeps one POI per key in first-seen order. A later charging-station record
/// replaces an earlier non-charging one in place, since the charging registry
/// carries connector and status detail.
pub fn deduplicate(pois: Vec<PointOfInterest>) -> Vec<PointOfInterest> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<PointOfInterest> = Vec::with_capacity(pois.len());

    for poi in pois {
        let key = dedup_key(&poi);
        match positions.get(&key) {
            None => {
                positions.insert(key, unique.len());
                unique.push(poi);
            }
            Some(&index) => {
                if poi.category == PoiCategory::ChargingStation
                    && unique[index].category != PoiCategory::ChargingStation
                {
                    unique[index] = poi;
                }
            }
        }
    }

    unique
}
