//! Maps free-text upstream category labels onto [`PoiCategory`].

use crate::domain::model::PoiCategory;

/// Keyword rules, evaluated top to bottom; the first rule with any keyword
/// contained in the lowercased label wins.
pub const KEYWORD_RULES: &[(&[&str], PoiCategory)] = &[
    (&["hospital", "medical"], PoiCategory::Hospital),
    (&["restaurant", "food"], PoiCategory::Restaurant),
    (&["petrol", "gas", "cng"], PoiCategory::FuelStation),
    (&["charging", "ev"], PoiCategory::ChargingStation),
];

/// Search terms understood by the category-search provider, and the
/// category each one implies when a result carries no usable label.
pub const SEARCH_TERMS: &[(&str, PoiCategory)] = &[
    ("hospital", PoiCategory::Hospital),
    ("restaurant", PoiCategory::Restaurant),
    ("petrol station", PoiCategory::FuelStation),
    ("charging station", PoiCategory::ChargingStation),
];

pub fn search_term(category: PoiCategory) -> Option<&'static str> {
    SEARCH_TERMS
        .iter()
        .find(|(_, c)| *c == category)
        .map(|(term, _)| *term)
}

pub fn category_for_term(term: &str) -> Option<PoiCategory> {
    SEARCH_TERMS
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, category)| *category)
}

/// Classifies one search result. `label` is the upstream category string
/// (if any); `queried_term` is the term the search was issued with.
pub fn classify(label: Option<&str>, queried_term: &str) -> PoiCategory {
    let label = label.unwrap_or_default().to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| label.contains(k)))
        .map(|(_, category)| *category)
        .or_else(|| category_for_term(queried_term))
        .unwrap_or(PoiCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert_eq!(classify(Some("General HOSPITAL"), "restaurant"), PoiCategory::Hospital);
        assert_eq!(classify(Some("Medical Center"), "hospital"), PoiCategory::Hospital);
        assert_eq!(classify(Some("Fast Food"), "hospital"), PoiCategory::Restaurant);
        assert_eq!(classify(Some("CNG Station"), "hospital"), PoiCategory::FuelStation);
        assert_eq!(classify(Some("EV Charging"), "hospital"), PoiCategory::ChargingStation);
    }

    #[test]
    fn test_rule_order_decides_overlapping_labels() {
        // "food" is checked before "gas"
        assert_eq!(
            classify(Some("gas station food court"), "petrol station"),
            PoiCategory::Restaurant
        );
        // "medical" beats "charging"
        assert_eq!(classify(Some("medical charging"), "charging station"), PoiCategory::Hospital);
    }

    #[test]
    fn test_falls_back_to_queried_term() {
        assert_eq!(classify(None, "petrol station"), PoiCategory::FuelStation);
        assert_eq!(classify(Some("parking"), "charging station"), PoiCategory::ChargingStation);
    }

    #[test]
    fn test_unknown_term_is_other() {
        assert_eq!(classify(Some("parking"), "museum"), PoiCategory::Other);
        assert_eq!(classify(None, ""), PoiCategory::Other);
    }

    #[test]
    fn test_search_term_lookup() {
        assert_eq!(search_term(PoiCategory::FuelStation), Some("petrol station"));
        assert_eq!(search_term(PoiCategory::Other), None);
    }
}
