use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::store::Catalog;
use crate::core::color::{Combination, NamedColor, ReferenceColor};
use crate::core::lab::{ColorError, Lab, Rgb};
use crate::core::types::CombinationId;
use crate::matching::aggregate::aggregate;
use crate::matching::distance::{delta_e, round_distance};
use crate::utils::validation::same_hex;

/// Default cap on the number of combinations returned
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Default ΔE threshold (inclusive) for a reference color to count as a match
pub const DEFAULT_MAX_DISTANCE: f64 = 30.0;

/// Default number of closest reference colors that feed aggregation.
/// Independent of `max_results`.
pub const DEFAULT_CLOSEST_COLORS: usize = 5;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    InvalidColorFormat(#[from] ColorError),

    #[error("Catalog corrupt: combination {id} is referenced by a matched color but missing")]
    CatalogCorrupt { id: CombinationId },
}

/// Configuration for a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of combinations in the result
    pub max_results: usize,
    /// Maximum ΔE (inclusive) between the input and a matched reference color
    pub max_distance: f64,
    /// Number of closest reference colors reported and aggregated
    pub closest_colors: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            max_distance: DEFAULT_MAX_DISTANCE,
            closest_colors: DEFAULT_CLOSEST_COLORS,
        }
    }
}

/// A reference color together with its distance from the input
#[derive(Debug, Clone, Copy)]
pub struct RankedColor<'a> {
    pub color: &'a ReferenceColor,
    pub distance: f64,
}

/// A matched reference color as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    pub name: String,
    pub hex: String,
    /// ΔE rounded to one decimal place
    pub distance: f64,
}

impl From<&RankedColor<'_>> for ColorMatch {
    fn from(ranked: &RankedColor<'_>) -> Self {
        Self {
            name: ranked.color.name.clone(),
            hex: ranked.color.hex.clone(),
            distance: round_distance(ranked.distance),
        }
    }
}

/// A combination as reported to the caller (page always present)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationMatch {
    pub id: CombinationId,
    pub page: u32,
    pub colors: Vec<NamedColor>,
}

impl From<&Combination> for CombinationMatch {
    fn from(combination: &Combination) -> Self {
        Self {
            id: combination.id,
            page: combination.page(),
            colors: combination.colors.clone(),
        }
    }
}

/// Result of searching the catalog for one input color.
///
/// The serialized field names are consumed by the HTML report and by scripts;
/// keep them stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Canonical `#RRGGBB` form of the input
    #[serde(rename = "input")]
    pub input_hex: String,

    pub input_lab: Lab,

    /// Closest reference colors, nearest first
    pub matches: Vec<ColorMatch>,

    /// Combinations containing the closest colors, ascending by ID
    pub combinations: Vec<CombinationMatch>,

    /// Number of distinct combinations found before the result cap
    #[serde(default)]
    pub total_combinations: usize,
}

impl MatchResult {
    fn empty(input_hex: String, input_lab: Lab) -> Self {
        Self {
            input_hex,
            input_lab,
            matches: Vec::new(),
            combinations: Vec::new(),
            total_combinations: 0,
        }
    }

    /// True when no reference color was within the distance threshold
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// The main search engine
pub struct MatchingEngine<'a> {
    catalog: &'a Catalog,
    config: SearchConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: SearchConfig::default(),
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(catalog: &'a Catalog, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Rank every reference color within `max_distance` of the input, nearest
    /// first. Equal distances keep catalog order.
    pub fn rank(&self, input: Rgb) -> Vec<RankedColor<'a>> {
        let input_hex = input.to_hex();
        let input_lab = input.to_lab();

        let mut ranked: Vec<RankedColor<'a>> = self
            .catalog
            .colors
            .iter()
            .map(|color| {
                // Naming a catalog color exactly is an exact match, whatever
                // its stored Lab says
                let distance = if same_hex(&color.hex, &input_hex) {
                    0.0
                } else {
                    delta_e(&input_lab, &color.lab)
                };
                RankedColor { color, distance }
            })
            .filter(|r| r.distance <= self.config.max_distance)
            .collect();

        // Stable sort preserves catalog order for ties
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }

    /// Search the catalog for combinations near `input_hex`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidColorFormat` if the input is not a 6-digit
    /// hex color, or `SearchError::CatalogCorrupt` if a matched color refers
    /// to a combination the catalog does not contain.
    pub fn search(&self, input_hex: &str) -> Result<MatchResult, SearchError> {
        let input = Rgb::from_hex(input_hex)?;
        let input_lab = input.to_lab();

        let mut closest = self.rank(input);
        let qualifying = closest.len();
        closest.truncate(self.config.closest_colors);

        tracing::debug!(
            input = %input,
            lab = %input_lab,
            qualifying,
            max_distance = self.config.max_distance,
            "Ranked reference colors"
        );

        if closest.is_empty() {
            return Ok(MatchResult::empty(input.to_hex(), input_lab));
        }

        let aggregation = aggregate(&closest, self.catalog, self.config.max_results)?;

        tracing::debug!(
            total = aggregation.total_found,
            returned = aggregation.combinations.len(),
            "Aggregated combinations"
        );

        Ok(MatchResult {
            input_hex: input.to_hex(),
            input_lab,
            matches: closest.iter().map(ColorMatch::from).collect(),
            combinations: aggregation
                .combinations
                .into_iter()
                .map(CombinationMatch::from)
                .collect(),
            total_combinations: aggregation.total_found,
        })
    }
}

/// Search `catalog` for combinations near `input_hex` using `config`.
///
/// # Errors
///
/// See [`MatchingEngine::search`].
pub fn search(
    input_hex: &str,
    catalog: &Catalog,
    config: &SearchConfig,
) -> Result<MatchResult, SearchError> {
    MatchingEngine::with_config(catalog, config.clone()).search(input_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lab::to_lab;

    /// A reference color whose Lab is computed from its hex
    fn color(name: &str, hex: &str, ids: &[u32]) -> ReferenceColor {
        ReferenceColor::new(name, hex, to_lab(hex).unwrap()).with_combinations(ids.iter().copied())
    }

    fn combination(id: u32, names: &[(&str, &str)]) -> Combination {
        Combination::new(
            id,
            names
                .iter()
                .map(|(name, hex)| NamedColor::new(*name, *hex))
                .collect(),
        )
    }

    fn earth_tone_catalog() -> Catalog {
        Catalog::new(
            vec![
                color("Fawn", "#C8A98D", &[1, 2]),
                color("Sepia", "#4F3B2B", &[1]),
                color("Khaki", "#A79669", &[2, 3]),
                color("Raw Sienna", "#B86A3C", &[3]),
            ],
            vec![
                combination(1, &[("Fawn", "#C8A98D"), ("Sepia", "#4F3B2B")]),
                combination(2, &[("Khaki", "#A79669"), ("Fawn", "#C8A98D")]),
                combination(3, &[("Raw Sienna", "#B86A3C"), ("Khaki", "#A79669")]),
            ],
        )
        .unwrap()
    }

    fn config(max_results: usize, max_distance: f64) -> SearchConfig {
        SearchConfig {
            max_results,
            max_distance,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_exact_hex_is_distance_zero() {
        let hinoki = ReferenceColor::new("Hinoki", "#D9C7A3", Lab::new(84.0, 2.1, 14.3))
            .with_combinations([7]);
        let catalog = Catalog::new(
            vec![hinoki],
            vec![combination(7, &[("Hinoki", "#D9C7A3")])],
        )
        .unwrap();

        let result = MatchingEngine::new(&catalog).search("#D9C7A3").unwrap();
        assert_eq!(result.matches[0].name, "Hinoki");
        assert_eq!(result.matches[0].distance, 0.0);
        assert!(result
            .combinations
            .iter()
            .any(|c| c.id == CombinationId(7)));

        // Lowercase without '#' names the same color
        let result = MatchingEngine::new(&catalog).search("d9c7a3").unwrap();
        assert_eq!(result.matches[0].distance, 0.0);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = earth_tone_catalog();
        let result = MatchingEngine::new(&catalog).search("#FF00FF").unwrap();

        assert!(result.is_empty());
        assert!(result.matches.is_empty());
        assert!(result.combinations.is_empty());
        assert_eq!(result.total_combinations, 0);
        assert_eq!(result.input_hex, "#FF00FF");
    }

    #[test]
    fn test_result_cap_keeps_total() {
        let catalog = earth_tone_catalog();
        // Fawn exactly: Fawn is in 1 and 2
        let engine = MatchingEngine::with_config(&catalog, config(1, 0.5));
        let result = engine.search("#C8A98D").unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.combinations.len(), 1);
        assert_eq!(result.combinations[0].id, CombinationId(1));
        assert_eq!(result.total_combinations, 2);
    }

    #[test]
    fn test_malformed_input_is_invalid_color_format() {
        let catalog = earth_tone_catalog();
        let err = MatchingEngine::new(&catalog).search("#12345").unwrap_err();
        assert!(matches!(err, SearchError::InvalidColorFormat(_)));
        assert!(err.to_string().contains("#12345"));
    }

    #[test]
    fn test_padded_input_is_invalid_color_format() {
        let catalog = earth_tone_catalog();
        let engine = MatchingEngine::new(&catalog);
        for input in ["  #C8A98D\n", " C8A98D", "#C8A98D "] {
            let err = engine.search(input).unwrap_err();
            assert!(matches!(err, SearchError::InvalidColorFormat(_)), "{input:?}");
        }
    }

    #[test]
    fn test_shared_combination_counted_once() {
        let catalog = earth_tone_catalog();
        // Wide threshold: all four colors match, combinations 1..3 each reachable twice
        let result = MatchingEngine::with_config(&catalog, config(10, 200.0))
            .search("#A08060")
            .unwrap();

        assert_eq!(result.matches.len(), 4);
        let ids: Vec<u32> = result.combinations.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(result.total_combinations, 3);
    }

    #[test]
    fn test_matches_sorted_nearest_first() {
        let catalog = Catalog::load_embedded().unwrap();
        let result = MatchingEngine::new(&catalog).search("#B0906A").unwrap();

        assert!(!result.matches.is_empty());
        for pair in result.matches.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_raising_threshold_never_removes_matches() {
        let catalog = Catalog::load_embedded().unwrap();
        let thresholds = [0.0, 5.0, 10.0, 20.0, 30.0, 60.0, 200.0];

        for input in ["#B0906A", "#3C4D31", "#F6B7C0", "#808080", "#FF00FF"] {
            let mut previous: Vec<String> = Vec::new();
            for &max_distance in &thresholds {
                let engine = MatchingEngine::with_config(&catalog, config(10, max_distance));
                let ranked: Vec<String> = engine
                    .rank(Rgb::from_hex(input).unwrap())
                    .iter()
                    .map(|r| r.color.name.clone())
                    .collect();
                for name in &previous {
                    assert!(
                        ranked.contains(name),
                        "{name} dropped for {input} at threshold {max_distance}"
                    );
                }
                previous = ranked;
            }
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let catalog = earth_tone_catalog();
        let fawn = to_lab("#C8A98D").unwrap();
        let input = to_lab("#C0A080").unwrap();
        let exact = delta_e(&input, &fawn);

        let engine = MatchingEngine::with_config(&catalog, config(10, exact));
        let names: Vec<&str> = engine
            .rank(Rgb::from_hex("#C0A080").unwrap())
            .iter()
            .map(|r| r.color.name.as_str())
            .collect();
        assert!(names.contains(&"Fawn"));
    }

    #[test]
    fn test_closest_colors_independent_of_max_results() {
        let catalog = Catalog::load_embedded().unwrap();
        let engine = MatchingEngine::with_config(&catalog, config(1, 200.0));
        let result = engine.search("#808080").unwrap();

        assert_eq!(result.matches.len(), DEFAULT_CLOSEST_COLORS);
        assert_eq!(result.combinations.len(), 1);
        assert!(result.total_combinations >= 1);
    }

    #[test]
    fn test_closest_colors_is_configurable() {
        let catalog = Catalog::load_embedded().unwrap();
        let config = SearchConfig {
            closest_colors: 2,
            max_distance: 200.0,
            ..SearchConfig::default()
        };
        let result = search("#808080", &catalog, &config).unwrap();
        assert_eq!(result.matches.len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(
            vec![
                color("Second", "#808080", &[]),
                color("First", "#808080", &[]),
                color("Far", "#202020", &[]),
            ],
            vec![],
        )
        .unwrap();
        let result = MatchingEngine::with_config(&catalog, config(10, 100.0))
            .search("#818181")
            .unwrap();

        let names: Vec<&str> = result.matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First", "Far"]);
        assert!(result.combinations.is_empty());
        assert_eq!(result.total_combinations, 0);
    }

    #[test]
    fn test_reported_distance_rounded() {
        let catalog = earth_tone_catalog();
        let result = MatchingEngine::new(&catalog).search("#C0A080").unwrap();
        for m in &result.matches {
            assert_eq!(m.distance, round_distance(m.distance));
        }
    }

    #[test]
    fn test_truncation_bounds() {
        let catalog = Catalog::load_embedded().unwrap();
        for max_results in [0, 1, 2, 5, 10] {
            let result = MatchingEngine::with_config(&catalog, config(max_results, 40.0))
                .search("#C8A98D")
                .unwrap();
            assert!(result.combinations.len() <= max_results);
            assert!(result.total_combinations >= result.combinations.len());
        }
    }

    #[test]
    fn test_combination_colors_keep_curatorial_order() {
        let catalog = earth_tone_catalog();
        let result = MatchingEngine::new(&catalog).search("#B86A3C").unwrap();
        let three = result
            .combinations
            .iter()
            .find(|c| c.id == CombinationId(3))
            .unwrap();
        let names: Vec<&str> = three.colors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Raw Sienna", "Khaki"]);
        assert_eq!(three.page, 3);
    }

    #[test]
    fn test_serialized_field_names() {
        let catalog = earth_tone_catalog();
        let result = MatchingEngine::new(&catalog).search("#C8A98D").unwrap();
        let value = serde_json::to_value(&result).unwrap();

        for field in ["input", "input_lab", "matches", "combinations", "total_combinations"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["input"], "#C8A98D");
        assert!(value["input_lab"].is_array());
        let first = &value["combinations"][0];
        assert!(first.get("id").is_some());
        assert!(first.get("page").is_some());
        assert!(first.get("colors").is_some());
        let m = &value["matches"][0];
        assert_eq!(m["name"], "Fawn");
        assert_eq!(m["distance"], 0.0);
    }
}
