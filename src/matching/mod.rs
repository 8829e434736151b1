//! Color matching engine and combination aggregation.
//!
//! This module provides the core search functionality:
//!
//! - [`MatchingEngine`]: Main entry point for searching the catalog
//! - [`distance::delta_e`]: CIE76 color difference
//! - [`aggregate::aggregate`]: Expands matched colors into combinations
//!
//! ## Search Algorithm
//!
//! 1. **Convert**: the input hex is converted to CIELAB (D50)
//! 2. **Rank**: every reference color is scored by ΔE; a color whose hex equals
//!    the input is an exact match at distance 0
//! 3. **Filter**: colors farther than `max_distance` (inclusive bound) are dropped
//! 4. **Select**: the `closest_colors` nearest remain (5 by default)
//! 5. **Aggregate**: their combinations are merged, deduplicated, sorted by ID,
//!    counted, and capped at `max_results`
//!
//! The two caps are independent: `closest_colors` limits how many colors feed
//! aggregation, `max_results` only limits how many combinations are returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wada_match::{Catalog, MatchingEngine, SearchConfig};
//!
//! let catalog = Catalog::load_embedded().unwrap();
//! let engine = MatchingEngine::with_config(&catalog, SearchConfig::default());
//! let result = engine.search("#4A6B3F").unwrap();
//!
//! for m in &result.matches {
//!     println!("{} {} ΔE {:.1}", m.name, m.hex, m.distance);
//! }
//! println!("{} combinations", result.total_combinations);
//! ```

pub mod aggregate;
pub mod distance;
pub mod engine;

pub use engine::{
    search, ColorMatch, CombinationMatch, MatchResult, MatchingEngine, SearchConfig, SearchError,
};
