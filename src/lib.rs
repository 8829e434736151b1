//! # wada-match
//!
//! A library for finding Sanzo Wada color combinations near a given color.
//!
//! Sanzo Wada's *A Dictionary of Color Combinations* pairs a fixed set of named
//! colors into several hundred curated combinations. Given any sRGB color,
//! `wada-match` finds the dictionary colors that look closest to it and returns
//! every combination those colors appear in.
//!
//! ## Features
//!
//! - **Perceptual matching**: colors are compared in CIELAB (D50) with CIE76 ΔE
//! - **Exact hits**: naming a dictionary color's hex is always a distance-0 match
//! - **Two-stage cap**: the nearest colors feed aggregation; the combination
//!   count is capped separately and the uncapped total is reported
//! - **Validated catalogs**: dangling or duplicate combination IDs are rejected on load
//! - **HTML reports**: results render to a static swatch page
//!
//! ## Example
//!
//! ```rust,no_run
//! use wada_match::{Catalog, MatchingEngine};
//!
//! // Load the embedded catalog
//! let catalog = Catalog::load_embedded().unwrap();
//!
//! // Find combinations near a moss green
//! let engine = MatchingEngine::new(&catalog);
//! let result = engine.search("#4A6B3F").unwrap();
//!
//! for combination in &result.combinations {
//!     let names: Vec<_> = combination.colors.iter().map(|c| c.name.as_str()).collect();
//!     println!("#{} {}", combination.id, names.join(" / "));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog loading, validation and lookup
//! - [`core`]: Color types and sRGB to CIELAB conversion
//! - [`matching`]: Search engine, distance metric and aggregation
//! - [`report`]: Static HTML swatch pages
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{Catalog, CatalogError};
pub use core::color::{Combination, NamedColor, ReferenceColor};
pub use core::lab::{to_lab, ColorError, Lab, Rgb};
pub use core::types::CombinationId;
pub use matching::distance::delta_e;
pub use matching::engine::{search, MatchResult, MatchingEngine, SearchConfig, SearchError};
