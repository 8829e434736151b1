//! Reference color catalog storage and indexing.
//!
//! The catalog is two data sets: the named reference colors of Sanzo Wada's
//! *A Dictionary of Color Combinations* (each with precomputed D50 Lab values
//! and the combinations it appears in), and the combinations themselves. A
//! default catalog is compiled into the binary, but custom data sets can also
//! be loaded from JSON files.
//!
//! ## Embedded Catalog
//!
//! ```rust,no_run
//! use wada_match::Catalog;
//! use wada_match::core::types::CombinationId;
//!
//! let catalog = Catalog::load_embedded().unwrap();
//!
//! for color in &catalog.colors {
//!     println!("{} {}", color.name, color.hex);
//! }
//!
//! let first = catalog.combination(CombinationId::new(1));
//! ```
//!
//! ## Custom Catalogs
//!
//! A directory holding `colors.json` and `combinations.json`:
//!
//! ```rust,no_run
//! use wada_match::Catalog;
//! use std::path::Path;
//!
//! let custom = Catalog::load_from_dir(Path::new("my_catalog")).unwrap();
//! ```
//!
//! Every catalog is validated on load: combination IDs must be unique and every
//! ID a color refers to must resolve. A failure is reported as
//! [`CatalogError::Corrupt`](store::CatalogError::Corrupt).

pub mod store;
