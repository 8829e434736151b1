//! Core data types for color matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Rgb`], [`Lab`]: 8-bit sRGB colors and their CIELAB coordinates
//! - [`ReferenceColor`]: A named dictionary color with precomputed Lab values
//! - [`Combination`]: An ordered set of named colors from the dictionary
//! - [`CombinationId`], [`Dataset`], [`Closeness`]: Identifiers and classification types
//!
//! ## Color Space
//!
//! All Lab values use the **D50** reference white. The shipped catalog was
//! generated under D50, and distances are only meaningful when both sides of a
//! comparison were converted the same way.
//!
//! | Input      | L     | a    | b    |
//! |------------|-------|------|------|
//! | `#FFFFFF`  | 100.0 | 0.0  | 0.0  |
//! | `#000000`  | 0.0   | 0.0  | 0.0  |

pub mod color;
pub mod lab;
pub mod types;

pub use color::{Combination, NamedColor, ReferenceColor};
pub use lab::{ColorError, Lab, Rgb};
pub use types::{Closeness, CombinationId, Dataset};
