//! Static HTML swatch reports.
//!
//! A report is a single self-contained page built from a serialized
//! [`MatchResult`](crate::matching::MatchResult): one swatch strip per
//! combination, the matched colors with their ΔE, a filter by combination
//! size, and click-to-copy hex values. No server is involved; the page is
//! written to disk and opened in the default browser.
//!
//! ```text
//! # Render a fresh search
//! wada-match search "#4A6B3F" --open
//!
//! # Render saved JSON output
//! wada-match --format json search "#4A6B3F" > result.json
//! wada-match swatch result.json report.html --no-open
//! ```

pub mod html;

pub use html::{open_report, render, write_report, ReportError};
