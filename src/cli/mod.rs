//! Command-line interface for wada-match.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **search**: Find combinations near a hex color
//! - **swatch**: Render a saved search result as an HTML page
//! - **catalog**: List, show, export, or verify the color catalog
//!
//! ## Usage
//!
//! ```text
//! # Search with defaults (10 combinations, ΔE <= 30)
//! wada-match search "#4A6B3F"
//!
//! # JSON output for scripting
//! wada-match --format json search 4A6B3F -n 5 -d 20
//!
//! # Open the results as an HTML page
//! wada-match search "#4A6B3F" --open
//!
//! # Check a custom catalog
//! wada-match catalog verify --catalog-dir ./my_catalog
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::store::Catalog;

pub mod catalog;
pub mod search;
pub mod swatch;

#[derive(Parser)]
#[command(name = "wada-match")]
#[command(version)]
#[command(about = "Find Sanzo Wada color combinations close to a color")]
#[command(
    long_about = "wada-match finds the historical color combinations of Sanzo Wada's \"A Dictionary of Color Combinations\" that contain colors perceptually close to yours.\n\nColors are compared in CIELAB (D50) using CIE76 Delta E. The nearest dictionary colors are reported along with every combination they appear in."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find combinations containing colors close to a hex color
    Search(search::SearchArgs),

    /// Render a search result (JSON) as an HTML swatch page
    Swatch(swatch::SwatchArgs),

    /// Inspect the color catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Where to load the catalog from. Defaults to the embedded catalog.
#[derive(clap::Args, Debug, Default)]
pub struct CatalogSource {
    /// Directory containing colors.json and combinations.json
    #[arg(long, conflicts_with_all = ["colors", "combinations"])]
    pub catalog_dir: Option<PathBuf>,

    /// Path to a reference colors data set
    #[arg(long, requires = "combinations")]
    pub colors: Option<PathBuf>,

    /// Path to a combinations data set
    #[arg(long, requires = "colors")]
    pub combinations: Option<PathBuf>,
}

impl CatalogSource {
    /// Load the selected catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or fails validation.
    pub fn load(&self) -> anyhow::Result<Catalog> {
        let catalog = match (&self.catalog_dir, &self.colors, &self.combinations) {
            (Some(dir), _, _) => Catalog::load_from_dir(dir)?,
            (None, Some(colors), Some(combinations)) => {
                Catalog::load_from_files(colors, combinations)?
            }
            _ => Catalog::load_embedded()?,
        };
        Ok(catalog)
    }
}
