use std::path::PathBuf;

use clap::Args;

use crate::cli::{CatalogSource, OutputFormat};
use crate::core::types::Closeness;
use crate::matching::engine::{
    MatchResult, MatchingEngine, SearchConfig, DEFAULT_CLOSEST_COLORS, DEFAULT_MAX_DISTANCE,
    DEFAULT_MAX_RESULTS,
};
use crate::report::{open_report, write_report};

#[derive(Args)]
pub struct SearchArgs {
    /// Hex color to search for (e.g. "#4A6B3F" or 4A6B3F)
    #[arg(required = true)]
    pub color: String,

    /// Maximum number of combinations to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Maximum Delta E between the input and a dictionary color
    #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DISTANCE, value_parser = parse_distance)]
    pub max_distance: f64,

    /// Number of nearest dictionary colors to report and draw combinations from
    #[arg(long, default_value_t = DEFAULT_CLOSEST_COLORS)]
    pub closest: usize,

    #[command(flatten)]
    pub catalog: CatalogSource,

    /// Render the result as an HTML page and open it in the browser
    #[arg(long)]
    pub open: bool,

    /// Write the HTML page to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub(crate) fn parse_distance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("distance must be a non-negative number, got {s}"))
    }
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the color is malformed,
/// or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = args.catalog.load()?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} colors and {} combinations",
            catalog.len(),
            catalog.combinations.len()
        );
    }

    if catalog.is_empty() {
        eprintln!("Warning: Catalog is empty, no colors to match against.");
    }

    let config = SearchConfig {
        max_results: args.max_results,
        max_distance: args.max_distance,
        closest_colors: args.closest,
    };
    let engine = MatchingEngine::with_config(&catalog, config);
    // Pasted colors often carry stray whitespace
    let result = engine.search(args.color.trim())?;

    match format {
        OutputFormat::Text => print_text_result(&result, engine.config(), verbose),
        OutputFormat::Json => print_json_result(&result)?,
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    if args.open || args.report.is_some() {
        let path = write_report(&result, args.report.as_deref())?;
        eprintln!("Report written to {}", path.display());
        if args.open {
            if let Err(e) = open_report(&path) {
                tracing::warn!("Could not open browser: {e}");
            }
        }
    }

    Ok(())
}

fn print_text_result(result: &MatchResult, config: &SearchConfig, verbose: bool) {
    println!("Search: {}", result.input_hex);
    if verbose {
        println!("  Lab: {}", result.input_lab);
    }
    println!("{}", "=".repeat(60));

    if result.is_empty() {
        println!(
            "\nNo dictionary colors within ΔE {:.1} of {}.",
            config.max_distance, result.input_hex
        );
        return;
    }

    println!("\nClosest dictionary colors:");
    for (i, m) in result.matches.iter().enumerate() {
        println!(
            "  {}. {:<22} {}  ΔE {:>5.1}  ({})",
            i + 1,
            m.name,
            m.hex,
            m.distance,
            Closeness::from_distance(m.distance)
        );
    }

    if result.combinations.len() < result.total_combinations {
        println!(
            "\nCombinations (showing {} of {}):",
            result.combinations.len(),
            result.total_combinations
        );
    } else {
        println!("\nCombinations ({}):", result.total_combinations);
    }

    for combination in &result.combinations {
        let colors: Vec<String> = combination
            .colors
            .iter()
            .map(|c| format!("{} {}", c.name, c.hex))
            .collect();
        println!(
            "  #{:<4} p.{:<4} {}",
            combination.id,
            combination.page,
            colors.join(", ")
        );
    }
}

fn print_json_result(result: &MatchResult) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn print_tsv_result(result: &MatchResult) {
    println!("id\tpage\tnames\thexes");
    for combination in &result.combinations {
        let names: Vec<&str> = combination.colors.iter().map(|c| c.name.as_str()).collect();
        let hexes: Vec<&str> = combination.colors.iter().map(|c| c.hex.as_str()).collect();
        println!(
            "{}\t{}\t{}\t{}",
            combination.id,
            combination.page,
            names.join(","),
            hexes.join(",")
        );
    }
}
