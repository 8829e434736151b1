use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::Catalog;
use crate::cli::search::parse_distance;
use crate::cli::{CatalogSource, OutputFormat};
use crate::core::color::{Combination, ReferenceColor};
use crate::core::types::{CombinationId, Dataset};
use crate::matching::engine::CombinationMatch;

/// Default ΔE tolerance between stored and recomputed Lab values
const DEFAULT_DRIFT_TOLERANCE: f64 = 0.5;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List reference colors (or combinations) in the catalog
    List {
        /// List combinations instead of colors
        #[arg(long)]
        combinations: bool,

        #[command(flatten)]
        source: CatalogSource,
    },

    /// Show a reference color (by name) or a combination (by ID)
    Show {
        /// Color name (e.g. "Fawn") or combination ID (e.g. 12)
        #[arg(required = true)]
        query: String,

        #[command(flatten)]
        source: CatalogSource,
    },

    /// Export the catalog data sets to a directory
    Export {
        /// Output directory
        #[arg(required = true)]
        output: PathBuf,

        /// Overwrite existing data sets
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        source: CatalogSource,
    },

    /// Check integrity and that stored Lab values match their hex colors
    Verify {
        /// Maximum Delta E between stored and recomputed Lab
        #[arg(long, default_value_t = DEFAULT_DRIFT_TOLERANCE, value_parser = parse_distance)]
        tolerance: f64,

        #[command(flatten)]
        source: CatalogSource,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, a lookup fails, an
/// export cannot be written, or verification finds drift.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            combinations,
            source,
        } => {
            let catalog = source.load()?;
            if combinations {
                list_combinations(&catalog, format)
            } else {
                list_colors(&catalog, format)
            }
        }
        CatalogCommands::Show { query, source } => {
            let catalog = source.load()?;
            show(&catalog, &query, format)
        }
        CatalogCommands::Export {
            output,
            force,
            source,
        } => {
            let catalog = source.load()?;
            export(&catalog, &output, force, verbose)
        }
        CatalogCommands::Verify { tolerance, source } => {
            let catalog = source.load()?;
            verify(&catalog, tolerance, format)
        }
    }
}

fn list_colors(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Reference colors ({}):", catalog.len());
            println!("{}", "=".repeat(60));
            for color in &catalog.colors {
                println!(
                    "  {:<22} {}  {}  [{} combinations]",
                    color.name,
                    color.hex,
                    color.lab,
                    color.combination_ids.len()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", catalog.colors_json()?);
        }
        OutputFormat::Tsv => {
            println!("name\thex\tL\ta\tb\tcombinations");
            for color in &catalog.colors {
                println!(
                    "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{}",
                    color.name,
                    color.hex,
                    color.lab.l,
                    color.lab.a,
                    color.lab.b,
                    join_ids(color)
                );
            }
        }
    }
    Ok(())
}

fn list_combinations(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Combinations ({}):", catalog.combinations.len());
            println!("{}", "=".repeat(60));
            for combination in &catalog.combinations {
                print_combination_line(combination);
            }
        }
        OutputFormat::Json => {
            println!("{}", catalog.combinations_json()?);
        }
        OutputFormat::Tsv => {
            println!("id\tpage\tnames\thexes");
            for combination in &catalog.combinations {
                let names: Vec<&str> = combination.colors.iter().map(|c| c.name.as_str()).collect();
                let hexes: Vec<&str> = combination.colors.iter().map(|c| c.hex.as_str()).collect();
                println!(
                    "{}\t{}\t{}\t{}",
                    combination.id,
                    combination.page(),
                    names.join(","),
                    hexes.join(",")
                );
            }
        }
    }
    Ok(())
}

fn show(catalog: &Catalog, query: &str, format: OutputFormat) -> anyhow::Result<()> {
    if let Ok(id) = query.parse::<CombinationId>() {
        let combination = catalog
            .combination(id)
            .ok_or_else(|| anyhow::anyhow!("Combination {id} not found in catalog"))?;
        return show_combination(combination, format);
    }

    let colors = catalog.colors_by_name(query);
    if colors.is_empty() {
        anyhow::bail!("Color '{query}' not found in catalog");
    }
    show_colors(catalog, &colors, format)
}

fn show_combination(combination: &Combination, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let output = CombinationMatch::from(combination);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!("Combination {} (page {})", combination.id, combination.page());
            println!("{}", "=".repeat(60));
            for (i, color) in combination.colors.iter().enumerate() {
                println!("  {}. {:<22} {}", i + 1, color.name, color.hex);
            }
        }
    }
    Ok(())
}

/// Names are not unique, so a name query may show several colors
fn show_colors(
    catalog: &Catalog,
    colors: &[&ReferenceColor],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut output: Vec<serde_json::Value> = colors
                .iter()
                .map(|color| color_json(catalog, color))
                .collect();
            let output = if output.len() == 1 {
                output.remove(0)
            } else {
                serde_json::Value::Array(output)
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            for (i, color) in colors.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_color_text(catalog, color);
            }
        }
    }
    Ok(())
}

fn combinations_of<'c>(catalog: &'c Catalog, color: &ReferenceColor) -> Vec<&'c Combination> {
    color
        .combination_ids
        .iter()
        .filter_map(|id| catalog.combination(*id))
        .collect()
}

fn color_json(catalog: &Catalog, color: &ReferenceColor) -> serde_json::Value {
    serde_json::json!({
        "name": color.name,
        "hex": color.hex,
        "lab": color.lab,
        "combinations": combinations_of(catalog, color)
            .into_iter()
            .map(CombinationMatch::from)
            .collect::<Vec<_>>(),
    })
}

fn print_color_text(catalog: &Catalog, color: &ReferenceColor) {
    let combinations = combinations_of(catalog, color);
    println!("{}", color.name);
    println!("{}", "=".repeat(60));
    println!("  Hex: {}", color.hex);
    println!("  Lab: {}", color.lab);
    println!("\nAppears in {} combinations:", combinations.len());
    for combination in combinations {
        print_combination_line(combination);
    }
}

fn export(catalog: &Catalog, output: &Path, force: bool, verbose: bool) -> anyhow::Result<()> {
    std::fs::create_dir_all(output)?;

    let colors_path = output.join(Dataset::Colors.file_name());
    let combinations_path = output.join(Dataset::Combinations.file_name());
    if !force && (colors_path.exists() || combinations_path.exists()) {
        anyhow::bail!(
            "{} already contains a catalog (use --force to overwrite)",
            output.display()
        );
    }

    std::fs::write(&colors_path, catalog.colors_json()?)?;
    std::fs::write(&combinations_path, catalog.combinations_json()?)?;
    std::fs::write(
        output.join("manifest.json"),
        serde_json::to_string_pretty(&catalog.manifest())?,
    )?;

    if verbose {
        eprintln!(
            "Exported {} colors and {} combinations",
            catalog.len(),
            catalog.combinations.len()
        );
    }
    println!("Exported catalog to {}", output.display());
    Ok(())
}

fn verify(catalog: &Catalog, tolerance: f64, format: OutputFormat) -> anyhow::Result<()> {
    let drift = catalog.lab_drift(tolerance);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "colors": catalog.len(),
                "combinations": catalog.combinations.len(),
                "tolerance": tolerance,
                "drift": drift,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            println!(
                "Integrity OK: {} colors, {} combinations",
                catalog.len(),
                catalog.combinations.len()
            );
            for d in &drift {
                tracing::warn!(
                    "{} ({}): stored Lab {} differs from computed {} by ΔE {:.2}",
                    d.name,
                    d.hex,
                    d.stored,
                    d.computed,
                    d.delta_e
                );
            }
        }
    }

    if !drift.is_empty() {
        anyhow::bail!(
            "{} colors have stored Lab values more than ΔE {tolerance} from their hex \
             (was the catalog generated under a different illuminant?)",
            drift.len()
        );
    }

    if matches!(format, OutputFormat::Text) {
        println!("Lab values consistent with D50 conversion (tolerance ΔE {tolerance})");
    }
    Ok(())
}

fn print_combination_line(combination: &Combination) {
    let colors: Vec<String> = combination
        .colors
        .iter()
        .map(|c| format!("{} {}", c.name, c.hex))
        .collect();
    println!(
        "  #{:<4} p.{:<4} {}",
        combination.id,
        combination.page(),
        colors.join(", ")
    );
}

fn join_ids(color: &ReferenceColor) -> String {
    color
        .combination_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
