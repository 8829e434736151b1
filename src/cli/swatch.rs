use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::matching::engine::MatchResult;
use crate::report::{open_report, write_report};

#[derive(Args)]
pub struct SwatchArgs {
    /// Search result JSON (from `search --format json`), or '-' for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output HTML file (defaults to a temporary wada-*.html file)
    pub output: Option<PathBuf>,

    /// Write the page without opening it in the browser
    #[arg(long)]
    pub no_open: bool,
}

/// Execute swatch subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or the page
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SwatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let result = read_result(&args.input)?;

    if verbose {
        eprintln!(
            "Rendering {} matches and {} combinations for {}",
            result.matches.len(),
            result.combinations.len(),
            result.input_hex
        );
    }

    let path = write_report(&result, args.output.as_deref())?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "path": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv => println!("{}", path.display()),
    }

    if !args.no_open {
        if let Err(e) = open_report(&path) {
            tracing::warn!("Could not open browser: {e}");
        }
    }

    Ok(())
}

fn read_result(input: &Path) -> anyhow::Result<MatchResult> {
    let content = if input.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read result from stdin")?
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read result from {}", input.display()))?
    };

    serde_json::from_str(&content)
        .context("Input is not a search result (expected JSON from `search --format json`)")
}
