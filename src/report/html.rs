use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::matching::engine::MatchResult;

const TEMPLATE: &str = include_str!("templates/swatch.html");
const DATA_PLACEHOLDER: &str = "__DATA__";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create temporary report file: {0}")]
    TempFile(#[source] std::io::Error),
}

/// Render a search result as a self-contained HTML page.
///
/// The result is embedded as a JSON literal inside a `<script>` block, so
/// `</` is escaped to keep a color name from closing the script early.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub fn render(result: &MatchResult) -> Result<String, ReportError> {
    let data = serde_json::to_string(result)?.replace("</", "<\\/");
    Ok(TEMPLATE.replace(DATA_PLACEHOLDER, &data))
}

/// Render `result` and write it to `output`, or to a fresh `wada-*.html`
/// temporary file that outlives the process. Returns the absolute path.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_report(result: &MatchResult, output: Option<&Path>) -> Result<PathBuf, ReportError> {
    let html = render(result)?;

    let path = if let Some(path) = output {
        std::fs::write(path, &html).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        absolute(path)
    } else {
        let mut file = tempfile::Builder::new()
            .prefix("wada-")
            .suffix(".html")
            .tempfile()
            .map_err(ReportError::TempFile)?;
        file.write_all(html.as_bytes())
            .map_err(|source| ReportError::Write {
                path: file.path().to_path_buf(),
                source,
            })?;
        let (_, path) = file.keep().map_err(|e| ReportError::TempFile(e.error))?;
        path
    };

    tracing::debug!(path = %path.display(), bytes = html.len(), "Wrote report");
    Ok(path)
}

/// Open a written report in the default browser
///
/// # Errors
///
/// Returns an error if no browser could be launched.
pub fn open_report(path: &Path) -> std::io::Result<()> {
    open::that(path)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}
