//! CLI output: error mapping and the stable result lines.

use crate::error::ExportError;
use std::path::Path;

/// Printed when the path argument holds nothing usable.
pub const NO_PATHS_MESSAGE: &str = "No valid paths provided, exiting";

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ExportError) -> String {
    match e {
        ExportError::Query(query) => format!("Export aborted: {}", query),
        other => other.to_string(),
    }
}

/// One-line summary of a written export.
pub fn format_export_summary(written: usize, document: &Path) -> String {
    format!("Exported {} value(s) to {}", written, document.display())
}
