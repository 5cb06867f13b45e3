//! Errors that stop an extraction

use std::path::PathBuf;
use thiserror::Error;

/// Structural failures. Anything finer grained (a cell that is not a number,
/// a row without a code) is skipped silently instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read spreadsheet {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("workbook {} has no worksheets", .path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("invalid marker pattern '{pattern}': {source}")]
    InvalidMarker {
        pattern: String,
        source: regex::Error,
    },

    #[error("no row matching the marker '{marker}' found in sheet '{sheet}'")]
    NoAnchors { sheet: String, marker: String },

    #[error("no code/value rows found after {anchors} marker row(s)")]
    NoRecords { anchors: usize },
}
