//! folhatxt-core: payroll grand-total extraction
//!
//! Reads a payroll spreadsheet export, finds the "TOTAL GERAL" blocks,
//! sums the value of every payroll code found below them and renders the
//! pipe-delimited TXT expected by the accounting import.

pub mod aggregate;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod header;
pub mod numeric;
pub mod output;
pub mod reader;
pub mod rules;
pub mod scanner;
pub mod text;
pub mod writer;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

pub use aggregate::AggregatedRecord;
pub use config::{ExtractorConfig, IdentifierStrategy};
pub use diagnostic::{Diagnostic, DiagnosticScope, Severity};
pub use error::ExtractError;
pub use header::ReportHeader;
pub use output::{OutputDocument, PreviewRow};
pub use reader::Grid;
pub use scanner::CandidateRecord;

use diagnostic::CellReference;
use header::HeaderResolver;
use scanner::BlockScanner;

/// Everything derived from one sheet
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sheet: String,
    pub header: ReportHeader,
    /// Anchor rows, 0-based
    pub anchors: Vec<usize>,
    pub candidates: Vec<CandidateRecord>,
    pub records: Vec<AggregatedRecord>,
    pub document: OutputDocument,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Review table rows, one per aggregated record
    pub fn preview(&self) -> Vec<PreviewRow> {
        output::preview(&self.records)
    }
}

/// Main extractor interface
pub struct Extractor {
    config: ExtractorConfig,
    header: HeaderResolver,
    scanner: BlockScanner,
}

impl Extractor {
    /// Create a new extractor with default configuration
    pub fn new() -> Result<Self, ExtractError> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create a new extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Result<Self, ExtractError> {
        let header = HeaderResolver::new(&config);
        let scanner = BlockScanner::new(&config.scan)?;
        Ok(Self {
            config,
            header,
            scanner,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Read the configured sheet of a spreadsheet file and extract it
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Report, ExtractError> {
        let grid = reader::read_grid(path, self.config.sheet.as_deref())?;
        self.extract(&grid)
    }

    /// Extract a grid, using the local date for a missing period
    pub fn extract(&self, grid: &Grid) -> Result<Report, ExtractError> {
        self.extract_on(grid, Local::now().date_naive())
    }

    /// Extract a grid with an explicit fallback date for a missing period
    pub fn extract_on(&self, grid: &Grid, today: NaiveDate) -> Result<Report, ExtractError> {
        let resolved = self.header.resolve(grid, today);
        let mut diagnostics = resolved.diagnostics;
        let header = resolved.value;

        let anchors = self.scanner.find_anchors(grid);
        if anchors.is_empty() {
            return Err(ExtractError::NoAnchors {
                sheet: grid.sheet_name.clone(),
                marker: self.scanner.marker().to_string(),
            });
        }
        info!(sheet = %grid.sheet_name, anchors = anchors.len(), "Found marker rows");
        for &anchor in &anchors {
            diagnostics.push(Diagnostic::new(
                "BLK001",
                DiagnosticScope::Cell(grid.sheet_name.clone(), CellReference::from_indices(anchor, 0)),
                format!("Marker row {}", anchor + 1),
                Severity::Info,
            ));
        }

        let candidates = self.scanner.scan_blocks(grid, &anchors);
        if candidates.is_empty() {
            return Err(ExtractError::NoRecords {
                anchors: anchors.len(),
            });
        }

        let records = aggregate::aggregate(&candidates);
        debug!(
            candidates = candidates.len(),
            codes = records.len(),
            "Aggregated candidate rows"
        );

        let document = output::render(&header, &records);
        diagnostics.sort();

        Ok(Report {
            sheet: grid.sheet_name.clone(),
            header,
            anchors,
            candidates,
            records,
            document,
            diagnostics,
        })
    }
}
