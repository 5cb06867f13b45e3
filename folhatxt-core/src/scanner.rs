//! Grand-total block scanning
//!
//! A block starts right below an anchor row and runs until the first fully
//! blank row. Each block is scanned on its own; the same code may show up in
//! several blocks and is only summed later by [`crate::aggregate`].

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ScanConfig;
use crate::error::ExtractError;
use crate::numeric::{in_magnitude_range, normalize};
use crate::reader::Grid;
use crate::rules::{ExtractionRule, LineCodeRule, TotalMarkerRule};
use crate::text::has_description;

/// One qualifying row before aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub code: String,
    pub value: f64,
    /// 0-based grid row the record came from
    pub row: usize,
}

pub struct BlockScanner {
    marker: TotalMarkerRule,
    line_code: LineCodeRule,
    anchor_columns: usize,
    min_value: f64,
    max_value: f64,
    require_description: bool,
}

impl BlockScanner {
    pub fn new(config: &ScanConfig) -> Result<Self, ExtractError> {
        let marker =
            TotalMarkerRule::new(&config.marker).map_err(|source| ExtractError::InvalidMarker {
                pattern: config.marker.clone(),
                source,
            })?;

        Ok(Self {
            marker,
            line_code: LineCodeRule::new(),
            anchor_columns: config.anchor_columns,
            min_value: config.min_value,
            max_value: config.max_value,
            require_description: config.require_description,
        })
    }

    /// The marker pattern as configured
    pub fn marker(&self) -> &str {
        self.marker.as_str()
    }

    /// Every row whose leading cells contain the marker phrase, top to bottom
    pub fn find_anchors(&self, grid: &Grid) -> Vec<usize> {
        (0..grid.row_count())
            .filter(|&row| {
                self.marker
                    .is_match(&grid.joined_row(row, self.anchor_columns))
            })
            .collect()
    }

    /// Scan the block below each anchor, keeping anchor order
    pub fn scan_blocks(&self, grid: &Grid, anchors: &[usize]) -> Vec<CandidateRecord> {
        anchors
            .iter()
            .flat_map(|&anchor| self.scan_block(grid, anchor))
            .collect()
    }

    /// Scan the rows below one anchor until the first blank row
    pub fn scan_block(&self, grid: &Grid, anchor: usize) -> Vec<CandidateRecord> {
        let mut records = Vec::new();

        for row in anchor + 1..grid.row_count() {
            if grid.is_blank_row(row) {
                trace!(anchor, row, "Block ends at blank row");
                break;
            }
            if let Some((code, value)) = self.candidate(grid.row(row)) {
                records.push(CandidateRecord { code, value, row });
            } else {
                trace!(anchor, row, "Row skipped");
            }
        }

        debug!(anchor, records = records.len(), "Scanned block");
        records
    }

    /// Code and value of a block row, or `None` when the row does not qualify
    pub fn candidate(&self, cells: &[String]) -> Option<(String, f64)> {
        let first = cells.iter().map(|c| c.trim()).find(|c| !c.is_empty())?;
        let code = self.line_code.find(first)?.value;

        if self.require_description && !has_description(cells) {
            return None;
        }

        let value = rightmost_value(cells, self.min_value, self.max_value)?;
        Some((code, value))
    }
}

/// Rightmost cell that parses as a number with magnitude in `[min, max)`
pub fn rightmost_value<S: AsRef<str>>(cells: &[S], min: f64, max: f64) -> Option<f64> {
    cells
        .iter()
        .rev()
        .filter_map(|c| normalize(c.as_ref()))
        .find(|v| in_magnitude_range(*v, min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> BlockScanner {
        BlockScanner::new(&ScanConfig::default()).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn payroll_grid() -> Grid {
        Grid::from_rows(
            "Folha",
            vec![
                vec!["Empresa ACME"],
                vec![""],
                vec!["Departamento 1"],
                vec!["010 Salário", "", "30", "900,00"],
                vec![""],
                vec!["", "TOTAL GERAL", ""],
                vec!["010 Salário", "", "30", "1.500,00"],
                vec!["020 INSS", "", "", "(120,00)"],
                vec!["Base FGTS", "", "", "1.500,00"],
                vec!["030", "", "", "99,00"],
                vec![""],
                vec!["040 Ignorado", "", "", "10,00"],
                vec!["Total Geral"],
                vec!["010 Adicional", "250,00"],
            ],
        )
    }

    #[test]
    fn test_find_anchors() {
        assert_eq!(scanner().find_anchors(&payroll_grid()), vec![5, 12]);
    }

    #[test]
    fn test_anchor_column_window() {
        let config = ScanConfig {
            anchor_columns: 1,
            ..ScanConfig::default()
        };
        let scanner = BlockScanner::new(&config).unwrap();
        assert_eq!(scanner.find_anchors(&payroll_grid()), vec![12]);
    }

    #[test]
    fn test_scan_blocks() {
        let grid = payroll_grid();
        let scanner = scanner();
        let anchors = scanner.find_anchors(&grid);
        let records = scanner.scan_blocks(&grid, &anchors);

        let pairs: Vec<_> = records.iter().map(|r| (r.code.as_str(), r.value, r.row)).collect();
        assert_eq!(
            pairs,
            vec![
                ("010", 1500.0, 6),
                ("020", -120.0, 7),
                ("010", 250.0, 13),
            ]
        );
    }

    #[test]
    fn test_numeric_rows_allowed_without_description_gate() {
        let config = ScanConfig {
            require_description: false,
            ..ScanConfig::default()
        };
        let scanner = BlockScanner::new(&config).unwrap();
        let grid = payroll_grid();
        let codes: Vec<_> = scanner
            .scan_block(&grid, 5)
            .into_iter()
            .map(|r| r.code)
            .collect();
        assert_eq!(codes, vec!["010", "020", "030"]);
    }

    #[test]
    fn test_candidate_rules() {
        let scanner = scanner();
        assert_eq!(
            scanner.candidate(&row(&["", " 010 Salário ", "1.500,00"])),
            Some(("010".to_string(), 1500.0))
        );
        // Code must be in the first non-empty cell
        assert_eq!(scanner.candidate(&row(&["Salário", "010", "1.500,00"])), None);
        assert_eq!(scanner.candidate(&row(&["0101 Salário", "1.500,00"])), None);
        assert_eq!(scanner.candidate(&row(&[])), None);
    }

    #[test]
    fn test_rightmost_qualifying_value() {
        let scanner = scanner();
        // Trailing percentage below the threshold and a huge id are skipped
        assert_eq!(
            scanner.candidate(&row(&["010 Salário", "1.500,00", "0,001", "123456789"])),
            Some(("010".to_string(), 1500.0))
        );
        // A trailing date cell is never the value
        assert_eq!(
            scanner.candidate(&row(&["010 Salário", "1.500,00", "2024-03-01 00:00:00"])),
            Some(("010".to_string(), 1500.0))
        );
        // Without any value cell the code itself is the last number standing
        assert_eq!(
            scanner.candidate(&row(&["010 Salário", "-", "abc"])),
            Some(("010".to_string(), 10.0))
        );
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(rightmost_value(&["0,01"], 0.01, 1e8), Some(0.01));
        assert_eq!(rightmost_value(&["0.009999"], 0.01, 1e8), None);
        assert_eq!(rightmost_value(&["100000000"], 0.01, 1e8), None);
        assert_eq!(rightmost_value(&["99999999,99"], 0.01, 1e8), Some(99_999_999.99));
        assert_eq!(rightmost_value(&["0"], 0.01, 1e8), None);
    }

    #[test]
    fn test_block_at_end_of_sheet() {
        let grid = Grid::from_rows("Folha", vec![vec!["TOTAL GERAL"], vec!["010 Salário", "5,00"]]);
        let records = scanner().scan_block(&grid, 0);
        assert_eq!(records.len(), 1);
        assert!(scanner().scan_block(&grid, 1).is_empty());
    }

    #[test]
    fn test_invalid_marker() {
        let config = ScanConfig {
            marker: "total(".to_string(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            BlockScanner::new(&config),
            Err(ExtractError::InvalidMarker { .. })
        ));
    }
}
