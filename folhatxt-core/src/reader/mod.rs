//! Excel/ODS file reader using calamine
//!
//! Every cell is handed over as display text. Numbers are never pushed
//! through a locale-aware conversion here; that is the job of
//! [`crate::numeric`].

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::debug;

use crate::error::ExtractError;

pub mod grid;

pub use grid::Grid;

/// Read one worksheet from a file path.
///
/// `sheet` selects a worksheet by name; `None` takes the first one.
pub fn read_grid<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Grid, ExtractError> {
    let path = path.as_ref();
    let read_error = |message: String| ExtractError::Read {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| ExtractError::SheetNotFound {
                sheet: name.to_string(),
                available: sheet_names.clone(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ExtractError::EmptyWorkbook {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| read_error(format!("sheet '{}': {}", sheet_name, e)))?;

    let grid = range_to_grid(&sheet_name, &range);
    debug!(
        sheet = %sheet_name,
        rows = grid.row_count(),
        "Loaded worksheet from {}",
        path.display()
    );
    Ok(grid)
}

/// Convert a calamine range into a grid anchored at A1.
///
/// calamine trims leading empty rows and columns; they are restored so that
/// row and column bounds keep referring to absolute sheet positions.
pub fn range_to_grid(sheet_name: &str, range: &Range<Data>) -> Grid {
    let (start_row, start_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Grid::new(sheet_name, Vec::new()),
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
    for source_row in range.rows() {
        let mut row = vec![String::new(); start_col];
        row.extend(source_row.iter().map(cell_to_string));
        rows.push(row);
    }

    Grid::new(sheet_name, rows)
}

/// Convert a calamine cell into the text a user sees in the sheet
pub fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Shortest round-trip form, integral values without a trailing ".0"
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => e.to_string(),
        // A date never reads as a value: its digits exceed any accepted magnitude
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| dt.as_f64().to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Excel serial dates count days from 1899-12-30, the fraction is the time of day
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_keeps_display_text() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("1.500,00".into())), "1.500,00");
        assert_eq!(cell_to_string(&Data::Int(42)), "42");
        assert_eq!(cell_to_string(&Data::Float(1500.0)), "1500");
        assert_eq!(cell_to_string(&Data::Float(1234.56)), "1234.56");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_excel_serial_to_datetime() {
        // 45352 is 2024-03-01
        let format = |serial: f64| {
            excel_serial_to_datetime(serial).map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        };
        assert_eq!(format(45352.0).as_deref(), Some("2024-03-01 00:00:00"));
        assert_eq!(format(45352.5).as_deref(), Some("2024-03-01 12:00:00"));
        assert_eq!(excel_serial_to_datetime(-1.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn test_date_text_is_outside_value_window() {
        let value = crate::numeric::normalize("2024-03-01 00:00:00").unwrap();
        assert!(!crate::numeric::in_magnitude_range(value, 0.01, 1e8));
    }

    #[test]
    fn test_range_to_grid_restores_offset() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("TOTAL GERAL".into()));
        range.set_value((3, 2), Data::Float(250.0));

        let grid = range_to_grid("Folha", &range);
        assert_eq!(grid.row_count(), 4);
        assert!(grid.is_blank_row(0));
        assert_eq!(grid.cell(2, 1), "TOTAL GERAL");
        assert_eq!(grid.cell(3, 2), "250");
        assert_eq!(grid.cell(3, 0), "");
    }

    #[test]
    fn test_read_grid_missing_file() {
        let err = read_grid("does/not/exist.xlsx", None).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }
}
