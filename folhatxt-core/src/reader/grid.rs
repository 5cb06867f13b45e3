//! Grid data structures

/// A single worksheet as row-major display text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub sheet_name: String,
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(sheet_name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows,
        }
    }

    /// Build a grid from string literals (handy for tests and callers
    /// that already hold the cells in memory)
    pub fn from_rows<R, C>(sheet_name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        Self::new(sheet_name, rows)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all cells of a row, or an empty slice past the end
    pub fn row(&self, index: usize) -> &[String] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get a cell at the given position; missing cells read as empty
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.row(row).get(col).map(String::as_str).unwrap_or("")
    }

    /// A row is blank when every cell is empty after trimming
    pub fn is_blank_row(&self, index: usize) -> bool {
        self.row(index).iter().all(|c| c.trim().is_empty())
    }

    /// Cells of the bounded top-left region, row-major.
    ///
    /// Positions outside the stored cells are yielded as empty strings so
    /// ragged rows behave like a rectangular sheet.
    pub fn region(&self, rows: usize, cols: usize) -> impl Iterator<Item = &str> {
        (0..rows.min(self.rows.len()))
            .flat_map(move |r| (0..cols).map(move |c| self.cell(r, c)))
    }

    /// Region cells joined with a single space
    pub fn joined_region(&self, rows: usize, cols: usize) -> String {
        join_cells(self.region(rows, cols))
    }

    /// First `cols` cells of one row joined with a single space
    pub fn joined_row(&self, row: usize, cols: usize) -> String {
        join_cells((0..cols).map(|c| self.cell(row, c)))
    }

    /// Every stored cell of the sheet joined with a single space
    pub fn flatten(&self) -> String {
        join_cells(self.rows.iter().flatten().map(String::as_str))
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.collect::<Vec<_>>().join(" ")
}
