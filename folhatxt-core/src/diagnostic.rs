//! Non-fatal diagnostics collected while extracting

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

/// Where a diagnostic points to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticScope {
    /// The sheet as a whole
    Sheet(String),
    /// One cell of the sheet
    Cell(String, CellReference),
}

impl DiagnosticScope {
    pub fn sheet_name(&self) -> &str {
        match self {
            DiagnosticScope::Sheet(name) => name,
            DiagnosticScope::Cell(name, _) => name,
        }
    }
}

impl PartialOrd for DiagnosticScope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiagnosticScope {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DiagnosticScope::Sheet(a), DiagnosticScope::Sheet(b)) => a.cmp(b),
            (DiagnosticScope::Sheet(_), DiagnosticScope::Cell(_, _)) => Ordering::Less,
            (DiagnosticScope::Cell(_, _), DiagnosticScope::Sheet(_)) => Ordering::Greater,
            (DiagnosticScope::Cell(sheet_a, cell_a), DiagnosticScope::Cell(sheet_b, cell_b)) => {
                sheet_a.cmp(sheet_b).then_with(|| cell_a.cmp(cell_b))
            }
        }
    }
}

/// Cell reference (e.g., A1, B2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellReference {
    pub row: u32,
    pub col: u32,
}

impl CellReference {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build from grid indices, saturating on absurdly large sheets
    pub fn from_indices(row: usize, col: usize) -> Self {
        Self::new(
            u32::try_from(row).unwrap_or(u32::MAX),
            u32::try_from(col).unwrap_or(u32::MAX),
        )
    }

    /// Convert to Excel-style reference (e.g., "A1")
    pub fn to_excel_ref(&self) -> String {
        format!("{}{}", Self::col_to_letter(self.col), u64::from(self.row) + 1)
    }

    /// Convert column number to letter (0 -> A, 1 -> B, etc.)
    fn col_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            result.insert(0, (b'A' + (col % 26) as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

impl PartialOrd for CellReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl std::fmt::Display for CellReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_excel_ref())
    }
}

/// A diagnostic raised by one of the extraction rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID (e.g., "ID001")
    pub rule_id: String,
    /// Scope of the diagnostic
    pub scope: DiagnosticScope,
    /// Human-readable message
    pub message: String,
    /// Severity level
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        scope: DiagnosticScope,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            scope,
            message: message.into(),
            severity,
        }
    }

    pub fn warning(rule_id: impl Into<String>, sheet: &str, message: impl Into<String>) -> Self {
        Self::new(
            rule_id,
            DiagnosticScope::Sheet(sheet.to_string()),
            message,
            Severity::Warning,
        )
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scope
            .cmp(&other.scope)
            .then_with(|| self.rule_id.cmp(&other.rule_id))
    }
}

/// A derived value together with the diagnostics raised while deriving it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Warning)
    }
}
