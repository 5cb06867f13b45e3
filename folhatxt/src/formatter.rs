//! Output formatters for the extraction report

use anyhow::Result;
use colored::*;
use folhatxt_core::diagnostic::CellReference;
use folhatxt_core::{Diagnostic, DiagnosticScope, Report, Severity};
use std::collections::BTreeMap;
use std::path::Path;

/// Print the report in human-readable format with colors
pub fn print_human(file_path: &Path, report: &Report, written: Option<&Path>) {
    println!("{}", format!("Processing: {}", file_path.display()).bold());
    println!("{} {}", "Sheet:".bold(), report.sheet.cyan().bold());
    println!();

    // Sheet-level diagnostics first, then one group per cell
    let (sheet_diagnostics, cell_diagnostics) = group_by_scope(&report.diagnostics);
    for diagnostic in &sheet_diagnostics {
        print_diagnostic(diagnostic, 1);
    }
    for (cell_ref, diagnostics) in &cell_diagnostics {
        println!("  {} {}", "Cell:".bold(), cell_ref.to_string().yellow());
        for diagnostic in diagnostics {
            print_diagnostic(diagnostic, 2);
        }
    }
    if !report.diagnostics.is_empty() {
        println!();
    }

    let header = &report.header;
    println!("{}", "Header:".bold().underline());
    println!("  {} {}", "CNPJ:".bold(), header.identifier);
    println!(
        "  {} {} - {}",
        "Period:".bold(),
        header.period_start.format("%d/%m/%Y"),
        header.period_end.format("%d/%m/%Y")
    );
    println!();

    println!("{}", "Totals:".bold().underline());
    let preview = report.preview();
    let width = preview.iter().map(|r| r.value.len()).max().unwrap_or(0);
    println!("  {:<6} {:>width$}", "codigo".bright_black(), "valor".bright_black(), width = width);
    for row in &preview {
        println!("  {:<6} {:>width$}", row.code.yellow(), row.value, width = width);
    }
    println!();

    println!("{}", "TXT preview:".bold().underline());
    for line in report.document.text.lines() {
        println!("  {}", line);
    }
    println!();

    match written {
        Some(path) => println!(
            "{}",
            format!("✓ TXT written to {}", path.display()).green().bold()
        ),
        None => println!(
            "{} {}",
            "[DRY RUN]".yellow().bold(),
            format!("Output would be: {}", report.document.file_name)
        ),
    }
}

/// Print diagnostics to stderr, used when stdout carries the TXT itself
pub fn print_diagnostics_stderr(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        if diagnostic.severity >= Severity::Warning {
            eprintln!(
                "{} {}",
                location(&diagnostic.scope).bright_black(),
                diagnostic_line(diagnostic, 0)
            );
        }
    }
}

/// Split diagnostics into sheet-level ones and per-cell groups in row order
fn group_by_scope(
    diagnostics: &[Diagnostic],
) -> (Vec<&Diagnostic>, BTreeMap<CellReference, Vec<&Diagnostic>>) {
    let mut sheet_diagnostics = Vec::new();
    let mut cell_diagnostics: BTreeMap<CellReference, Vec<&Diagnostic>> = BTreeMap::new();

    for diagnostic in diagnostics {
        match &diagnostic.scope {
            DiagnosticScope::Sheet(_) => sheet_diagnostics.push(diagnostic),
            DiagnosticScope::Cell(_, cell_ref) => {
                cell_diagnostics
                    .entry(*cell_ref)
                    .or_default()
                    .push(diagnostic);
            }
        }
    }

    (sheet_diagnostics, cell_diagnostics)
}

/// `Sheet` or `Sheet!A6`
fn location(scope: &DiagnosticScope) -> String {
    match scope {
        DiagnosticScope::Sheet(_) => scope.sheet_name().to_string(),
        DiagnosticScope::Cell(_, cell_ref) => format!("{}!{}", scope.sheet_name(), cell_ref),
    }
}

fn print_diagnostic(diagnostic: &Diagnostic, indent: usize) {
    println!("{}", diagnostic_line(diagnostic, indent));
}

fn diagnostic_line(diagnostic: &Diagnostic, indent: usize) -> String {
    let indent_str = "  ".repeat(indent);
    let severity_str = match diagnostic.severity {
        Severity::Warning => "WARN".yellow().bold(),
        Severity::Info => "INFO".blue().bold(),
    };

    format!(
        "{}{} [{}] {}",
        indent_str,
        severity_str,
        diagnostic.rule_id.bright_black(),
        diagnostic.message
    )
}

/// Print the report in JSON format
pub fn print_json(file_path: &Path, report: &Report, written: Option<&Path>) -> Result<()> {
    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "sheet": report.sheet,
        "header": report.header,
        "records": report.preview(),
        "diagnostics": report.diagnostics,
        "document": report.document,
        "written": written.map(|p| p.display().to_string()),
        "summary": {
            "anchors": report.anchors.len(),
            "candidates": report.candidates.len(),
            "codes": report.records.len(),
            "warnings": report.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
