//! Report header resolution: tax identifier and reporting period
//!
//! Nothing in here fails. When a value cannot be found the configured
//! default is used and a warning diagnostic is attached to the result.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ExtractorConfig, IdentifierStrategy};
use crate::diagnostic::{Diagnostic, Resolved};
use crate::reader::Grid;
use crate::rules::registry::create_enabled_identifier_rules;
use crate::rules::{CnpjLabelRule, ExtractionRule, MonthYearRule, RuleMatch};

/// Identifier and period written on the first line of the TXT
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportHeader {
    pub identifier: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

pub struct HeaderResolver {
    strategy: IdentifierStrategy,
    region: (usize, usize),
    fallback: String,
    expected_length: usize,
    label_rule: CnpjLabelRule,
    identifier_rules: Vec<Box<dyn ExtractionRule>>,
    period_rule: MonthYearRule,
}

impl HeaderResolver {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            strategy: config.identifier.strategy,
            region: (config.header.rows, config.header.columns),
            fallback: config.identifier.fallback.clone(),
            expected_length: config.identifier.expected_length,
            label_rule: CnpjLabelRule::new(),
            identifier_rules: create_enabled_identifier_rules(config),
            period_rule: MonthYearRule::new(),
        }
    }

    /// Resolve the identifier and the period of a sheet.
    ///
    /// `today` stands in for the period when no month/year is found.
    pub fn resolve(&self, grid: &Grid, today: NaiveDate) -> Resolved<ReportHeader> {
        let identifier = self.resolve_identifier(grid);
        let period = self.resolve_period(grid, today);

        let mut diagnostics = identifier.diagnostics;
        diagnostics.extend(period.diagnostics);

        let (period_start, period_end) = period.value;
        Resolved::with(
            ReportHeader {
                identifier: identifier.value,
                period_start,
                period_end,
            },
            diagnostics,
        )
    }

    pub fn resolve_identifier(&self, grid: &Grid) -> Resolved<String> {
        if self.strategy == IdentifierStrategy::WholeSheet {
            let flat = grid.flatten();
            let mut matches = Vec::new();
            for rule in &self.identifier_rules {
                let found = rule.find_all(&flat);
                trace!(
                    rule = rule.id(),
                    name = rule.name(),
                    category = rule.category().as_str(),
                    matches = found.len(),
                    "Identifier rule scanned sheet"
                );
                matches.extend(found);
            }
            if let Some(identifier) = pick_identifier(matches, self.expected_length) {
                debug!(identifier = %identifier, "Identifier found by whole-sheet scan");
                return Resolved::clean(identifier);
            }
        }

        let region = grid.joined_region(self.region.0, self.region.1);
        if let Some(found) = self.label_rule.find(&region) {
            debug!(identifier = %found.value, "Identifier found by label");
            let mut diagnostics = Vec::new();
            if found.value.len() != self.expected_length {
                diagnostics.push(Diagnostic::warning(
                    self.label_rule.id(),
                    &grid.sheet_name,
                    format!(
                        "CNPJ '{}' has {} digits, expected {}",
                        found.value,
                        found.value.len(),
                        self.expected_length
                    ),
                ));
            }
            return Resolved::with(found.value, diagnostics);
        }

        Resolved::with(
            self.fallback.clone(),
            vec![Diagnostic::warning(
                self.label_rule.id(),
                &grid.sheet_name,
                format!("CNPJ not found; using {}", self.fallback),
            )],
        )
    }

    pub fn resolve_period(&self, grid: &Grid, today: NaiveDate) -> Resolved<(NaiveDate, NaiveDate)> {
        let region = grid.joined_region(self.region.0, self.region.1);
        let fallback = (today, today);

        let Some(found) = self.period_rule.find(&region) else {
            return Resolved::with(
                fallback,
                vec![Diagnostic::warning(
                    self.period_rule.id(),
                    &grid.sheet_name,
                    format!("Mês/Ano not found; using {}", today.format("%d/%m/%Y")),
                )],
            );
        };

        match MonthYearRule::split(&found.value).and_then(|(m, y)| month_bounds(m, y)) {
            Some(bounds) => Resolved::clean(bounds),
            None => Resolved::with(
                fallback,
                vec![Diagnostic::warning(
                    self.period_rule.id(),
                    &grid.sheet_name,
                    format!(
                        "Mês/Ano '{}' is not a valid month; using {}",
                        found.value,
                        today.format("%d/%m/%Y")
                    ),
                )],
            ),
        }
    }
}

/// Choose the report identifier among every identifier-shaped match.
///
/// Matches are taken in order of appearance. A match overlapping one already
/// kept is the same identifier seen by another rule and is dropped. Payroll
/// exports print the accountant's CNPJ before the employer's, so the second
/// distinct occurrence wins when there is one.
pub fn pick_identifier(mut matches: Vec<RuleMatch>, expected_length: usize) -> Option<String> {
    matches.retain(|m| m.value.len() == expected_length);
    matches.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let mut distinct: Vec<RuleMatch> = Vec::new();
    for m in matches {
        if !distinct.iter().any(|kept| kept.overlaps(&m)) {
            distinct.push(m);
        }
    }

    let mut occurrences = distinct.into_iter().map(|m| m.value);
    let first = occurrences.next()?;
    Some(occurrences.next().unwrap_or(first))
}

/// First and last day of a calendar month
pub fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
    };
    Some((start, end))
}
