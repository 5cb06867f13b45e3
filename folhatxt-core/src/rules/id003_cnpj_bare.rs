//! ID003: Bare 14-digit CNPJ
//!
//! Accepts a run of exactly 14 digits delimited by word boundaries.
//! Longer digit runs are rejected rather than truncated.

use super::{ExtractionRule, RuleCategory, RuleMatch};
use regex::Regex;

pub struct CnpjBareRule {
    pattern: Regex,
}

impl CnpjBareRule {
    pub fn new() -> Self {
        let pattern = Regex::new(r"\b[0-9]{14}\b").unwrap();
        Self { pattern }
    }
}

impl Default for CnpjBareRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRule for CnpjBareRule {
    fn id(&self) -> &str {
        "ID003"
    }

    fn name(&self) -> &str {
        "Bare CNPJ digits"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Identifier
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .find_iter(haystack)
            .map(|m| RuleMatch::new(m.as_str(), m.start(), m.end()))
            .collect()
    }
}
