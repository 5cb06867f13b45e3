//! ID001: Labeled CNPJ
//!
//! Accepts `CNPJ` (any case) followed by optional `:`, `-` or spaces and a run
//! of digits and `.`, `-`, `/`. Extracts the digits of that run. A label
//! followed by punctuation only (`CNPJ: -`) is rejected.

use super::{ExtractionRule, RuleCategory, RuleMatch, digits_only};
use regex::Regex;

pub struct CnpjLabelRule {
    pattern: Regex,
}

impl CnpjLabelRule {
    pub fn new() -> Self {
        let pattern = Regex::new(r"(?i)CNPJ[:\- ]*\s*([0-9.\-/]+)").unwrap();
        Self { pattern }
    }
}

impl Default for CnpjLabelRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRule for CnpjLabelRule {
    fn id(&self) -> &str {
        "ID001"
    }

    fn name(&self) -> &str {
        "Labeled CNPJ"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Identifier
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .captures_iter(haystack)
            .filter_map(|caps| {
                let group = caps.get(1)?;
                let digits = digits_only(group.as_str());
                if digits.is_empty() {
                    return None;
                }
                Some(RuleMatch::new(digits, group.start(), group.end()))
            })
            .collect()
    }
}
