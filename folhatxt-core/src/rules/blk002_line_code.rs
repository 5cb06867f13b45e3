//! BLK002: Payroll line code
//!
//! Accepts a cell text that starts with exactly three digits followed by a
//! word boundary (`010 Salário`, `010-INSS`, `010`). Rejects `0101`,
//! `010Salário` and text with anything before the digits. Extracts the code.
//! Callers pass the trimmed cell.

use super::{ExtractionRule, RuleCategory, RuleMatch};
use regex::Regex;

pub struct LineCodeRule {
    pattern: Regex,
}

impl LineCodeRule {
    pub fn new() -> Self {
        let pattern = Regex::new(r"^([0-9]{3})\b").unwrap();
        Self { pattern }
    }
}

impl Default for LineCodeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRule for LineCodeRule {
    fn id(&self) -> &str {
        "BLK002"
    }

    fn name(&self) -> &str {
        "Payroll line code"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Block
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|group| RuleMatch::new(group.as_str(), group.start(), group.end()))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_codes() {
        let rule = LineCodeRule::new();
        assert_eq!(rule.find("010 Salário").unwrap().value, "010");
        assert_eq!(rule.find("010-INSS").unwrap().value, "010");
        assert_eq!(rule.find("999").unwrap().value, "999");
    }

    #[test]
    fn test_rejected_codes() {
        let rule = LineCodeRule::new();
        assert!(rule.find("0101 Salário").is_none());
        assert!(rule.find("010Salário").is_none());
        assert!(rule.find("10 Salário").is_none());
        assert!(rule.find("Salário 010").is_none());
        assert!(rule.find(" 010 Salário").is_none());
    }
}
