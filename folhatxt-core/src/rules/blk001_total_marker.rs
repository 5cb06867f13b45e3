//! BLK001: Grand-total marker
//!
//! Accepts any text containing the marker phrase, case-insensitive. The
//! default phrase is `total\s*geral`, so `TOTAL GERAL`, `Total  geral` and
//! `TOTALGERAL` all match. Extracts the matched phrase.

use super::{ExtractionRule, RuleCategory, RuleMatch};
use regex::{Regex, RegexBuilder};

pub const DEFAULT_MARKER: &str = r"total\s*geral";

pub struct TotalMarkerRule {
    pattern: Regex,
}

impl TotalMarkerRule {
    pub fn new(marker: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(marker).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl ExtractionRule for TotalMarkerRule {
    fn id(&self) -> &str {
        "BLK001"
    }

    fn name(&self) -> &str {
        "Grand-total marker"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Block
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .find_iter(haystack)
            .map(|m| RuleMatch::new(m.as_str(), m.start(), m.end()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        let rule = TotalMarkerRule::new(DEFAULT_MARKER).unwrap();
        assert!(rule.is_match("TOTAL GERAL"));
        assert!(rule.is_match("  Total   geral da empresa"));
        assert!(rule.is_match("TOTALGERAL"));
        assert!(!rule.is_match("TOTAL DO DEPARTAMENTO"));
        assert!(!rule.is_match("Geral total"));
    }

    #[test]
    fn test_custom_marker() {
        let rule = TotalMarkerRule::new(r"resumo\s+geral").unwrap();
        assert!(rule.is_match("RESUMO GERAL"));
        assert!(!rule.is_match("TOTAL GERAL"));
    }

    #[test]
    fn test_invalid_marker() {
        assert!(TotalMarkerRule::new("total(").is_err());
    }
}
