//! PER001: Month/year label
//!
//! Accepts `Mês/Ano`, `Mes/Ano` or `MêsAno` (any case) followed by optional
//! `:`, `-` or spaces and a `MM/YYYY` token. Extracts the token.

use super::{ExtractionRule, RuleCategory, RuleMatch};
use regex::Regex;

pub struct MonthYearRule {
    pattern: Regex,
}

impl MonthYearRule {
    pub fn new() -> Self {
        let pattern = Regex::new(r"(?i)M[eê]s/?Ano[:\- ]*\s*([0-9]{2}/[0-9]{4})").unwrap();
        Self { pattern }
    }

    /// Split an extracted `MM/YYYY` token into (month, year)
    pub fn split(token: &str) -> Option<(u32, i32)> {
        let (month, year) = token.split_once('/')?;
        Some((month.parse().ok()?, year.parse().ok()?))
    }
}

impl Default for MonthYearRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRule for MonthYearRule {
    fn id(&self) -> &str {
        "PER001"
    }

    fn name(&self) -> &str {
        "Month/year label"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Period
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .captures_iter(haystack)
            .filter_map(|caps| {
                let group = caps.get(1)?;
                Some(RuleMatch::new(group.as_str(), group.start(), group.end()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_variants() {
        let rule = MonthYearRule::new();
        assert_eq!(rule.find("Mês/Ano: 03/2024").unwrap().value, "03/2024");
        assert_eq!(rule.find("MES/ANO 12/2023").unwrap().value, "12/2023");
        assert_eq!(rule.find("mêsano-01/2025").unwrap().value, "01/2025");
    }

    #[test]
    fn test_rejects_loose_tokens() {
        let rule = MonthYearRule::new();
        assert!(rule.find("Competência 03/2024").is_none());
        assert!(rule.find("Mês/Ano: 3/2024").is_none());
        assert!(rule.find("Mês/Ano: 03/24").is_none());
    }

    #[test]
    fn test_split() {
        assert_eq!(MonthYearRule::split("03/2024"), Some((3, 2024)));
        assert_eq!(MonthYearRule::split("032024"), None);
    }
}
