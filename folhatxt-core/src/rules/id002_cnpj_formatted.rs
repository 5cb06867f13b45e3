//! ID002: Punctuated CNPJ
//!
//! Accepts the `NN.NNN.NNN/NNNN-NN` layout anywhere in the text, with or
//! without a label. Extracts its 14 digits.

use super::{ExtractionRule, RuleCategory, RuleMatch, digits_only};
use regex::Regex;

pub struct CnpjFormattedRule {
    pattern: Regex,
}

impl CnpjFormattedRule {
    pub fn new() -> Self {
        let pattern = Regex::new(r"[0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2}").unwrap();
        Self { pattern }
    }
}

impl Default for CnpjFormattedRule {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionRule for CnpjFormattedRule {
    fn id(&self) -> &str {
        "ID002"
    }

    fn name(&self) -> &str {
        "Punctuated CNPJ"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Identifier
    }

    fn find_all(&self, haystack: &str) -> Vec<RuleMatch> {
        self.pattern
            .find_iter(haystack)
            .map(|m| RuleMatch::new(digits_only(m.as_str()), m.start(), m.end()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_identifier() {
        let rule = CnpjFormattedRule::new();
        let all = rule.find_all("Contador 11.111.111/0001-11 Empresa 22.222.222/0001-22");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].value, "11111111000111");
        assert_eq!(all[1].value, "22222222000122");
    }

    #[test]
    fn test_rejects_other_layouts() {
        let rule = CnpjFormattedRule::new();
        assert!(rule.find("12345678000199").is_none());
        assert!(rule.find("123.456.789-09").is_none());
        assert!(rule.find("12.345.678/0001").is_none());
    }
}
