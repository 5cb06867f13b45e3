//! Rule registry for managing and creating rule instances

use super::*;
use crate::config::ExtractorConfig;
use std::collections::HashSet;

/// Get all tokens accepted by `identifier.disabled_rules`.
///
/// Only identifier rules can be switched off; the period and block rules
/// always run, so their IDs are rejected.
pub fn get_all_valid_tokens() -> HashSet<String> {
    let mut tokens = HashSet::new();
    tokens.insert("ID".to_string());

    for rule in create_identifier_rules() {
        tokens.insert(rule.id().to_string());
    }

    tokens
}

/// Identifier rules used by the whole-sheet scan, minus the disabled ones
pub fn create_enabled_identifier_rules(config: &ExtractorConfig) -> Vec<Box<dyn ExtractionRule>> {
    create_identifier_rules()
        .into_iter()
        .filter(|rule| config.is_rule_enabled(rule.id()))
        .collect()
}

/// Create instances of all identifier rules
fn create_identifier_rules() -> Vec<Box<dyn ExtractionRule>> {
    vec![
        Box::new(id001_cnpj_label::CnpjLabelRule::new()),
        Box::new(id002_cnpj_formatted::CnpjFormattedRule::new()),
        Box::new(id003_cnpj_bare::CnpjBareRule::new()),
    ]
}
