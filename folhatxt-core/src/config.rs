//! Configuration system for the extractor

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::rules::blk001_total_marker::DEFAULT_MARKER;

/// Main extractor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Worksheet to read; the first one when unset
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub identifier: IdentifierConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

impl ExtractorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ExtractorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check if an identifier rule takes part in the whole-sheet scan
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        !self
            .identifier
            .disabled_rules
            .iter()
            .any(|selector| matches_rule_selector(selector, rule_id))
    }

    /// Validate the configuration against a set of valid rule tokens
    pub fn validate(&self, valid_tokens: &HashSet<String>) -> Result<()> {
        for rule in &self.identifier.disabled_rules {
            if !valid_tokens.contains(rule) {
                anyhow::bail!(
                    "Configuration error: Unknown rule or category '{}' in identifier disabled_rules",
                    rule
                );
            }
        }

        if self.header.rows == 0 || self.header.columns == 0 {
            anyhow::bail!("Configuration error: header region must span at least one row and one column");
        }
        if self.scan.anchor_columns == 0 {
            anyhow::bail!("Configuration error: scan.anchor_columns must be at least 1");
        }

        if !(self.scan.min_value.is_finite() && self.scan.max_value.is_finite()) {
            anyhow::bail!("Configuration error: scan value bounds must be finite numbers");
        }
        if self.scan.min_value < 0.0 || self.scan.min_value >= self.scan.max_value {
            anyhow::bail!(
                "Configuration error: scan value range [{}, {}) is empty or negative",
                self.scan.min_value,
                self.scan.max_value
            );
        }

        if let Err(e) = regex::Regex::new(&self.scan.marker) {
            anyhow::bail!(
                "Configuration error: invalid marker pattern '{}': {}",
                self.scan.marker,
                e
            );
        }

        let fallback = &self.identifier.fallback;
        if fallback.is_empty() || !fallback.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!(
                "Configuration error: identifier fallback '{}' must be a non-empty digit string",
                fallback
            );
        }

        Ok(())
    }
}

/// Top-left region searched for the identifier label and the period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 20,
        }
    }
}

/// How the tax identifier is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierStrategy {
    /// Only the labeled form inside the header region
    Label,
    /// Every identifier-shaped token of the sheet, preferring the second one
    #[default]
    WholeSheet,
}

/// Identifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    pub strategy: IdentifierStrategy,
    /// Used when nothing is found
    pub fallback: String,
    pub expected_length: usize,
    /// Identifier rules skipped by the whole-sheet scan
    pub disabled_rules: HashSet<String>,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            strategy: IdentifierStrategy::default(),
            fallback: "0".repeat(14),
            expected_length: 14,
            disabled_rules: HashSet::new(),
        }
    }
}

/// Block scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Marker phrase, a case-insensitive regular expression
    pub marker: String,
    /// Leading columns joined when looking for the marker
    pub anchor_columns: usize,
    /// Inclusive lower bound of an accepted value's magnitude
    pub min_value: f64,
    /// Exclusive upper bound of an accepted value's magnitude
    pub max_value: f64,
    /// Skip rows without any alphabetic text
    pub require_description: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            anchor_columns: 20,
            min_value: 0.01,
            max_value: 1e8,
            require_description: true,
        }
    }
}

fn matches_rule_selector(selector: &str, rule_id: &str) -> bool {
    rule_id == selector || rule_id.starts_with(selector)
}
