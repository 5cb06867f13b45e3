//! Named extraction rules
//!
//! Each rule wraps one text pattern: what input shape it accepts and which
//! group it extracts. Rules are independent of the scanning loops in
//! [`crate::header`] and [`crate::scanner`] so they can be tested on plain
//! strings.

pub mod registry;

pub mod blk001_total_marker;
pub mod blk002_line_code;
pub mod id001_cnpj_label;
pub mod id002_cnpj_formatted;
pub mod id003_cnpj_bare;
pub mod per001_month_year;

pub use blk001_total_marker::TotalMarkerRule;
pub use blk002_line_code::LineCodeRule;
pub use id001_cnpj_label::CnpjLabelRule;
pub use id002_cnpj_formatted::CnpjFormattedRule;
pub use id003_cnpj_bare::CnpjBareRule;
pub use per001_month_year::MonthYearRule;

/// A successful rule match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Extracted value, already cleaned by the rule
    pub value: String,
    /// Byte span of the extracted group in the haystack
    pub start: usize,
    pub end: usize,
}

impl RuleMatch {
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            value: value.into(),
            start,
            end,
        }
    }

    /// Whether two matches cover any common byte
    pub fn overlaps(&self, other: &RuleMatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Trait that all extraction rules implement
pub trait ExtractionRule: Send + Sync {
    /// Unique rule identifier (e.g., "ID001")
    fn id(&self) -> &str;

    /// Human-readable rule name
    fn name(&self) -> &str;

    /// Rule category
    fn category(&self) -> RuleCategory;

    /// Every match in order of appearance
    fn find_all(&self, haystack: &str) -> Vec<RuleMatch>;

    /// First match, if any
    fn find(&self, haystack: &str) -> Option<RuleMatch> {
        self.find_all(haystack).into_iter().next()
    }
}

/// Rule categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Identifier,
    Period,
    Block,
}

impl RuleCategory {
    pub fn as_str(&self) -> &str {
        match self {
            RuleCategory::Identifier => "Identifier",
            RuleCategory::Period => "Period",
            RuleCategory::Block => "Block",
        }
    }
}

/// Keep only the ASCII digits of `s`
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
