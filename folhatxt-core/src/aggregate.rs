//! Per-code totals

use serde::Serialize;
use std::collections::BTreeMap;

use crate::scanner::CandidateRecord;

/// Sum of every candidate sharing a code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRecord {
    pub code: String,
    pub value: f64,
}

/// Group candidates by code and sum them, ascending by code string
pub fn aggregate(candidates: &[CandidateRecord]) -> Vec<AggregatedRecord> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for candidate in candidates {
        *totals.entry(candidate.code.as_str()).or_insert(0.0) += candidate.value;
    }

    totals
        .into_iter()
        .map(|(code, value)| AggregatedRecord {
            code: code.to_string(),
            value,
        })
        .collect()
}
