//! TXT document rendering
//!
//! ```text
//! 12345678000199|01032024|31032024|
//! 010|1750,00|
//! ```

use serde::Serialize;

use crate::aggregate::AggregatedRecord;
use crate::header::ReportHeader;

/// Finished TXT payload and the file name it should be saved under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputDocument {
    pub file_name: String,
    pub text: String,
}

impl OutputDocument {
    /// UTF-8 bytes of the document
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// One row of the review table shown before saving
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub code: String,
    pub value: String,
}

/// Two decimals with a comma as decimal mark, no thousands grouping.
///
/// Rounds the exact binary value, ties to even, as `{:.2}` does.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

pub fn header_line(header: &ReportHeader) -> String {
    format!(
        "{}|{}|{}|",
        header.identifier,
        header.period_start.format("%d%m%Y"),
        header.period_end.format("%d%m%Y")
    )
}

pub fn record_line(record: &AggregatedRecord) -> String {
    format!("{}|{}|", record.code, format_value(record.value))
}

/// `Resultado - {first 8 identifier digits} - {MMYYYY}.txt`
pub fn file_name(header: &ReportHeader) -> String {
    let root: String = header.identifier.chars().take(8).collect();
    format!(
        "Resultado - {} - {}.txt",
        root,
        header.period_start.format("%m%Y")
    )
}

/// Render the header line and one line per record, newline-terminated
pub fn render(header: &ReportHeader, records: &[AggregatedRecord]) -> OutputDocument {
    let mut text = header_line(header);
    text.push('\n');
    for record in records {
        text.push_str(&record_line(record));
        text.push('\n');
    }

    OutputDocument {
        file_name: file_name(header),
        text,
    }
}

pub fn preview(records: &[AggregatedRecord]) -> Vec<PreviewRow> {
    records
        .iter()
        .map(|r| PreviewRow {
            code: r.code.clone(),
            value: format_value(r.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn header() -> ReportHeader {
        ReportHeader {
            identifier: "12345678000199".to_string(),
            period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        }
    }

    fn record(code: &str, value: f64) -> AggregatedRecord {
        AggregatedRecord {
            code: code.to_string(),
            value,
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1750.0), "1750,00");
        assert_eq!(format_value(-120.0), "-120,00");
        assert_eq!(format_value(0.01), "0,01");
        assert_eq!(format_value(1234567.891), "1234567,89");
        // 2.675 is stored as 2.67499999...
        assert_eq!(format_value(2.675), "2,67");
        assert_eq!(format_value(0.1 + 0.2), "0,30");
    }

    #[test]
    fn test_render() {
        let doc = render(&header(), &[record("010", 1750.0), record("020", -120.0)]);
        assert_eq!(
            doc.text,
            "12345678000199|01032024|31032024|\n010|1750,00|\n020|-120,00|\n"
        );
        assert_eq!(doc.file_name, "Resultado - 12345678 - 032024.txt");
        assert_eq!(doc.as_bytes().last(), Some(&b'\n'));
    }

    #[test]
    fn test_render_header_only() {
        let doc = render(&header(), &[]);
        assert_eq!(doc.text, "12345678000199|01032024|31032024|\n");
    }

    #[test]
    fn test_short_identifier_file_name() {
        let mut short = header();
        short.identifier = "123".to_string();
        assert_eq!(file_name(&short), "Resultado - 123 - 032024.txt");
    }

    #[test]
    fn test_preview() {
        let rows = preview(&[record("010", 1750.0)]);
        assert_eq!(
            rows,
            vec![PreviewRow {
                code: "010".to_string(),
                value: "1750,00".to_string()
            }]
        );
    }
}
