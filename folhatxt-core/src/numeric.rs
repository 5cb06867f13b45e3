//! Locale-formatted number parsing
//!
//! Payroll exports mix raw floats (`1500`, `1234.5`) with pt-BR display text
//! (`1.234,56`, `(250,00)`). Both shapes go through [`normalize`].

/// Parse a cell's text as a signed number.
///
/// Returns `None` for anything that is not a number once cleaned up; callers
/// treat that as "skip this cell".
///
/// - `(X)` is negative
/// - with both `.` and `,`, `.` groups thousands and `,` is the decimal mark
/// - with only `,`, it is the decimal mark
/// - any other non-digit character is dropped
pub fn normalize(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut s: String = trimmed.chars().filter(|c| *c != ' ').collect();

    let negative = s.len() >= 2 && s.starts_with('(') && s.ends_with(')');
    if negative {
        s = s[1..s.len() - 1].to_string();
    }

    let s = if s.contains('.') && s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.replace(',', ".")
    };

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    // "1.2.3" and "." survive the cleanup and must not parse
    let value: f64 = cleaned.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Whether `value` falls inside `[min, max)` by magnitude
pub fn in_magnitude_range(value: f64, min: f64, max: f64) -> bool {
    let magnitude = value.abs();
    magnitude >= min && magnitude < max
}
