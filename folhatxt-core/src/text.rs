//! Descriptive-text detection for candidate rows

/// Basic Latin letters plus the Latin-1 supplement block (`À`..=`ÿ`)
pub fn is_descriptive_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

/// True when at least one non-empty cell carries alphabetic text.
///
/// Rows made only of numbers are usually subtotals or calculation bases,
/// not payroll line items.
pub fn has_description<S: AsRef<str>>(cells: &[S]) -> bool {
    cells
        .iter()
        .map(|c| c.as_ref().trim())
        .filter(|c| !c.is_empty())
        .any(|c| c.chars().any(is_descriptive_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_with_text() {
        assert!(has_description(&["010 Salário", "", "1.500,00"]));
        assert!(has_description(&["", "Ç"]));
        assert!(has_description(&["020", "INSS"]));
    }

    #[test]
    fn test_numeric_rows() {
        assert!(!has_description(&["010", "1.500,00", "(12,00)"]));
        assert!(!has_description::<&str>(&[]));
        assert!(!has_description(&["  ", "30", "-", "%"]));
    }

    #[test]
    fn test_non_latin_letters_do_not_count() {
        assert!(!has_description(&["010", "Ωμέγα"]));
        assert!(is_descriptive_char('ã'));
        assert!(!is_descriptive_char('5'));
    }
}
