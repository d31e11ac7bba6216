use rust_decimal::Decimal;
use std::str::FromStr;

/// Tokens the report uses for "no value". Matched exactly, after cleaning.
pub const PLACEHOLDERS: &[&str] = &["", "\\", "-", "\\\\", "\\\\'", "ND", "N.A.", "N/A", "--"];

/// Clean a raw cell from the PDF table.
///
/// - absent stays absent
/// - surrounding whitespace is trimmed, then line breaks become spaces
/// - placeholder tokens ("-", "ND", "N/A", ...) become absent
pub fn clean_cell(raw: Option<&str>) -> Option<String> {
    let value = raw?.trim().replace('\n', " ");
    if PLACEHOLDERS.contains(&value.as_str()) {
        return None;
    }
    Some(value)
}

/// Clean a raw cell and parse it as a number.
///
/// Handles formats like:
/// - "12,3" -> 12.3 (Brazilian decimal comma)
/// - "12.3" -> 12.3
/// - "1,5e2" -> 150
/// - "ND", "abc" -> None (never an error)
pub fn clean_number(raw: Option<&str>) -> Option<Decimal> {
    let value = clean_cell(raw)?;
    parse_decimal(&value)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = s.replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_passthrough() {
        assert_eq!(clean_cell(None), None);
        assert_eq!(clean_number(None), None);
    }

    #[test]
    fn test_placeholders_become_absent() {
        for token in PLACEHOLDERS {
            assert_eq!(clean_cell(Some(token)), None, "{token:?}");
        }
        assert_eq!(clean_cell(Some("  ND ")), None);
        assert_eq!(clean_cell(Some("\n")), None);
    }

    #[test]
    fn test_placeholder_match_is_exact() {
        assert_eq!(clean_cell(Some("ND2")), Some("ND2".into()));
        assert_eq!(clean_cell(Some("E-H")), Some("E-H".into()));
        assert_eq!(clean_cell(Some("nd")), Some("nd".into()));
    }

    #[test]
    fn test_line_breaks_collapse() {
        assert_eq!(
            clean_cell(Some("  Utilitário Esportivo\nGrande 4x4 ")),
            Some("Utilitário Esportivo Grande 4x4".into())
        );
    }

    #[test]
    fn test_comma_and_point_agree() {
        assert_eq!(clean_number(Some("12,3")), Some(dec!(12.3)));
        assert_eq!(clean_number(Some("12.3")), Some(dec!(12.3)));
    }

    #[test]
    fn test_number_whitespace_trimming() {
        assert_eq!(clean_number(Some("  68 ")), Some(dec!(68)));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(clean_number(Some("1,5e2")), Some(dec!(150)));
    }

    #[test]
    fn test_unparsable_number_is_absent() {
        assert_eq!(clean_number(Some("abc")), None);
        assert_eq!(clean_number(Some("1.234,5")), None);
        assert_eq!(clean_number(Some("-")), None);
    }
}
