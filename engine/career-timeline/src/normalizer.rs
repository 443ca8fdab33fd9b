//! Record normalization
//!
//! Reduces raw date literals to years and builds the display range shown
//! on the career card. Nothing here fails: unparsable input becomes
//! [`Year::Absent`] or `None`.

use crate::types::{NormalizedStint, RawStint, Year};

/// Separator used in display ranges (en dash)
pub const RANGE_SEPARATOR: char = '–';

/// Extract the leading four-digit year from an ISO-like date literal.
///
/// A single leading `+` is tolerated. Calendar validity is not checked, so
/// "2003-99-99" still yields 2003. Year zero counts as absent.
pub fn parse_year(value: &str) -> Year {
    let digits = value.trim_start();
    let digits = digits.strip_prefix('+').unwrap_or(digits);

    match digits.get(..4) {
        Some(head) if head.bytes().all(|b| b.is_ascii_digit()) => {
            match head.parse() {
                Ok(0) | Err(_) => Year::Absent,
                Ok(year) => Year::Known(year),
            }
        }
        _ => Year::Absent,
    }
}

/// [`parse_year`] over an optional literal
pub fn extract_year(value: Option<&str>) -> Year {
    value.map_or(Year::Absent, parse_year)
}

/// Parse a non-negative count such as appearances or goals.
///
/// Some sources emit decimals ("12.0"); those are accepted when integral.
pub fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(count) = value.parse::<u32>() {
        return Some(count);
    }

    match value.parse::<f64>() {
        Ok(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Some(n as u32),
        _ => None,
    }
}

/// Build the display range for a pair of years.
///
/// Both years give "start–end", a start alone gives "start–", anything
/// else (including an end without a start) gives an empty string.
pub fn normalize_years(start: Option<i32>, end: Option<i32>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{start}{RANGE_SEPARATOR}{end}"),
        (Some(start), None) => format!("{start}{RANGE_SEPARATOR}"),
        _ => String::new(),
    }
}

/// Normalize one raw stint
pub fn normalize(raw: &RawStint) -> NormalizedStint {
    let start = extract_year(raw.start_date.as_deref());
    let end = extract_year(raw.end_date.as_deref());

    NormalizedStint {
        club_name: raw.club_name.clone(),
        start,
        end,
        years: normalize_years(start.known(), end.known()),
        appearances: raw.appearances,
        goals: raw.goals,
    }
}

/// Normalize every stint, preserving input order
pub fn normalize_all(raw: &[RawStint]) -> Vec<NormalizedStint> {
    raw.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_years_ranges() {
        assert_eq!(normalize_years(Some(2010), Some(2015)), "2010–2015");
        assert_eq!(normalize_years(Some(2010), None), "2010–");
        assert_eq!(normalize_years(None, None), "");
        assert_eq!(normalize_years(None, Some(2015)), "");
    }

    #[test]
    fn test_normalize_years_tolerates_reversed_range() {
        assert_eq!(normalize_years(Some(2015), Some(2010)), "2015–2010");
    }

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year("2003-07-01T00:00:00Z"), Year::Known(2003));
        assert_eq!(parse_year("+1998-01-01T00:00:00Z"), Year::Known(1998));
        assert_eq!(parse_year("2003"), Year::Known(2003));
        // no calendar validation
        assert_eq!(parse_year("2003-99-99"), Year::Known(2003));
        assert_eq!(parse_year("203"), Year::Absent);
        assert_eq!(parse_year("July 2003"), Year::Absent);
        assert_eq!(parse_year(""), Year::Absent);
        assert_eq!(parse_year("-0500-01-01"), Year::Absent);
    }

    #[test]
    fn test_year_zero_is_absent() {
        assert_eq!(parse_year("0000-01-01T00:00:00Z"), Year::Absent);
        assert_eq!(parse_year("+0000"), Year::Absent);
        assert_eq!(parse_year("0999-01-01"), Year::Known(999));

        let raw = RawStint::new("Club").with_dates(Some("0000-01-01"), Some("0000-06-30"));
        let stint = normalize(&raw);
        assert_eq!(stint.years, "");
        assert_eq!(stint.end.or(9999), 9999);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("123"), Some(123));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("n/a"), None);
    }

    #[test]
    fn test_normalize_stint() {
        let raw = RawStint::new("Sporting CP")
            .with_dates(Some("2002-08-01T00:00:00Z"), None)
            .with_stats(Some(25), Some(3));

        let stint = normalize(&raw);
        assert_eq!(stint.club_name, "Sporting CP");
        assert_eq!(stint.start, Year::Known(2002));
        assert_eq!(stint.end, Year::Absent);
        assert_eq!(stint.years, "2002–");
        assert_eq!(stint.appearances, Some(25));
        assert_eq!(stint.goals, Some(3));
    }

    #[test]
    fn test_normalize_unparsable_dates_degrade_to_absent() {
        let raw = RawStint::new("Club").with_dates(Some("unknown"), Some("t1"));
        let stint = normalize(&raw);
        assert_eq!(stint.start, Year::Absent);
        assert_eq!(stint.end, Year::Absent);
        assert!(stint.years.is_empty());
    }
}
