//! First-played date resolution.

use chrono::{NaiveDate, NaiveDateTime};

use crate::course::{FirstPlayed, RawCell};

/// Date-only layouts tried in order. Two-digit years come before four-digit
/// ones: chrono's `%Y` would otherwise accept `24` as the year 24 AD.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Resolves a first-played cell.
///
/// Spreadsheet date cells and parseable text become [`FirstPlayed::Date`];
/// anything else that is not blank is kept verbatim as
/// [`FirstPlayed::Text`]. Blank cells yield `None`.
#[must_use]
pub fn parse_first_played(cell: &RawCell) -> Option<FirstPlayed> {
    match cell {
        RawCell::Empty => None,
        RawCell::DateTime(dt) => Some(FirstPlayed::Date(dt.date())),
        RawCell::Number(_) => Some(FirstPlayed::Text(cell.text())),
        RawCell::Text(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                return None;
            }
            Some(parse_date_text(text).map_or_else(
                || FirstPlayed::Text(text.to_string()),
                FirstPlayed::Date,
            ))
        }
    }
}

/// Parses free-form date text using the accepted layouts.
#[must_use]
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn blank_cells_are_unset() {
        assert_eq!(parse_first_played(&RawCell::Empty), None);
        assert_eq!(parse_first_played(&RawCell::Text("  ".into())), None);
    }

    #[test]
    fn spreadsheet_dates_are_resolved() {
        let dt = ymd(2023, 7, 14).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            parse_first_played(&RawCell::DateTime(dt)),
            Some(FirstPlayed::Date(ymd(2023, 7, 14)))
        );
    }

    #[test]
    fn us_style_text_dates_parse() {
        assert_eq!(parse_date_text("6/3/2024"), Some(ymd(2024, 6, 3)));
        assert_eq!(parse_date_text("06/03/24"), Some(ymd(2024, 6, 3)));
        assert_eq!(parse_date_text("6-3-2024"), Some(ymd(2024, 6, 3)));
    }

    #[test]
    fn iso_and_long_form_dates_parse() {
        assert_eq!(parse_date_text("2024-06-03"), Some(ymd(2024, 6, 3)));
        assert_eq!(
            parse_date_text("2024-06-03 00:00:00"),
            Some(ymd(2024, 6, 3))
        );
        assert_eq!(
            parse_date_text("2024-06-03T09:30:00"),
            Some(ymd(2024, 6, 3))
        );
        assert_eq!(parse_date_text("June 3, 2024"), Some(ymd(2024, 6, 3)));
        assert_eq!(parse_date_text("3 Jun 2024"), Some(ymd(2024, 6, 3)));
    }

    #[test]
    fn unparseable_text_is_preserved() {
        assert_eq!(
            parse_first_played(&RawCell::Text(" Summer 2023 ".into())),
            Some(FirstPlayed::Text("Summer 2023".into()))
        );
    }

    #[test]
    fn bare_numbers_are_preserved_as_text() {
        assert_eq!(
            parse_first_played(&RawCell::Number(2023.0)),
            Some(FirstPlayed::Text("2023".into()))
        );
    }
}
