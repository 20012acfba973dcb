//! Course domain types: the raw row handed over by the spreadsheet reader and
//! the normalized [`CourseRecord`] built from it.

use chrono::{NaiveDate, NaiveDateTime};

use crate::course_type::CourseType;

/// Placeholder shown wherever an optional value is absent.
pub const PLACEHOLDER: &str = "—";

/// A single spreadsheet cell, reduced to the shapes the record builder cares
/// about. Produced by the tabular reader, independent of its cell type.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawCell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Returns `true` for empty cells and whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            RawCell::Number(_) | RawCell::DateTime(_) => false,
        }
    }

    /// Trimmed display text of the cell, empty for blank cells.
    ///
    /// Integral numbers print without a fractional part so that a course
    /// called `1904` does not become `1904.0`.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) => format_number(*n),
            RawCell::DateTime(dt) => dt.to_string(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One data row of the workbook, keyed by column role rather than position.
///
/// Optional columns that are absent from the sheet are carried as
/// [`RawCell::Empty`].
#[derive(Debug, Clone, Default)]
pub struct RawCourseRow {
    pub course: RawCell,
    pub address: RawCell,
    pub city: RawCell,
    pub course_type: RawCell,
    pub region: RawCell,
    pub lat: RawCell,
    pub lng: RawCell,
    pub order: RawCell,
    pub first_played: RawCell,
    pub reel: RawCell,
}

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// First-played value: either a resolved calendar date or the original text
/// when it could not be read as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FirstPlayed {
    Date(NaiveDate),
    Text(String),
}

impl FirstPlayed {
    /// Display form: `M/D/YYYY` for dates, verbatim otherwise.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            FirstPlayed::Date(date) => date.format("%-m/%-d/%Y").to_string(),
            FirstPlayed::Text(text) => text.clone(),
        }
    }
}

/// Manually assigned visit sequence number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum VisitOrder {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for VisitOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisitOrder::Number(n) => write!(f, "{n}"),
            VisitOrder::Text(s) => f.write_str(s),
        }
    }
}

/// Deep links into external map applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    pub apple: String,
    pub google: String,
}

/// Normalized representation of one valid spreadsheet row.
///
/// Fields are private and only set by [`crate::records::build_records`], so a
/// record cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub(crate) name: String,
    pub(crate) city: String,
    pub(crate) region: String,
    pub(crate) address: String,
    pub(crate) course_type: CourseType,
    pub(crate) coordinates: Coordinates,
    pub(crate) first_played: Option<FirstPlayed>,
    pub(crate) visit_order: Option<VisitOrder>,
    pub(crate) video_url: Option<String>,
    pub(crate) map_links: MapLinks,
}

impl CourseRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn course_type(&self) -> CourseType {
        self.course_type
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[must_use]
    pub fn first_played(&self) -> Option<&FirstPlayed> {
        self.first_played.as_ref()
    }

    #[must_use]
    pub fn visit_order(&self) -> Option<&VisitOrder> {
        self.visit_order.as_ref()
    }

    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    #[must_use]
    pub fn map_links(&self) -> &MapLinks {
        &self.map_links
    }

    /// True iff a first-played date was resolved.
    #[must_use]
    pub fn played(&self) -> bool {
        matches!(self.first_played, Some(FirstPlayed::Date(_)))
    }

    /// True iff a valid HTTP(S) video URL was resolved.
    #[must_use]
    pub fn has_video(&self) -> bool {
        self.video_url.is_some()
    }

    /// First-played display text, or the placeholder when absent.
    #[must_use]
    pub fn first_played_display(&self) -> String {
        self.first_played
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), FirstPlayed::display)
    }

    /// Visit order display text, or the placeholder when absent.
    #[must_use]
    pub fn visit_order_display(&self) -> String {
        self.visit_order
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), ToString::to_string)
    }
}
