//! Record builder: turns raw spreadsheet rows into [`CourseRecord`]s.
//!
//! The coordinate check is the only rejection. Every other field degrades to
//! an empty value or placeholder rather than failing the row.

use std::collections::HashMap;

use crate::course::{Coordinates, CourseRecord, RawCell, RawCourseRow, VisitOrder};
use crate::course_type::normalize_course_type;
use crate::dates::parse_first_played;
use crate::map_links::{build_map_links, map_query};

/// Source of cell-level hyperlink targets, keyed by trimmed course name.
pub trait LinkLookup {
    fn link_for(&self, course_name: &str) -> Option<&str>;
}

impl LinkLookup for HashMap<String, String> {
    fn link_for(&self, course_name: &str) -> Option<&str> {
        self.get(course_name).map(String::as_str)
    }
}

/// Inputs to record construction that do not come from the row itself.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// State appended to the `name, city` map query when the address is blank.
    pub default_state: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            default_state: "CO".to_string(),
        }
    }
}

/// Counts reported after a build pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub input_rows: usize,
    pub records: usize,
    pub dropped_rows: usize,
    pub played: usize,
    pub with_video: usize,
}

/// Builds one [`CourseRecord`] per row with valid coordinates, preserving
/// input order.
pub fn build_records<L: LinkLookup + ?Sized>(
    rows: &[RawCourseRow],
    links: &L,
    options: &BuildOptions,
) -> (Vec<CourseRecord>, BuildSummary) {
    let mut summary = BuildSummary {
        input_rows: rows.len(),
        ..BuildSummary::default()
    };

    let records: Vec<CourseRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let record = build_record(row, links, options);
            if record.is_none() {
                tracing::debug!(
                    row = idx + 2,
                    course = %row.course.text(),
                    "dropping row without valid coordinates"
                );
            }
            record
        })
        .collect();

    summary.records = records.len();
    summary.dropped_rows = summary.input_rows - summary.records;
    summary.played = records.iter().filter(|r| r.played()).count();
    summary.with_video = records.iter().filter(|r| r.has_video()).count();

    tracing::info!(
        input_rows = summary.input_rows,
        records = summary.records,
        dropped = summary.dropped_rows,
        played = summary.played,
        with_video = summary.with_video,
        "built course records"
    );

    (records, summary)
}

/// Builds a single record, or `None` when the row lacks valid coordinates.
pub fn build_record<L: LinkLookup + ?Sized>(
    row: &RawCourseRow,
    links: &L,
    options: &BuildOptions,
) -> Option<CourseRecord> {
    let coordinates = parse_coordinates(&row.lat, &row.lng)?;

    let name = row.course.text();
    let city = row.city.text();
    let region = row.region.text();
    let address = row.address.text();

    let type_text = row.course_type.text();
    let course_type = normalize_course_type(Some(&type_text));

    let video_url = resolve_video_url(&name, &row.reel, links);
    let first_played = parse_first_played(&row.first_played);
    let visit_order = parse_visit_order(&row.order);

    let query = map_query(&address, &name, &city, &options.default_state);
    let map_links = build_map_links(&query);

    Some(CourseRecord {
        name,
        city,
        region,
        address,
        course_type,
        coordinates,
        first_played,
        visit_order,
        video_url,
        map_links,
    })
}

/// Returns validated coordinates, or `None` if either value is missing,
/// non-numeric, non-finite or out of range.
#[must_use]
pub fn parse_coordinates(lat: &RawCell, lng: &RawCell) -> Option<Coordinates> {
    let lat = parse_number(lat).filter(|v| (-90.0..=90.0).contains(v))?;
    let lng = parse_number(lng).filter(|v| (-180.0..=180.0).contains(v))?;
    Some(Coordinates { lat, lng })
}

fn parse_number(cell: &RawCell) -> Option<f64> {
    let value = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
        RawCell::Empty | RawCell::DateTime(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Coerces the order cell to an integer where possible. Fractional numbers
/// are truncated; non-numeric text passes through.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_visit_order(cell: &RawCell) -> Option<VisitOrder> {
    match cell {
        RawCell::Empty => None,
        RawCell::Number(n) if n.is_finite() => Some(VisitOrder::Number(n.trunc() as i64)),
        RawCell::Number(_) | RawCell::DateTime(_) => Some(VisitOrder::Text(cell.text())),
        RawCell::Text(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                return None;
            }
            if let Ok(n) = text.parse::<i64>() {
                return Some(VisitOrder::Number(n));
            }
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() && n.fract() == 0.0 => Some(VisitOrder::Number(n as i64)),
                _ => Some(VisitOrder::Text(text.to_string())),
            }
        }
    }
}

/// Resolves the video link: the cell hyperlink recovered for this course wins,
/// then a plain-text URL in the row's own cell. Non-HTTP candidates are
/// discarded.
fn resolve_video_url<L: LinkLookup + ?Sized>(
    name: &str,
    reel: &RawCell,
    links: &L,
) -> Option<String> {
    links
        .link_for(name)
        .map(str::trim)
        .filter(|url| is_http_url(url))
        .map(str::to_string)
        .or_else(|| {
            let text = reel.text();
            is_http_url(&text).then_some(text)
        })
}

/// Case-insensitive `http://` / `https://` prefix check.
#[must_use]
pub fn is_http_url(candidate: &str) -> bool {
    let lower = candidate.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
