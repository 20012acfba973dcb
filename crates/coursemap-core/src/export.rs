//! JSON export of built course records.

use serde::Serialize;

use crate::course::{CourseRecord, VisitOrder};
use crate::course_type::CourseType;

/// One exported course, in the shape downstream tooling consumes.
#[derive(Debug, Serialize)]
pub struct CourseExport<'a> {
    pub name: &'a str,
    pub city: &'a str,
    pub region: &'a str,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub address: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub played: bool,
    pub first_played: String,
    pub order: Option<&'a VisitOrder>,
    /// Empty string when the course has no video.
    pub video_url: &'a str,
    pub has_video: bool,
    pub apple_maps: &'a str,
    pub google_maps: &'a str,
}

impl<'a> From<&'a CourseRecord> for CourseExport<'a> {
    fn from(record: &'a CourseRecord) -> Self {
        let coordinates = record.coordinates();
        Self {
            name: record.name(),
            city: record.city(),
            region: record.region(),
            course_type: record.course_type(),
            address: record.address(),
            lat: coordinates.lat,
            lng: coordinates.lng,
            played: record.played(),
            first_played: record.first_played_display(),
            order: record.visit_order(),
            video_url: record.video_url().unwrap_or_default(),
            has_video: record.has_video(),
            apple_maps: &record.map_links().apple,
            google_maps: &record.map_links().google,
        }
    }
}

/// Serializes records as a pretty-printed JSON array, preserving order.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn export_json(records: &[CourseRecord]) -> Result<String, serde_json::Error> {
    let rows: Vec<CourseExport<'_>> = records.iter().map(CourseExport::from).collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::course::{RawCell, RawCourseRow};
    use crate::records::{build_records, BuildOptions};

    fn row(course: &str, lat: &str, reel: &str, order: RawCell) -> RawCourseRow {
        RawCourseRow {
            course: RawCell::Text(course.into()),
            course_type: RawCell::Text("resort".into()),
            lat: RawCell::Text(lat.into()),
            lng: RawCell::Text("-105.0".into()),
            reel: RawCell::Text(reel.into()),
            order,
            ..RawCourseRow::default()
        }
    }

    fn export(rows: &[RawCourseRow]) -> Vec<serde_json::Value> {
        let links: HashMap<String, String> = HashMap::new();
        let (records, _) = build_records(rows, &links, &BuildOptions::default());
        let json = export_json(&records).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn export_preserves_order_and_skips_invalid_rows() {
        let rows = vec![
            row("First", "39.1", "", RawCell::Empty),
            row("Broken", "north", "", RawCell::Empty),
            row("Second", "39.2", "", RawCell::Empty),
        ];
        let exported = export(&rows);
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0]["name"], "First");
        assert_eq!(exported[1]["name"], "Second");
    }

    #[test]
    fn export_field_shapes() {
        let rows = vec![row(
            "Resort Links",
            "39.1",
            "https://example.com/r",
            RawCell::Number(3.0),
        )];
        let exported = export(&rows);
        let obj = &exported[0];
        assert_eq!(obj["type"], "Resort");
        assert_eq!(obj["lat"], 39.1);
        assert_eq!(obj["lng"], -105.0);
        assert_eq!(obj["order"], 3);
        assert_eq!(obj["first_played"], "—");
        assert_eq!(obj["played"], false);
        assert_eq!(obj["video_url"], "https://example.com/r");
        assert_eq!(obj["has_video"], true);
        assert!(obj["google_maps"]
            .as_str()
            .unwrap()
            .starts_with("https://www.google.com/maps/search/"));
    }

    #[test]
    fn export_has_video_matches_video_url() {
        let rows = vec![
            row("A", "39.1", "", RawCell::Empty),
            row("B", "39.1", "https://x.test/v", RawCell::Text("TBD".into())),
        ];
        for obj in export(&rows) {
            let url = obj["video_url"].as_str().unwrap();
            let expected = url.starts_with("http://") || url.starts_with("https://");
            assert_eq!(obj["has_video"], expected);
        }
    }

    #[test]
    fn missing_order_serializes_as_null() {
        let exported = export(&[row("A", "39.1", "", RawCell::Empty)]);
        assert!(exported[0]["order"].is_null());
    }
}
