use std::collections::HashMap;

use chrono::NaiveDate;

use super::*;
use crate::course::FirstPlayed;
use crate::course_type::CourseType;

fn text(s: &str) -> RawCell {
    RawCell::Text(s.to_string())
}

fn base_row(course: &str) -> RawCourseRow {
    RawCourseRow {
        course: text(course),
        address: text("1 Fairway Dr, Denver, CO"),
        city: text("Denver"),
        course_type: text("Public"),
        region: text("Front Range"),
        lat: RawCell::Number(39.7),
        lng: RawCell::Number(-104.9),
        ..RawCourseRow::default()
    }
}

fn no_links() -> HashMap<String, String> {
    HashMap::new()
}

// -----------------------------------------------------------------------
// build_records
// -----------------------------------------------------------------------

#[test]
fn pinehurst_scenario_row_is_kept_and_normalized() {
    let row = RawCourseRow {
        course: text("Pinehurst CO"),
        course_type: text("semi private"),
        lat: text("39.5"),
        lng: text("-104.9"),
        order: text("3"),
        ..RawCourseRow::default()
    };
    let (records, summary) = build_records(&[row], &no_links(), &BuildOptions::default());

    assert_eq!(summary.records, 1);
    let record = &records[0];
    assert_eq!(record.name(), "Pinehurst CO");
    assert_eq!(record.course_type(), CourseType::SemiPrivate);
    assert_eq!(record.visit_order(), Some(&VisitOrder::Number(3)));
    assert!(!record.played());
    assert!(!record.has_video());
}

#[test]
fn bad_coordinates_drop_the_row() {
    let bad = RawCourseRow {
        course: text("Bad Course"),
        lat: text("not a number"),
        lng: text("-104.9"),
        ..RawCourseRow::default()
    };
    let rows = vec![base_row("Good"), bad, base_row("Also Good")];
    let (records, summary) = build_records(&rows, &no_links(), &BuildOptions::default());

    assert_eq!(summary.input_rows, 3);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.dropped_rows, 1);
    let names: Vec<_> = records.iter().map(CourseRecord::name).collect();
    assert_eq!(names, vec!["Good", "Also Good"]);
}

#[test]
fn missing_and_out_of_range_coordinates_are_rejected() {
    assert!(parse_coordinates(&RawCell::Empty, &RawCell::Number(-104.9)).is_none());
    assert!(parse_coordinates(&RawCell::Number(91.0), &RawCell::Number(0.0)).is_none());
    assert!(parse_coordinates(&RawCell::Number(0.0), &RawCell::Number(-181.0)).is_none());
    assert!(parse_coordinates(&RawCell::Number(f64::NAN), &RawCell::Number(0.0)).is_none());
    assert_eq!(
        parse_coordinates(&text(" 39.5 "), &text("-104.9")),
        Some(Coordinates {
            lat: 39.5,
            lng: -104.9
        })
    );
}

#[test]
fn text_fields_are_trimmed() {
    let mut row = base_row("  Arrowhead  ");
    row.city = text(" Littleton ");
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert_eq!(record.name(), "Arrowhead");
    assert_eq!(record.city(), "Littleton");
}

// -----------------------------------------------------------------------
// video url resolution
// -----------------------------------------------------------------------

#[test]
fn hyperlink_index_wins_over_cell_text() {
    let mut row = base_row("Arrowhead");
    row.reel = text("https://example.com/plain");
    let mut links = HashMap::new();
    links.insert(
        "Arrowhead".to_string(),
        "https://www.instagram.com/reel/abc".to_string(),
    );

    let record = build_record(&row, &links, &BuildOptions::default()).unwrap();
    assert_eq!(record.video_url(), Some("https://www.instagram.com/reel/abc"));
    assert!(record.has_video());
}

#[test]
fn plain_text_url_is_the_fallback() {
    let mut row = base_row("Arrowhead");
    row.reel = text("  HTTPS://example.com/reel ");
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert_eq!(record.video_url(), Some("HTTPS://example.com/reel"));
}

#[test]
fn non_http_values_are_not_videos() {
    let mut row = base_row("Arrowhead");
    row.reel = text("Watch");
    let mut links = HashMap::new();
    links.insert("Arrowhead".to_string(), "mailto:cam@example.com".to_string());

    let record = build_record(&row, &links, &BuildOptions::default()).unwrap();
    assert_eq!(record.video_url(), None);
    assert!(!record.has_video());
}

#[test]
fn has_video_iff_http_url() {
    for (reel, expected) in [
        ("", false),
        ("ftp://x", false),
        ("http://x", true),
        ("https://x", true),
    ] {
        let mut row = base_row("C");
        row.reel = text(reel);
        let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
        assert_eq!(record.has_video(), expected, "reel: {reel:?}");
        assert_eq!(
            record.video_url().is_some_and(is_http_url),
            expected,
            "reel: {reel:?}"
        );
    }
}

// -----------------------------------------------------------------------
// dates, order, links
// -----------------------------------------------------------------------

#[test]
fn played_requires_a_resolved_date() {
    let mut row = base_row("C");
    row.first_played = text("7/4/2023");
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert!(record.played());
    assert_eq!(
        record.first_played(),
        Some(&FirstPlayed::Date(NaiveDate::from_ymd_opt(2023, 7, 4).unwrap()))
    );
    assert_eq!(record.first_played_display(), "7/4/2023");

    row.first_played = text("sometime in spring");
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert!(!record.played());
    assert_eq!(record.first_played_display(), "sometime in spring");

    row.first_played = RawCell::Empty;
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert_eq!(record.first_played_display(), "—");
}

#[test]
fn visit_order_coercion() {
    assert_eq!(parse_visit_order(&RawCell::Empty), None);
    assert_eq!(parse_visit_order(&text("  ")), None);
    assert_eq!(
        parse_visit_order(&RawCell::Number(12.0)),
        Some(VisitOrder::Number(12))
    );
    assert_eq!(
        parse_visit_order(&RawCell::Number(7.9)),
        Some(VisitOrder::Number(7))
    );
    assert_eq!(parse_visit_order(&text("4.0")), Some(VisitOrder::Number(4)));
    assert_eq!(
        parse_visit_order(&text("TBD")),
        Some(VisitOrder::Text("TBD".into()))
    );
}

#[test]
fn blank_address_uses_name_city_state_for_links() {
    let mut row = base_row("Arrowhead");
    row.address = RawCell::Empty;
    row.city = text("Littleton");
    let options = BuildOptions {
        default_state: "CO".into(),
    };
    let record = build_record(&row, &no_links(), &options).unwrap();
    assert_eq!(
        record.map_links().apple,
        "https://maps.apple.com/?q=Arrowhead%2C%20Littleton%2C%20CO"
    );
}

#[test]
fn unknown_type_goes_to_other_bucket() {
    let mut row = base_row("C");
    row.course_type = text("Links-style???");
    let record = build_record(&row, &no_links(), &BuildOptions::default()).unwrap();
    assert_eq!(record.course_type(), CourseType::Other);
}
