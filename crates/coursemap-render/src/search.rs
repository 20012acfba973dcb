//! GeoJSON search index backing the course-name search control.

use coursemap_core::CourseRecord;
use serde::Serialize;

/// A GeoJSON `FeatureCollection` of course points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchIndex {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<SearchFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub properties: SearchProperties,
    pub geometry: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchProperties {
    #[serde(rename = "Course")]
    pub course: String,
}

/// GeoJSON point; coordinates are `[lng, lat]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: [f64; 2],
}

/// One point per record, in record order.
#[must_use]
pub fn search_index(records: &[CourseRecord]) -> SearchIndex {
    SearchIndex {
        kind: "FeatureCollection",
        features: records
            .iter()
            .map(|record| {
                let at = record.coordinates();
                SearchFeature {
                    kind: "Feature",
                    properties: SearchProperties {
                        course: record.name().to_string(),
                    },
                    geometry: Point {
                        kind: "Point",
                        coordinates: [at.lng, at.lat],
                    },
                }
            })
            .collect(),
    }
}
