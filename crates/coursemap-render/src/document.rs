//! The complete map document.

use coursemap_core::{AppConfig, Coordinates, CourseRecord, CourseType, MapTheme};
use serde::Serialize;

use crate::error::RenderError;
use crate::filter::{render_filter_panel, render_filter_script, FilterLabels, MarkerMeta};
use crate::html::{escape, script_json};
use crate::popup::render_popup;
use crate::search::search_index;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const SEARCH_CSS: &str = "https://unpkg.com/leaflet-search@4.0.0/dist/leaflet-search.min.css";
const SEARCH_JS: &str = "https://unpkg.com/leaflet-search@4.0.0/dist/leaflet-search.min.js";

/// Document-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub center: Coordinates,
    pub zoom: u8,
    /// Heading of the journey panel inside each popup.
    pub journey_title: String,
    pub filter_labels: FilterLabels,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Golf Course Map".to_string(),
            center: Coordinates {
                lat: 39.0,
                lng: -105.55,
            },
            zoom: 7,
            journey_title: "Every Course Journey".to_string(),
            filter_labels: FilterLabels::default(),
        }
    }
}

impl From<&AppConfig> for RenderOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            title: config.title.clone(),
            center: Coordinates {
                lat: config.center_lat,
                lng: config.center_lng,
            },
            zoom: config.zoom,
            journey_title: config.journey_title.clone(),
            filter_labels: FilterLabels::default(),
        }
    }
}

#[derive(Serialize)]
struct MapSetup {
    center: [f64; 2],
    zoom: u8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerStyle {
    color: &'static str,
    fill_color: &'static str,
    radius: u32,
    weight: u32,
    fill_opacity: f64,
}

#[derive(Serialize)]
struct LayerEntry {
    id: String,
    label: &'static str,
    style: LayerStyle,
}

#[derive(Serialize)]
struct MarkerEntry {
    id: String,
    layer: &'static str,
    name: String,
    lat: f64,
    lng: f64,
    popup: String,
}

const STYLE: &str = r"
html, body { height: 100%; margin: 0; }
#map { position: absolute; inset: 0; }
.cm-popup { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; }
.cm-name { font-weight: 900; font-size: 20px; line-height: 1.1; margin-bottom: 4px; }
.cm-sub { font-size: 14px; opacity: 0.75; margin-bottom: 10px; }
.cm-row { display: flex; align-items: center; gap: 10px; margin-bottom: 8px; }
.cm-label { width: 70px; opacity: 0.55; }
.cm-badge { display: inline-flex; align-items: center; gap: 8px; padding: 6px 10px; border-radius: 999px; background: rgba(0,0,0,0.04); font-weight: 800; }
.cm-swatch { width: 10px; height: 10px; border-radius: 3px; display: inline-block; }
.cm-address { flex: 1; font-weight: 650; }
.cm-links { display: flex; gap: 10px; margin: 10px 0 6px; }
.cm-button, .cm-video { display: block; flex: 1; padding: 9px 10px; border-radius: 12px; border: 1px solid rgba(0,0,0,0.18); text-align: center; font-weight: 800; color: #0b6aa2; background: white; text-decoration: none; }
.cm-video--none { color: rgba(0,0,0,0.45); background: rgba(0,0,0,0.03); border-color: rgba(0,0,0,0.12); }
.cm-video--unplayed { color: rgba(0,0,0,0.35); background: rgba(0,0,0,0.02); border-color: rgba(0,0,0,0.12); }
.cm-divider { height: 1px; background: rgba(0,0,0,0.12); margin: 12px 0; }
.cm-journey-title { font-weight: 900; font-size: 18px; margin-bottom: 8px; }
.cm-journey { display: grid; grid-template-columns: 1fr 1fr; gap: 10px; }
.cm-stat { border: 1px solid rgba(0,0,0,0.12); border-radius: 14px; padding: 10px 12px; }
.cm-stat--stack { display: flex; flex-direction: column; gap: 8px; }
.cm-stat-label { font-weight: 800; opacity: 0.6; margin-bottom: 6px; }
.cm-stat-value { font-weight: 900; font-size: 20px; line-height: 1.1; }
.cm-stat-value--small { font-size: 18px; }
.cm-filters { position: fixed; bottom: 24px; right: 18px; z-index: 9998; width: 230px; padding: 12px 14px; background: rgba(255,255,255,0.92); border: 1px solid rgba(0,0,0,0.2); border-radius: 12px; box-shadow: 0 6px 20px rgba(0,0,0,0.12); font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; font-size: 13px; }
.cm-filters-title { font-weight: 900; font-size: 14px; margin-bottom: 8px; }
.cm-toggle { display: flex; align-items: center; gap: 10px; margin: 7px 0; cursor: pointer; }
.cm-toggle-strong { font-weight: 800; }
.cm-filter-swatch { width: 14px; height: 14px; display: inline-block; border: 1px solid rgba(0,0,0,0.25); }
.cm-filter-buttons { display: flex; gap: 10px; margin-top: 10px; }
.cm-filter-buttons button { flex: 1; padding: 8px 10px; border-radius: 10px; border: 1px solid rgba(0,0,0,0.2); background: white; cursor: pointer; }
.leaflet-control-search { z-index: 9999 !important; box-shadow: 0 6px 20px rgba(0,0,0,0.12) !important; border-radius: 12px !important; background: rgba(255,255,255,0.92) !important; border: 1px solid rgba(0,0,0,0.18) !important; }
.leaflet-control-search .search-input { width: 230px !important; border-radius: 12px !important; }
";

const MAP_SCRIPT: &str = r#"
(function () {
  const map = L.map("map").setView(MAP_SETUP.center, MAP_SETUP.zoom);
  L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors",
  }).addTo(map);

  const layers = {};
  const styles = {};
  COURSE_LAYERS.forEach(layer => {
    const group = L.featureGroup();
    group.layerId = layer.id;
    group.addTo(map);
    layers[layer.label] = group;
    styles[layer.label] = layer.style;
  });

  const markers = {};
  const byName = {};
  COURSES.forEach(course => {
    const style = Object.assign({ fill: true }, styles[course.layer]);
    const marker = L.circleMarker([course.lat, course.lng], style)
      .bindPopup(course.popup, { maxWidth: 520 });
    marker.markerId = course.id;
    layers[course.layer].addLayer(marker);
    markers[course.id] = marker;
    if (!(course.name in byName)) byName[course.name] = marker;
  });

  const searchLayer = L.geoJSON(SEARCH_INDEX, {
    pointToLayer: (feature, latlng) =>
      L.circleMarker(latlng, { radius: 0, opacity: 0, fillOpacity: 0, interactive: false }),
  });
  const search = new L.Control.Search({
    layer: searchLayer,
    propertyName: "Course",
    textPlaceholder: "Search a course name…",
    collapsed: false,
    position: "topright",
    marker: false,
    initial: false,
  });
  search.on("search:locationfound", e => {
    const marker = byName[e.layer.feature.properties.Course];
    if (!marker) return;
    if (map.hasLayer(marker)) {
      marker.openPopup();
    } else {
      L.popup({ maxWidth: 520 })
        .setLatLng(marker.getLatLng())
        .setContent(marker.getPopup().getContent())
        .openOn(map);
    }
  });
  map.addControl(search);

  window.courseMap = map;
  window.courseLayers = layers;
  window.courseMarkers = markers;
})();
"#;

/// Renders the full standalone HTML document.
///
/// Every category gets a layer, even with no courses in it, so the filter
/// panel always lines up with the map. Output is deterministic.
///
/// # Errors
///
/// Returns [`RenderError::Serialize`] if an embedded data table cannot be
/// serialized.
pub fn render_document(
    records: &[CourseRecord],
    options: &RenderOptions,
    theme: &MapTheme,
) -> Result<String, RenderError> {
    let setup = MapSetup {
        center: [options.center.lat, options.center.lng],
        zoom: options.zoom,
    };
    let layers: Vec<LayerEntry> = CourseType::ALL
        .into_iter()
        .map(|course_type| {
            let paint = theme.marker_for(course_type);
            LayerEntry {
                id: format!("layer-{}", course_type.slug()),
                label: course_type.label(),
                style: LayerStyle {
                    color: paint.color,
                    fill_color: paint.color,
                    radius: paint.radius,
                    weight: paint.weight,
                    fill_opacity: paint.fill_opacity,
                },
            }
        })
        .collect();
    let markers: Vec<MarkerEntry> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let at = record.coordinates();
            MarkerEntry {
                id: format!("course-{idx}"),
                layer: record.course_type().label(),
                name: record.name().to_string(),
                lat: at.lat,
                lng: at.lng,
                popup: render_popup(record, theme, &options.journey_title),
            }
        })
        .collect();

    let setup_json = script_json(&setup).map_err(RenderError::serialize("map setup"))?;
    let layers_json = script_json(&layers).map_err(RenderError::serialize("layers"))?;
    let markers_json = script_json(&markers).map_err(RenderError::serialize("courses"))?;
    let search_json =
        script_json(&search_index(records)).map_err(RenderError::serialize("search index"))?;
    let filter_script = render_filter_script(&MarkerMeta::for_records(records))?;
    let filter_panel = render_filter_panel(theme, &options.filter_labels);

    tracing::debug!(
        markers = markers.len(),
        layers = layers.len(),
        "rendering map document"
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="{LEAFLET_CSS}">
<link rel="stylesheet" href="{SEARCH_CSS}">
<style>{STYLE}</style>
</head>
<body>
<div id="map"></div>
{filter_panel}
<script src="{LEAFLET_JS}"></script>
<script src="{SEARCH_JS}"></script>
<script>
const MAP_SETUP = {setup_json};
const COURSE_LAYERS = {layers_json};
const COURSES = {markers_json};
const SEARCH_INDEX = {search_json};
{MAP_SCRIPT}</script>
<script>
{filter_script}</script>
</body>
</html>
"#,
        title = escape(&options.title),
    ))
}
