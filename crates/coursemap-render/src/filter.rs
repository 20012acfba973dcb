//! Client filter controller.
//!
//! [`FilterState`] is the reference model of the viewer-side filters. The
//! script produced by [`render_filter_script`] implements the same rules in
//! the browser, recomputing the full visible set on every change.

use std::collections::BTreeSet;

use coursemap_core::{CourseRecord, CourseType, MapTheme};
use serde::Serialize;

use crate::error::RenderError;
use crate::html::{escape, script_json};

/// Per-marker facts the filters look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMeta {
    pub index: usize,
    pub course_type: CourseType,
    pub played: bool,
    pub has_video: bool,
}

impl MarkerMeta {
    #[must_use]
    pub fn from_record(index: usize, record: &CourseRecord) -> Self {
        Self {
            index,
            course_type: record.course_type(),
            played: record.played(),
            has_video: record.has_video(),
        }
    }

    /// Metadata for every record, indexed by position.
    #[must_use]
    pub fn for_records(records: &[CourseRecord]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| Self::from_record(idx, record))
            .collect()
    }

    /// DOM/JS identifier of the marker.
    #[must_use]
    pub fn marker_id(&self) -> String {
        format!("course-{}", self.index)
    }
}

/// Checked categories plus the two narrowing toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    categories: BTreeSet<CourseType>,
    played_only: bool,
    video_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterState {
    /// Initial state: every category checked, both toggles off.
    #[must_use]
    pub fn all() -> Self {
        Self {
            categories: CourseType::ALL.into_iter().collect(),
            played_only: false,
            video_only: false,
        }
    }

    pub fn toggle_category(&mut self, course_type: CourseType) {
        if !self.categories.remove(&course_type) {
            self.categories.insert(course_type);
        }
    }

    pub fn select_all(&mut self) {
        self.categories.extend(CourseType::ALL);
    }

    pub fn select_none(&mut self) {
        self.categories.clear();
    }

    pub fn set_played_only(&mut self, on: bool) {
        self.played_only = on;
    }

    pub fn set_video_only(&mut self, on: bool) {
        self.video_only = on;
    }

    #[must_use]
    pub fn played_only(&self) -> bool {
        self.played_only
    }

    #[must_use]
    pub fn video_only(&self) -> bool {
        self.video_only
    }

    #[must_use]
    pub fn is_layer_visible(&self, course_type: CourseType) -> bool {
        self.categories.contains(&course_type)
    }

    #[must_use]
    pub fn is_marker_visible(&self, meta: &MarkerMeta) -> bool {
        self.is_layer_visible(meta.course_type)
            && (!self.played_only || meta.played)
            && (!self.video_only || meta.has_video)
    }

    /// Indices of the visible markers, in input order.
    #[must_use]
    pub fn visible_markers(&self, metas: &[MarkerMeta]) -> Vec<usize> {
        metas
            .iter()
            .filter(|meta| self.is_marker_visible(meta))
            .map(|meta| meta.index)
            .collect()
    }
}

/// Visible text of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLabels {
    pub heading: String,
    pub played_only: String,
    pub video_only: String,
    pub all: String,
    pub none: String,
}

impl Default for FilterLabels {
    fn default() -> Self {
        Self {
            heading: "Course Filters".to_string(),
            played_only: "Played".to_string(),
            video_only: "Has video review".to_string(),
            all: "All".to_string(),
            none: "None".to_string(),
        }
    }
}

/// Filter panel markup: the played/video toggles, one checkbox per category
/// and the All/None buttons. Every category starts checked.
#[must_use]
pub fn render_filter_panel(theme: &MapTheme, labels: &FilterLabels) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(r#"<div class="cm-filters" id="courseFilters">"#);
    out.push_str(&format!(
        r#"<div class="cm-filters-title">{}</div>"#,
        escape(&labels.heading)
    ));

    out.push_str(r#"<div class="cm-filters-flags">"#);
    out.push_str(&format!(
        r#"<label class="cm-toggle"><input id="playedOnly" type="checkbox"><span class="cm-toggle-strong">{}</span></label>"#,
        escape(&labels.played_only)
    ));
    out.push_str(&format!(
        r#"<label class="cm-toggle"><input id="videoOnly" type="checkbox"><span class="cm-toggle-strong">{}</span></label>"#,
        escape(&labels.video_only)
    ));
    out.push_str(r#"</div><div class="cm-divider"></div>"#);

    for (course_type, color) in theme.entries() {
        let label = escape(course_type.label());
        out.push_str(&format!(
            concat!(
                r#"<label class="cm-toggle">"#,
                r#"<input type="checkbox" class="type-toggle" data-layer="{label}" checked>"#,
                r#"<span class="cm-filter-swatch" style="background:{color}"></span>"#,
                "<span>{label}</span></label>"
            ),
            label = label,
            color = escape(color),
        ));
    }

    out.push_str(&format!(
        concat!(
            r#"<div class="cm-filter-buttons">"#,
            r#"<button type="button" id="filterAll">{}</button>"#,
            r#"<button type="button" id="filterNone">{}</button>"#,
            "</div></div>"
        ),
        escape(&labels.all),
        escape(&labels.none)
    ));
    out
}

#[derive(Serialize)]
struct ScriptMarker {
    id: String,
    #[serde(rename = "type")]
    course_type: &'static str,
    played: bool,
    video: bool,
}

const FILTER_SCRIPT: &str = r#"
(function () {
  const map = window.courseMap;
  const layers = window.courseLayers || {};
  const markers = window.courseMarkers || {};
  if (!map) {
    console.warn("course map not initialised; filters disabled");
    return;
  }

  function readState() {
    const categories = {};
    document.querySelectorAll(".type-toggle").forEach(cb => {
      categories[cb.dataset.layer] = cb.checked;
    });
    return {
      categories: categories,
      playedOnly: !!document.getElementById("playedOnly")?.checked,
      videoOnly: !!document.getElementById("videoOnly")?.checked,
    };
  }

  function isMarkerVisible(state, meta) {
    return !!state.categories[meta.type]
      && (!state.playedOnly || meta.played)
      && (!state.videoOnly || meta.video);
  }

  function applyFilters() {
    const state = readState();

    Object.keys(layers).forEach(type => {
      const group = layers[type];
      if (state.categories[type]) {
        if (!map.hasLayer(group)) map.addLayer(group);
      } else if (map.hasLayer(group)) {
        map.removeLayer(group);
      }
    });

    FILTER_MARKERS.forEach(meta => {
      const marker = markers[meta.id];
      const group = layers[meta.type];
      if (!marker || !group) return;
      if (isMarkerVisible(state, meta)) {
        if (!group.hasLayer(marker)) group.addLayer(marker);
      } else if (group.hasLayer(marker)) {
        group.removeLayer(marker);
      }
    });
  }

  function setAll(checked) {
    document.querySelectorAll(".type-toggle").forEach(cb => { cb.checked = checked; });
    applyFilters();
  }

  document.querySelectorAll(".type-toggle").forEach(cb => cb.addEventListener("change", applyFilters));
  document.getElementById("playedOnly")?.addEventListener("change", applyFilters);
  document.getElementById("videoOnly")?.addEventListener("change", applyFilters);
  document.getElementById("filterAll")?.addEventListener("click", () => setAll(true));
  document.getElementById("filterNone")?.addEventListener("click", () => setAll(false));

  applyFilters();
})();
"#;

/// Viewer-side filter logic. Expects the map script to have published
/// `window.courseMap`, `window.courseLayers` (label → group) and
/// `window.courseMarkers` (marker id → marker).
///
/// # Errors
///
/// Returns [`RenderError::Serialize`] if the marker table cannot be
/// serialized.
pub fn render_filter_script(metas: &[MarkerMeta]) -> Result<String, RenderError> {
    let table: Vec<ScriptMarker> = metas
        .iter()
        .map(|meta| ScriptMarker {
            id: meta.marker_id(),
            course_type: meta.course_type.label(),
            played: meta.played,
            video: meta.has_video,
        })
        .collect();
    let json = script_json(&table).map_err(RenderError::serialize("filter markers"))?;
    Ok(format!("const FILTER_MARKERS = {json};{FILTER_SCRIPT}"))
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
