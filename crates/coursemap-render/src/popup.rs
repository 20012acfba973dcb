//! Per-course popup markup.

use coursemap_core::{CourseRecord, MapTheme};

use crate::html::escape;

/// Renders the popup body for one course.
///
/// Pure: the output depends only on the arguments. Every interpolated value
/// is escaped. Styling comes from the document stylesheet (`.cm-*` classes);
/// the only inline style is the category swatch colour.
#[must_use]
pub fn render_popup(record: &CourseRecord, theme: &MapTheme, journey_title: &str) -> String {
    let course_type = record.course_type();
    let links = record.map_links();
    let mut out = String::with_capacity(1024);

    out.push_str(r#"<div class="cm-popup">"#);
    out.push_str(&format!(r#"<div class="cm-name">{}</div>"#, escape(record.name())));
    out.push_str(&format!(
        r#"<div class="cm-sub">{} · {}</div>"#,
        escape(record.city()),
        escape(record.region())
    ));

    out.push_str(&format!(
        concat!(
            r#"<div class="cm-row"><div class="cm-label">Type</div>"#,
            r#"<div class="cm-badge"><span class="cm-swatch" style="background:{}"></span>"#,
            r#"<span>{}</span></div></div>"#
        ),
        escape(theme.color(course_type)),
        escape(course_type.label())
    ));
    out.push_str(&format!(
        r#"<div class="cm-row"><div class="cm-label">Address</div><div class="cm-address">{}</div></div>"#,
        escape(record.address())
    ));

    out.push_str(&format!(
        concat!(
            r#"<div class="cm-links">"#,
            r#"<a class="cm-button" href="{}" target="_blank" rel="noopener">Open in Maps</a>"#,
            r#"<a class="cm-button" href="{}" target="_blank" rel="noopener">Google Maps</a>"#,
            "</div>"
        ),
        escape(&links.apple),
        escape(&links.google)
    ));

    out.push_str(r#"<div class="cm-divider"></div>"#);
    out.push_str(&format!(
        r#"<div class="cm-journey-title">{}</div>"#,
        escape(journey_title)
    ));
    out.push_str(r#"<div class="cm-journey">"#);
    out.push_str(&format!(
        r#"<div class="cm-stat"><div class="cm-stat-label">Course #</div><div class="cm-stat-value">{}</div></div>"#,
        escape(&record.visit_order_display())
    ));
    out.push_str(&format!(
        concat!(
            r#"<div class="cm-stat cm-stat--stack"><div>"#,
            r#"<div class="cm-stat-label">First Played</div>"#,
            r#"<div class="cm-stat-value cm-stat-value--small">{}</div></div>{}</div>"#
        ),
        escape(&record.first_played_display()),
        video_button(record)
    ));
    out.push_str("</div></div>");
    out
}

fn video_button(record: &CourseRecord) -> String {
    match record.video_url() {
        Some(url) => format!(
            r#"<a class="cm-video" href="{}" target="_blank" rel="noopener">Watch Reel</a>"#,
            escape(url)
        ),
        None if record.played() => {
            r#"<div class="cm-video cm-video--none">No video yet</div>"#.to_string()
        }
        None => r#"<div class="cm-video cm-video--unplayed">Not played yet</div>"#.to_string(),
    }
}
