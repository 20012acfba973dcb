//! Static HTML rendering for the course map: a Leaflet document with one
//! toggleable layer per course category, per-course popups, a name search
//! and the client-side filter controller.

pub mod document;
pub mod error;
pub mod filter;
pub mod html;
pub mod popup;
pub mod search;

pub use document::{render_document, RenderOptions};
pub use error::RenderError;
pub use filter::{render_filter_panel, render_filter_script, FilterLabels, FilterState, MarkerMeta};
pub use popup::render_popup;
pub use search::{search_index, SearchIndex};
