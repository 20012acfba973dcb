pub mod app_config;
pub mod config;
pub mod course;
pub mod course_type;
pub mod dates;
pub mod export;
pub mod map_links;
pub mod records;
pub mod style;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use course::{
    Coordinates, CourseRecord, FirstPlayed, MapLinks, RawCell, RawCourseRow, VisitOrder,
    PLACEHOLDER,
};
pub use course_type::{normalize_course_type, CourseType};
pub use export::{export_json, CourseExport};
pub use records::{build_records, is_http_url, BuildOptions, BuildSummary, LinkLookup};
pub use style::{MapTheme, MarkerPaint, MarkerStyle};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
