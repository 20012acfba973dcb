use std::path::PathBuf;

/// Runtime configuration for a generator run.
///
/// Every value has a built-in default; environment variables (optionally from
/// a `.env` file) override them and CLI flags override those in turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub sheet_name: Option<String>,
    pub html_path: PathBuf,
    pub json_path: PathBuf,
    pub json_export: bool,
    pub log_level: String,
    pub title: String,
    pub journey_title: String,
    pub default_state: String,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl AppConfig {
    /// JSON output path, or `None` when the export is disabled.
    #[must_use]
    pub fn json_output(&self) -> Option<&std::path::Path> {
        self.json_export.then_some(self.json_path.as_path())
    }
}
