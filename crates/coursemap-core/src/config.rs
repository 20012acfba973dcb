use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(var, format!("{raw} is not a finite number")))
        }
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u8>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("{raw:?} is not a boolean")))
    };

    let input_path = PathBuf::from(or_default("COURSEMAP_INPUT", "co_courses.xlsx"));
    let sheet_name = lookup("COURSEMAP_SHEET")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let html_path = PathBuf::from(or_default("COURSEMAP_HTML_OUT", "index.html"));
    let json_path = PathBuf::from(or_default("COURSEMAP_JSON_OUT", "courses.json"));
    let json_export = parse_bool("COURSEMAP_JSON_EXPORT", "true")?;
    let log_level = or_default("COURSEMAP_LOG_LEVEL", "info");

    let title = or_default("COURSEMAP_TITLE", "Golf Course Map");
    let journey_title = or_default("COURSEMAP_JOURNEY_TITLE", "Every Course Journey");
    let default_state = or_default("COURSEMAP_DEFAULT_STATE", "CO");

    let center_lat = parse_f64("COURSEMAP_CENTER_LAT", "39.0")?;
    if !(-90.0..=90.0).contains(&center_lat) {
        return Err(invalid(
            "COURSEMAP_CENTER_LAT",
            format!("{center_lat} is outside [-90, 90]"),
        ));
    }
    let center_lng = parse_f64("COURSEMAP_CENTER_LNG", "-105.55")?;
    if !(-180.0..=180.0).contains(&center_lng) {
        return Err(invalid(
            "COURSEMAP_CENTER_LNG",
            format!("{center_lng} is outside [-180, 180]"),
        ));
    }
    let zoom = parse_u8("COURSEMAP_ZOOM", "7")?;
    if zoom > 19 {
        return Err(invalid("COURSEMAP_ZOOM", format!("{zoom} exceeds 19")));
    }

    Ok(AppConfig {
        input_path,
        sheet_name,
        html_path,
        json_path,
        json_export,
        log_level,
        title,
        journey_title,
        default_state,
        center_lat,
        center_lng,
        zoom,
    })
}

/// Parse a boolean flag value. Unrecognized values yield `None`.
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
