//! Optional TOML configuration for `meetslot`.
//!
//! ```toml
//! log_level = "info"
//! timezone = "Europe/Berlin"
//! granularity_minutes = 15
//!
//! [preferences]
//! prefer_morning = true
//! earliest_hour = 8
//! ```
//!
//! Values here only fill gaps: anything the request itself specifies wins.

use std::path::{Path, PathBuf};

use anyhow::Context;
use meeting_scheduler::SchedulingPreferences;
use serde::Deserialize;
use serde_json::Value;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILENAME: &str = "meetslot.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log_level: Option<String>,
    pub timezone: Option<String>,
    pub granularity_minutes: Option<u32>,
    pub preferences: Option<SchedulingPreferences>,
}

/// Load and parse a config file.
pub fn load_config(path: &Path) -> anyhow::Result<CliConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// `./meetslot.toml` if it exists.
pub fn find_config_file() -> Option<PathBuf> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
    path.exists().then_some(path)
}

/// Fill request fields the caller left out with configured defaults.
pub fn apply_request_defaults(request: &mut Value, config: &CliConfig) {
    let Some(fields) = request.as_object_mut() else {
        return;
    };
    if let Some(tz) = &config.timezone {
        fields
            .entry("timezone")
            .or_insert_with(|| Value::String(tz.clone()));
    }
    if let Some(minutes) = config.granularity_minutes {
        fields
            .entry("granularity_minutes")
            .or_insert_with(|| Value::from(minutes));
    }
    if let Some(prefs) = &config.preferences {
        if !fields.contains_key("preferences") {
            if let Ok(value) = serde_json::to_value(prefs) {
                fields.insert("preferences".to_string(), value);
            }
        }
    }
}
