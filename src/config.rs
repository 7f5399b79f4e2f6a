//! App Configuration
//!
//! Compiled defaults, then the `FARMHUB_LOG_LEVEL` build-time variable, then
//! an optional JSON override stored under `localStorage["farmhub.config"]`.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::FarmResult;
use crate::models::SectionRecord;
use crate::units::{is_grid_step, DisplayUnit};

/// localStorage key holding the JSON override
pub const CONFIG_STORAGE_KEY: &str = "farmhub.config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub field_width_m: f64,
    pub field_height_m: f64,
    pub grid_step_m: f64,
    pub display_unit: DisplayUnit,
    /// How long a finished drag suppresses clicks
    pub settle_ms: i32,
    /// Pointer travel (px) before a press becomes a drag
    pub click_threshold_px: f64,
    pub simulator_enabled: bool,
    pub simulator_interval_ms: u32,
    pub log_level: String,
    /// Replaces the demo sections when non-empty
    pub sections: Vec<SectionRecord>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            field_width_m: 600.0,
            field_height_m: 400.0,
            grid_step_m: 20.0,
            display_unit: DisplayUnit::Meters,
            settle_ms: 100,
            click_threshold_px: 3.0,
            simulator_enabled: true,
            simulator_interval_ms: 3000,
            log_level: option_env!("FARMHUB_LOG_LEVEL").unwrap_or("info").to_string(),
            sections: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON override on top of the defaults
    pub fn from_json(json: &str) -> FarmResult<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = AppConfig::default();
        if !(self.field_width_m > 0.0) {
            self.field_width_m = defaults.field_width_m;
        }
        if !(self.field_height_m > 0.0) {
            self.field_height_m = defaults.field_height_m;
        }
        if !is_grid_step(self.grid_step_m) {
            self.grid_step_m = defaults.grid_step_m;
        }
        if self.settle_ms < 0 {
            self.settle_ms = defaults.settle_ms;
        }
        if !(self.click_threshold_px >= 0.0) {
            self.click_threshold_px = defaults.click_threshold_px;
        }
        if self.simulator_interval_ms == 0 {
            self.simulator_interval_ms = defaults.simulator_interval_ms;
        }
        self
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Load from localStorage, falling back to defaults
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        match stored {
            Some(json) => AppConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("[CONFIG] ignoring stored override: {}", e);
                AppConfig::default()
            }),
            None => AppConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FarmError;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"fieldWidthM": 1200, "displayUnit": "kilometers"}"#).unwrap();
        assert_eq!(config.field_width_m, 1200.0);
        assert_eq!(config.field_height_m, 400.0);
        assert_eq!(config.display_unit, DisplayUnit::Kilometers);
        assert_eq!(config.settle_ms, 100);
    }

    #[test]
    fn test_sanitize_bad_values() {
        let config = AppConfig::from_json(r#"{"gridStepM": 7, "fieldHeightM": -5, "settleMs": -1}"#).unwrap();
        assert_eq!(config.grid_step_m, 20.0);
        assert_eq!(config.field_height_m, 400.0);
        assert_eq!(config.settle_ms, 100);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = AppConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FarmError::Config(_)));
    }

    #[test]
    fn test_level_filter() {
        let mut config = AppConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Debug);
        config.log_level = "loud".to_string();
        assert_eq!(config.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_sections_override() {
        let config = AppConfig::from_json(r#"{"sections":[{"name":"North","gridRow":1,"gridCol":1}]}"#).unwrap();
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.sections[0].name, "North");
    }
}
