//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use taskup_core::config::{read_json, ConfigResult};
use taskup_core::{HeaderStyle, SheetConfig};

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.json";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Sheet showing a single task.
    pub details_sheet: SheetConfig,
    /// Sheet with the status filter.
    pub filter_sheet: SheetConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "TaskUp".to_string(),
            width: 420,
            height: 860,
            details_sheet: SheetConfig::new()
                .with_snap_points(vec![0.45, 0.9])
                .with_title("Task details")
                .with_close_button(true),
            filter_sheet: SheetConfig {
                snap_points: vec![0.35],
                header: HeaderStyle {
                    title: Some("Filter tasks".to_string()),
                    divider: true,
                    ..Default::default()
                },
                ..Default::default()
            },
        }
    }
}

impl AppConfig {
    /// Load from the default config directory, falling back to defaults.
    ///
    /// Problems are logged, never fatal: a broken file must not keep the app
    /// from starting.
    pub fn load() -> Self {
        let Some(path) = taskup_core::config::default_config_dir().map(|d| d.join(CONFIG_FILE))
        else {
            log::info!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let config: Self = read_json(path)?;
        config.details_sheet.validate()?;
        config.filter_sheet.validate()?;
        Ok(config)
    }
}
