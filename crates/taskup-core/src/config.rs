//! Sheet configuration and JSON config file helpers.

use crate::motion::{Easing, Motion, Spring};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snap fraction used when none are configured (fully open).
pub const FULL_SNAP: f64 = 1.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Snap point {index} must be in (0, 1], got {value}")]
    InvalidSnapPoint { index: usize, value: f64 },
    #[error("Backdrop opacity must be in [0, 1], got {0}")]
    InvalidBackdropOpacity(f64),
    #[error("Overdrag resistance must be in [0, 1], got {0}")]
    InvalidResistance(f64),
    #[error("Flick velocity must be a non-negative number, got {0}")]
    InvalidFlickVelocity(f64),
    #[error("Sheet height must be a positive number, got {0}")]
    InvalidHeight(f64),
    #[error("{0} duration must be greater than zero")]
    InvalidDuration(&'static str),
    #[error("Spring parameters must be positive")]
    InvalidSpring,
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the sheet travels between offsets when opening or snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMotion {
    #[default]
    Spring,
    Timing,
}

/// Visual overrides for the optional sheet header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub title: Option<String>,
    /// RGB background, `None` to inherit the panel colour.
    pub background: Option<[u8; 3]>,
    pub text_color: Option<[u8; 3]>,
    /// Draw a divider line under the header.
    pub divider: bool,
}

/// Everything a screen can configure on a bottom sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Fractions of the reference height, in (0, 1], in configured order.
    pub snap_points: Vec<f64>,
    /// Tapping the backdrop dismisses the sheet.
    pub backdrop_dismiss: bool,
    /// Flicks and drags past the lowest snap point dismiss the sheet.
    pub drag_dismiss: bool,
    /// Reference height for snap fractions; the container height when `None`.
    pub height: Option<f64>,
    /// Duration of timed offset animations, including the exit slide.
    pub animation_duration_ms: u64,
    /// Duration of the backdrop fade.
    pub fade_duration_ms: u64,
    pub offset_motion: OffsetMotion,
    pub spring: Spring,
    pub show_handle: bool,
    pub show_close_button: bool,
    pub header: HeaderStyle,
    /// Backdrop alpha when fully visible, in [0, 1].
    pub backdrop_opacity: f64,
    /// Downward release speed (px/s) above which the sheet always dismisses.
    pub flick_velocity: f64,
    /// Fraction of an overdrag above the top snap point that moves the sheet.
    pub overdrag_resistance: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            snap_points: vec![0.5, 0.9],
            backdrop_dismiss: true,
            drag_dismiss: true,
            height: None,
            animation_duration_ms: 300,
            fade_duration_ms: 200,
            offset_motion: OffsetMotion::Spring,
            spring: Spring::default(),
            show_handle: true,
            show_close_button: false,
            header: HeaderStyle::default(),
            backdrop_opacity: 0.5,
            flick_velocity: 500.0,
            overdrag_resistance: 0.2,
        }
    }
}

impl SheetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snap_points(mut self, snap_points: impl Into<Vec<f64>>) -> Self {
        self.snap_points = snap_points.into();
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.header.title = Some(title.into());
        self
    }

    pub fn with_close_button(mut self, show: bool) -> Self {
        self.show_close_button = show;
        self
    }

    pub fn with_backdrop_dismiss(mut self, enabled: bool) -> Self {
        self.backdrop_dismiss = enabled;
        self
    }

    pub fn with_drag_dismiss(mut self, enabled: bool) -> Self {
        self.drag_dismiss = enabled;
        self
    }

    /// Snap fractions with an empty list normalised to [`FULL_SNAP`].
    pub fn snap_fractions(&self) -> Vec<f64> {
        if self.snap_points.is_empty() {
            vec![FULL_SNAP]
        } else {
            self.snap_points.clone()
        }
    }

    /// Motion used when opening and when settling on a snap point.
    pub fn open_motion(&self) -> Motion {
        match self.offset_motion {
            OffsetMotion::Spring => Motion::Spring(self.spring),
            OffsetMotion::Timing => self.close_motion(),
        }
    }

    /// Motion used for the exit slide.
    pub fn close_motion(&self) -> Motion {
        Motion::timing(self.animation_duration_ms as f64 / 1000.0)
    }

    /// Motion used for the backdrop fade.
    pub fn fade_motion(&self) -> Motion {
        Motion::Timing {
            duration: self.fade_duration_ms as f64 / 1000.0,
            easing: Easing::InOutQuad,
        }
    }

    /// Check every value is inside its documented range.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, &value) in self.snap_points.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::InvalidSnapPoint { index, value });
            }
        }
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigError::InvalidBackdropOpacity(self.backdrop_opacity));
        }
        if !(0.0..=1.0).contains(&self.overdrag_resistance) {
            return Err(ConfigError::InvalidResistance(self.overdrag_resistance));
        }
        if !self.flick_velocity.is_finite() || self.flick_velocity < 0.0 {
            return Err(ConfigError::InvalidFlickVelocity(self.flick_velocity));
        }
        if let Some(height) = self.height {
            if !height.is_finite() || height <= 0.0 {
                return Err(ConfigError::InvalidHeight(height));
            }
        }
        if self.animation_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration("Animation"));
        }
        if self.fade_duration_ms == 0 {
            return Err(ConfigError::InvalidDuration("Fade"));
        }
        let spring = &self.spring;
        if !(spring.stiffness > 0.0 && spring.damping > 0.0 && spring.mass > 0.0) {
            return Err(ConfigError::InvalidSpring);
        }
        Ok(())
    }

    /// Parse and validate a JSON sheet configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Read a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Default location for TaskUp configuration files.
///
/// On Unix: `~/.config/taskup/`
/// On Windows: `%APPDATA%\taskup\`
#[cfg(not(target_arch = "wasm32"))]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|base| base.join("taskup"))
}
