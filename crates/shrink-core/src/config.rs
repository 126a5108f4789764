#![forbid(unsafe_code)]

//! Tunable parameters for the shrink interaction.
//!
//! [`ShrinkConfig::default()`] reproduces the stock behavior: a 16:9 docked
//! view (aspect ratio 0.5625), half the container width minus a 10pt inset,
//! parked 2pt above the bottom edge, with 400ms eased transitions.
//!
//! # Loading
//!
//! With the `config-files` feature enabled:
//!
//! ```toml
//! # shrink.toml
//! aspect_ratio = 0.5625
//! transition_ms = 300
//! easing = "ease_out"
//! ```
//!
//! ```rust,ignore
//! let config = ShrinkConfig::from_toml_file("shrink.toml")?;
//! let config = ShrinkConfig::from_json_str(json)?;
//! ```

#[cfg(feature = "config-files")]
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::Easing;

/// Default docked aspect ratio (height / width).
pub const DEFAULT_ASPECT_RATIO: f64 = 0.5625;

/// Default transition duration in milliseconds.
pub const DEFAULT_TRANSITION_MS: u64 = 400;

/// Configuration for one tracked view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrinkConfig {
    /// Height / width ratio applied to every interpolated size.
    pub aspect_ratio: f64,
    /// Duration of snap and restore transitions.
    pub transition_ms: u64,
    /// Easing curve requested for transitions.
    pub easing: Easing,
    /// Horizontal inset subtracted from half the container width for the docked width.
    pub dock_inset: f64,
    /// Gap kept between the docked view's reference line and the container bottom.
    pub dock_bottom_gap: f64,
    /// Containers at or below this width are rejected.
    pub min_container_width: f64,
    /// Whether drag and tap recognizers may fire together.
    pub allow_simultaneous_gestures: bool,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            transition_ms: DEFAULT_TRANSITION_MS,
            easing: Easing::EaseInOut,
            dock_inset: 10.0,
            dock_bottom_gap: 2.0,
            min_container_width: 20.0,
            allow_simultaneous_gestures: true,
        }
    }
}

impl ShrinkConfig {
    /// Transition duration as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Recognizer settings the platform should apply.
    #[must_use]
    pub fn arbitration(&self) -> GestureArbitration {
        GestureArbitration {
            allow_simultaneous: self.allow_simultaneous_gestures,
            ..GestureArbitration::default()
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            errors.push(format!(
                "aspect_ratio must be finite and > 0, got {}",
                self.aspect_ratio
            ));
        }
        if self.transition_ms == 0 {
            errors.push("transition_ms must be > 0".into());
        }
        if !self.dock_inset.is_finite() || self.dock_inset < 0.0 {
            errors.push(format!("dock_inset must be >= 0, got {}", self.dock_inset));
        }
        if !self.dock_bottom_gap.is_finite() || self.dock_bottom_gap < 0.0 {
            errors.push(format!(
                "dock_bottom_gap must be >= 0, got {}",
                self.dock_bottom_gap
            ));
        }
        if !self.min_container_width.is_finite() || self.min_container_width < 2.0 * self.dock_inset
        {
            errors.push(format!(
                "min_container_width must be >= 2 * dock_inset ({}), got {}",
                2.0 * self.dock_inset,
                self.min_container_width
            ));
        }

        errors
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "config-files")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Gesture recognizer settings for the platform layer.
///
/// The core never arbitrates between recognizers itself; these values tell
/// the integration how to wire its drag and tap recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureArbitration {
    /// Drag and tap may be recognized at the same time.
    pub allow_simultaneous: bool,
    /// Minimum touches for the drag recognizer.
    pub min_touches: u8,
    /// Maximum touches for the drag recognizer.
    pub max_touches: u8,
    /// Taps required to trigger a restore.
    pub taps_required: u8,
}

impl Default for GestureArbitration {
    fn default() -> Self {
        Self {
            allow_simultaneous: true,
            min_touches: 1,
            max_touches: 1,
            taps_required: 1,
        }
    }
}

/// Errors while loading a [`ShrinkConfig`] from disk or text.
#[cfg(feature = "config-files")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML config: {0}")]
    Toml(toml::de::Error),
    #[error("invalid JSON config: {0}")]
    Json(serde_json::Error),
    #[error("config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}
