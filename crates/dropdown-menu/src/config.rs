//! Menu appearance and animation settings.
//!
//! [`MenuConfig`] holds every tunable the menu exposes. It can be built in
//! code with the `with_*` methods or loaded from TOML; missing keys take
//! their defaults.
//!
//! ```toml
//! animation_duration = 0.35
//! spring_damping = 0.8
//! backdrop_color = "#101820"
//! backdrop_opacity = 0.4
//! search_enabled = true
//! ```
//!
//! # Example
//!
//! ```
//! use dropdown_menu::MenuConfig;
//!
//! let config = MenuConfig::from_toml_str("search_enabled = true\nrow_height = 50.0").unwrap();
//! assert!(config.search_enabled);
//! assert_eq!(config.row_height, 50.0);
//! assert_eq!(config.backdrop_opacity, 0.3);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Color;
use crate::logging::targets;
use crate::widget::animation::Easing;

/// Errors produced while loading or validating a [`MenuConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The TOML could not be parsed into a configuration.
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A value is outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Appearance and animation settings for a dropdown menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Length of the open/close animation, in seconds.
    pub animation_duration: f32,
    /// Damping ratio of the spring; below 1.0 the panel bounces.
    pub spring_damping: f32,
    /// Initial spring velocity, in total distances per animation duration.
    pub spring_velocity: f32,
    /// Color of the backdrop behind the panel.
    pub backdrop_color: Color,
    /// Backdrop opacity when fully shown (0.0 to 1.0).
    pub backdrop_opacity: f32,
    /// Background color of item rows.
    pub row_background_color: Color,
    /// Color of the separators between rows.
    pub separator_color: Color,
    /// Whether the search row is shown and queries are accepted.
    pub search_enabled: bool,
    /// Height of every row.
    pub row_height: f32,
    /// Height of the search header band.
    pub search_bar_height: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            animation_duration: 0.5,
            spring_damping: 0.7,
            spring_velocity: 0.5,
            backdrop_color: Color::BLACK,
            backdrop_opacity: 0.3,
            row_background_color: Color::WHITE,
            separator_color: Color::BLACK,
            search_enabled: false,
            row_height: 44.0,
            search_bar_height: 44.0,
        }
    }
}

impl MenuConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set the animation duration in seconds.
    pub fn with_animation_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Set the spring damping ratio and initial velocity.
    pub fn with_spring(mut self, damping: f32, velocity: f32) -> Self {
        self.spring_damping = damping;
        self.spring_velocity = velocity;
        self
    }

    /// Set the backdrop color and opacity.
    pub fn with_backdrop(mut self, color: Color, opacity: f32) -> Self {
        self.backdrop_color = color;
        self.backdrop_opacity = opacity;
        self
    }

    /// Set the row background color.
    pub fn with_row_background_color(mut self, color: Color) -> Self {
        self.row_background_color = color;
        self
    }

    /// Set the separator color.
    pub fn with_separator_color(mut self, color: Color) -> Self {
        self.separator_color = color;
        self
    }

    /// Enable or disable the search row.
    pub fn with_search_enabled(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    /// Set the row height.
    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    /// Set the search header band height.
    pub fn with_search_bar_height(mut self, height: f32) -> Self {
        self.search_bar_height = height;
        self
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// The animation duration as a [`Duration`]. Negative or non-finite
    /// values map to zero.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.animation_duration).unwrap_or(Duration::ZERO)
    }

    /// The spring easing described by this configuration.
    pub fn easing(&self) -> Easing {
        Easing::spring(self.spring_damping, self.spring_velocity)
    }

    /// Height of the search header band, or 0 when search is disabled.
    pub fn header_height(&self) -> f32 {
        if self.search_enabled {
            self.search_bar_height
        } else {
            0.0
        }
    }

    // =========================================================================
    // Validation and Loading
    // =========================================================================

    /// Check every value against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !self.animation_duration.is_finite() || self.animation_duration <= 0.0 {
            return Err(invalid("animation_duration", "must be a positive number of seconds"));
        }
        if !self.spring_damping.is_finite() || self.spring_damping <= 0.0 {
            return Err(invalid("spring_damping", "must be positive"));
        }
        if !self.spring_velocity.is_finite() {
            return Err(invalid("spring_velocity", "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(invalid("backdrop_opacity", "must be between 0 and 1"));
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(invalid("row_height", "must be positive"));
        }
        if !self.search_bar_height.is_finite() || self.search_bar_height < 0.0 {
            return Err(invalid("search_bar_height", "must not be negative"));
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "menu config loaded");
        Ok(config)
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
