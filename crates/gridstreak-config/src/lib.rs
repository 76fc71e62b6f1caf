//! Configuration loading for gridstreak.
//!
//! Configuration lives in `config.toml` under the platform config directory
//! (for example `~/.config/gridstreak/config.toml` on Linux). Every field is
//! optional; missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use gridstreak_core::{Bounds, Rgba, SceneParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// Upper bound on projectiles per axis.
pub const MAX_PROJECTILES: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How the scene is presented in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub fps: u32,
    /// Logical pixels per device pixel. One terminal cell is one device
    /// pixel wide and two tall.
    pub pixel_scale: f64,
    /// Opaque colour behind the scene.
    pub backdrop: Rgba,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            pixel_scale: 4.0,
            backdrop: Rgba::new(11, 13, 18, 1.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub scene: SceneParams,
}

impl Config {
    /// Path of the configuration file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gridstreak").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform config directory, falling back to defaults
    /// when there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the scene cannot animate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let display = &self.display;
        if display.fps == 0 {
            return Err(invalid("display.fps must be at least 1"));
        }
        if !(display.pixel_scale > 0.0) {
            return Err(invalid("display.pixel_scale must be positive"));
        }

        let scene = &self.scene;
        let grid = &scene.grid;
        if !(grid.dx > 0.0 && grid.dx.is_finite() && grid.dy > 0.0 && grid.dy.is_finite()) {
            return Err(invalid("scene.grid.dx and scene.grid.dy must be positive"));
        }
        for (name, start) in [("start_x", grid.start_x), ("start_y", grid.start_y)] {
            if start.is_some_and(|v| !(v.is_finite() && v >= 0.0)) {
                return Err(invalid(format!(
                    "scene.grid.{name} must be a non-negative number"
                )));
            }
        }

        let p = &scene.projectiles;
        if p.count > MAX_PROJECTILES {
            return Err(invalid(format!(
                "scene.projectiles.count must not exceed {MAX_PROJECTILES}"
            )));
        }
        check_range("scene.projectiles.len", &p.len, false)?;
        check_range("scene.projectiles.duration_ms", &p.duration_ms, false)?;
        check_range("scene.projectiles.steps_ms", &p.steps_ms, true)?;
        if !(p.fade.fade_in_ms > 0.0 && p.fade.fade_out_ms > 0.0) {
            return Err(invalid("scene.projectiles.fade durations must be positive"));
        }

        if let Some(stop) = scene
            .gradient
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.offset) || !(0.0..=1.0).contains(&s.color.a))
        {
            return Err(invalid(format!(
                "scene.gradient stop at offset {} is out of range",
                stop.offset
            )));
        }
        if !(0.0..=1.0).contains(&scene.line_color.a) {
            return Err(invalid("scene.line_color.a must be within 0..=1"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn check_range(name: &str, bounds: &Bounds, strictly_positive: bool) -> Result<(), ConfigError> {
    if !(bounds.min.is_finite() && bounds.max.is_finite()) || !bounds.is_ordered() {
        return Err(invalid(format!("{name}: min must not exceed max")));
    }
    if bounds.min < 0.0 || (strictly_positive && bounds.min <= 0.0) {
        return Err(invalid(format!("{name}: min is out of range")));
    }
    Ok(())
}
