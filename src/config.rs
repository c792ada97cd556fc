// File: ./src/config.rs
// Handles settings loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::AlarmSet;
use crate::storage::FileStore;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use strum::{EnumIter, IntoEnumIterator};

/// Opacity steps offered by the settings menu, highest first.
pub const OPACITY_PRESETS: [f64; 4] = [1.0, 0.9, 0.8, 0.7];

fn default_geometry() -> String {
    "450x300+100+100".to_string()
}
fn default_color_theme() -> String {
    "blue".to_string()
}
fn default_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        Theme::iter().find(|t| *t != self).unwrap_or(self)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Settings {
    #[serde(default = "default_geometry")]
    pub geometry: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_color_theme")]
    pub color_theme: String,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub alarms: AlarmSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geometry: default_geometry(),
            theme: Theme::default(),
            color_theme: default_color_theme(),
            always_on_top: false,
            opacity: default_opacity(),
            alarms: AlarmSet::new(),
        }
    }
}

/// How `load_or_default` arrived at its settings.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// No file existed; defaults were written to disk.
    CreatedDefaults,
    /// The file exists but could not be read or parsed. Defaults are in use and
    /// the file is left alone so it can be repaired by hand.
    Fallback(String),
}

pub fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        return default_opacity();
    }
    value.clamp(0.0, 1.0)
}

impl Settings {
    /// Load the settings from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let mut settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        settings.opacity = clamp_opacity(settings.opacity);

        Ok(settings)
    }

    /// Startup loading policy: never fails.
    ///
    /// - missing file: defaults, written back to disk
    /// - unreadable or malformed file: defaults, file untouched
    pub fn load_or_default(ctx: &dyn AppContext) -> (Self, LoadOutcome) {
        match Self::load(ctx) {
            Ok(s) => {
                log::info!("Loaded settings with {} alarm(s)", s.alarms.len());
                (s, LoadOutcome::Loaded)
            }
            Err(e) if Self::is_missing_config_error(&e) => {
                let defaults = Self::default();
                if let Err(e) = defaults.save(ctx) {
                    log::warn!("Could not write default settings: {}", e);
                } else {
                    log::info!("Created default settings file");
                }
                (defaults, LoadOutcome::CreatedDefaults)
            }
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                (Self::default(), LoadOutcome::Fallback(e.to_string()))
            }
        }
    }

    /// Whether an error from `load` means the file simply does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save settings using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        FileStore::with_lock(&path, || {
            let json = serde_json::to_string_pretty(self)?;
            FileStore::atomic_write(&path, json)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}
