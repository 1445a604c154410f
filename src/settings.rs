//! Runner settings
//!
//! Loaded from a JSON file; every field is optional and falls back to
//! the compiled-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation timestep (seconds)
    pub sim_dt: f32,
    /// Maximum simulation steps per rendered frame
    pub max_substeps: u32,
    /// Wall-clock length of one frame fed to the accumulator (seconds)
    pub frame_dt: f32,
    /// How much simulated time a run covers when none is given
    pub default_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
            frame_dt: 1.0 / 60.0,
            default_seconds: 10.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.sim_dt.is_finite() && self.sim_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "sim_dt",
                reason: "must be positive",
            });
        }
        if !(self.frame_dt.is_finite() && self.frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "frame_dt",
                reason: "must be positive",
            });
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1",
            });
        }
        if !(self.default_seconds.is_finite() && self.default_seconds >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "default_seconds",
                reason: "must be zero or more",
            });
        }
        Ok(())
    }

    /// Clamped frame delta for the accumulator
    pub fn effective_frame_dt(&self) -> f32 {
        self.frame_dt.min(MAX_FRAME_DT)
    }
}
