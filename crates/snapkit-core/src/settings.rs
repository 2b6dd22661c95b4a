//! Scene-level snapping settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Rounding mode of the unit guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSnap {
    /// No unit rounding.
    Off,
    /// Round to whole units.
    #[default]
    Full,
    /// Round to the nearest half unit (`n + 0.5`), i.e. pixel centers.
    Half,
}

impl UnitSnap {
    /// Round a coordinate according to this mode.
    pub fn round(self, value: f64) -> Option<f64> {
        match self {
            UnitSnap::Off => None,
            UnitSnap::Full => Some(value.round()),
            UnitSnap::Half => Some((value - 0.5).round() + 0.5),
        }
    }
}

/// Properties of a scene that the snapping engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Maximum distance (scene units) at which page and shape guides capture a coordinate.
    pub snap_distance: f64,
    /// Distance from a bounding box border at which snap zones are shown.
    pub pick_distance: f64,
    /// Whether the grid guide is active.
    pub grid_active: bool,
    /// Horizontal grid spacing.
    pub grid_size_x: f64,
    /// Vertical grid spacing.
    pub grid_size_y: f64,
    /// Unit rounding mode.
    pub unit_snap: UnitSnap,
    /// Whether page edges act as guides.
    pub page_snap: bool,
    /// Whether sibling shape bounding boxes act as guides.
    pub shape_snap: bool,
    /// Only the active page is used for page snapping.
    pub single_page: bool,
    /// How far shape guide lines extend past the aligned boxes.
    pub guide_margin: f64,
    /// Maximum length of snap zone indicator lines.
    pub visuals_length: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            snap_distance: 5.0,
            pick_distance: 3.0,
            grid_active: false,
            grid_size_x: 10.0,
            grid_size_y: 10.0,
            unit_snap: UnitSnap::Full,
            page_snap: true,
            shape_snap: true,
            single_page: false,
            guide_margin: 20.0,
            visuals_length: 10.0,
        }
    }
}

impl SnapSettings {
    /// Settings with every guide switched off.
    pub fn disabled() -> Self {
        Self {
            grid_active: false,
            unit_snap: UnitSnap::Off,
            page_snap: false,
            shape_snap: false,
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
