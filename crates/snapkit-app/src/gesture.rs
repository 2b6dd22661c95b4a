//! Recorded drag gestures.

use crate::ReplayError;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use snapkit_core::{DragModifiers, ElementId};
use std::fs;
use std::path::Path;

fn default_tolerance() -> f64 {
    3.0
}

/// A pointer drag over a selection, as recorded by a host editor.
///
/// Points are in scene coordinates. `view` maps scene to view coordinates
/// and is only used for hit-testing the press point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// Affine coefficients of the view transform.
    #[serde(default)]
    pub view: Option<[f64; 6]>,
    /// Hit-test tolerance in view pixels.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    pub press: Point,
    /// Successive pointer positions; each produces one preview transform.
    #[serde(default)]
    pub moves: Vec<Point>,
    #[serde(default)]
    pub modifiers: DragModifiers,
    /// Force a part by numeric id instead of hit-testing `press`.
    #[serde(default)]
    pub part: Option<u32>,
    #[serde(default)]
    pub part_data: u32,
    /// Shapes being transformed.
    #[serde(default)]
    pub selection: Vec<ElementId>,
    /// Rotation center; defaults to the selection center.
    #[serde(default)]
    pub center: Option<Point>,
    /// Hold the guide suppression modifier for the whole gesture.
    #[serde(default)]
    pub suppress_guides: bool,
}

impl Gesture {
    /// A gesture pressing at `press` with default settings.
    pub fn new(press: Point) -> Self {
        Self {
            view: None,
            tolerance: default_tolerance(),
            press,
            moves: Vec::new(),
            modifiers: DragModifiers::default(),
            part: None,
            part_data: 0,
            selection: Vec::new(),
            center: None,
            suppress_guides: false,
        }
    }

    pub fn view_transform(&self) -> Affine {
        self.view.map_or(Affine::IDENTITY, Affine::new)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ReplayError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
