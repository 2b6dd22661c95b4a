//! Read-only view of the scene geometry the guides snap against.
//!
//! The editor owns the real scene graph. The engine only needs bounding boxes
//! of pages and of the snappable shapes on the active layer, plus the scene
//! settings, so that is all [`SceneGeometry`] exposes.

use crate::settings::SnapSettings;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a page or shape in the scene.
pub type ElementId = Uuid;

/// Scene access errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Element not found: {0}")]
    NotFound(ElementId),
    #[error("Element has no geometry: {0}")]
    NoGeometry(ElementId),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Geometry of a page as seen by the page guide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Outer page bounds.
    pub bounds: Rect,
    /// Inset of the printable area (0 = none).
    pub margin: f64,
}

/// Geometry queries the guides need from the scene.
pub trait SceneGeometry {
    /// Scene-level snapping settings.
    fn settings(&self) -> &SnapSettings;

    /// Visible pages in z-order.
    fn pages(&self) -> Vec<ElementId>;

    /// The active page, if any.
    fn active_page(&self) -> Option<ElementId>;

    /// Geometry of a page.
    fn page_geometry(&self, id: ElementId) -> Result<PageGeometry, SceneError>;

    /// Snappable top-level shapes of the active layer.
    fn shapes(&self) -> Vec<ElementId>;

    /// Geometry bounding box of a shape.
    fn shape_bbox(&self, id: ElementId) -> Result<Rect, SceneError>;
}

/// A page in a [`SceneSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: ElementId,
    pub bounds: Rect,
    #[serde(default)]
    pub margin: f64,
    #[serde(default)]
    pub hidden: bool,
}

/// A shape in a [`SceneSnapshot`]. Shapes without bounds (e.g. empty groups)
/// are listed but cannot be snapped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneShape {
    pub id: ElementId,
    pub bounds: Option<Rect>,
}

/// In-memory scene used by tests and the replay tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSnapshot {
    pub settings: SnapSettings,
    pub pages: Vec<Page>,
    pub shapes: Vec<SceneShape>,
    pub active_page: Option<ElementId>,
}

impl SceneSnapshot {
    /// Create an empty scene with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given settings.
    pub fn with_settings(settings: SnapSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Add a page. The first page added becomes the active page.
    pub fn add_page(&mut self, bounds: Rect, margin: f64) -> ElementId {
        let id = Uuid::new_v4();
        self.pages.push(Page {
            id,
            bounds: bounds.abs(),
            margin,
            hidden: false,
        });
        if self.active_page.is_none() {
            self.active_page = Some(id);
        }
        id
    }

    /// Add a shape with the given bounding box.
    pub fn add_shape(&mut self, bounds: Rect) -> ElementId {
        let id = Uuid::new_v4();
        self.shapes.push(SceneShape {
            id,
            bounds: Some(bounds.abs()),
        });
        id
    }

    /// Remove a shape. Returns false if it did not exist.
    pub fn remove_shape(&mut self, id: ElementId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        self.shapes.len() != before
    }

    /// Union of the bounding boxes of the given shapes.
    pub fn selection_bbox(&self, ids: &[ElementId]) -> Result<Option<Rect>, SceneError> {
        let mut bbox: Option<Rect> = None;
        for &id in ids {
            let rect = self.shape_bbox(id)?;
            bbox = Some(bbox.map_or(rect, |b| b.union(rect)));
        }
        Ok(bbox)
    }

    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::Serialization(e.to_string()))
    }

    /// Serialize the scene to pretty JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::Serialization(e.to_string()))
    }

    /// Load a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let json = fs::read_to_string(path)
            .map_err(|e| SceneError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

impl SceneGeometry for SceneSnapshot {
    fn settings(&self) -> &SnapSettings {
        &self.settings
    }

    fn pages(&self) -> Vec<ElementId> {
        self.pages.iter().filter(|p| !p.hidden).map(|p| p.id).collect()
    }

    fn active_page(&self) -> Option<ElementId> {
        self.active_page
    }

    fn page_geometry(&self, id: ElementId) -> Result<PageGeometry, SceneError> {
        self.pages
            .iter()
            .find(|p| p.id == id)
            .map(|p| PageGeometry {
                bounds: p.bounds,
                margin: p.margin,
            })
            .ok_or(SceneError::NotFound(id))
    }

    fn shapes(&self) -> Vec<ElementId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    fn shape_bbox(&self, id: ElementId) -> Result<Rect, SceneError> {
        let shape = self
            .shapes
            .iter()
            .find(|s| s.id == id)
            .ok_or(SceneError::NotFound(id))?;
        shape.bounds.ok_or(SceneError::NoGeometry(id))
    }
}
