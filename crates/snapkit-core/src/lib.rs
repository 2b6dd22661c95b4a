//! snapkit Core Library
//!
//! Geometric snapping and interactive transform engine for a 2D vector editor.
//! Everything here runs synchronously inside a single pointer-event callback.

pub mod geometry;
pub mod guide;
pub mod scene;
pub mod settings;
pub mod snap_zone;
pub mod transform_box;

pub use geometry::{RectExt, Side};
pub use guide::{
    Exclusions, Guide, GuideContext, GuideError, GuideKind, GuideQueryResult, GuideRegistry,
    GuideResult, NoSnap, PointMapper, Session, SnapCandidate, Snapper, Visual,
};
pub use scene::{ElementId, Page, PageGeometry, SceneError, SceneGeometry, SceneShape, SceneSnapshot};
pub use settings::{SettingsError, SnapSettings, UnitSnap};
pub use snap_zone::{bbox_snap_zones, snap_zone_side};
pub use transform_box::{
    DragModifiers, EdgeOrientation, PartId, PartInfo, TransformBox, TransformError,
    TransformHandle, TransformResult,
};
