//! Guide providers and the registry that reconciles them.
//!
//! A guide answers one question: given a coordinate, which axis-aligned value
//! would it snap to, and how far away is that value? The [`GuideRegistry`]
//! asks its guides in priority order and combines their answers.

mod grid;
mod page;
mod registry;
mod session;
mod shape_box;
mod unit;

pub use grid::GridGuide;
pub use page::PageGuide;
pub use registry::{GuideRegistry, Snapper};
pub use session::{Exclusions, Session};
pub use shape_box::ShapeBoxGuide;
pub use unit::UnitGuide;

use crate::scene::{SceneError, SceneGeometry};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length (on either axis) of a hint line towards a target point.
pub const MIN_HINT_LENGTH: f64 = 2.0;

/// Guide query errors.
#[derive(Debug, Error)]
pub enum GuideError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for guide queries.
pub type GuideResult<T> = Result<T, GuideError>;

/// Visual feedback attached to a snap candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Visual {
    /// Nothing to draw.
    #[default]
    None,
    /// A guide line to draw as is.
    Line(Line),
    /// A target point; the hint line runs from the snapped point to it.
    Target(Point),
}

/// A proposed snapped value for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    /// The snapped coordinate.
    pub value: f64,
    /// Absolute distance between the requested coordinate and `value`.
    pub delta: Option<f64>,
    /// Feedback to draw when this candidate wins.
    pub visual: Visual,
}

impl SnapCandidate {
    /// Candidate snapping `requested` to `value`.
    pub fn new(value: f64, requested: f64) -> Self {
        Self {
            value,
            delta: Some((requested - value).abs()),
            visual: Visual::None,
        }
    }

    /// Attach visual feedback.
    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    /// Check if the candidate is an exact alignment.
    pub fn is_exact(&self) -> bool {
        self.delta.is_some_and(|d| d <= crate::geometry::EPSILON)
    }
}

/// Independent per-axis answers of one guide.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuideQueryResult {
    pub x: Option<SnapCandidate>,
    pub y: Option<SnapCandidate>,
}

impl GuideQueryResult {
    /// Check if neither axis snapped.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Check if both axes snapped.
    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Tag identifying the concrete guide behind a `dyn Guide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuideKind {
    ShapeBox,
    PageEdge,
    Grid,
    Unit,
}

/// Everything a guide may read while answering a query.
pub struct GuideContext<'a> {
    /// Scene geometry and settings.
    pub scene: &'a dyn SceneGeometry,
    /// Elements that must not be snapped to (the ones being moved).
    pub exclusions: &'a Exclusions,
    /// Extend guide lines by the configured guide margin.
    pub use_margin: bool,
    /// Alignment snapping is temporarily disabled by a modifier key.
    pub suppressed: bool,
}

/// A snapping rule source.
///
/// Guides only read geometry; they never modify the scene.
pub trait Guide {
    /// The concrete kind of this guide.
    fn kind(&self) -> GuideKind;

    /// Whether this guide stays active while only detail guides are requested.
    fn supports_detail(&self) -> bool {
        false
    }

    /// Whether the suppression modifier switches this guide off.
    fn honors_suppression(&self) -> bool {
        true
    }

    /// Whether the scene settings enable this guide.
    fn is_enabled(&self, ctx: &GuideContext<'_>) -> bool;

    /// Check if the guide may map coordinates right now.
    fn is_mapping_allowed(&self, ctx: &GuideContext<'_>, detail_only: bool) -> bool {
        if detail_only && !self.supports_detail() {
            return false;
        }
        if ctx.suppressed && self.honors_suppression() {
            return false;
        }
        self.is_enabled(ctx)
    }

    /// Propose snapped values for `x` and `y`.
    fn query(&self, x: f64, y: f64, ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult>;
}

/// Something that can snap a dragged point.
pub trait PointMapper {
    /// Map a point to the current snapping options.
    fn map_point(&mut self, point: Point, detail_only: bool) -> Point;
}

/// A [`PointMapper`] that never snaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnap;

impl PointMapper for NoSnap {
    fn map_point(&mut self, point: Point, _detail_only: bool) -> Point {
        point
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::scene::SceneSnapshot;

    /// Run `f` with a context over `scene` and an empty exclusion set.
    pub fn with_context<R>(
        scene: &SceneSnapshot,
        use_margin: bool,
        f: impl FnOnce(&GuideContext<'_>) -> R,
    ) -> R {
        let exclusions = Exclusions::default();
        let ctx = GuideContext {
            scene,
            exclusions: &exclusions,
            use_margin,
            suppressed: false,
        };
        f(&ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_delta_is_absolute() {
        let c = SnapCandidate::new(10.0, 13.0);
        assert_eq!(c.delta, Some(3.0));
        let c = SnapCandidate::new(10.0, 7.5);
        assert_eq!(c.delta, Some(2.5));
        assert!(!c.is_exact());
        assert!(SnapCandidate::new(4.0, 4.0).is_exact());
    }

    #[test]
    fn test_no_snap_is_identity() {
        let p = Point::new(3.3, -7.1);
        assert_eq!(NoSnap.map_point(p, false), p);
    }

    #[test]
    fn test_query_result_flags() {
        let mut r = GuideQueryResult::default();
        assert!(r.is_empty());
        r.x = Some(SnapCandidate::new(1.0, 1.0));
        assert!(!r.is_empty());
        assert!(!r.is_complete());
        r.y = Some(SnapCandidate::new(1.0, 1.0));
        assert!(r.is_complete());
    }
}
