//! Interactive transform box around a selection.
//!
//! The box keeps its corners axis-aligned in local space. Everything a gesture
//! does (move, resize, rotate, skew) is expressed as an [`Affine`] that the
//! caller previews with [`TransformBox::set_transform`] and finally applies
//! to the selection.

mod part;
mod resize;

pub use part::{EdgeOrientation, PartId, PartInfo, TransformHandle};
pub use resize::{handle_delta, resize_transform};

use crate::geometry::{EPSILON, RectExt, Side, bounding_rect, is_identity};
use crate::guide::PointMapper;
use kurbo::{Affine, BezPath, Line, ParamCurveNearest, Point, Rect, Shape, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use thiserror::Error;

/// Size of a handle annotation in view pixels.
pub const ANNOT_SIZE: f64 = 6.0;

/// Rotation quantum used when the ratio lock is held and no step is given (15°).
pub const DEFAULT_ANGLE_STEP: f64 = PI / 12.0;

/// Accuracy passed to kurbo's nearest-point queries.
const NEAREST_ACCURACY: f64 = 1e-6;

/// Transform box errors.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for transform box operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Modifier state of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragModifiers {
    /// Resize about the center instead of the opposite side.
    pub symmetric: bool,
    /// Keep the aspect ratio when resizing, quantize angles when rotating.
    pub lock_ratio: bool,
    /// Rotation quantum in radians, or skew quantum in scene units.
    pub step: Option<f64>,
}

/// The editable box drawn around a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformBox {
    /// tl, tr, br, bl in local space.
    corners: [Point; 4],
    /// Rotation center in local space.
    center: Point,
    /// Pending transform of the whole box.
    transform: Option<Affine>,
    /// Pending transform of the rotation center alone.
    center_transform: Option<Affine>,
    center_only: bool,
}

impl TransformBox {
    /// Create a box for a selection bounding box. The rotation center
    /// defaults to the middle of the box.
    pub fn new(bbox: Rect, center: Option<Point>) -> Self {
        let bbox = bbox.abs();
        Self {
            corners: [
                bbox.side(Side::TopLeft),
                bbox.side(Side::TopRight),
                bbox.side(Side::BottomRight),
                bbox.side(Side::BottomLeft),
            ],
            center: center.unwrap_or_else(|| bbox.center()),
            transform: None,
            center_transform: None,
            center_only: false,
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        self.corners
    }

    /// The untransformed box.
    pub fn local_rect(&self) -> Rect {
        Rect::from_points(self.corners[0], self.corners[2])
    }

    /// The rotation center, without pending transforms.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn pending_transform(&self) -> Option<Affine> {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Option<Affine>) {
        self.transform = transform;
    }

    /// Accumulate an incremental transform on top of the pending one.
    pub fn transform(&mut self, transform: Affine) {
        if is_identity(transform) {
            return;
        }
        self.transform = Some(match self.transform {
            Some(current) => transform * current,
            None => transform,
        });
    }

    pub fn center_transform(&self) -> Option<Affine> {
        self.center_transform
    }

    pub fn set_center_transform(&mut self, transform: Option<Affine>) {
        self.center_transform = transform;
    }

    /// Only show the rotation center (used while a gesture runs).
    pub fn hide(&mut self) {
        self.center_only = true;
    }

    pub fn show(&mut self) {
        self.center_only = false;
    }

    pub fn is_center_only(&self) -> bool {
        self.center_only
    }

    fn object_transform(&self) -> Affine {
        self.transform.unwrap_or(Affine::IDENTITY)
    }

    /// Rotation center with its pending transform, in scene coordinates.
    fn transformed_center(&self) -> Point {
        self.center_transform
            .or(self.transform)
            .unwrap_or(Affine::IDENTITY)
            * self.center
    }

    /// Position of a handle in view coordinates.
    pub fn handle_position(&self, handle: TransformHandle, view: Affine) -> Point {
        match handle.side() {
            Some(side) => view * self.object_transform() * self.local_rect().side(side),
            None => view * self.transformed_center(),
        }
    }

    /// Box corners with the pending transform, in view coordinates.
    fn view_corners(&self, view: Affine) -> [Point; 4] {
        let t = view * self.object_transform();
        self.corners.map(|p| t * p)
    }

    /// Resize handles large enough to be told apart at the current zoom,
    /// followed by the rotation center.
    fn hit_handles(&self, view: Affine) -> Vec<TransformHandle> {
        let bbox = (view * self.object_transform()).transform_rect_bbox(self.local_rect());
        let (w, h) = (bbox.width(), bbox.height());
        let unit = ANNOT_SIZE + 2.0;

        let mut handles = Vec::with_capacity(9);
        if w > unit * 2.0 && h > unit * 2.0 {
            handles.extend([
                TransformHandle::TopLeft,
                TransformHandle::TopRight,
                TransformHandle::BottomLeft,
                TransformHandle::BottomRight,
            ]);
        }
        if h > unit * 3.0 {
            handles.extend([TransformHandle::RightCenter, TransformHandle::LeftCenter]);
        }
        if w > unit * 3.0 {
            handles.extend([TransformHandle::TopCenter, TransformHandle::BottomCenter]);
        }
        handles.push(TransformHandle::RotationCenter);
        handles
    }

    /// Handles to draw, with their view positions.
    pub fn visible_handles(&self, view: Affine) -> Vec<(TransformHandle, Point)> {
        let handles = if self.center_only {
            vec![TransformHandle::RotationCenter]
        } else {
            self.hit_handles(view)
        };
        handles
            .into_iter()
            .map(|h| (h, self.handle_position(h, view)))
            .collect()
    }

    /// Bounds of the transformed corners and rotation center, in scene coordinates.
    pub fn geometry_bbox(&self) -> Rect {
        let t = self.object_transform();
        let points = self
            .corners
            .iter()
            .map(|&p| t * p)
            .chain(std::iter::once(self.transformed_center()));
        bounding_rect(points).unwrap_or(Rect::ZERO)
    }

    /// Area to repaint for the box and its handle annotations.
    pub fn paint_bbox(&self) -> Rect {
        self.geometry_bbox()
            .expanded(ANNOT_SIZE, ANNOT_SIZE, ANNOT_SIZE, ANNOT_SIZE)
    }

    /// Rotation sector (0-7) of a view location around the rotation center.
    /// Sector 0 starts at the top-left diagonal and sectors run clockwise.
    pub fn rotation_segment(&self, location: Point, view: Affine) -> u8 {
        let center = view * self.center;
        let v = location - center;
        let mut angle = v.y.atan2(v.x) + PI * 7.0 / 8.0;
        if angle < 0.0 {
            angle += TAU;
        }
        let sector = (angle / FRAC_PI_4).floor();
        if (0.0..=7.0).contains(&sector) {
            sector as u8
        } else {
            7
        }
    }

    /// Find the part of the box under a view location.
    ///
    /// Handles are tested first, then the outline (within `tolerance`), then
    /// the interior. Anything else is the rotation zone. Returns `None` for a
    /// non-finite location.
    pub fn part_info_at(&self, location: Point, view: Affine, tolerance: f64) -> Option<PartInfo> {
        if !location.is_finite() {
            return None;
        }
        let tolerance = if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 };

        for handle in self.hit_handles(view) {
            let position = self.handle_position(handle, view);
            let target = Rect::from_center_size(position, (ANNOT_SIZE, ANNOT_SIZE))
                .inflate(tolerance, tolerance);
            if target.contains_inclusive(location) {
                return Some(PartInfo {
                    id: PartId::Handle(handle),
                    position: Some(position),
                });
            }
        }

        let corners = self.view_corners(view);
        for i in 0..4 {
            let edge = Line::new(corners[i], corners[(i + 1) % 4]);
            let nearest = edge.nearest(location, NEAREST_ACCURACY);
            if nearest.distance_sq <= tolerance * tolerance {
                let orientation = if i % 2 == 0 {
                    EdgeOrientation::Horizontal
                } else {
                    EdgeOrientation::Vertical
                };
                return Some(PartInfo::new(PartId::Outline(orientation)));
            }
        }

        let mut outline = BezPath::new();
        outline.move_to(corners[0]);
        for &corner in &corners[1..] {
            outline.line_to(corner);
        }
        outline.close_path();
        if outline.contains(location) {
            return Some(PartInfo::new(PartId::Inside));
        }

        Some(PartInfo::new(PartId::Outside(self.rotation_segment(location, view))))
    }

    /// Transform produced by dragging `part` from `start` to `end` (scene
    /// coordinates). Dragged anchors are snapped through `guides`.
    pub fn calculate_transformation(
        &self,
        part: &PartInfo,
        start: Point,
        end: Point,
        guides: &mut dyn PointMapper,
        modifiers: DragModifiers,
    ) -> TransformResult<Affine> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TransformError::InvalidArgument(format!(
                "Non-finite drag from {start:?} to {end:?}"
            )));
        }
        let delta = end - start;
        let rect = self.local_rect();

        match part.id {
            PartId::Handle(handle) => match handle.side() {
                Some(side) => {
                    let snapped = guides.map_point(rect.side(side) + delta, false);
                    let d = handle_delta(rect, side, snapped);
                    Ok(resize_transform(rect, side, d.x, d.y, modifiers.lock_ratio, modifiers.symmetric))
                }
                None => {
                    let snapped = guides.map_point(self.center + delta, false);
                    Ok(Affine::translate(snapped - self.center))
                }
            },
            PartId::Outside(sector) => {
                if sector > 7 {
                    return Err(TransformError::InvalidArgument(format!(
                        "Rotation sector {sector} out of range"
                    )));
                }
                Ok(self.rotation(start, end, modifiers))
            }
            PartId::Outline(_) => Ok(self.skew(start, delta, modifiers)),
            PartId::Inside => {
                let anchor = move_anchor(rect, start);
                let snapped = guides.map_point(anchor + delta, false);
                Ok(Affine::translate(snapped - anchor))
            }
        }
    }

    fn rotation(&self, start: Point, end: Point, modifiers: DragModifiers) -> Affine {
        let c = self.center;
        let a = start - c;
        let b = end - c;
        let mut angle = b.y.atan2(b.x) - a.y.atan2(a.x);
        if angle > PI {
            angle -= TAU;
        } else if angle <= -PI {
            angle += TAU;
        }
        if modifiers.lock_ratio {
            let step = modifiers
                .step
                .filter(|s| s.is_finite() && *s > 0.0)
                .unwrap_or(DEFAULT_ANGLE_STEP);
            angle = (angle / step).round() * step;
        }
        let c = c.to_vec2();
        Affine::translate(c) * Affine::rotate(angle) * Affine::translate(-c)
    }

    /// Shear about the box center. The side of the center the drag starts
    /// on decides the direction, so the grabbed edge follows the pointer.
    fn skew(&self, start: Point, delta: Vec2, modifiers: DragModifiers) -> Affine {
        let (mut dx, mut dy) = (delta.x, delta.y);
        if modifiers.lock_ratio {
            if let Some(step) = modifiers.step.filter(|s| s.is_finite() && *s > 0.0) {
                dx = (dx / step).round() * step;
                dy = (dy / step).round() * step;
            }
        }
        if dx == 0.0 && dy == 0.0 {
            return Affine::IDENTITY;
        }

        let rect = self.local_rect();
        let center = rect.center();
        let sign_y = if start.y > center.y { 1.0 } else { -1.0 };
        let sign_x = if start.x < center.x { -1.0 } else { 1.0 };
        let shear_x = if rect.height() < EPSILON {
            0.0
        } else {
            2.0 * dx / rect.height() * sign_y
        };
        let shear_y = if rect.width() < EPSILON {
            0.0
        } else {
            2.0 * dy / rect.width() * sign_x
        };

        let c = center.to_vec2();
        Affine::translate(c) * Affine::new([1.0, shear_y, shear_x, 1.0, 0.0, 0.0]) * Affine::translate(-c)
    }

    /// Fold the pending transform into the rotation center and drop both
    /// pending transforms. The corners are left alone.
    pub fn apply_center_transform(&mut self) {
        if let Some(t) = self.transform.or(self.center_transform) {
            self.center = t * self.center;
        }
        self.transform = None;
        self.center_transform = None;
    }
}

/// Anchor snapped while moving: the corner, edge center or center of the
/// third of `rect` the drag started in.
fn move_anchor(rect: Rect, start: Point) -> Point {
    let w3 = rect.width() / 3.0;
    let h3 = rect.height() / 3.0;
    let center = rect.center();
    let x = if start.x <= rect.x0 + w3 {
        rect.x0
    } else if start.x >= rect.x0 + w3 * 2.0 {
        rect.x1
    } else {
        center.x
    };
    let y = if start.y <= rect.y0 + h3 {
        rect.y0
    } else if start.y >= rect.y0 + h3 * 2.0 {
        rect.y1
    } else {
        center.y
    };
    Point::new(x, y)
}
