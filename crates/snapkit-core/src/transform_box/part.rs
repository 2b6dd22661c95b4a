//! Named parts of a transform box.

use super::{TransformError, TransformResult};
use crate::geometry::Side;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Draggable handles of a transform box, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformHandle {
    TopLeft,
    TopCenter,
    TopRight,
    RightCenter,
    BottomRight,
    BottomCenter,
    BottomLeft,
    LeftCenter,
    /// The pivot for rotation.
    RotationCenter,
}

impl TransformHandle {
    /// The eight resize handles, in id order.
    pub const RESIZE: [TransformHandle; 8] = [
        TransformHandle::TopLeft,
        TransformHandle::TopCenter,
        TransformHandle::TopRight,
        TransformHandle::RightCenter,
        TransformHandle::BottomRight,
        TransformHandle::BottomCenter,
        TransformHandle::BottomLeft,
        TransformHandle::LeftCenter,
    ];

    /// Handle for a numeric id (0-7 resize handles, 8 rotation center).
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0..=7 => Some(Self::RESIZE[index as usize]),
            8 => Some(Self::RotationCenter),
            _ => None,
        }
    }

    /// Numeric id of the handle.
    pub fn index(self) -> u32 {
        match self {
            TransformHandle::TopLeft => 0,
            TransformHandle::TopCenter => 1,
            TransformHandle::TopRight => 2,
            TransformHandle::RightCenter => 3,
            TransformHandle::BottomRight => 4,
            TransformHandle::BottomCenter => 5,
            TransformHandle::BottomLeft => 6,
            TransformHandle::LeftCenter => 7,
            TransformHandle::RotationCenter => 8,
        }
    }

    /// The rect side a resize handle sits on. `None` for the rotation center.
    pub fn side(self) -> Option<Side> {
        match self {
            TransformHandle::TopLeft => Some(Side::TopLeft),
            TransformHandle::TopCenter => Some(Side::TopCenter),
            TransformHandle::TopRight => Some(Side::TopRight),
            TransformHandle::RightCenter => Some(Side::RightCenter),
            TransformHandle::BottomRight => Some(Side::BottomRight),
            TransformHandle::BottomCenter => Some(Side::BottomCenter),
            TransformHandle::BottomLeft => Some(Side::BottomLeft),
            TransformHandle::LeftCenter => Some(Side::LeftCenter),
            TransformHandle::RotationCenter => None,
        }
    }
}

/// Orientation of the outline edge under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeOrientation {
    /// Top or bottom edge.
    Horizontal,
    /// Left or right edge.
    Vertical,
}

/// What a pointer position on a transform box refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartId {
    /// A resize handle or the rotation center.
    Handle(TransformHandle),
    /// The border; dragging it skews.
    Outline(EdgeOrientation),
    /// The body; dragging it moves.
    Inside,
    /// Outside the box; dragging rotates. Carries the sector (0-7), each
    /// 45° wide, with sector 0 starting at the top-left diagonal.
    Outside(u8),
}

impl PartId {
    /// Numeric ids of the zone parts; handles use 0-8.
    pub const OUTLINE: u32 = 9;
    pub const INSIDE: u32 = 10;
    pub const OUTSIDE: u32 = 11;

    /// Decode a part from its numeric id and data word.
    ///
    /// Ids 0-8 are handles, 9 the outline (data 0 horizontal, 1 vertical),
    /// 10 the inside and 11 the outside (data is the sector).
    pub fn from_raw(id: u32, data: u32) -> TransformResult<Self> {
        if let Some(handle) = TransformHandle::from_index(id) {
            return Ok(PartId::Handle(handle));
        }
        match (id, data) {
            (Self::OUTLINE, 0) => Ok(PartId::Outline(EdgeOrientation::Horizontal)),
            (Self::OUTLINE, 1) => Ok(PartId::Outline(EdgeOrientation::Vertical)),
            (Self::OUTLINE, _) => Err(TransformError::InvalidArgument(format!(
                "Unknown edge orientation {data}"
            ))),
            (Self::INSIDE, _) => Ok(PartId::Inside),
            (Self::OUTSIDE, sector) if sector < 8 => Ok(PartId::Outside(sector as u8)),
            (Self::OUTSIDE, sector) => Err(TransformError::InvalidArgument(format!(
                "Rotation sector {sector} out of range"
            ))),
            _ => Err(TransformError::InvalidArgument(format!("Unknown part id {id}"))),
        }
    }

    /// Numeric id and data word of the part.
    pub fn to_raw(self) -> (u32, u32) {
        match self {
            PartId::Handle(handle) => (handle.index(), 0),
            PartId::Outline(EdgeOrientation::Horizontal) => (Self::OUTLINE, 0),
            PartId::Outline(EdgeOrientation::Vertical) => (Self::OUTLINE, 1),
            PartId::Inside => (Self::INSIDE, 0),
            PartId::Outside(sector) => (Self::OUTSIDE, u32::from(sector)),
        }
    }
}

/// Result of hit-testing a transform box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    pub id: PartId,
    /// Handle position in view coordinates, for handle hits.
    pub position: Option<Point>,
}

impl PartInfo {
    pub fn new(id: PartId) -> Self {
        Self { id, position: None }
    }
}
