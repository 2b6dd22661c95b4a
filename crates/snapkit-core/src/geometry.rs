//! Named rectangle sides and small helpers on top of kurbo geometry.

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing coordinates that went through float arithmetic.
pub const EPSILON: f64 = 1e-9;

/// A named anchor on the border (or center) of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    TopLeft,
    TopCenter,
    TopRight,
    RightCenter,
    BottomRight,
    BottomCenter,
    BottomLeft,
    LeftCenter,
    Center,
}

impl Side {
    /// All sides, clockwise from top-left, center last.
    pub const ALL: [Side; 9] = [
        Side::TopLeft,
        Side::TopCenter,
        Side::TopRight,
        Side::RightCenter,
        Side::BottomRight,
        Side::BottomCenter,
        Side::BottomLeft,
        Side::LeftCenter,
        Side::Center,
    ];

    /// Horizontal direction of the side relative to the center (-1 left, 0 middle, 1 right).
    pub fn dir_x(self) -> f64 {
        match self {
            Side::TopLeft | Side::LeftCenter | Side::BottomLeft => -1.0,
            Side::TopCenter | Side::Center | Side::BottomCenter => 0.0,
            Side::TopRight | Side::RightCenter | Side::BottomRight => 1.0,
        }
    }

    /// Vertical direction of the side relative to the center (-1 top, 0 middle, 1 bottom).
    pub fn dir_y(self) -> f64 {
        match self {
            Side::TopLeft | Side::TopCenter | Side::TopRight => -1.0,
            Side::LeftCenter | Side::Center | Side::RightCenter => 0.0,
            Side::BottomLeft | Side::BottomCenter | Side::BottomRight => 1.0,
        }
    }

    /// The side mirrored through the center.
    pub fn opposite(self) -> Side {
        match self {
            Side::TopLeft => Side::BottomRight,
            Side::TopCenter => Side::BottomCenter,
            Side::TopRight => Side::BottomLeft,
            Side::RightCenter => Side::LeftCenter,
            Side::BottomRight => Side::TopLeft,
            Side::BottomCenter => Side::TopCenter,
            Side::BottomLeft => Side::TopRight,
            Side::LeftCenter => Side::RightCenter,
            Side::Center => Side::Center,
        }
    }

    /// Check if this side is one of the four corners.
    pub fn is_corner(self) -> bool {
        self.dir_x() != 0.0 && self.dir_y() != 0.0
    }
}

/// Named side accessors and editor-specific queries for [`Rect`].
///
/// All methods assume a normalized rect (`x0 <= x1`, `y0 <= y1`); call
/// [`Rect::abs`] first when that is not guaranteed.
pub trait RectExt {
    /// Position of a named side.
    fn side(&self, side: Side) -> Point;

    /// The named side whose anchor is closest to `point`.
    /// Ties resolve in [`Side::ALL`] order.
    fn closest_side(&self, point: Point) -> Side;

    /// Grow each edge outwards by its own amount.
    fn expanded(&self, left: f64, top: f64, right: f64, bottom: f64) -> Rect;

    /// Containment test that includes the right and bottom edges.
    fn contains_inclusive(&self, point: Point) -> bool;

    /// Check if the rect has neither width nor height.
    fn is_degenerate(&self) -> bool;
}

impl RectExt for Rect {
    fn side(&self, side: Side) -> Point {
        let fx = (side.dir_x() + 1.0) / 2.0;
        let fy = (side.dir_y() + 1.0) / 2.0;
        Point::new(
            self.x0 + self.width() * fx,
            self.y0 + self.height() * fy,
        )
    }

    fn closest_side(&self, point: Point) -> Side {
        let mut best = Side::TopLeft;
        let mut best_dist_sq = f64::INFINITY;
        for side in Side::ALL {
            let dist_sq = (self.side(side) - point).hypot2();
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = side;
            }
        }
        best
    }

    fn expanded(&self, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect::new(self.x0 - left, self.y0 - top, self.x1 + right, self.y1 + bottom)
    }

    fn contains_inclusive(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    fn is_degenerate(&self) -> bool {
        self.width().abs() < EPSILON && self.height().abs() < EPSILON
    }
}

/// Bounding rect of a set of points, `None` when the set is empty.
pub fn bounding_rect(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    Some(points.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p)))
}

/// Check if a transform is the identity within [`EPSILON`].
pub fn is_identity(transform: Affine) -> bool {
    transform
        .as_coeffs()
        .iter()
        .zip(Affine::IDENTITY.as_coeffs())
        .all(|(a, b)| (a - b).abs() < EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 50.0)
    }

    #[test]
    fn test_side_positions() {
        let r = rect();
        assert_eq!(r.side(Side::TopLeft), Point::new(0.0, 0.0));
        assert_eq!(r.side(Side::TopCenter), Point::new(50.0, 0.0));
        assert_eq!(r.side(Side::RightCenter), Point::new(100.0, 25.0));
        assert_eq!(r.side(Side::BottomRight), Point::new(100.0, 50.0));
        assert_eq!(r.side(Side::BottomLeft), Point::new(0.0, 50.0));
        assert_eq!(r.side(Side::Center), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_opposite_is_involution() {
        for side in Side::ALL {
            assert_eq!(side.opposite().opposite(), side);
        }
        assert_eq!(Side::TopCenter.opposite(), Side::BottomCenter);
    }

    #[test]
    fn test_closest_side() {
        let r = rect();
        assert_eq!(r.closest_side(Point::new(-2.0, -3.0)), Side::TopLeft);
        assert_eq!(r.closest_side(Point::new(52.0, 48.0)), Side::BottomCenter);
        assert_eq!(r.closest_side(Point::new(49.0, 24.0)), Side::Center);
        assert_eq!(r.closest_side(Point::new(104.0, 26.0)), Side::RightCenter);
    }

    #[test]
    fn test_expanded_and_contains() {
        let r = rect().expanded(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r, Rect::new(-1.0, -2.0, 103.0, 54.0));
        assert!(r.contains_inclusive(Point::new(103.0, 54.0)));
        assert!(!r.contains_inclusive(Point::new(103.5, 54.0)));
    }

    #[test]
    fn test_bounding_rect() {
        assert!(bounding_rect(std::iter::empty()).is_none());
        let bbox = bounding_rect([Point::new(3.0, 1.0), Point::new(-1.0, 4.0), Point::new(2.0, 2.0)]);
        assert_eq!(bbox, Some(Rect::new(-1.0, 1.0, 3.0, 4.0)));
    }

    #[test]
    fn test_is_identity() {
        assert!(is_identity(Affine::IDENTITY));
        assert!(is_identity(Affine::translate((1e-12, 0.0))));
        assert!(!is_identity(Affine::scale(1.1)));
    }
}
