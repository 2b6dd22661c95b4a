//! Resize transforms for a rectangle dragged by one of its handles.

use crate::geometry::{EPSILON, RectExt, Side};
use kurbo::{Affine, Rect, Vec2};

/// Scale factor along one axis when the handle moves by `delta`.
///
/// `dir` is the side's direction on that axis (-1, 0 or 1); `grow` is 2 for
/// symmetric resizes where the opposite edge moves as well. Zero-sized or
/// fixed axes keep a unit scale.
fn axis_scale(extent: f64, dir: f64, delta: f64, grow: f64) -> f64 {
    if dir == 0.0 || extent.abs() < EPSILON {
        return 1.0;
    }
    let scale = (extent + dir * delta * grow) / extent;
    if scale.is_finite() { scale } else { 1.0 }
}

/// Transform resizing `rect` by dragging the handle at `side` by (`dx`, `dy`).
///
/// The opposite side stays fixed, or the center when `symmetric` is set.
/// With `lock_ratio` both axes scale by the same factor: corners use the
/// factor that changed more, edge handles use their own axis.
pub fn resize_transform(rect: Rect, side: Side, dx: f64, dy: f64, lock_ratio: bool, symmetric: bool) -> Affine {
    let rect = rect.abs();
    let grow = if symmetric { 2.0 } else { 1.0 };
    let mut sx = axis_scale(rect.width(), side.dir_x(), dx, grow);
    let mut sy = axis_scale(rect.height(), side.dir_y(), dy, grow);

    if lock_ratio {
        let uniform = if side.dir_x() == 0.0 {
            sy
        } else if side.dir_y() == 0.0 {
            sx
        } else if (sy - 1.0).abs() > (sx - 1.0).abs() {
            sy
        } else {
            sx
        };
        // A collapsed axis cannot follow the other one.
        if rect.width().abs() >= EPSILON {
            sx = uniform;
        }
        if rect.height().abs() >= EPSILON {
            sy = uniform;
        }
    }

    let anchor = if symmetric {
        rect.center()
    } else {
        rect.side(side.opposite())
    };
    let anchor = anchor.to_vec2();
    Affine::translate(anchor) * Affine::scale_non_uniform(sx, sy) * Affine::translate(-anchor)
}

/// Offset that moves `rect`'s handle at `side` to `target`.
pub fn handle_delta(rect: Rect, side: Side, target: kurbo::Point) -> Vec2 {
    target - rect.side(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    const BOX: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

    fn scales(t: Affine) -> (f64, f64) {
        let c = t.as_coeffs();
        (c[0], c[3])
    }

    #[test]
    fn test_bottom_right_resize_keeps_top_left() {
        let t = resize_transform(BOX, Side::BottomRight, 10.0, 0.0, false, false);
        let (sx, sy) = scales(t);
        assert!((sx - 1.1).abs() < 1e-12);
        assert!((sy - 1.0).abs() < 1e-12);
        let tl = t * Point::new(0.0, 0.0);
        assert!(tl.x.abs() < 1e-12 && tl.y.abs() < 1e-12);
        let br = t * Point::new(100.0, 50.0);
        assert!((br.x - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_lock_ratio_scales_uniformly() {
        let t = resize_transform(BOX, Side::BottomRight, 20.0, 20.0, true, false);
        let (sx, sy) = scales(t);
        assert!((sx - sy).abs() < 1e-12);
        // Height changed relatively more: 70 / 50.
        assert!((sy - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_edge_handle_with_lock_ratio() {
        let t = resize_transform(BOX, Side::RightCenter, 50.0, 30.0, true, false);
        let (sx, sy) = scales(t);
        assert!((sx - 1.5).abs() < 1e-12);
        assert!((sy - 1.5).abs() < 1e-12);
        let anchor = t * Point::new(0.0, 25.0);
        assert!(anchor.x.abs() < 1e-9 && (anchor.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_edge_handle_ignores_cross_axis() {
        let t = resize_transform(BOX, Side::TopCenter, 40.0, -10.0, false, false);
        let (sx, sy) = scales(t);
        assert!((sx - 1.0).abs() < 1e-12);
        assert!((sy - 1.2).abs() < 1e-12);
        let bottom = t * Point::new(50.0, 50.0);
        assert!((bottom.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_resize_about_center() {
        let t = resize_transform(BOX, Side::LeftCenter, -10.0, 0.0, false, true);
        let (sx, _) = scales(t);
        assert!((sx - 1.2).abs() < 1e-12);
        let center = t * Point::new(50.0, 25.0);
        assert!((center.x - 50.0).abs() < 1e-9);
        let left = t * Point::new(0.0, 25.0);
        assert!((left.x + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_rect_stays_finite() {
        let flat = Rect::new(10.0, 10.0, 10.0, 60.0);
        for lock in [false, true] {
            let t = resize_transform(flat, Side::BottomRight, 15.0, 5.0, lock, false);
            assert!(t.as_coeffs().iter().all(|c| c.is_finite()));
            let (sx, sy) = scales(t);
            assert_eq!(sx, 1.0);
            assert!((sy - 1.1).abs() < 1e-12);
        }
    }

    #[test]
    fn test_handle_delta() {
        let d = handle_delta(BOX, Side::BottomRight, Point::new(105.0, 48.0));
        assert_eq!(d, Vec2::new(5.0, -2.0));
    }
}
