//! Snap zone indicators around a bounding box.
//!
//! When the pointer hovers near a box, two short crossing lines mark the
//! anchor (corner, edge center or center) that a drag from there would snap.

use crate::geometry::{RectExt, Side};
use kurbo::{Line, Point, Rect};

/// Indicator length along one axis for a box of the given extent.
fn indicator_length(extent: f64, max_length: f64) -> f64 {
    if extent > max_length * 2.0 {
        max_length
    } else if extent > max_length {
        extent / 2.0
    } else {
        extent
    }
}

/// Horizontal and vertical indicator lines for the side of `bbox` closest to
/// `location`.
///
/// Returns `None` when the box is empty or the location is farther than
/// `pick_distance` from it. Lines stay inside the box: at left/top anchors
/// they start at the anchor, at right/bottom anchors they end at it, and at
/// middle anchors they are centered on it.
pub fn bbox_snap_zones(bbox: Rect, location: Point, pick_distance: f64, max_length: f64) -> Option<[Line; 2]> {
    if !bbox.is_finite() || !location.is_finite() {
        return None;
    }
    let bbox = bbox.abs();
    if bbox.is_degenerate() {
        return None;
    }
    let d = pick_distance.max(0.0);
    if !bbox.expanded(d, d, d, d).contains_inclusive(location) {
        return None;
    }

    let side = bbox.closest_side(location);
    let anchor = bbox.side(side);

    let h_len = indicator_length(bbox.width(), max_length);
    let x0 = match side.dir_x() {
        dir if dir < 0.0 => bbox.x0,
        dir if dir > 0.0 => anchor.x - h_len,
        _ => anchor.x - h_len / 2.0,
    };
    let horizontal = Line::new((x0, anchor.y), (x0 + h_len, anchor.y));

    let v_len = indicator_length(bbox.height(), max_length);
    let y0 = match side.dir_y() {
        dir if dir < 0.0 => bbox.y0,
        dir if dir > 0.0 => anchor.y - v_len,
        _ => anchor.y - v_len / 2.0,
    };
    let vertical = Line::new((anchor.x, y0), (anchor.x, y0 + v_len));

    log::trace!("Snap zone at {:?} for {:?}", side, location);
    Some([horizontal, vertical])
}

/// The side a snap zone would be drawn for, if any.
pub fn snap_zone_side(bbox: Rect, location: Point, pick_distance: f64) -> Option<Side> {
    let bbox = bbox.abs();
    let d = pick_distance.max(0.0);
    (!bbox.is_degenerate() && bbox.expanded(d, d, d, d).contains_inclusive(location))
        .then(|| bbox.closest_side(location))
}
