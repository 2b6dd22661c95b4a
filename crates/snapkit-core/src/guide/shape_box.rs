//! Sibling shape bounding box guide.

use super::{Guide, GuideContext, GuideKind, GuideQueryResult, GuideResult, SnapCandidate, Visual};
use crate::geometry::{RectExt, Side};
use crate::scene::SceneError;
use kurbo::{Line, Rect};

/// Snaps coordinates to the edges and centers of other shapes' bounding boxes.
///
/// Shapes in the session's exclusion set (normally the selection being
/// dragged) are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeBoxGuide;

/// Best hit on one axis and the extent of its guide line along the other axis.
#[derive(Debug, Clone, Copy)]
struct AxisHit {
    value: f64,
    delta: f64,
    lo: f64,
    hi: f64,
}

fn consider(hit: &mut Option<AxisHit>, candidate: AxisHit, snap_distance: f64) {
    match hit {
        None if candidate.delta <= snap_distance => *hit = Some(candidate),
        Some(current) if candidate.delta < current.delta => *hit = Some(candidate),
        // Same alignment from another box: grow the line to cover both.
        Some(current) if candidate.delta == current.delta && candidate.value == current.value => {
            current.lo = current.lo.min(candidate.lo);
            current.hi = current.hi.max(candidate.hi);
        }
        _ => {}
    }
}

fn scan_box(bounds: Rect, x: f64, y: f64, margin: f64, snap_distance: f64, hit_x: &mut Option<AxisHit>, hit_y: &mut Option<AxisHit>) {
    let tl = bounds.side(Side::TopLeft);
    let br = bounds.side(Side::BottomRight);
    for pivot in [tl, br, bounds.side(Side::Center)] {
        let vertical = AxisHit {
            value: pivot.x,
            delta: (x - pivot.x).abs(),
            lo: y.min(tl.y) - margin,
            hi: y.max(br.y) + margin,
        };
        consider(hit_x, vertical, snap_distance);

        let horizontal = AxisHit {
            value: pivot.y,
            delta: (y - pivot.y).abs(),
            lo: x.min(tl.x) - margin,
            hi: x.max(br.x) + margin,
        };
        consider(hit_y, horizontal, snap_distance);
    }
}

impl Guide for ShapeBoxGuide {
    fn kind(&self) -> GuideKind {
        GuideKind::ShapeBox
    }

    fn is_enabled(&self, ctx: &GuideContext<'_>) -> bool {
        ctx.scene.settings().shape_snap
    }

    fn query(&self, x: f64, y: f64, ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
        let settings = ctx.scene.settings();
        let margin = if ctx.use_margin { settings.guide_margin } else { 0.0 };

        let mut hit_x = None;
        let mut hit_y = None;
        for id in ctx.scene.shapes() {
            if ctx.exclusions.contains(id) {
                continue;
            }
            let bounds = match ctx.scene.shape_bbox(id) {
                Ok(bounds) => bounds.abs(),
                Err(SceneError::NoGeometry(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            if bounds.is_degenerate() {
                continue;
            }
            scan_box(bounds, x, y, margin, settings.snap_distance, &mut hit_x, &mut hit_y);
        }

        Ok(GuideQueryResult {
            x: hit_x.map(|h| {
                SnapCandidate::new(h.value, x)
                    .with_visual(Visual::Line(Line::new((h.value, h.lo), (h.value, h.hi))))
            }),
            y: hit_y.map(|h| {
                SnapCandidate::new(h.value, y)
                    .with_visual(Visual::Line(Line::new((h.lo, h.value), (h.hi, h.value))))
            }),
        })
    }
}
