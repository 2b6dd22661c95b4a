//! Page edge guide.

use super::{Guide, GuideContext, GuideKind, GuideQueryResult, GuideResult, SnapCandidate, Visual};
use crate::geometry::{RectExt, Side};
use crate::scene::{ElementId, PageGeometry};
use kurbo::{Line, Point, Rect};

/// Snaps coordinates to page edges, page centers and page margins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageGuide;

/// A pivot of a page and whether it is the page center.
fn page_pivots(page: &PageGeometry) -> Vec<(Point, bool)> {
    let bounds = page.bounds;
    let mut pivots = vec![
        (bounds.side(Side::TopLeft), false),
        (bounds.side(Side::BottomRight), false),
        (bounds.side(Side::Center), true),
    ];
    if page.margin > 0.0 {
        let m = page.margin;
        let inner = bounds.expanded(-m, -m, -m, -m);
        if inner.width() > 0.0 && inner.height() > 0.0 {
            pivots.push((inner.side(Side::TopLeft), false));
            pivots.push((inner.side(Side::BottomRight), false));
        }
    }
    pivots
}

/// Replace `current` only with a strictly closer candidate in range.
fn keep_nearest(current: &mut Option<SnapCandidate>, candidate: SnapCandidate, snap_distance: f64) {
    let Some(delta) = candidate.delta else {
        return;
    };
    if delta > snap_distance {
        return;
    }
    if current.and_then(|c| c.delta).is_none_or(|best| delta < best) {
        *current = Some(candidate);
    }
}

fn snap_to_page(bounds: Rect, pivots: &[(Point, bool)], x: f64, y: f64, snap_distance: f64, result: &mut GuideQueryResult) {
    for &(pivot, is_center) in pivots {
        let mut candidate_x = SnapCandidate::new(pivot.x, x);
        let mut candidate_y = SnapCandidate::new(pivot.y, y);
        if is_center {
            candidate_x.visual = Visual::Line(Line::new((pivot.x, bounds.y0), (pivot.x, bounds.y1)));
            candidate_y.visual = Visual::Line(Line::new((bounds.x0, pivot.y), (bounds.x1, pivot.y)));
        }
        keep_nearest(&mut result.x, candidate_x, snap_distance);
        keep_nearest(&mut result.y, candidate_y, snap_distance);
    }
}

impl Guide for PageGuide {
    fn kind(&self) -> GuideKind {
        GuideKind::PageEdge
    }

    fn is_enabled(&self, ctx: &GuideContext<'_>) -> bool {
        ctx.scene.settings().page_snap
    }

    fn query(&self, x: f64, y: f64, ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
        let settings = ctx.scene.settings();
        let pages: Vec<ElementId> = if settings.single_page {
            ctx.scene.active_page().into_iter().collect()
        } else {
            ctx.scene.pages()
        };

        let mut result = GuideQueryResult::default();
        for id in pages {
            if ctx.exclusions.contains(id) {
                continue;
            }
            let page = ctx.scene.page_geometry(id)?;
            if page.bounds.is_zero_area() {
                continue;
            }
            let pivots = page_pivots(&page);
            snap_to_page(page.bounds, &pivots, x, y, settings.snap_distance, &mut result);
        }
        Ok(result)
    }
}
