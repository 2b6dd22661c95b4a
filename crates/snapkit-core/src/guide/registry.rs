//! Ordered guide collection and the snapping passes built on top of it.

use super::{
    Exclusions, GridGuide, Guide, GuideContext, GuideKind, GuideQueryResult, MIN_HINT_LENGTH,
    PageGuide, PointMapper, Session, ShapeBoxGuide, SnapCandidate, UnitGuide, Visual,
};
use crate::geometry::{RectExt, Side};
use crate::scene::{ElementId, SceneGeometry};
use crate::snap_zone;
use kurbo::{Line, Point, Rect, Vec2};
use std::fmt;

/// Callback receiving scene areas that must be repainted.
type InvalidationListener = Box<dyn FnMut(Rect)>;

/// Winning candidate of the rect pass, with the guide and pivot it came from.
#[derive(Debug, Clone, Copy)]
struct PivotHit {
    candidate: SnapCandidate,
    guide: usize,
    pivot: usize,
}

/// Keep the first hit; later hits only replace it when they come from the
/// same guide and are strictly closer.
fn keep_closer(slot: &mut Option<PivotHit>, hit: PivotHit) {
    match slot {
        None => *slot = Some(hit),
        Some(current) if current.guide == hit.guide => {
            if let (Some(old), Some(new)) = (current.candidate.delta, hit.candidate.delta) {
                if new < old {
                    *slot = Some(hit);
                }
            }
        }
        _ => {}
    }
}

fn rect_pivots(rect: Rect) -> [Point; 3] {
    [
        rect.side(Side::TopLeft),
        rect.side(Side::BottomRight),
        rect.side(Side::Center),
    ]
}

/// Check if a hint line between two points is long enough to be seen.
fn is_visible_hint(from: Point, to: Point) -> bool {
    (from.x - to.x).abs() >= MIN_HINT_LENGTH || (from.y - to.y).abs() >= MIN_HINT_LENGTH
}

fn query_guide(guide: &dyn Guide, point: Point, ctx: &GuideContext<'_>) -> Option<GuideQueryResult> {
    match guide.query(point.x, point.y, ctx) {
        Ok(result) => Some(result),
        Err(e) => {
            log::warn!("{:?} guide failed at {:?}, skipping: {}", guide.kind(), point, e);
            None
        }
    }
}

/// The guides of one scene, queried in priority order, plus the state of
/// the current mapping session.
pub struct GuideRegistry {
    guides: Vec<Box<dyn Guide>>,
    session: Session,
    suppressed: bool,
    invalidation_listener: Option<InvalidationListener>,
}

impl Default for GuideRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GuideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideRegistry")
            .field("guides", &self.guide_kinds())
            .field("session", &self.session)
            .field("suppressed", &self.suppressed)
            .field("has_listener", &self.invalidation_listener.is_some())
            .finish()
    }
}

impl GuideRegistry {
    /// Create a registry with the standard guides: shape boxes, pages,
    /// grid and unit rounding, in that priority.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.add_guide(Box::new(ShapeBoxGuide));
        registry.add_guide(Box::new(PageGuide));
        registry.add_guide(Box::new(GridGuide));
        registry.add_guide(Box::new(UnitGuide));
        registry
    }

    /// Create a registry without any guide.
    pub fn empty() -> Self {
        Self {
            guides: Vec::new(),
            session: Session::new(),
            suppressed: false,
            invalidation_listener: None,
        }
    }

    /// Append a guide with the lowest priority so far.
    pub fn add_guide(&mut self, guide: Box<dyn Guide>) {
        self.guides.push(guide);
    }

    pub fn guide_kinds(&self) -> Vec<GuideKind> {
        self.guides.iter().map(|g| g.kind()).collect()
    }

    /// Temporarily disable alignment guides (the unit guide keeps rounding).
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Register the callback that repaints areas touched by guide visuals.
    pub fn set_invalidation_listener(&mut self, listener: impl FnMut(Rect) + 'static) {
        self.invalidation_listener = Some(Box::new(listener));
    }

    /// Exclude elements (usually the selection) from snapping until the
    /// current session finishes.
    pub fn use_exclusions(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.session.exclusions_mut().use_exclusions(ids);
    }

    pub fn clear_exclusions(&mut self) {
        self.session.exclusions_mut().clear();
    }

    pub fn exclusions(&self) -> &Exclusions {
        self.session.exclusions()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Open a mapping session. Calls may nest.
    pub fn begin_map(&mut self) {
        if !self.session.is_active() {
            log::debug!("Guide session started");
        }
        self.session.begin();
    }

    /// Close a mapping session. The outermost call flushes the visuals and
    /// requests a repaint of the old and new visual areas.
    pub fn finish_map(&mut self) {
        let was_active = self.session.is_active();
        let area = self.session.finish();
        if was_active && !self.session.is_active() {
            log::debug!(
                "Guide session finished with {} visual(s)",
                self.session.flushed().len()
            );
        }
        if let Some(area) = area {
            self.invalidate(area);
        }
    }

    fn invalidate(&mut self, area: Rect) {
        if area.is_degenerate() {
            return;
        }
        if let Some(listener) = self.invalidation_listener.as_mut() {
            log::debug!("Invalidating guide area {:?}", area);
            listener(area);
        }
    }

    /// Visuals of the last finished session, for painting. Empties the buffer.
    pub fn take_flushed_visuals(&mut self) -> Vec<Line> {
        self.session.take_flushed()
    }

    fn context<'a>(&'a self, scene: &'a dyn SceneGeometry, use_margin: bool) -> GuideContext<'a> {
        GuideContext {
            scene,
            exclusions: self.session.exclusions(),
            use_margin,
            suppressed: self.suppressed,
        }
    }

    /// Snap a point.
    ///
    /// Each axis is taken from the first guide, in priority order, that
    /// proposes a value for it. With `detail_only` set only fine-grained
    /// guides (grid and unit) take part.
    pub fn map_point(&mut self, scene: &dyn SceneGeometry, point: Point, detail_only: bool) -> Point {
        let (x, y) = {
            let ctx = self.context(scene, true);
            let mut x: Option<SnapCandidate> = None;
            let mut y: Option<SnapCandidate> = None;
            for guide in &self.guides {
                if x.is_some() && y.is_some() {
                    break;
                }
                if !guide.is_mapping_allowed(&ctx, detail_only) {
                    continue;
                }
                let Some(result) = query_guide(guide.as_ref(), point, &ctx) else {
                    continue;
                };
                if x.is_none() {
                    x = result.x;
                }
                if y.is_none() {
                    y = result.y;
                }
            }
            (x, y)
        };

        let mapped = Point::new(
            x.map_or(point.x, |c| c.value),
            y.map_or(point.y, |c| c.value),
        );

        // An already aligned point needs no feedback.
        for candidate in [x, y].into_iter().flatten().filter(|c| !c.is_exact()) {
            match candidate.visual {
                Visual::Line(line) => self.session.record(line),
                Visual::Target(target) if is_visible_hint(mapped, target) => {
                    self.session.record(Line::new(mapped, target));
                }
                _ => {}
            }
        }

        log::trace!("map_point {:?} -> {:?}", point, mapped);
        mapped
    }

    /// Snap a rectangle by its top-left, bottom-right and center pivots.
    ///
    /// The first pass picks the translation. If the rect moves, a second pass
    /// over the shifted pivots collects every exact alignment as feedback.
    pub fn map_rect(&mut self, scene: &dyn SceneGeometry, rect: Rect) -> Rect {
        let normalized = rect.abs();
        let pivots = rect_pivots(normalized);

        let (hit_x, hit_y) = {
            let ctx = self.context(scene, false);
            let mut hit_x: Option<PivotHit> = None;
            let mut hit_y: Option<PivotHit> = None;
            for (guide_index, guide) in self.guides.iter().enumerate() {
                if hit_x.is_some() && hit_y.is_some() {
                    break;
                }
                if !guide.is_mapping_allowed(&ctx, false) {
                    continue;
                }
                for (pivot_index, &pivot) in pivots.iter().enumerate() {
                    let Some(result) = query_guide(guide.as_ref(), pivot, &ctx) else {
                        continue;
                    };
                    if let Some(candidate) = result.x {
                        keep_closer(&mut hit_x, PivotHit { candidate, guide: guide_index, pivot: pivot_index });
                    }
                    if let Some(candidate) = result.y {
                        keep_closer(&mut hit_y, PivotHit { candidate, guide: guide_index, pivot: pivot_index });
                    }
                }
            }
            (hit_x, hit_y)
        };

        let dx = hit_x.map_or(0.0, |h| h.candidate.value - pivots[h.pivot].x);
        let dy = hit_y.map_or(0.0, |h| h.candidate.value - pivots[h.pivot].y);
        if dx == 0.0 && dy == 0.0 {
            log::trace!("map_rect {:?} unchanged", rect);
            return rect;
        }

        let shifted = normalized + Vec2::new(dx, dy);
        self.record_exact_alignments(scene, shifted);
        log::trace!("map_rect {:?} -> {:?}", rect, shifted);
        shifted
    }

    /// Second rect pass: record the visuals of all exact alignments of
    /// `rect`, each axis from the first guide that has any.
    fn record_exact_alignments(&mut self, scene: &dyn SceneGeometry, rect: Rect) {
        let pivots = rect_pivots(rect);

        let (exact_x, exact_y) = {
            let ctx = self.context(scene, false);
            let mut exact_x: Vec<PivotHit> = Vec::new();
            let mut exact_y: Vec<PivotHit> = Vec::new();
            for (guide_index, guide) in self.guides.iter().enumerate() {
                if !exact_x.is_empty() && !exact_y.is_empty() {
                    break;
                }
                if !guide.is_mapping_allowed(&ctx, false) {
                    continue;
                }
                for (pivot_index, &pivot) in pivots.iter().enumerate() {
                    let Some(result) = query_guide(guide.as_ref(), pivot, &ctx) else {
                        continue;
                    };
                    let hit = |candidate| PivotHit { candidate, guide: guide_index, pivot: pivot_index };
                    if let Some(candidate) = result.x.filter(SnapCandidate::is_exact) {
                        if exact_x.first().is_none_or(|h| h.guide == guide_index) {
                            exact_x.push(hit(candidate));
                        }
                    }
                    if let Some(candidate) = result.y.filter(SnapCandidate::is_exact) {
                        if exact_y.first().is_none_or(|h| h.guide == guide_index) {
                            exact_y.push(hit(candidate));
                        }
                    }
                }
            }
            (exact_x, exact_y)
        };

        for hit in exact_x {
            let value = hit.candidate.value;
            match hit.candidate.visual {
                // Stretch the guide so it spans the aligned edge.
                Visual::Line(line) => {
                    let y0 = line.p0.y.min(line.p1.y).min(rect.y0);
                    let y1 = line.p0.y.max(line.p1.y).max(rect.y1);
                    self.session.record(Line::new((line.p0.x, y0), (line.p1.x, y1)));
                }
                Visual::Target(target) => {
                    let from = Point::new(value, pivots[hit.pivot].y);
                    if is_visible_hint(from, target) {
                        self.session.record(Line::new(from, target));
                    }
                }
                Visual::None => {}
            }
        }

        for hit in exact_y {
            let value = hit.candidate.value;
            match hit.candidate.visual {
                Visual::Line(line) => {
                    let x0 = line.p0.x.min(line.p1.x).min(rect.x0);
                    let x1 = line.p0.x.max(line.p1.x).max(rect.x1);
                    self.session.record(Line::new((x0, line.p0.y), (x1, line.p1.y)));
                }
                Visual::Target(target) => {
                    let from = Point::new(pivots[hit.pivot].x, value);
                    if is_visible_hint(from, target) {
                        self.session.record(Line::new(from, target));
                    }
                }
                Visual::None => {}
            }
        }
    }

    /// Snap zone indicators for a pointer near a bounding box.
    ///
    /// Returns `None` unless some alignment guide (anything but unit
    /// rounding) could snap right now.
    pub fn bbox_snap_zones(&self, scene: &dyn SceneGeometry, bbox: Rect, location: Point) -> Option<[Line; 2]> {
        let ctx = self.context(scene, true);
        let allowed = self
            .guides
            .iter()
            .any(|g| g.kind() != GuideKind::Unit && g.is_mapping_allowed(&ctx, false));
        if !allowed {
            return None;
        }
        let settings = scene.settings();
        snap_zone::bbox_snap_zones(bbox, location, settings.pick_distance, settings.visuals_length)
    }

    /// Bind the registry to a scene for use as a [`PointMapper`].
    pub fn snapper<'a>(&'a mut self, scene: &'a dyn SceneGeometry) -> Snapper<'a> {
        Snapper { registry: self, scene }
    }
}

/// A [`GuideRegistry`] bound to the scene it snaps against.
pub struct Snapper<'a> {
    registry: &'a mut GuideRegistry,
    scene: &'a dyn SceneGeometry,
}

impl Snapper<'_> {
    pub fn map_rect(&mut self, rect: Rect) -> Rect {
        self.registry.map_rect(self.scene, rect)
    }
}

impl PointMapper for Snapper<'_> {
    fn map_point(&mut self, point: Point, detail_only: bool) -> Point {
        self.registry.map_point(self.scene, point, detail_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuideError, GuideResult};
    use crate::scene::{PageGeometry, SceneError, SceneSnapshot};
    use crate::settings::{SnapSettings, UnitSnap};
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    /// Snaps x to a fixed value and points at a target.
    struct TargetGuide {
        value: f64,
        target: Point,
    }

    impl Guide for TargetGuide {
        fn kind(&self) -> GuideKind {
            GuideKind::Grid
        }

        fn is_enabled(&self, _ctx: &GuideContext<'_>) -> bool {
            true
        }

        fn query(&self, x: f64, _y: f64, _ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
            Ok(GuideQueryResult {
                x: Some(SnapCandidate::new(self.value, x).with_visual(Visual::Target(self.target))),
                y: None,
            })
        }
    }

    struct FailingGuide;

    impl Guide for FailingGuide {
        fn kind(&self) -> GuideKind {
            GuideKind::ShapeBox
        }

        fn is_enabled(&self, _ctx: &GuideContext<'_>) -> bool {
            true
        }

        fn query(&self, _x: f64, _y: f64, _ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
            Err(GuideError::Scene(SceneError::NotFound(Uuid::nil())))
        }
    }

    /// A scene that still lists a shape after it was deleted.
    struct StaleScene {
        inner: SceneSnapshot,
        deleted: ElementId,
    }

    impl SceneGeometry for StaleScene {
        fn settings(&self) -> &SnapSettings {
            self.inner.settings()
        }

        fn pages(&self) -> Vec<ElementId> {
            self.inner.pages()
        }

        fn active_page(&self) -> Option<ElementId> {
            self.inner.active_page()
        }

        fn page_geometry(&self, id: ElementId) -> Result<PageGeometry, SceneError> {
            self.inner.page_geometry(id)
        }

        fn shapes(&self) -> Vec<ElementId> {
            let mut shapes = vec![self.deleted];
            shapes.extend(self.inner.shapes());
            shapes
        }

        fn shape_bbox(&self, id: ElementId) -> Result<Rect, SceneError> {
            self.inner.shape_bbox(id)
        }
    }

    fn page_scene() -> SceneSnapshot {
        let mut scene = SceneSnapshot::new();
        scene.add_page(Rect::new(0.0, 0.0, 200.0, 300.0), 0.0);
        scene
    }

    #[test]
    fn test_default_priority_order() {
        let registry = GuideRegistry::new();
        assert_eq!(
            registry.guide_kinds(),
            vec![GuideKind::ShapeBox, GuideKind::PageEdge, GuideKind::Grid, GuideKind::Unit]
        );
    }

    #[test]
    fn test_no_guide_is_identity() {
        let scene = SceneSnapshot::with_settings(SnapSettings::disabled());
        let mut registry = GuideRegistry::new();
        let p = Point::new(13.37, -4.2);
        assert_eq!(registry.map_point(&scene, p, false), p);
        let r = Rect::new(1.3, 2.7, 40.1, 50.9);
        assert_eq!(registry.map_rect(&scene, r), r);

        let mut registry = GuideRegistry::empty();
        assert_eq!(registry.map_point(&page_scene(), p, false), p);
    }

    #[test]
    fn test_first_guide_wins_each_axis() {
        let scene = page_scene();
        let mut registry = GuideRegistry::new();
        // x from the page edge, y from unit rounding.
        let mapped = registry.map_point(&scene, Point::new(3.4, 47.3), false);
        assert_eq!(mapped, Point::new(0.0, 47.0));
    }

    #[test]
    fn test_exact_alignment_is_idempotent() {
        let mut scene = SceneSnapshot::new();
        scene.add_shape(Rect::new(100.0, 100.0, 200.0, 150.0));
        let mut registry = GuideRegistry::new();
        registry.begin_map();
        let p = Point::new(100.0, 40.0);
        assert_eq!(registry.map_point(&scene, p, false), p);
        assert!(registry.session().visuals().is_empty());

        // One unit off the edge the same guide line is shown.
        assert_eq!(registry.map_point(&scene, Point::new(101.0, 40.0), false), p);
        assert_eq!(
            registry.session().visuals(),
            &[Line::new((100.0, 20.0), (100.0, 170.0))]
        );
        registry.finish_map();
    }

    #[test]
    fn test_map_rect_unchanged_keeps_orientation() {
        let scene = SceneSnapshot::with_settings(SnapSettings::disabled());
        let mut registry = GuideRegistry::new();
        let flipped = Rect::new(40.5, 30.5, 10.5, 5.5);
        assert_eq!(registry.map_rect(&scene, flipped), flipped);
    }

    #[test]
    fn test_detail_only_uses_fine_guides() {
        let scene = page_scene();
        let mut registry = GuideRegistry::new();
        let mapped = registry.map_point(&scene, Point::new(3.4, 47.3), true);
        assert_eq!(mapped, Point::new(3.0, 47.0));
    }

    #[test]
    fn test_suppression_keeps_unit_rounding() {
        let scene = page_scene();
        let mut registry = GuideRegistry::new();
        registry.set_suppressed(true);
        assert!(registry.is_suppressed());
        let mapped = registry.map_point(&scene, Point::new(3.4, 47.3), false);
        assert_eq!(mapped, Point::new(3.0, 47.0));
    }

    #[test]
    fn test_session_pairing() {
        let scene = page_scene();
        let mut registry = GuideRegistry::new();
        registry.begin_map();
        registry.begin_map();
        registry.map_point(&scene, Point::new(101.0, 7.0), false);
        registry.finish_map();
        assert_eq!(registry.session().visuals().len(), 1);
        registry.finish_map();
        assert_eq!(registry.session().depth(), 0);
        assert!(registry.session().visuals().is_empty());
        assert_eq!(registry.take_flushed_visuals().len(), 1);
    }

    #[test]
    fn test_target_hint_needs_minimum_length() {
        let scene = SceneSnapshot::with_settings(SnapSettings::disabled());
        let mut registry = GuideRegistry::empty();
        registry.add_guide(Box::new(TargetGuide {
            value: 10.0,
            target: Point::new(10.0, 51.0),
        }));
        registry.begin_map();
        assert_eq!(registry.map_point(&scene, Point::new(11.0, 50.0), false), Point::new(10.0, 50.0));
        assert!(registry.session().visuals().is_empty());
        registry.finish_map();

        let mut registry = GuideRegistry::empty();
        registry.add_guide(Box::new(TargetGuide {
            value: 10.0,
            target: Point::new(10.0, 80.0),
        }));
        registry.begin_map();
        registry.map_point(&scene, Point::new(11.0, 50.0), false);
        assert_eq!(
            registry.session().visuals(),
            &[Line::new((10.0, 50.0), (10.0, 80.0))]
        );
        registry.finish_map();
    }

    #[test]
    fn test_map_rect_two_phase() {
        let mut scene = SceneSnapshot::new();
        scene.add_shape(Rect::new(100.0, 100.0, 200.0, 150.0));
        let mut registry = GuideRegistry::new();
        registry.begin_map();
        let mapped = registry.map_rect(&scene, Rect::new(203.0, 97.0, 253.0, 147.0));
        assert_eq!(mapped, Rect::new(200.0, 100.0, 250.0, 150.0));

        // Both the decisive and the secondary alignments are shown.
        let visuals = registry.session().visuals().to_vec();
        assert_eq!(visuals.len(), 4);
        assert!(visuals.contains(&Line::new((200.0, 100.0), (200.0, 150.0))));
        assert!(visuals.contains(&Line::new((100.0, 100.0), (250.0, 100.0))));
        assert!(visuals.contains(&Line::new((100.0, 150.0), (250.0, 150.0))));
        assert!(visuals.contains(&Line::new((100.0, 125.0), (250.0, 125.0))));
        registry.finish_map();
    }

    #[test]
    fn test_map_rect_smallest_delta_within_guide() {
        let mut scene = SceneSnapshot::new();
        scene.add_shape(Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut registry = GuideRegistry::new();
        // tl.x is 4 off the left edge, br.x only 1 off the right edge.
        let mapped = registry.map_rect(&scene, Rect::new(-4.0, 300.0, 101.0, 320.0));
        assert_eq!(mapped, Rect::new(-5.0, 300.0, 100.0, 320.0));
    }

    #[test]
    fn test_map_rect_without_session_records_nothing() {
        let mut scene = SceneSnapshot::new();
        scene.add_shape(Rect::new(100.0, 100.0, 200.0, 150.0));
        let mut registry = GuideRegistry::new();
        registry.map_rect(&scene, Rect::new(203.0, 97.0, 253.0, 147.0));
        assert!(registry.session().visuals().is_empty());
    }

    #[test]
    fn test_failing_guide_is_skipped() {
        let scene = page_scene();
        let mut registry = GuideRegistry::empty();
        registry.add_guide(Box::new(FailingGuide));
        registry.add_guide(Box::new(UnitGuide));
        assert_eq!(registry.map_point(&scene, Point::new(1.4, 1.6), false), Point::new(1.0, 2.0));
        assert_eq!(
            registry.map_rect(&scene, Rect::new(0.25, 0.25, 10.25, 10.25)),
            Rect::new(0.0, 0.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_deleted_shape_does_not_abort_snapping() {
        let mut inner = page_scene();
        inner.add_shape(Rect::new(50.0, 50.0, 60.0, 60.0));
        let scene = StaleScene {
            inner,
            deleted: Uuid::new_v4(),
        };
        let mut registry = GuideRegistry::new();
        // The shape guide fails, the page guide still catches the edge.
        let mapped = registry.map_point(&scene, Point::new(2.0, 51.0), false);
        assert_eq!(mapped, Point::new(0.0, 51.0));
    }

    #[test]
    fn test_invalidation_listener() {
        let scene = page_scene();
        let areas = Rc::new(RefCell::new(Vec::new()));
        let sink = areas.clone();
        let mut registry = GuideRegistry::new();
        registry.set_invalidation_listener(move |area| sink.borrow_mut().push(area));

        registry.begin_map();
        registry.map_point(&scene, Point::new(101.0, 7.0), false);
        registry.finish_map();
        assert_eq!(areas.borrow().as_slice(), &[Rect::new(99.0, -1.0, 101.0, 301.0)]);

        // The next session without visuals repaints the old area once.
        registry.begin_map();
        registry.finish_map();
        registry.begin_map();
        registry.finish_map();
        assert_eq!(areas.borrow().len(), 2);
    }

    #[test]
    fn test_exclusions_cleared_on_finish() {
        let mut scene = SceneSnapshot::with_settings(SnapSettings {
            unit_snap: UnitSnap::Off,
            ..SnapSettings::default()
        });
        let id = scene.add_shape(Rect::new(100.0, 100.0, 200.0, 150.0));
        let mut registry = GuideRegistry::new();

        registry.use_exclusions([id]);
        registry.begin_map();
        let p = Point::new(102.0, 102.0);
        assert_eq!(registry.map_point(&scene, p, false), p);
        registry.finish_map();
        assert!(registry.exclusions().is_empty());

        registry.begin_map();
        assert_eq!(registry.map_point(&scene, p, false), Point::new(100.0, 100.0));
        registry.finish_map();
    }

    #[test]
    fn test_snap_zones_gated_by_alignment_guides() {
        let mut settings = SnapSettings::disabled();
        settings.unit_snap = UnitSnap::Full;
        let scene = SceneSnapshot::with_settings(settings);
        let registry = GuideRegistry::new();
        let bbox = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(registry.bbox_snap_zones(&scene, bbox, Point::new(1.0, 1.0)).is_none());

        let scene = page_scene();
        assert!(registry.bbox_snap_zones(&scene, bbox, Point::new(1.0, 1.0)).is_some());
    }

    #[test]
    fn test_snapper_maps_through_registry() {
        let scene = page_scene();
        let mut registry = GuideRegistry::new();
        let mut snapper = registry.snapper(&scene);
        assert_eq!(snapper.map_point(Point::new(198.0, 4.2), false), Point::new(200.0, 0.0));
        assert_eq!(
            snapper.map_rect(Rect::new(2.0, 2.0, 12.0, 12.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0)
        );
    }
}
