//! Replays a recorded gesture through the transform box and guide registry.

use crate::ReplayError;
use crate::gesture::Gesture;
use kurbo::{Line, Point, Rect};
use serde::Serialize;
use snapkit_core::{
    GuideRegistry, PartId, PartInfo, RectExt, SceneSnapshot, Side, TransformBox, TransformHandle,
    snap_zone_side,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Outcome of one pointer move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub end: Point,
    /// Affine coefficients of the preview transform.
    pub transform: [f64; 6],
    /// Guide visuals to paint for this move.
    pub visuals: Vec<Line>,
}

/// Outcome of a whole gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub part: PartId,
    pub selection_bbox: Rect,
    pub steps: Vec<StepReport>,
    /// Areas the guide registry asked to repaint, in order.
    pub invalidations: Vec<Rect>,
    /// Rotation center after the last transform was committed.
    pub final_center: Point,
}

/// Snap zone indicators for a hover position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub side: Side,
    pub anchor: Point,
    pub lines: [Line; 2],
}

/// Run `gesture` against `scene`.
pub fn replay(scene: &SceneSnapshot, gesture: &Gesture) -> Result<ReplayReport, ReplayError> {
    let bbox = scene
        .selection_bbox(&gesture.selection)?
        .ok_or(ReplayError::EmptySelection)?;
    let mut tb = TransformBox::new(bbox, gesture.center);
    let view = gesture.view_transform();

    let part = match gesture.part {
        Some(id) => PartInfo::new(PartId::from_raw(id, gesture.part_data)?),
        None => tb
            .part_info_at(view * gesture.press, view, gesture.tolerance)
            .ok_or_else(|| ReplayError::Usage(format!("Press point {:?} is not finite", gesture.press)))?,
    };
    log::info!("Replaying {} move(s) on {:?}", gesture.moves.len(), part.id);

    let invalidations = Rc::new(RefCell::new(Vec::new()));
    let sink = invalidations.clone();
    let mut registry = GuideRegistry::new();
    registry.set_invalidation_listener(move |area| sink.borrow_mut().push(area));
    registry.set_suppressed(gesture.suppress_guides);

    tb.hide();
    let mut steps = Vec::with_capacity(gesture.moves.len());
    for &end in &gesture.moves {
        registry.use_exclusions(gesture.selection.iter().copied());
        registry.begin_map();
        let result = tb.calculate_transformation(
            &part,
            gesture.press,
            end,
            &mut registry.snapper(scene),
            gesture.modifiers,
        );
        // Close the session before bailing out so exclusions do not leak.
        registry.finish_map();
        let transform = result?;

        if part.id == PartId::Handle(TransformHandle::RotationCenter) {
            tb.set_center_transform(Some(transform));
        } else {
            tb.set_transform(Some(transform));
        }
        log::debug!("Move to {:?}: {:?}", end, transform);
        steps.push(StepReport {
            end,
            transform: transform.as_coeffs(),
            visuals: registry.take_flushed_visuals(),
        });
    }
    tb.show();
    tb.apply_center_transform();

    let invalidations = invalidations.borrow().clone();
    Ok(ReplayReport {
        part: part.id,
        selection_bbox: bbox,
        steps,
        invalidations,
        final_center: tb.center(),
    })
}

/// Snap zone indicators for the pointer at `location` near `bbox`.
pub fn zones(scene: &SceneSnapshot, bbox: Rect, location: Point) -> Option<ZoneReport> {
    let registry = GuideRegistry::new();
    let lines = registry.bbox_snap_zones(scene, bbox, location)?;
    let side = snap_zone_side(bbox, location, scene.settings.pick_distance)?;
    Some(ZoneReport {
        side,
        anchor: bbox.abs().side(side),
        lines,
    })
}
