//! Whole-unit rounding guide.

use super::{Guide, GuideContext, GuideKind, GuideQueryResult, GuideResult, SnapCandidate};
use crate::settings::UnitSnap;

/// Rounds coordinates to display units. This is quantization rather than
/// alignment, so it never carries a visual and always sits last.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitGuide;

impl Guide for UnitGuide {
    fn kind(&self) -> GuideKind {
        GuideKind::Unit
    }

    fn supports_detail(&self) -> bool {
        true
    }

    fn honors_suppression(&self) -> bool {
        false
    }

    fn is_enabled(&self, ctx: &GuideContext<'_>) -> bool {
        ctx.scene.settings().unit_snap != UnitSnap::Off
    }

    fn query(&self, x: f64, y: f64, ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
        let mode = ctx.scene.settings().unit_snap;
        Ok(GuideQueryResult {
            x: mode.round(x).map(|v| SnapCandidate::new(v, x)),
            y: mode.round(y).map(|v| SnapCandidate::new(v, y)),
        })
    }
}
