//! Regular lattice guide.

use super::{Guide, GuideContext, GuideKind, GuideQueryResult, GuideResult, SnapCandidate};

/// Snaps coordinates to the scene grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridGuide;

fn snap_to_spacing(value: f64, spacing: f64) -> Option<f64> {
    (spacing > 0.0 && spacing.is_finite()).then(|| (value / spacing).round() * spacing)
}

impl Guide for GridGuide {
    fn kind(&self) -> GuideKind {
        GuideKind::Grid
    }

    fn supports_detail(&self) -> bool {
        true
    }

    fn is_enabled(&self, ctx: &GuideContext<'_>) -> bool {
        ctx.scene.settings().grid_active
    }

    fn query(&self, x: f64, y: f64, ctx: &GuideContext<'_>) -> GuideResult<GuideQueryResult> {
        let settings = ctx.scene.settings();
        Ok(GuideQueryResult {
            x: snap_to_spacing(x, settings.grid_size_x).map(|v| SnapCandidate::new(v, x)),
            y: snap_to_spacing(y, settings.grid_size_y).map(|v| SnapCandidate::new(v, y)),
        })
    }
}
