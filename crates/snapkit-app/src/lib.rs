//! snapkit Application
//!
//! Command line shell around the snapping engine: replays recorded drag
//! gestures and prints what the editor would preview and repaint.

mod gesture;
mod replay;

pub use gesture::Gesture;
pub use replay::{ReplayReport, StepReport, ZoneReport, replay, zones};

use kurbo::{Point, Rect};
use snapkit_core::{SceneError, SceneSnapshot, SettingsError, SnapSettings, TransformError};
use std::path::Path;
use thiserror::Error;

const USAGE: &str = "snapkit replay <scene.json> <gesture.json> [settings.json]\n       \
                     snapkit zones <scene.json> <x0> <y0> <x1> <y1> <px> <py>";

/// Application errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Selection has no geometry")]
    EmptySelection,
}

fn parse_number(arg: &str) -> Result<f64, ReplayError> {
    arg.parse()
        .map_err(|_| ReplayError::Usage(format!("Not a number: {arg}")))
}

fn load_scene(scene_path: &str, settings_path: Option<&String>) -> Result<SceneSnapshot, ReplayError> {
    let mut scene = SceneSnapshot::load(Path::new(scene_path))?;
    if let Some(path) = settings_path {
        scene.settings = SnapSettings::load(Path::new(path))?;
        log::debug!("Settings overridden from {path}");
    }
    Ok(scene)
}

/// Run a command line and return its JSON output.
pub fn run(args: &[String]) -> Result<String, ReplayError> {
    match args {
        [cmd, scene, gesture, rest @ ..] if cmd == "replay" && rest.len() <= 1 => {
            let scene = load_scene(scene, rest.first())?;
            let gesture = Gesture::load(Path::new(gesture))?;
            let report = replay(&scene, &gesture)?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
        [cmd, scene, coords @ ..] if cmd == "zones" && coords.len() == 6 => {
            let scene = load_scene(scene, None)?;
            let n = coords
                .iter()
                .map(|c| parse_number(c))
                .collect::<Result<Vec<_>, _>>()?;
            let bbox = Rect::new(n[0], n[1], n[2], n[3]);
            let report = zones(&scene, bbox, Point::new(n[4], n[5]));
            Ok(serde_json::to_string_pretty(&report)?)
        }
        _ => Err(ReplayError::Usage(USAGE.to_string())),
    }
}
