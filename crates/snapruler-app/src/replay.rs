//! Replays a recorded gesture script through a drawing session.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use snapruler_core::{DrawingSession, DrawingState, Instant, SessionConfig, SessionError, ToolKind};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading or replaying a script.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: SessionError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One recorded input or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Cancel,
    /// Advance the clock, letting a pending long-press fire.
    Wait { ms: u64 },
    Undo,
    Redo,
    ToggleSnap,
    Scale { value: f64 },
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// What the replay prints.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub state: DrawingState,
    pub can_undo: bool,
    pub can_redo: bool,
    pub content_bounds: Option<Rect>,
    /// HUD text after each step that changed it.
    pub hud_log: Vec<String>,
}

pub fn load_config(path: &Path) -> Result<SessionConfig, AppError> {
    let text = read(path)?;
    SessionConfig::from_json(&text).map_err(|e| match e {
        SessionError::Json(source) => AppError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::Session(other),
    })
}

pub fn load_script(path: &Path) -> Result<Script, AppError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| AppError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run every step against a fresh session built from `config`.
pub fn run_script(config: SessionConfig, script: &Script) -> Result<Report, AppError> {
    let mut session = DrawingSession::with_config(config)?;
    let start = Instant::now();
    let mut elapsed = Duration::ZERO;
    let mut hud_log = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        let now = start + elapsed;
        let hud_before = session.hud_text().map(str::to_owned);
        match *step {
            Step::Tool { tool } => session.select_tool(tool),
            Step::Down { x, y } => session.pointer_down(Point::new(x, y), now),
            Step::Move { x, y } => session.pointer_move(Point::new(x, y)),
            Step::Up { x, y } => session.pointer_up(Point::new(x, y)),
            Step::Cancel => session.cancel_gesture(),
            Step::Wait { ms } => {
                elapsed += Duration::from_millis(ms);
                if session.tick(start + elapsed) {
                    log::debug!("long press fired at step {}", index);
                }
            }
            Step::Undo => {
                session.undo();
            }
            Step::Redo => {
                session.redo();
            }
            Step::ToggleSnap => session.toggle_snap_enabled(),
            Step::Scale { value } => session
                .set_scale(value)
                .map_err(|source| AppError::Step { index, source })?,
        }
        if let Some(hud) = session.hud_text() {
            if hud_before.as_deref() != Some(hud) {
                hud_log.push(hud.to_owned());
            }
        }
    }

    log::info!("replayed {} steps, {} shapes", script.steps.len(), session.shapes().len());
    Ok(Report {
        state: session.state().clone(),
        can_undo: session.can_undo(),
        can_redo: session.can_redo(),
        content_bounds: session.content_bounds(),
        hud_log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snapruler_core::{Circle, LengthUnit, Segment, Shape};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_replay_ruler_and_compass() {
        let file = write_temp(
            r#"{ "steps": [
                { "op": "tool", "tool": "Ruler" },
                { "op": "down", "x": 0.0, "y": 0.0 },
                { "op": "move", "x": 100.0, "y": 1.5 },
                { "op": "up", "x": 100.0, "y": 1.5 },
                { "op": "tool", "tool": "Compass" },
                { "op": "down", "x": 50.0, "y": 50.0 },
                { "op": "move", "x": 50.0, "y": 70.0 },
                { "op": "up", "x": 50.0, "y": 80.0 }
            ] }"#,
        );
        let script = load_script(file.path()).unwrap();
        let report = run_script(SessionConfig::default(), &script).unwrap();

        assert_eq!(
            report.state.shapes,
            vec![
                Shape::Segment(Segment::new(Point::new(0.0, 0.0), Point::new(120.0, 0.0))),
                Shape::Circle(Circle::new(Point::new(50.0, 50.0), 30.0)),
            ]
        );
        assert!(report.can_undo);
        assert!(report.hud_log.contains(&"Angle: 0.0°, Len: 120.0 px".to_string()));
        assert!(report.hud_log.contains(&"R=20.0 px".to_string()));
    }

    #[test]
    fn test_wait_fires_long_press() {
        let script = Script {
            steps: vec![
                Step::Down { x: 0.0, y: 0.0 },
                Step::Wait { ms: 700 },
            ],
        };
        let report = run_script(SessionConfig::default(), &script).unwrap();
        assert!(!report.state.snap_enabled);

        let mut finished = script.clone();
        finished.steps.push(Step::Up { x: 0.0, y: 0.0 });
        let report = run_script(SessionConfig::default(), &finished).unwrap();
        assert!(report.state.snap_enabled);
    }

    #[test]
    fn test_undo_redo_steps() {
        let script = Script {
            steps: vec![
                Step::Tool { tool: ToolKind::Compass },
                Step::Down { x: 0.0, y: 0.0 },
                Step::Up { x: 10.0, y: 0.0 },
                Step::Undo,
            ],
        };
        let report = run_script(SessionConfig::default(), &script).unwrap();
        assert!(report.state.shapes.is_empty());
        assert!(report.can_redo);
        assert!(report.content_bounds.is_none());
    }

    #[test]
    fn test_bad_scale_reports_step() {
        let script = Script {
            steps: vec![Step::Undo, Step::Scale { value: -1.0 }],
        };
        let err = run_script(SessionConfig::default(), &script).unwrap_err();
        assert!(matches!(err, AppError::Step { index: 1, .. }));
    }

    #[test]
    fn test_load_config_from_file() {
        let file = write_temp(r#"{ "length_unit": "Centimeters" }"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Centimeters);

        let file = write_temp(r#"{ "history_capacity": 0 }"#);
        assert!(matches!(
            load_config(file.path()),
            Err(AppError::Session(SessionError::InvalidConfig(_)))
        ));

        let file = write_temp("not json");
        assert!(matches!(load_config(file.path()), Err(AppError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = load_script(Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
