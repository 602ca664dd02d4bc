//! Drafting instruments and the per-gesture state machine that drives them.

use crate::geometry::{angle_degrees, distance};
use crate::hud::{HudFormat, angle_string};
use crate::shapes::{Circle, Freehand, Preview, Segment, Shape};
use crate::snap::{AngleSet, SnapEngine};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Ruler,
    SetSquare45,
    SetSquare3060,
    Protractor,
    Compass,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pen,
        ToolKind::Ruler,
        ToolKind::SetSquare45,
        ToolKind::SetSquare3060,
        ToolKind::Protractor,
        ToolKind::Compass,
    ];

    /// HUD label shown when a gesture starts.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen drawing",
            ToolKind::Ruler => "Ruler",
            ToolKind::SetSquare45 => "Set square 45°",
            ToolKind::SetSquare3060 => "Set square 30/60°",
            ToolKind::Protractor => "Protractor",
            ToolKind::Compass => "Compass",
        }
    }

    /// Angles a straight-edge instrument may snap to; `None` for the others.
    pub fn angle_set(self) -> Option<AngleSet> {
        match self {
            ToolKind::Ruler => Some(AngleSet::Full),
            ToolKind::SetSquare45 => Some(AngleSet::SetSquare45),
            ToolKind::SetSquare3060 => Some(AngleSet::SetSquare3060),
            ToolKind::Pen | ToolKind::Protractor | ToolKind::Compass => None,
        }
    }

    /// Directional instruments drop the long-press timer as soon as the gesture is recognized.
    pub fn is_directional(self) -> bool {
        !matches!(self, ToolKind::Pen)
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A gesture is in progress.
    Armed {
        /// Instrument the gesture started with.
        tool: ToolKind,
        /// Press position: ruler start, protractor vertex or compass center.
        anchor: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// The gesture ended and its result was handed out; waits for
    /// [`ToolManager::finish`] once the owner has stored it.
    Committing,
}

/// Everything the state machine reads from the session on each sample.
#[derive(Debug, Clone, Copy)]
pub struct SnapContext<'a> {
    pub engine: &'a SnapEngine,
    pub shapes: &'a [Shape],
    pub scale: f64,
    pub snap_enabled: bool,
    pub hud: HudFormat,
}

/// Output of a `down` or `move` sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub preview: Option<Preview>,
    pub hud: Option<String>,
}

/// Output of an `up` sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    /// Shape to commit, if the gesture produced one.
    pub shape: Option<Shape>,
    /// HUD text to leave on screen after the gesture.
    pub hud: Option<String>,
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Accumulated points for pen strokes.
    freehand_points: Vec<Point>,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a gesture at `point` with the current tool.
    pub fn begin(&mut self, point: Point) -> Frame {
        let tool = self.current_tool;
        self.freehand_points.clear();
        if tool == ToolKind::Pen {
            self.freehand_points.push(point);
        }
        self.state = ToolState::Armed {
            tool,
            anchor: point,
            current: point,
        };
        log::debug!("{:?} gesture armed at ({:.1}, {:.1})", tool, point.x, point.y);

        Frame {
            preview: None,
            hud: Some(tool.label().to_string()),
        }
    }

    /// Feed a move sample. Returns `None` when no gesture is armed.
    pub fn update(&mut self, point: Point, ctx: &SnapContext<'_>) -> Option<Frame> {
        let ToolState::Armed { tool, anchor, current } = &mut self.state else {
            return None;
        };
        *current = point;
        let (tool, anchor) = (*tool, *anchor);

        let frame = match tool {
            ToolKind::Pen => {
                self.freehand_points.push(point);
                Frame {
                    preview: Some(Preview::Freehand {
                        points: self.freehand_points.clone(),
                    }),
                    hud: Some(tool.label().to_string()),
                }
            }
            ToolKind::Ruler | ToolKind::SetSquare45 | ToolKind::SetSquare3060 => {
                let (start, end) = snap_straight_edge(tool, anchor, point, ctx);
                Frame {
                    preview: Some(Preview::Line { start, end }),
                    hud: Some(ctx.hud.measurement(start, end)),
                }
            }
            ToolKind::Protractor => Frame {
                preview: Some(Preview::Line {
                    start: anchor,
                    end: point,
                }),
                hud: Some(protractor_reading(anchor, point, ctx)),
            },
            ToolKind::Compass => {
                let radius = distance(anchor, point);
                Frame {
                    preview: Some(Preview::Circle {
                        center: anchor,
                        radius,
                    }),
                    hud: Some(ctx.hud.radius(radius)),
                }
            }
        };
        Some(frame)
    }

    /// End the gesture at `point`. Returns `None` when no gesture is armed.
    ///
    /// The state stays `Committing` until [`ToolManager::finish`].
    pub fn end(&mut self, point: Point, ctx: &SnapContext<'_>) -> Option<Completion> {
        let ToolState::Armed { tool, anchor, .. } = self.state else {
            return None;
        };
        self.state = ToolState::Committing;

        let completion = match tool {
            ToolKind::Pen => {
                let points = std::mem::take(&mut self.freehand_points);
                if points.len() >= 2 {
                    Completion {
                        shape: Some(Shape::Freehand(Freehand::from_points(points))),
                        hud: None,
                    }
                } else {
                    log::debug!("pen stroke with {} point(s) discarded", points.len());
                    Completion::default()
                }
            }
            ToolKind::Ruler | ToolKind::SetSquare45 | ToolKind::SetSquare3060 => {
                let (start, end) = snap_straight_edge(tool, anchor, point, ctx);
                Completion {
                    shape: Some(Shape::Segment(Segment::new(start, end))),
                    hud: None,
                }
            }
            ToolKind::Protractor => Completion {
                shape: None,
                hud: Some(protractor_reading(anchor, point, ctx)),
            },
            ToolKind::Compass => Completion {
                shape: Some(Shape::Circle(Circle::new(anchor, distance(anchor, point)))),
                hud: None,
            },
        };

        Some(completion)
    }

    /// Return to `Idle` after the completion from `end` was stored.
    pub fn finish(&mut self) {
        if self.state == ToolState::Committing {
            self.state = ToolState::Idle;
        }
    }

    /// Check if a completion is waiting to be stored.
    pub fn is_committing(&self) -> bool {
        self.state == ToolState::Committing
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.freehand_points.clear();
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Armed { .. })
    }

    /// Tool of the gesture in progress.
    pub fn active_tool(&self) -> Option<ToolKind> {
        match self.state {
            ToolState::Armed { tool, .. } => Some(tool),
            _ => None,
        }
    }

    /// Get the accumulated pen points.
    pub fn freehand_points(&self) -> &[Point] {
        &self.freehand_points
    }
}

fn snap_straight_edge(tool: ToolKind, anchor: Point, current: Point, ctx: &SnapContext<'_>) -> (Point, Point) {
    let angles = tool.angle_set().unwrap_or_default();
    ctx.engine
        .apply_with_angles(anchor, current, ctx.shapes, ctx.scale, ctx.snap_enabled, angles)
}

fn protractor_reading(vertex: Point, current: Point, ctx: &SnapContext<'_>) -> String {
    let angle = ctx
        .engine
        .snap_angle_only(angle_degrees(vertex, current), ctx.snap_enabled);
    angle_string(angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(engine: &'a SnapEngine, shapes: &'a [Shape], snap_enabled: bool) -> SnapContext<'a> {
        SnapContext {
            engine,
            shapes,
            scale: 1.0,
            snap_enabled,
            hud: HudFormat::default(),
        }
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Pen);

        tm.set_tool(ToolKind::Compass);
        assert_eq!(tm.current_tool, ToolKind::Compass);
    }

    #[test]
    fn test_pen_collects_move_samples() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();

        let frame = tm.begin(Point::new(0.0, 0.0));
        assert_eq!(frame.hud.as_deref(), Some("Pen drawing"));
        assert!(frame.preview.is_none());

        tm.update(Point::new(1.0, 1.0), &c);
        let frame = tm.update(Point::new(2.0, 3.0), &c).unwrap();
        assert_eq!(
            frame.preview,
            Some(Preview::Freehand {
                points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 3.0)],
            })
        );

        let done = tm.end(Point::new(2.0, 3.0), &c).unwrap();
        match done.shape {
            Some(Shape::Freehand(f)) => assert_eq!(f.len(), 3),
            other => panic!("expected freehand, got {other:?}"),
        }
        assert!(!tm.is_active());
        assert!(tm.freehand_points().is_empty());
    }

    #[test]
    fn test_pen_tap_is_discarded() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        tm.begin(Point::new(5.0, 5.0));
        let done = tm.end(Point::new(5.0, 5.0), &c).unwrap();
        assert_eq!(done, Completion::default());
    }

    #[test]
    fn test_end_holds_committing_until_finish() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Compass);
        tm.begin(Point::ZERO);
        assert!(tm.end(Point::new(10.0, 0.0), &c).is_some());

        assert_eq!(tm.state, ToolState::Committing);
        assert!(tm.is_committing());
        assert!(!tm.is_active());
        assert!(tm.end(Point::new(20.0, 0.0), &c).is_none());

        tm.finish();
        assert_eq!(tm.state, ToolState::Idle);
    }

    #[test]
    fn test_ruler_commits_snapped_segment() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Ruler);

        tm.begin(Point::new(0.0, 0.0));
        let frame = tm.update(Point::new(100.0, 1.5), &c).unwrap();
        assert_eq!(
            frame.preview,
            Some(Preview::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(120.0, 0.0),
            })
        );
        assert_eq!(frame.hud.as_deref(), Some("Angle: 0.0°, Len: 120.0 px"));

        let done = tm.end(Point::new(100.0, 1.5), &c).unwrap();
        assert_eq!(
            done.shape,
            Some(Shape::Segment(Segment::new(Point::new(0.0, 0.0), Point::new(120.0, 0.0))))
        );
        assert!(done.hud.is_none());
    }

    #[test]
    fn test_set_square_restricts_angles() {
        let engine = SnapEngine::default();
        let shapes: [Shape; 0] = [];
        // A tiny scale keeps the grid fine enough not to mask the angle snap.
        let c = SnapContext {
            scale: 0.001,
            ..ctx(&engine, &shapes, true)
        };
        let mut tm = ToolManager::new();

        // 31° is within tolerance of 30°, but the 45° set-square has no 30° edge.
        let end = Point::new(31f64.to_radians().cos() * 100.0, 31f64.to_radians().sin() * 100.0);

        tm.set_tool(ToolKind::SetSquare45);
        tm.begin(Point::ZERO);
        let Some(Shape::Segment(seg)) = tm.end(end, &c).unwrap().shape else {
            panic!("expected a segment");
        };
        assert!((seg.angle_degrees() - 31.0).abs() < 0.1);

        tm.set_tool(ToolKind::SetSquare3060);
        tm.begin(Point::ZERO);
        let Some(Shape::Segment(seg)) = tm.end(end, &c).unwrap().shape else {
            panic!("expected a segment");
        };
        assert!((seg.angle_degrees() - 30.0).abs() < 0.1);
    }

    #[test]
    fn test_protractor_measures_only() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Protractor);

        let frame = tm.begin(Point::new(10.0, 10.0));
        assert_eq!(frame.hud.as_deref(), Some("Protractor"));

        let end = Point::new(10.0 + 61f64.to_radians().cos() * 50.0, 10.0 + 61f64.to_radians().sin() * 50.0);
        let frame = tm.update(end, &c).unwrap();
        assert_eq!(frame.hud.as_deref(), Some("Angle: 60.0°"));
        assert_eq!(
            frame.preview,
            Some(Preview::Line {
                start: Point::new(10.0, 10.0),
                end,
            })
        );

        let done = tm.end(end, &c).unwrap();
        assert!(done.shape.is_none());
        assert_eq!(done.hud.as_deref(), Some("Angle: 60.0°"));
    }

    #[test]
    fn test_compass_radius_from_release() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Compass);

        tm.begin(Point::new(50.0, 50.0));
        let frame = tm.update(Point::new(50.0, 70.0), &c).unwrap();
        assert_eq!(frame.hud.as_deref(), Some("R=20.0 px"));

        let done = tm.end(Point::new(50.0, 80.0), &c).unwrap();
        assert_eq!(done.shape, Some(Shape::Circle(Circle::new(Point::new(50.0, 50.0), 30.0))));
    }

    #[test]
    fn test_idle_ignores_samples() {
        let engine = SnapEngine::default();
        let c = ctx(&engine, &[], true);
        let mut tm = ToolManager::new();
        assert!(tm.update(Point::ZERO, &c).is_none());
        assert!(tm.end(Point::ZERO, &c).is_none());
    }

    #[test]
    fn test_cancel_interaction() {
        let mut tm = ToolManager::new();
        tm.begin(Point::new(0.0, 0.0));
        assert!(tm.is_active());
        assert_eq!(tm.active_tool(), Some(ToolKind::Pen));

        tm.cancel();
        assert!(!tm.is_active());
        assert!(tm.freehand_points().is_empty());
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(ToolKind::ALL.iter().filter(|t| t.is_directional()).count(), 5);
        assert_eq!(ToolKind::Ruler.angle_set(), Some(AngleSet::Full));
        assert_eq!(ToolKind::Compass.angle_set(), None);
    }
}
