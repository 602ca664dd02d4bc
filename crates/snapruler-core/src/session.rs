//! The drawing session: one controller owning the published drawing state.
//!
//! The session is the only writer of [`DrawingState`]. A shell forwards pointer
//! samples and commands to it and reads the state back between samples.

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::history::History;
use crate::hud::HudFormat;
use crate::input::PointerEvent;
use crate::shapes::{Preview, Shape, shapes_bounds};
use crate::snap::SnapEngine;
use crate::timer::{Instant, LongPressTimer, TimerToken};
use crate::tools::{Frame, SnapContext, ToolKind, ToolManager};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingState {
    /// Committed shapes in draw order.
    pub shapes: Vec<Shape>,
    /// Selected instrument.
    pub tool: ToolKind,
    /// Snap flag, including a temporary long-press toggle.
    pub snap_enabled: bool,
    /// Current zoom scale.
    pub scale: f64,
    /// Overlay for the gesture in progress.
    pub active_preview: Option<Preview>,
    /// Text readout.
    pub hud_text: Option<String>,
}

/// Owns the shapes, history, instrument state machine and long-press timer.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    state: DrawingState,
    engine: SnapEngine,
    hud: HudFormat,
    history: History,
    tool_manager: ToolManager,
    timer: LongPressTimer,
    long_press: Option<TimerToken>,
    /// Snap flag saved at gesture start, restored when the gesture ends.
    saved_snap: Option<bool>,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl DrawingSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut tool_manager = ToolManager::new();
        tool_manager.set_tool(config.initial_tool);
        Self {
            state: DrawingState {
                shapes: Vec::new(),
                tool: config.initial_tool,
                snap_enabled: config.snap_enabled,
                scale: 1.0,
                active_preview: None,
                hud_text: None,
            },
            engine: SnapEngine::new(config.snap),
            hud: config.hud_format(),
            history: History::new(config.history_capacity),
            tool_manager,
            timer: LongPressTimer::new(config.long_press_delay()),
            long_press: None,
            saved_snap: None,
        }
    }

    /// Validate `config` and build a session from it.
    pub fn with_config(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The latest published state.
    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.state.shapes
    }

    pub fn active_preview(&self) -> Option<&Preview> {
        self.state.active_preview.as_ref()
    }

    pub fn hud_text(&self) -> Option<&str> {
        self.state.hud_text.as_deref()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.state.tool
    }

    pub fn snap_enabled(&self) -> bool {
        self.state.snap_enabled
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Check if a gesture is in progress.
    pub fn is_gesture_active(&self) -> bool {
        self.tool_manager.is_active()
    }

    /// Token of the pending long-press, for a shell that schedules firing itself.
    pub fn long_press_token(&self) -> Option<TimerToken> {
        self.long_press.filter(|_| self.timer.is_pending())
    }

    /// Owned copy of the shape sequence for rasterization.
    pub fn export_snapshot(&self) -> Vec<Shape> {
        self.state.shapes.clone()
    }

    /// Bounding box of every committed shape.
    pub fn content_bounds(&self) -> Option<Rect> {
        shapes_bounds(&self.state.shapes)
    }

    /// Set the zoom scale. Rejects non-finite and non-positive values.
    pub fn set_scale(&mut self, scale: f64) -> SessionResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("rejected scale {}", scale);
            return Err(SessionError::InvalidScale(scale));
        }
        self.state.scale = scale;
        Ok(())
    }

    /// Switch instruments. A gesture in progress is cancelled.
    pub fn select_tool(&mut self, tool: ToolKind) {
        if self.tool_manager.is_active() {
            self.cancel_gesture();
        }
        self.tool_manager.set_tool(tool);
        self.state.tool = tool;
        log::debug!("tool selected: {:?}", tool);
    }

    /// Flip the snap flag.
    ///
    /// During a gesture the flip lasts until the gesture ends, like a long press.
    pub fn toggle_snap_enabled(&mut self) {
        self.state.snap_enabled = !self.state.snap_enabled;
        log::debug!("snap enabled: {}", self.state.snap_enabled);
    }

    /// Append a shape as one undoable step.
    pub fn add_shape(&mut self, shape: Shape) {
        self.history.push(&self.state.shapes);
        log::info!("committed {}", shape.kind_name());
        self.state.shapes.push(shape);
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.state.shapes) {
            Some(previous) => {
                self.state.shapes = previous;
                log::info!("undo ({} shapes)", self.state.shapes.len());
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.state.shapes) {
            Some(next) => {
                self.state.shapes = next;
                log::info!("redo ({} shapes)", self.state.shapes.len());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Start a gesture with the selected tool.
    ///
    /// A gesture already in progress is cancelled first.
    pub fn pointer_down(&mut self, point: Point, now: Instant) {
        if self.tool_manager.is_active() {
            log::debug!("gesture interrupted by a new press");
            self.cancel_gesture();
        }
        self.saved_snap = Some(self.state.snap_enabled);

        self.long_press = Some(self.timer.start(now));
        if self.state.tool.is_directional() {
            self.cancel_long_press();
        }

        let frame = self.tool_manager.begin(point);
        self.publish(frame);
    }

    /// Feed a move sample. Ignored when no gesture is in progress.
    pub fn pointer_move(&mut self, point: Point) {
        let ctx = SnapContext {
            engine: &self.engine,
            shapes: &self.state.shapes,
            scale: self.state.scale,
            snap_enabled: self.state.snap_enabled,
            hud: self.hud,
        };
        if let Some(frame) = self.tool_manager.update(point, &ctx) {
            self.publish(frame);
        }
    }

    /// Finish the gesture, committing its shape if it produced one.
    pub fn pointer_up(&mut self, point: Point) {
        self.cancel_long_press();
        let ctx = SnapContext {
            engine: &self.engine,
            shapes: &self.state.shapes,
            scale: self.state.scale,
            snap_enabled: self.state.snap_enabled,
            hud: self.hud,
        };
        let Some(completion) = self.tool_manager.end(point, &ctx) else {
            return;
        };

        if let Some(shape) = completion.shape {
            self.add_shape(shape);
        }
        self.tool_manager.finish();
        self.restore_snap();
        self.state.active_preview = None;
        self.state.hud_text = completion.hud;
    }

    /// Abort the gesture in progress: no shape, no preview, snap flag restored.
    ///
    /// Without a gesture in progress the HUD keeps its last reading.
    pub fn cancel_gesture(&mut self) {
        let was_active = self.tool_manager.is_active();
        self.cancel_long_press();
        self.tool_manager.cancel();
        self.restore_snap();
        self.state.active_preview = None;
        if was_active {
            self.state.hud_text = None;
        }
    }

    /// Dispatch a pointer event from the shell.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, now),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Cancel => self.cancel_gesture(),
        }
    }

    /// Advance the long-press timer. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.long_press = None;
        self.on_long_press()
    }

    /// Fire the long-press on behalf of an external scheduler.
    ///
    /// Stale tokens and firings after the gesture ended are ignored.
    pub fn fire_long_press(&mut self, token: TimerToken) -> bool {
        if !self.timer.fire(token) {
            log::warn!("ignored stale long-press (generation {})", token.generation());
            return false;
        }
        self.long_press = None;
        self.on_long_press()
    }

    fn on_long_press(&mut self) -> bool {
        if !self.tool_manager.is_active() {
            return false;
        }
        self.toggle_snap_enabled();
        true
    }

    fn cancel_long_press(&mut self) {
        self.timer.cancel();
        self.long_press = None;
    }

    fn restore_snap(&mut self) {
        if let Some(saved) = self.saved_snap.take() {
            self.state.snap_enabled = saved;
        }
    }

    fn publish(&mut self, frame: Frame) {
        self.state.active_preview = frame.preview;
        if frame.hud.is_some() {
            self.state.hud_text = frame.hud;
        }
    }
}
