//! SnapRuler Core Library
//!
//! Platform-agnostic drafting logic: instruments, snapping, undo history and the
//! drawing session that ties them together. Rendering and touch handling live
//! in the shell.

pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod hud;
pub mod input;
pub mod session;
pub mod shapes;
pub mod snap;
pub mod timer;
pub mod tools;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use history::{History, MAX_UNDO_HISTORY};
pub use hud::{HudFormat, LengthUnit, angle_string, measurement_string};
pub use input::PointerEvent;
pub use session::{DrawingSession, DrawingState};
pub use shapes::{Circle, Freehand, Preview, Segment, Shape, ShapeTrait};
pub use snap::{AngleSet, GRID_SIZE, SnapEngine, SnapSettings, apply_snap, snap_angle_only};
pub use timer::{Instant, LongPressTimer, TimerToken};
pub use tools::{ToolKind, ToolManager, ToolState};
