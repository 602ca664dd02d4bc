//! Pointer input for single-pointer drawing gestures.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The platform took the pointer away (gesture stolen, window lost focus).
    Cancel,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            PointerEvent::Down { position } | PointerEvent::Move { position } | PointerEvent::Up { position } => {
                Some(position)
            }
            PointerEvent::Cancel => None,
        }
    }
}
