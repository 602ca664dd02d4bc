//! Session configuration.

use crate::error::{SessionError, SessionResult};
use crate::history::MAX_UNDO_HISTORY;
use crate::hud::{HudFormat, LengthUnit, PIXELS_PER_CM};
use crate::snap::SnapSettings;
use crate::timer::LONG_PRESS_MS;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a drawing session. Every field falls back to its default when
/// missing from the JSON source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Snap radius, grid and angle constants.
    pub snap: SnapSettings,
    /// Maximum number of undo steps.
    pub history_capacity: usize,
    /// Long-press delay before the temporary snap toggle fires.
    pub long_press_ms: u64,
    /// Unit for lengths on the HUD.
    pub length_unit: LengthUnit,
    /// Conversion factor used when `length_unit` is centimeters.
    pub pixels_per_cm: f64,
    /// Snap flag at session start.
    pub snap_enabled: bool,
    /// Tool selected at session start.
    pub initial_tool: ToolKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snap: SnapSettings::default(),
            history_capacity: MAX_UNDO_HISTORY,
            long_press_ms: LONG_PRESS_MS,
            length_unit: LengthUnit::default(),
            pixels_per_cm: PIXELS_PER_CM,
            snap_enabled: true,
            initial_tool: ToolKind::default(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constraint; the first violation is reported.
    pub fn validate(&self) -> SessionResult<()> {
        let snap = &self.snap;
        if self.history_capacity == 0 {
            return Err(invalid("history_capacity must be at least 1"));
        }
        if !(snap.base_radius > 0.0 && snap.base_radius.is_finite()) {
            return Err(invalid(format!("snap.base_radius must be > 0, got {}", snap.base_radius)));
        }
        if !(snap.min_radius > 0.0 && snap.min_radius <= snap.max_radius && snap.max_radius.is_finite()) {
            return Err(invalid(format!(
                "snap radius bounds must satisfy 0 < min <= max, got {}..{}",
                snap.min_radius, snap.max_radius
            )));
        }
        if !(snap.grid_spacing > 0.0 && snap.grid_spacing.is_finite()) {
            return Err(invalid(format!("snap.grid_spacing must be > 0, got {}", snap.grid_spacing)));
        }
        if !(snap.angle_tolerance >= 0.0 && snap.angle_tolerance < 180.0) {
            return Err(invalid(format!(
                "snap.angle_tolerance must be in [0, 180), got {}",
                snap.angle_tolerance
            )));
        }
        if !(self.pixels_per_cm > 0.0 && self.pixels_per_cm.is_finite()) {
            return Err(invalid(format!("pixels_per_cm must be > 0, got {}", self.pixels_per_cm)));
        }
        Ok(())
    }

    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn hud_format(&self) -> HudFormat {
        HudFormat::new(self.length_unit, self.pixels_per_cm)
    }
}

fn invalid(message: impl Into<String>) -> SessionError {
    SessionError::InvalidConfig(message.into())
}
