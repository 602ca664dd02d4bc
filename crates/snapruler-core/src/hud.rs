//! Heads-up display text for the active gesture.

use crate::geometry::{angle_degrees, distance};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pixels per centimeter, assuming a 160 dpi baseline.
pub const PIXELS_PER_CM: f64 = 37.8;

/// Unit used for every length shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Raw canvas units.
    #[default]
    Pixels,
    /// Converted with a fixed pixels-per-centimeter factor.
    Centimeters,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Pixels => "px",
            LengthUnit::Centimeters => "cm",
        }
    }
}

/// Formats measurements in one consistent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudFormat {
    pub unit: LengthUnit,
    pub pixels_per_cm: f64,
}

impl Default for HudFormat {
    fn default() -> Self {
        Self {
            unit: LengthUnit::default(),
            pixels_per_cm: PIXELS_PER_CM,
        }
    }
}

impl HudFormat {
    pub fn new(unit: LengthUnit, pixels_per_cm: f64) -> Self {
        Self { unit, pixels_per_cm }
    }

    /// A pixel length converted to the configured unit, one decimal, with suffix.
    pub fn length(&self, length_px: f64) -> String {
        let value = match self.unit {
            LengthUnit::Pixels => length_px,
            LengthUnit::Centimeters => length_px / self.pixels_per_cm,
        };
        format!("{:.1} {}", value, self.unit.suffix())
    }

    /// Angle and length of `a → b` on one line.
    pub fn measurement(&self, a: Point, b: Point) -> String {
        format!(
            "Angle: {:.1}°, Len: {}",
            angle_degrees(a, b),
            self.length(distance(a, b))
        )
    }

    /// Compass reading.
    pub fn radius(&self, radius_px: f64) -> String {
        format!("R={}", self.length(radius_px))
    }
}

/// Protractor reading. Angles carry no unit choice.
pub fn angle_string(angle_degrees: f64) -> String {
    format!("Angle: {:.1}°", angle_degrees)
}

/// Angle and length of `a → b`, lengths in pixels.
pub fn measurement_string(a: Point, b: Point) -> String {
    HudFormat::default().measurement(a, b)
}
