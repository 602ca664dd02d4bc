//! Straight segment drawn with the ruler or a set-square.

use super::ShapeTrait;
use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight segment between two snapped endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Get the length of the segment.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Angle from start to end in degrees, `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        geometry::angle_degrees(self.start, self.end)
    }
}

impl ShapeTrait for Segment {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }
}
