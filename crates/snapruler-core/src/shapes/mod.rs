//! Shape definitions for the drafting surface.

mod circle;
mod freehand;
mod segment;

pub use circle::Circle;
pub use freehand::Freehand;
pub use segment::Segment;

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Render-facing geometry shared by committed shapes and previews.
pub trait ShapeTrait {
    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;
}

/// A committed shape.
///
/// Committed shapes are never edited in place; history snapshots rely on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Segment(Segment),
    Freehand(Freehand),
    Circle(Circle),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Segment(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Segment(s) => s.to_path(),
            Shape::Freehand(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
        }
    }

    /// Get the segment if this shape is a segment.
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Shape::Segment(s) => Some(s),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Segment(_) => "segment",
            Shape::Freehand(_) => "freehand",
            Shape::Circle(_) => "circle",
        }
    }
}

impl From<Segment> for Shape {
    fn from(segment: Segment) -> Self {
        Shape::Segment(segment)
    }
}

impl From<Freehand> for Shape {
    fn from(freehand: Freehand) -> Self {
        Shape::Freehand(freehand)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

/// In-progress geometry shown while a gesture is active. Never committed as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Preview {
    /// Ruler, set-square or protractor arm.
    Line { start: Point, end: Point },
    /// Compass sweep.
    Circle { center: Point, radius: f64 },
    /// Pen stroke accumulated so far.
    Freehand { points: Vec<Point> },
}

impl ShapeTrait for Preview {
    fn bounds(&self) -> Rect {
        match self {
            Preview::Line { start, end } => Segment::new(*start, *end).bounds(),
            Preview::Circle { center, radius } => Circle::new(*center, *radius).bounds(),
            Preview::Freehand { points } => freehand::points_bounds(points),
        }
    }

    fn to_path(&self) -> BezPath {
        match self {
            Preview::Line { start, end } => Segment::new(*start, *end).to_path(),
            Preview::Circle { center, radius } => Circle::new(*center, *radius).to_path(),
            Preview::Freehand { points } => freehand::points_path(points),
        }
    }
}

/// Union of the bounds of every shape, `None` when there are no shapes.
pub fn shapes_bounds<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Rect> {
    shapes.into_iter().fold(None, |acc, shape| {
        let bounds = shape.bounds();
        Some(match acc {
            Some(r) => r.union(bounds),
            None => bounds,
        })
    })
}
