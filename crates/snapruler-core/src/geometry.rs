//! Geometry helpers shared by the snap engine and the tools.

use kurbo::{Point, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Angle of the vector `a → b` in degrees, normalized to `[0, 360)`.
///
/// A zero-length vector reports 0°.
pub fn angle_degrees(a: Point, b: Point) -> f64 {
    let angle = (b.y - a.y).atan2(b.x - a.x).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Reduce an angle in degrees to `(-180, 180]`.
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    let mut x = angle_degrees % 360.0;
    if x > 180.0 {
        x -= 360.0;
    }
    if x <= -180.0 {
        x += 360.0;
    }
    x
}

/// Orthogonal projection of `p` onto the infinite line through `seg_start` and `seg_end`.
///
/// A degenerate segment is treated as a point and yields `seg_start`.
pub fn project_point_on_segment(seg_start: Point, seg_end: Point, p: Point) -> Point {
    let ab: Vec2 = seg_end - seg_start;
    let ap: Vec2 = p - seg_start;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return seg_start;
    }
    let t = ap.dot(ab) / len_sq;
    seg_start + ab * t
}

/// Point at `length` from `origin` along `angle_degrees`.
pub fn polar_offset(origin: Point, angle_degrees: f64, length: f64) -> Point {
    let rad = angle_degrees.to_radians();
    Point::new(origin.x + rad.cos() * length, origin.y + rad.sin() * length)
}
