//! Snap functionality for aligning drafted points to existing segments,
//! standard angles and the grid.
//!
//! Snapping runs in a fixed order: segment snap, then angle snap, then grid
//! snap. The grid pass is the coarsest and may pull an angle-snapped endpoint
//! off its rotated position; that ordering is part of the contract.

use crate::geometry::{angle_degrees, distance, normalize_angle, polar_offset, project_point_on_segment};
use crate::shapes::{Segment, Shape};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Grid spacing at scale 1 (matches the visual grid).
pub const GRID_SIZE: f64 = 40.0;

/// Segment snap radius at scale 1, before clamping.
pub const BASE_SNAP_RADIUS: f64 = 24.0;

/// Lower bound for the segment snap radius.
pub const MIN_SNAP_RADIUS: f64 = 8.0;

/// Upper bound for the segment snap radius.
pub const MAX_SNAP_RADIUS: f64 = 80.0;

/// Maximum angular distance (degrees) at which an angle snaps to a candidate.
pub const ANGLE_SNAP_TOLERANCE: f64 = 3.0;

/// Slack on the tolerance comparison so an angle recovered from coordinates
/// with `atan2` still counts as on the boundary.
const ANGLE_EPSILON: f64 = 1e-9;

/// Standard drafting angles offered by the ruler and protractor.
pub const COMMON_ANGLES: [f64; 9] = [0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0];

const SET_SQUARE_45_ANGLES: [f64; 5] = [0.0, 45.0, 90.0, 135.0, 180.0];
const SET_SQUARE_30_60_ANGLES: [f64; 7] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0];

/// Candidate angles an instrument may snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleSet {
    /// Every standard angle (ruler, protractor).
    #[default]
    Full,
    /// 45° set-square.
    SetSquare45,
    /// 30/60° set-square.
    SetSquare3060,
}

impl AngleSet {
    /// Candidate angles in degrees, in ascending order.
    pub fn angles(self) -> &'static [f64] {
        match self {
            AngleSet::Full => &COMMON_ANGLES,
            AngleSet::SetSquare45 => &SET_SQUARE_45_ANGLES,
            AngleSet::SetSquare3060 => &SET_SQUARE_30_60_ANGLES,
        }
    }
}

/// Tunable snap constants. The defaults are the drafting surface's standard values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Segment snap radius at scale 1.
    pub base_radius: f64,
    /// Lower clamp for the scaled radius.
    pub min_radius: f64,
    /// Upper clamp for the scaled radius.
    pub max_radius: f64,
    /// Grid spacing at scale 1.
    pub grid_spacing: f64,
    /// Angle snap tolerance in degrees (inclusive).
    pub angle_tolerance: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            base_radius: BASE_SNAP_RADIUS,
            min_radius: MIN_SNAP_RADIUS,
            max_radius: MAX_SNAP_RADIUS,
            grid_spacing: GRID_SIZE,
            angle_tolerance: ANGLE_SNAP_TOLERANCE,
        }
    }
}

impl SnapSettings {
    /// Segment snap radius for a zoom scale: shrinks as the user zooms in, clamped.
    pub fn snap_radius(&self, scale: f64) -> f64 {
        (self.base_radius / scale).clamp(self.min_radius, self.max_radius)
    }

    /// Grid spacing for a zoom scale, so the grid keeps a fixed on-screen size.
    pub fn grid_spacing_at(&self, scale: f64) -> f64 {
        self.grid_spacing * scale
    }
}

/// Result of a grid snap.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate moved.
    pub snapped_x: bool,
    /// Whether the Y coordinate moved.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Round to the nearest grid line, ties toward positive infinity.
fn round_to_spacing(value: f64, spacing: f64) -> f64 {
    (value / spacing + 0.5).floor() * spacing
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    let x = round_to_spacing(point.x, grid_size);
    let y = round_to_spacing(point.y, grid_size);

    SnapResult {
        point: Point::new(x, y),
        snapped_x: x != point.x,
        snapped_y: y != point.y,
    }
}

/// Snap an angle to the nearest candidate if it lies within `tolerance` degrees.
///
/// Returns the input angle unchanged when disabled or when no candidate is
/// close enough. Ties go to the first candidate in `candidates`.
pub fn snap_angle(angle_degrees: f64, enabled: bool, candidates: &[f64], tolerance: f64) -> f64 {
    if !enabled {
        return angle_degrees;
    }
    let mut best = angle_degrees;
    let mut best_diff = 360.0;
    for &candidate in candidates {
        let diff = normalize_angle(angle_degrees - candidate).abs();
        if diff < best_diff {
            best_diff = diff;
            best = candidate;
        }
    }
    if best_diff <= tolerance + ANGLE_EPSILON { best } else { angle_degrees }
}

/// Where on a segment a snap landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapTargetKind {
    /// Orthogonal projection onto the segment's line.
    Projection,
    /// The segment's start point.
    Start,
    /// The segment's end point.
    End,
}

/// A point that a drafted endpoint snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// The snap point location.
    pub point: Point,
    /// Type of snap target for visual feedback.
    pub kind: SnapTargetKind,
    /// Index of the segment among the segments considered, in draw order.
    pub segment_index: usize,
}

/// Find the closest projection or endpoint of any segment strictly within `radius`.
///
/// Segments are visited in draw order; for each one the projection is tried
/// before the start and end points. Only a strictly closer candidate replaces
/// the current best, so ties keep the first one encountered.
pub fn closest_point_on_segments<'a>(
    point: Point,
    segments: impl IntoIterator<Item = &'a Segment>,
    radius: f64,
) -> Option<SnapTarget> {
    let mut best: Option<SnapTarget> = None;
    let mut best_dist = radius;

    for (segment_index, segment) in segments.into_iter().enumerate() {
        let candidates = [
            (project_point_on_segment(segment.start, segment.end, point), SnapTargetKind::Projection),
            (segment.start, SnapTargetKind::Start),
            (segment.end, SnapTargetKind::End),
        ];
        for (candidate, kind) in candidates {
            let dist = distance(point, candidate);
            if dist < best_dist {
                best_dist = dist;
                best = Some(SnapTarget {
                    point: candidate,
                    kind,
                    segment_index,
                });
            }
        }
    }

    best
}

/// Full record of one snap pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOutcome {
    /// Final start point.
    pub start: Point,
    /// Final end point.
    pub end: Point,
    /// Segment target the start point snapped to, if any.
    pub start_target: Option<SnapTarget>,
    /// Segment target the end point snapped to, if any.
    pub end_target: Option<SnapTarget>,
    /// Candidate angle the segment was rotated to, if the angle snapped.
    pub snapped_angle: Option<f64>,
    /// Whether the grid pass ran.
    pub grid_applied: bool,
}

impl SnapOutcome {
    /// The snapped pair.
    pub fn pair(&self) -> (Point, Point) {
        (self.start, self.end)
    }
}

/// Computes snapped endpoints for drafting instruments.
///
/// Callers must pass `scale > 0`; the engine does not check it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapEngine {
    pub settings: SnapSettings,
}

impl SnapEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: SnapSettings) -> Self {
        Self { settings }
    }

    /// Snap a raw `(start, current)` pair using the full angle set.
    pub fn apply(
        &self,
        start: Point,
        current: Point,
        shapes: &[Shape],
        scale: f64,
        snap_enabled: bool,
    ) -> (Point, Point) {
        self.apply_detailed(start, current, shapes, scale, snap_enabled, AngleSet::Full)
            .pair()
    }

    /// Snap a raw `(start, current)` pair, restricting angle snap to `angles`.
    pub fn apply_with_angles(
        &self,
        start: Point,
        current: Point,
        shapes: &[Shape],
        scale: f64,
        snap_enabled: bool,
        angles: AngleSet,
    ) -> (Point, Point) {
        self.apply_detailed(start, current, shapes, scale, snap_enabled, angles)
            .pair()
    }

    /// Run the three snap stages and report what each one did.
    pub fn apply_detailed(
        &self,
        start: Point,
        current: Point,
        shapes: &[Shape],
        scale: f64,
        snap_enabled: bool,
        angles: AngleSet,
    ) -> SnapOutcome {
        let radius = self.settings.snap_radius(scale);

        // Segment snap is independent of the snap toggle.
        let segments = || shapes.iter().filter_map(Shape::as_segment);
        let end_target = closest_point_on_segments(current, segments(), radius);
        let start_target = closest_point_on_segments(start, segments(), radius);

        let mut s = start_target.map_or(start, |t| t.point);
        let mut e = end_target.map_or(current, |t| t.point);

        let angle = angle_degrees(s, e);
        let snapped = snap_angle(angle, snap_enabled, angles.angles(), self.settings.angle_tolerance);
        let snapped_angle = if snapped != angle {
            e = polar_offset(s, snapped, distance(s, e));
            Some(snapped)
        } else {
            None
        };

        if snap_enabled {
            let spacing = self.settings.grid_spacing_at(scale);
            e = snap_to_grid(e, spacing).point;
            s = snap_to_grid(s, spacing).point;
        }

        log::debug!(
            "snap: ({:.2}, {:.2})-({:.2}, {:.2}) -> ({:.2}, {:.2})-({:.2}, {:.2}) angle={:?}",
            start.x, start.y, current.x, current.y, s.x, s.y, e.x, e.y, snapped_angle
        );

        SnapOutcome {
            start: s,
            end: e,
            start_target,
            end_target,
            snapped_angle,
            grid_applied: snap_enabled,
        }
    }

    /// Angle snap on its own, for the protractor (full angle set, no segment).
    pub fn snap_angle_only(&self, angle_degrees: f64, enabled: bool) -> f64 {
        snap_angle(angle_degrees, enabled, &COMMON_ANGLES, self.settings.angle_tolerance)
    }
}

/// Snap a raw pair with the default settings and the full angle set.
pub fn apply_snap(start: Point, current: Point, shapes: &[Shape], scale: f64, snap_enabled: bool) -> (Point, Point) {
    SnapEngine::default().apply(start, current, shapes, scale, snap_enabled)
}

/// Protractor angle snap with the default tolerance.
pub fn snap_angle_only(angle_degrees: f64, enabled: bool) -> f64 {
    snap_angle(angle_degrees, enabled, &COMMON_ANGLES, ANGLE_SNAP_TOLERANCE)
}
