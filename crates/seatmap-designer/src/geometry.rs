//! Geometry kernel.
//!
//! Pure functions over points and placed objects. The canvas y axis points
//! down, so a positive rotation turns clockwise on screen. Angles are degrees
//! on objects and radians inside this module.

use lyon::math::{point as lpoint, vector, Angle, Transform};
use lyon::path::path::Builder;
use lyon::path::{Event, Path};
use std::f64::consts::TAU;

use crate::model::{PlacedObject, Point, Shape, ShapeGeometry};

/// Default corner hot-zone size
pub const DEFAULT_CORNER_ZONE: f64 = 20.0;
/// Default angle-snap increment in degrees
pub const DEFAULT_SNAP_STEP: f64 = 45.0;

const TIE_EPSILON: f64 = 1e-9;

/// Rotate a vector by `radians`
pub fn rotate_vector(v: Point, radians: f64) -> Point {
    let (sin, cos) = radians.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate `p` about `center` by `degrees`
pub fn rotate_about(p: Point, center: Point, degrees: f64) -> Point {
    center + rotate_vector(p - center, degrees.to_radians())
}

/// Convert a world point into the object's unrotated local frame
pub fn to_local(p: Point, object: &PlacedObject) -> Point {
    let center = object.center();
    rotate_vector(p - center, -object.rotation_radians()) + object.local_size().half()
}

/// Convert a local-frame point back to world coordinates
pub fn to_world(local: Point, object: &PlacedObject) -> Point {
    let center = object.center();
    rotate_vector(local - object.local_size().half(), object.rotation_radians()) + center
}

/// Rotation-aware containment test
pub fn hit_test(p: Point, object: &PlacedObject) -> bool {
    object.shape.contains_local(to_local(p, object))
}

/// Round each coordinate to the nearest multiple of `cell`.
///
/// A non-positive or non-finite cell leaves the point untouched.
pub fn snap_to_grid(p: Point, cell: f64) -> Point {
    if !(cell.is_finite() && cell > 0.0) {
        return p;
    }
    Point::new((p.x / cell).round() * cell, (p.y / cell).round() * cell)
}

/// Snap with an optional cell, as produced by disabled grid settings
pub fn snap_optional(p: Point, cell: Option<f64>) -> Point {
    match cell {
        Some(cell) => snap_to_grid(p, cell),
        None => p,
    }
}

/// Re-project `point` onto the nearest 45 degree direction from `origin`
pub fn snap_to_angle(origin: Point, point: Point, enabled: bool) -> Point {
    if !enabled {
        return point;
    }
    snap_to_angle_step(origin, point, DEFAULT_SNAP_STEP)
}

/// Re-project `point` onto the nearest multiple of `step_degrees` from
/// `origin`, keeping its distance.
///
/// Exact ties resolve to the smaller multiple counted from 0 degrees.
pub fn snap_to_angle_step(origin: Point, point: Point, step_degrees: f64) -> Point {
    let delta = point - origin;
    let distance = delta.length();
    if distance == 0.0 || !step_degrees.is_finite() || step_degrees <= 0.0 {
        return point;
    }

    let step = step_degrees.to_radians();
    let Some(k) = nearest_step_index(delta.y.atan2(delta.x), step) else {
        return point;
    };
    let (sin, cos) = (k * step).sin_cos();
    origin + Point::new(cos, sin) * distance
}

/// Snap an angle in degrees to the nearest multiple of `step_degrees`,
/// normalised to `[0, 360)`
pub fn snap_angle_degrees(angle: f64, step_degrees: f64) -> f64 {
    if !step_degrees.is_finite() || step_degrees <= 0.0 {
        return normalize_degrees(angle);
    }
    match nearest_step_index(angle.to_radians(), step_degrees.to_radians()) {
        Some(k) => normalize_degrees(k * step_degrees),
        None => normalize_degrees(angle),
    }
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

// Index in [0, TAU / step) of the multiple of `step` closest to `angle` on the
// circle. The larger index only wins when closer by more than TIE_EPSILON.
// None when the step is too fine to count.
fn nearest_step_index(angle: f64, step: f64) -> Option<f64> {
    let count = (TAU / step).round().max(1.0);
    if !count.is_finite() {
        return None;
    }

    let a = angle.rem_euclid(TAU);
    let below = (a / step).floor().min(count - 1.0);
    let above = if below + 1.0 >= count { 0.0 } else { below + 1.0 };
    let to_below = circular_distance(a, below * step);
    let to_above = circular_distance(a, above * step);

    let k = if (to_below - to_above).abs() <= TIE_EPSILON {
        below.min(above)
    } else if to_below < to_above {
        below
    } else {
        above
    };
    Some(k)
}

fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Corners of an object's local bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Scan order; also the tie-break order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

/// Effective corner zone for an object; never more than a third of its
/// shorter side
pub fn effective_corner_zone(object: &PlacedObject, zone_size: f64) -> f64 {
    let size = object.local_size();
    zone_size.min(size.width.min(size.height) / 3.0).max(0.0)
}

/// Classify a local-frame point by proximity to the corners of the object
pub fn corner_zone(local: Point, object: &PlacedObject, zone_size: f64) -> Option<Corner> {
    let zone = effective_corner_zone(object, zone_size);
    if zone <= 0.0 {
        return None;
    }

    let size = object.local_size();
    let mut best: Option<(Corner, f64)> = None;
    for corner in Corner::ALL {
        let at = match corner {
            Corner::TopLeft => Point::new(0.0, 0.0),
            Corner::TopRight => Point::new(size.width, 0.0),
            Corner::BottomLeft => Point::new(0.0, size.height),
            Corner::BottomRight => Point::new(size.width, size.height),
        };
        let distance = local.distance_to(&at);
        if distance <= zone && best.is_none_or(|(_, d)| distance < d) {
            best = Some((corner, distance));
        }
    }
    best.map(|(corner, _)| corner)
}

/// Axis-aligned bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().skip(1).fold(
            Self::new(first.x, first.y, first.x, first.y),
            |b, p| Self::new(b.min_x.min(p.x), b.min_y.min(p.y), b.max_x.max(p.x), b.max_y.max(p.y)),
        ))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// World-space AABB of an object, accounting for rotation
pub fn world_bounds(object: &PlacedObject) -> Bounds {
    if let Shape::Circle(c) = &object.shape {
        let center = object.center();
        return Bounds::new(
            center.x - c.radius,
            center.y - c.radius,
            center.x + c.radius,
            center.y + c.radius,
        );
    }

    let size = object.local_size();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(size.width, 0.0),
        Point::new(0.0, size.height),
        Point::new(size.width, size.height),
    ]
    .map(|c| to_world(c, object));
    Bounds::from_points(&corners).unwrap_or_else(|| Bounds::new(0.0, 0.0, 0.0, 0.0))
}

/// Transform from an object's local frame into its parent frame
pub fn local_to_parent(object: &PlacedObject) -> Transform {
    let half = object.local_size().half();
    let center = object.center();
    Transform::translation(-half.x as f32, -half.y as f32)
        .then_rotate(Angle::radians(object.rotation_radians() as f32))
        .then_translate(vector(center.x as f32, center.y as f32))
}

/// Append `path` to `builder` with every point mapped through `transform`
pub fn append_transformed(builder: &mut Builder, path: &Path, transform: &Transform) {
    let map = |p: lyon::math::Point| transform.transform_point(p);
    for event in path.iter() {
        match event {
            Event::Begin { at } => {
                builder.begin(map(at));
            }
            Event::Line { to, .. } => {
                builder.line_to(map(to));
            }
            Event::Quadratic { ctrl, to, .. } => {
                builder.quadratic_bezier_to(map(ctrl), map(to));
            }
            Event::Cubic {
                ctrl1, ctrl2, to, ..
            } => {
                builder.cubic_bezier_to(map(ctrl1), map(ctrl2), map(to));
            }
            Event::End { close, .. } => builder.end(close),
        }
    }
}

/// Convert a model point to a lyon point
pub fn to_lyon(p: Point) -> lyon::math::Point {
    lpoint(p.x as f32, p.y as f32)
}
