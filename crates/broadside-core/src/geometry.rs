//! Planar geometry: angles in degrees, segments and polygons.
//!
//! Angles follow the arena convention: 0° faces +x and positive angles
//! turn counter-clockwise.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::GEOMETRY_EPSILON;

/// Wrap any angle into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unsigned minimal rotation that aligns `a` with `b`, in `[0, 180]`.
pub fn shortest_angular_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Angle of a vector in degrees, in `[0, 360)`.
pub fn angle_of(v: DVec2) -> f64 {
    normalize_angle(v.y.atan2(v.x).to_degrees())
}

/// Bearing from one point to another in degrees, in `[0, 360)`.
pub fn bearing_deg(from: DVec2, to: DVec2) -> f64 {
    angle_of(to - from)
}

/// Unit vector pointing along `angle` degrees.
pub fn heading_vector(angle: f64) -> DVec2 {
    let rad = angle.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether segments `p1-p2` and `q1-q2` share at least one point. Touching counts.
pub fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let d1 = cross(q2 - q1, p1 - q1);
    let d2 = cross(q2 - q1, p2 - q1);
    let d3 = cross(p2 - p1, q1 - p1);
    let d4 = cross(p2 - p1, q2 - p1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

/// Whether the segment `p0-p1` crosses or touches any edge of `polygon`.
///
/// Zero-length segments never intersect. A segment lying entirely inside
/// the polygon does not cross an edge and is not reported.
pub fn segment_intersects_polygon(p0: DVec2, p1: DVec2, polygon: &[DVec2]) -> bool {
    if polygon.len() < 2 || p0.distance_squared(p1) <= GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return false;
    }
    let n = polygon.len();
    (0..n).any(|i| segments_intersect(p0, p1, polygon[i], polygon[(i + 1) % n]))
}

/// Even-odd point containment.
pub fn polygon_contains_point(polygon: &[DVec2], p: DVec2) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Collision polygon with local vertices and a position/rotation transform.
///
/// Local vertices are expressed around the owner's centre, with the shape's
/// forward direction along +x. World vertices are cached and refreshed on
/// every transform change, so a saved copy restores the shape exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    local: Vec<DVec2>,
    position: DVec2,
    rotation: f64,
    world: Vec<DVec2>,
}

impl Polygon {
    pub fn new(local: Vec<DVec2>) -> Self {
        let world = local.clone();
        Self {
            local,
            position: DVec2::ZERO,
            rotation: 0.0,
            world,
        }
    }

    /// Axis-aligned rectangle centred on the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            DVec2::new(-hw, -hh),
            DVec2::new(hw, -hh),
            DVec2::new(hw, hh),
            DVec2::new(-hw, hh),
        ])
    }

    /// Place the shape at `position`, rotated by `rotation` degrees.
    pub fn set_transform(&mut self, position: DVec2, rotation: f64) {
        self.position = position;
        self.rotation = rotation;
        let rot = DVec2::from_angle(rotation.to_radians());
        self.world.clear();
        self.world
            .extend(self.local.iter().map(|v| position + rot.rotate(*v)));
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Transformed vertices in arena space.
    pub fn vertices(&self) -> &[DVec2] {
        &self.world
    }

    pub fn contains_point(&self, p: DVec2) -> bool {
        polygon_contains_point(&self.world, p)
    }

    pub fn intersects_segment(&self, a: DVec2, b: DVec2) -> bool {
        segment_intersects_polygon(a, b, &self.world)
    }

    /// Radius of the smallest origin-centred circle holding the local shape.
    pub fn bounding_radius(&self) -> f64 {
        self.local.iter().map(|v| v.length()).fold(0.0, f64::max)
    }

    /// Whether two shapes touch: any edges cross, or one holds the other.
    pub fn overlaps(&self, other: &Polygon) -> bool {
        let reach = self.bounding_radius() + other.bounding_radius();
        if self.position.distance_squared(other.position) > reach * reach {
            return false;
        }

        let n = other.world.len();
        for i in 0..n {
            if self.intersects_segment(other.world[i], other.world[(i + 1) % n]) {
                return true;
            }
        }

        other.world.first().is_some_and(|&v| self.contains_point(v))
            || self.world.first().is_some_and(|&v| other.contains_point(v))
    }
}
