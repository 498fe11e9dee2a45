//! Angle-based steering.
//!
//! Vessels never strafe: they turn at a fixed rate toward a desired heading
//! and always move along their facing.

use glam::DVec2;

use broadside_core::constants::{TURN_DEADBAND, TURN_DIRECTION_EPSILON};
use broadside_core::geometry::{angle_of, heading_vector, normalize_angle, shortest_angular_distance};

/// +1 to turn counter-clockwise toward `desired`, -1 for clockwise.
///
/// Counter-clockwise wins when adding the minimal difference lands on the
/// desired angle, compared modulo 360.
pub fn turn_direction(rotation: f64, desired: f64) -> f64 {
    let diff = shortest_angular_distance(rotation, desired);
    if shortest_angular_distance(rotation + diff, desired) < TURN_DIRECTION_EPSILON {
        1.0
    } else {
        -1.0
    }
}

/// Rudder turn: rotate by `turn_speed * delta * multiplier`, normalized.
pub fn turn(rotation: f64, turn_speed: f64, delta: f64, multiplier: f64) -> f64 {
    normalize_angle(rotation + turn_speed * delta * multiplier)
}

/// One step of turning toward `desired`. Holds inside the deadband.
pub fn turn_toward(rotation: f64, desired: f64, turn_speed: f64, delta: f64) -> f64 {
    if shortest_angular_distance(rotation, desired) <= TURN_DEADBAND {
        return rotation;
    }
    turn(rotation, turn_speed, delta, turn_direction(rotation, desired))
}

/// Offset moved in one step along `rotation`.
pub fn forward_displacement(rotation: f64, speed: f64, delta: f64, multiplier: f64) -> DVec2 {
    heading_vector(rotation) * speed * delta * multiplier
}

/// Heading from `position` to `destination`, or `None` with no destination.
pub fn angle_to_destination(position: DVec2, destination: Option<DVec2>) -> Option<f64> {
    destination.map(|d| angle_of(d - position))
}
