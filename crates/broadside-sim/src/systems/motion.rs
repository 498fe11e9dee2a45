//! Steering integration with arena-boundary rollback.
//!
//! Wraps the pure steering math from `broadside-ai` and keeps each
//! entity's collision shape in step with its transform.

use glam::DVec2;

use broadside_ai::steering;
use broadside_core::components::{Hull, Motion, Transform};

use crate::arena::Arena;

/// Shift by `offset`. If the new centre leaves the arena, position and
/// shape are both restored and `false` is returned.
pub fn displace(transform: &mut Transform, hull: &mut Hull, offset: DVec2, arena: &Arena) -> bool {
    let previous = transform.position;
    transform.position += offset;
    hull.sync(transform);
    if arena.contains(transform.position) {
        return true;
    }
    transform.position = previous;
    hull.sync(transform);
    false
}

/// Move along the facing by `speed * delta * multiplier`.
pub fn integrate(
    transform: &mut Transform,
    hull: &mut Hull,
    speed: f64,
    delta: f64,
    multiplier: f64,
    arena: &Arena,
) -> bool {
    let offset = steering::forward_displacement(transform.rotation, speed, delta, multiplier);
    displace(transform, hull, offset, arena)
}

/// Rudder turn by `turn_speed * delta * multiplier`.
pub fn turn(transform: &mut Transform, hull: &mut Hull, turn_speed: f64, delta: f64, multiplier: f64) {
    transform.rotation = steering::turn(transform.rotation, turn_speed, delta, multiplier);
    hull.sync(transform);
}

/// Turn toward `desired` (outside the deadband) and always advance.
pub fn turn_toward(
    transform: &mut Transform,
    hull: &mut Hull,
    motion: &Motion,
    desired: f64,
    delta: f64,
    arena: &Arena,
) {
    transform.rotation =
        steering::turn_toward(transform.rotation, desired, motion.turn_speed, delta);
    integrate(transform, hull, motion.speed, delta, 1.0, arena);
}

/// Steer toward `destination`. Does nothing without one.
pub fn move_to_destination(
    transform: &mut Transform,
    hull: &mut Hull,
    motion: &Motion,
    destination: Option<DVec2>,
    delta: f64,
    arena: &Arena,
) {
    if let Some(angle) = steering::angle_to_destination(transform.position, destination) {
        turn_toward(transform, hull, motion, angle, delta, arena);
    }
}
