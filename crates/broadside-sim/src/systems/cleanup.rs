//! Cleanup system: despawns entities that were marked dead or spent during
//! the previous step.

use hecs::{Entity, World};

use broadside_core::components::{Pickup, Projectile, RayBeam};
use broadside_core::enums::{EntityKind, VesselClass};
use broadside_core::health::{Damageable, Health};

/// Remove tombstoned entities. Runs at the step boundary, before pending
/// spawns are merged. The player and colleges are never removed here.
/// Uses a pre-allocated buffer to avoid per-step allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (kind, health)) in world.query_mut::<(&EntityKind, &Health)>() {
        let permanent = matches!(
            kind,
            EntityKind::Vessel(VesselClass::Player) | EntityKind::College(_)
        );
        if health.is_dead() && !permanent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.spent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, beam) in world.query_mut::<&RayBeam>() {
        if beam.0.should_remove() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
