//! Destination selection and neutral wandering.

use glam::DVec2;
use hecs::{Entity, World};
use log::warn;
use rand::RngCore;

use broadside_core::components::{Hull, Motion, Navigator, Transform};
use broadside_core::constants::MAX_DESTINATION_ATTEMPTS;
use broadside_core::enums::{EntityKind, VesselClass};
use broadside_core::health::{Damageable, Health};

use crate::arena::{WorldQuery, WorldView};
use crate::systems::motion;
use crate::systems::StepContext;

/// Whether the straight path from `from` to `target` clears every obstacle.
pub fn is_destination_valid<Q: WorldQuery + ?Sized>(query: &Q, from: DVec2, target: DVec2) -> bool {
    !query
        .obstacles()
        .iter()
        .any(|obstacle| obstacle.intersects_segment(from, target))
}

/// Sample random in-bounds points until one has a clear path from `from`.
/// Falls back to `anchor` after `MAX_DESTINATION_ATTEMPTS` misses.
pub fn pick_valid_target<Q: WorldQuery + ?Sized>(
    query: &Q,
    rng: &mut dyn RngCore,
    from: DVec2,
    anchor: DVec2,
) -> DVec2 {
    for _ in 0..MAX_DESTINATION_ATTEMPTS {
        let candidate = query.random_point_in_bounds(rng);
        if is_destination_valid(query, from, candidate) {
            return candidate;
        }
    }
    warn!(
        "no clear destination from ({:.1}, {:.1}) after {} attempts, holding anchor",
        from.x, from.y, MAX_DESTINATION_ATTEMPTS
    );
    anchor
}

/// Pick a fresh destination when there is none or the current one is reached.
/// Returns whether a retarget happened.
pub fn update_destination<Q: WorldQuery + ?Sized>(
    navigator: &mut Navigator,
    position: DVec2,
    query: &Q,
    rng: &mut dyn RngCore,
) -> bool {
    let reached = match navigator.destination {
        None => true,
        Some(d) => position.distance(d) <= navigator.destination_threshold,
    };
    if !reached {
        return false;
    }
    let target = pick_valid_target(query, rng, position, navigator.initial_position);
    navigator.destination = Some(target);
    navigator.initial_position = position;
    true
}

/// Neutral vessels: retarget on arrival, then steer toward the destination.
pub fn run_neutral(world: &mut World, ctx: &mut StepContext) {
    let world: &World = world;
    let view = WorldView::new(ctx.arena, world);

    let neutrals: Vec<Entity> = world
        .query::<(&EntityKind, &Health)>()
        .iter()
        .filter(|(_, (kind, health))| {
            **kind == EntityKind::Vessel(VesselClass::Neutral) && !health.is_dead()
        })
        .map(|(entity, _)| entity)
        .collect();

    for entity in neutrals {
        let Ok(mut query) =
            world.query_one::<(&mut Transform, &mut Hull, &Motion, &mut Navigator)>(entity)
        else {
            continue;
        };
        let Some((transform, hull, motion, navigator)) = query.get() else {
            continue;
        };

        update_destination(navigator, transform.position, &view, &mut *ctx.rng);
        motion::move_to_destination(
            transform,
            hull,
            motion,
            navigator.destination,
            ctx.delta,
            ctx.arena,
        );
    }
}
