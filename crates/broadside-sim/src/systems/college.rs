//! College defence fire, vessel production and objective tracking.

use glam::DVec2;
use hecs::{Entity, World};
use log::{debug, info};
use rand::Rng;

use broadside_core::components::{College, Transform};
use broadside_core::constants::{COLLEGE_INACCURACY_DEG, COLLEGE_SPAWN_OFFSET};
use broadside_core::enums::{EntityKind, Faction, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::geometry::bearing_deg;

use crate::spawn::{Spawn, Spawner};
use crate::systems::{combat, StepContext};

pub fn run(world: &mut World, ctx: &mut StepContext) {
    let player = combat::player_candidate(world).map(|c| c.position);
    let damage_multiplier = ctx.difficulty.damage_multiplier();

    for (entity, (kind, transform, college)) in
        world.query_mut::<(&EntityKind, &Transform, &mut College)>()
    {
        let EntityKind::College(faction) = *kind else {
            continue;
        };
        let position = transform.position;
        college.time_since_last_shot += ctx.delta;

        if faction == Faction::Hostile {
            let in_range = player.filter(|p| p.distance(position) < college.range);
            if let Some(target) = in_range {
                if college.time_since_last_shot >= college.fire_interval {
                    let spread = ctx
                        .rng
                        .gen_range(-COLLEGE_INACCURACY_DEG..=COLLEGE_INACCURACY_DEG);
                    ctx.spawns.spawn(Spawn::Projectile {
                        kind: college.projectile,
                        owner: Faction::Hostile,
                        position,
                        rotation: bearing_deg(position, target) + spread,
                        damage_multiplier,
                    });
                    ctx.events.push(SimEvent::ShotFired {
                        kind: college.projectile,
                        owner: Faction::Hostile,
                        position,
                    });
                    college.time_since_last_shot = 0.0;
                }
                // Under fire, production pauses.
                continue;
            }
        }

        college.spawn_timer += ctx.delta;
        if college.spawn_timer > college.spawn_interval {
            college.spawn_timer = 0.0;
            let class = if faction == Faction::Hostile {
                VesselClass::Enemy
            } else {
                VesselClass::Friendly
            };
            debug!("{} launches a {class:?} vessel ({entity:?})", college.name);
            ctx.spawns.spawn(Spawn::Vessel {
                class,
                position: position + DVec2::splat(COLLEGE_SPAWN_OFFSET),
            });
        }
    }
}

/// Check session objectives after combat has resolved: victory when no
/// hostile college stands, and the boss loses its shield once it is the
/// last one left.
pub fn update_objectives(world: &mut World, ctx: &mut StepContext) {
    let hostile: Vec<Entity> = world
        .query::<&EntityKind>()
        .iter()
        .filter(|(_, kind)| **kind == EntityKind::College(Faction::Hostile))
        .map(|(entity, _)| entity)
        .collect();

    if hostile.is_empty() {
        if ctx.score.notify_victory() {
            ctx.events.push(SimEvent::Victory);
        }
        return;
    }

    if let [last] = hostile[..] {
        if let Ok(mut college) = world.get::<&mut College>(last) {
            if college.boss && college.invulnerable {
                college.invulnerable = false;
                info!("{} is now vulnerable", college.name);
                ctx.events.push(SimEvent::ObjectiveVulnerable {
                    name: college.name.clone(),
                });
            }
        }
    }
}
