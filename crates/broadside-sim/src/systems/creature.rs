//! Kraken behaviour: diagonal wandering and spread fire at the player.

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use broadside_core::components::{Creature, Hull, Motion, Transform};
use broadside_core::constants::*;
use broadside_core::enums::{EntityKind, Faction, ProjectileKind, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::geometry::bearing_deg;
use broadside_core::health::{Damageable, Health};

use crate::spawn::{Spawn, Spawner};
use crate::systems::{combat, motion, StepContext};

/// Diagonal headings the kraken picks between. Not normalised, so the
/// kraken covers ground faster than its nominal speed.
const DIRECTIONS: [DVec2; 4] = [
    DVec2::new(1.0, 1.0),
    DVec2::new(1.0, -1.0),
    DVec2::new(-1.0, 1.0),
    DVec2::new(-1.0, -1.0),
];

/// Launch the kraken's fan of shots back toward the player.
pub fn fire_spread(ctx: &mut StepContext, position: DVec2, player: DVec2, damage_multiplier: f64) {
    let origin = position - DVec2::splat(25.0);
    let base = bearing_deg(player, origin);
    for i in 0..KRAKEN_SPREAD_COUNT {
        let offset = i as f64;
        ctx.spawns.spawn(Spawn::Projectile {
            kind: ProjectileKind::Kraken,
            owner: Faction::Hostile,
            position: origin + DVec2::splat(offset),
            rotation: base + KRAKEN_SPREAD_STEP_DEG * offset + KRAKEN_SPREAD_OFFSET_DEG,
            damage_multiplier,
        });
    }
    ctx.events.push(SimEvent::ShotFired {
        kind: ProjectileKind::Kraken,
        owner: Faction::Hostile,
        position: origin,
    });
}

pub fn run(world: &mut World, ctx: &mut StepContext) {
    let world: &World = world;
    let player = combat::player_candidate(world).map(|c| c.position);

    let krakens: Vec<Entity> = world
        .query::<(&EntityKind, &Health)>()
        .iter()
        .filter(|(_, (kind, health))| {
            **kind == EntityKind::Vessel(VesselClass::Kraken) && !health.is_dead()
        })
        .map(|(entity, _)| entity)
        .collect();

    let damage_multiplier = ctx.difficulty.damage_multiplier();
    for entity in krakens {
        let Ok(mut query) =
            world.query_one::<(&mut Transform, &mut Hull, &Motion, &mut Creature)>(entity)
        else {
            continue;
        };
        let Some((transform, hull, motion, creature)) = query.get() else {
            continue;
        };

        creature.time_on_direction += ctx.delta;
        if creature.time_on_direction >= KRAKEN_DIRECTION_CHANGE_SECS {
            creature.direction = DIRECTIONS[ctx.rng.gen_range(0..DIRECTIONS.len())];
            creature.time_on_direction = 0.0;
        }
        let offset = creature.direction * motion.speed * ctx.delta;
        motion::displace(transform, hull, offset, ctx.arena);

        creature.time_since_last_shot += ctx.delta;
        if creature.time_since_last_shot >= KRAKEN_SHOT_INTERVAL_SECS {
            creature.time_since_last_shot = 0.0;
            if let Some(target) = player {
                if transform.position.distance(target) < KRAKEN_ATTACK_RANGE {
                    debug!("kraken {entity:?} fires");
                    fire_spread(ctx, transform.position, target, damage_multiplier);
                }
            }
        }
    }
}
