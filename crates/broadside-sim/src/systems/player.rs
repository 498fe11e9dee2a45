//! Player helm and weapons.
//!
//! Applies the latched command inputs to the player's vessel: power-up and
//! reload timers, throttle and rudder, then broadside and ray fire.

use hecs::{Entity, World};
use log::debug;

use broadside_core::components::{Hull, Motion, PlayerControl, Transform};
use broadside_core::constants::SHOT_DELAY;
use broadside_core::enums::{EntityKind, Faction, PowerupKind, ProjectileKind, VesselClass};
use broadside_core::health::{Damageable, Health};
use broadside_core::ray::ProjectileRay;

use crate::systems::{combat, motion, ray, StepContext};

/// Find the player's entity.
pub fn find_player(world: &World) -> Option<Entity> {
    world
        .query::<&EntityKind>()
        .iter()
        .find(|(_, kind)| **kind == EntityKind::Vessel(VesselClass::Player))
        .map(|(entity, _)| entity)
}

/// Expire finished power-ups and count down the rest.
pub fn tick_powerups(control: &mut PlayerControl, delta: f64) {
    for powerup in &mut control.powerups {
        powerup.remaining_secs -= delta;
    }
    control.powerups.retain(|p| {
        if p.remaining_secs > 0.0 {
            return true;
        }
        debug!("{} expired", p.kind.name());
        false
    });
}

pub fn run(world: &mut World, ctx: &mut StepContext) {
    let world: &World = world;
    let Some(entity) = find_player(world) else {
        return;
    };
    let dead = world
        .get::<&Health>(entity)
        .map(|h| h.is_dead())
        .unwrap_or(true);
    if dead {
        return;
    }

    let mut pending_ray = None;
    {
        let Ok(mut query) =
            world.query_one::<(&mut Transform, &mut Hull, &Motion, &mut PlayerControl)>(entity)
        else {
            return;
        };
        let Some((transform, hull, motion, control)) = query.get() else {
            return;
        };

        tick_powerups(control, ctx.delta);
        control.time_since_last_shot += ctx.delta;

        if control.throttle != 0 {
            motion::integrate(
                transform,
                hull,
                motion.speed * control.throttle as f64,
                ctx.delta,
                control.speed_multiplier(),
                ctx.arena,
            );
        }
        if control.rudder != 0 {
            motion::turn(
                transform,
                hull,
                motion.turn_speed * control.rudder as f64,
                ctx.delta,
                1.0,
            );
        }

        let reloaded = control.time_since_last_shot >= SHOT_DELAY * control.shot_delay_multiplier();
        if reloaded && control.fire_broadside {
            combat::fire_broadside(
                ctx,
                ProjectileKind::Stock,
                Faction::Player,
                transform.position,
                transform.rotation,
                control.damage_multiplier(),
                control.has(PowerupKind::StarburstFire),
            );
            control.time_since_last_shot = 0.0;
        } else if reloaded && control.fire_ray {
            pending_ray = Some(ProjectileRay::new(
                transform.position,
                transform.rotation,
                ProjectileKind::Ray,
                Faction::Player,
                control.damage_multiplier(),
            ));
            control.time_since_last_shot = 0.0;
        }
        control.fire_broadside = false;
        control.fire_ray = false;
    }

    // Ray damage reads other vessels' transforms, so the player's borrow is released first.
    if let Some(beam) = pending_ray {
        ray::fire_ray(world, beam, ctx);
    }
}
