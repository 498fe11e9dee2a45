//! Damage routing, destruction and rewards.
//!
//! Every hit in the simulation lands here so health is always clamped and a
//! kill is processed exactly once. Destruction only flags the entity; the
//! cleanup system removes it at the next step boundary.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;

use broadside_core::components::{Bounty, College, PlayerControl, Transform};
use broadside_core::constants::POWERUP_DROP_CHANCE;
use broadside_core::enums::{EntityKind, Faction, GamePhase, PowerupKind, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::health::{Damageable, Health};

use crate::score::ProgressSink;
use crate::spawn::{Spawn, Spawner};
use crate::systems::StepContext;

/// Apply `amount` to whatever `entity` is, with the rules for its kind.
/// Returns whether this hit destroyed (or captured) it.
pub fn apply_damage(
    world: &World,
    entity: Entity,
    amount: f64,
    by_player: bool,
    ctx: &mut StepContext,
) -> bool {
    let Ok(kind) = world.get::<&EntityKind>(entity).map(|k| *k) else {
        return false;
    };
    match kind {
        EntityKind::Vessel(VesselClass::Player) => damage_player(world, entity, amount, ctx),
        EntityKind::Vessel(_) => damage_vessel(world, entity, amount, by_player, ctx),
        EntityKind::College(Faction::Hostile) => damage_college(world, entity, amount, ctx),
        _ => false,
    }
}

/// Damage a non-player vessel. A lethal player hit pays out its bounty.
pub fn damage_vessel(
    world: &World,
    entity: Entity,
    amount: f64,
    by_player: bool,
    ctx: &mut StepContext,
) -> bool {
    {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return false;
        };
        if health.is_dead() {
            return false;
        }
        health.damage(amount);
        if !health.is_dead() {
            return false;
        }
    }
    resolve_lethal(world, entity, by_player, ctx);
    true
}

/// Follow-up for an entity whose health has just reached zero.
pub fn resolve_lethal(world: &World, entity: Entity, by_player: bool, ctx: &mut StepContext) {
    let Ok(kind) = world.get::<&EntityKind>(entity).map(|k| *k) else {
        return;
    };
    match kind {
        EntityKind::Vessel(VesselClass::Player) => signal_defeat(ctx),
        EntityKind::Vessel(_) => {
            let award = if by_player {
                world.get::<&Bounty>(entity).ok().map(|b| *b)
            } else {
                None
            };
            destroy_vessel(world, entity, award, ctx);
        }
        EntityKind::College(Faction::Hostile) => capture_college(world, entity, ctx),
        _ => {}
    }
}

/// Flag a vessel as destroyed and pay out `award`. Enemy vessels may drop a
/// power-up. A vessel already flagged is left alone; returns whether this
/// call destroyed it.
pub fn destroy_vessel(
    world: &World,
    entity: Entity,
    award: Option<Bounty>,
    ctx: &mut StepContext,
) -> bool {
    {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return false;
        };
        if health.is_killed() {
            return false;
        }
        health.kill();
    }

    let Ok(kind) = world.get::<&EntityKind>(entity).map(|k| *k) else {
        return false;
    };
    let Some(class) = kind.vessel_class() else {
        return false;
    };
    let position = world
        .get::<&Transform>(entity)
        .map(|t| t.position)
        .unwrap_or_default();

    ctx.score.vessels_destroyed += 1;
    if let Some(bounty) = award {
        ctx.score.add_experience(bounty.xp);
        ctx.score.add_currency(bounty.plunder);
    }
    ctx.events.push(SimEvent::VesselDestroyed { class, position });
    debug!("{class:?} destroyed at ({:.1}, {:.1})", position.x, position.y);

    if class == VesselClass::Enemy && ctx.rng.gen_bool(POWERUP_DROP_CHANCE) {
        let powerup = PowerupKind::ALL[ctx.rng.gen_range(0..PowerupKind::ALL.len())];
        ctx.spawns.spawn(Spawn::Pickup {
            kind: powerup,
            position,
        });
        ctx.events.push(SimEvent::PowerupDropped {
            kind: powerup,
            position,
        });
    }
    true
}

/// Damage the player. Invincibility absorbs everything.
pub fn damage_player(world: &World, entity: Entity, amount: f64, ctx: &mut StepContext) -> bool {
    let invincible = world
        .get::<&PlayerControl>(entity)
        .map(|pc| pc.has(PowerupKind::Invincibility))
        .unwrap_or(false);
    if invincible {
        return false;
    }
    {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return false;
        };
        if health.is_dead() {
            return false;
        }
        health.damage(amount);
        if !health.is_dead() {
            return false;
        }
    }
    signal_defeat(ctx);
    true
}

/// Raise the defeat signal once per session.
pub fn signal_defeat(ctx: &mut StepContext) {
    if ctx.score.outcome != Some(GamePhase::Defeat) {
        ctx.score.notify_defeat();
        ctx.events.push(SimEvent::Defeat);
    }
}

/// Damage a hostile college unless it is shielded.
pub fn damage_college(world: &World, entity: Entity, amount: f64, ctx: &mut StepContext) -> bool {
    let shielded = world
        .get::<&College>(entity)
        .map(|c| c.invulnerable)
        .unwrap_or(true);
    if shielded {
        return false;
    }
    {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return false;
        };
        if health.is_dead() {
            return false;
        }
        health.damage(amount);
        if !health.is_dead() {
            return false;
        }
    }
    capture_college(world, entity, ctx);
    true
}

/// Turn a fallen hostile college into a friendly one at full health.
pub fn capture_college(world: &World, entity: Entity, ctx: &mut StepContext) {
    {
        let Ok(mut kind) = world.get::<&mut EntityKind>(entity) else {
            return;
        };
        if *kind != EntityKind::College(Faction::Hostile) {
            return;
        }
        *kind = EntityKind::College(Faction::Friendly);
    }
    if let Ok(mut health) = world.get::<&mut Health>(entity) {
        *health = Health::new(health.max_health());
    }
    let name = match world.get::<&mut College>(entity) {
        Ok(mut college) => {
            college.invulnerable = false;
            college.spawn_timer = 0.0;
            college.name.clone()
        }
        Err(_) => return,
    };
    ctx.score.notify_objective_destroyed(&name);
    ctx.events.push(SimEvent::ObjectiveDestroyed { name });
}
