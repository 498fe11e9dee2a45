//! Contact detection and per-kind contact rules.
//!
//! Every overlapping pair is dispatched twice, once with each entity as the
//! receiver, so each kind only describes what happens to itself. Effects
//! apply immediately; removal waits for the cleanup pass.

use hecs::{Entity, World};
use log::debug;

use broadside_core::components::{ActivePowerup, Bounty, Hull, Pickup, PlayerControl, Projectile};
use broadside_core::constants::*;
use broadside_core::enums::{EntityKind, Faction, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::geometry::Polygon;
use broadside_core::health::{Damageable, Health};

use crate::systems::{damage, StepContext};

/// Collision shape captured at the start of the pass.
struct Body {
    entity: Entity,
    shape: Polygon,
}

/// Whether the entity may still take part in contacts this step.
fn is_live(world: &World, entity: Entity) -> bool {
    if let Ok(health) = world.get::<&Health>(entity) {
        if health.is_dead() {
            return false;
        }
    }
    if let Ok(projectile) = world.get::<&Projectile>(entity) {
        if projectile.spent {
            return false;
        }
    }
    if let Ok(pickup) = world.get::<&Pickup>(entity) {
        if pickup.collected {
            return false;
        }
    }
    true
}

fn collect_bodies(world: &World) -> Vec<Body> {
    world
        .query::<&Hull>()
        .iter()
        .map(|(entity, hull)| Body {
            entity,
            shape: hull.0.clone(),
        })
        .filter(|body| is_live(world, body.entity))
        .collect()
}

/// Find every overlapping pair in world order.
pub fn find_contacts(world: &World) -> Vec<(Entity, Entity)> {
    let bodies = collect_bodies(world);
    let mut contacts = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            if a.shape.overlaps(&b.shape) {
                contacts.push((a.entity, b.entity));
            }
        }
    }
    contacts
}

pub fn run(world: &mut World, ctx: &mut StepContext) {
    let world: &World = world;
    for (a, b) in find_contacts(world) {
        // Both sides of a pair react, even if the first reaction destroys one.
        if !is_live(world, a) || !is_live(world, b) {
            continue;
        }
        on_contact(world, a, b, ctx);
        on_contact(world, b, a, ctx);
    }
}

/// Owner faction of a live projectile.
fn projectile_owner(world: &World, entity: Entity) -> Option<(Faction, f64)> {
    world
        .get::<&Projectile>(entity)
        .ok()
        .filter(|p| !p.spent)
        .map(|p| (p.owner, p.damage))
}

fn spend(world: &World, entity: Entity) {
    if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
        projectile.spent = true;
    }
}

/// Apply the receiver's contact rule against `other`.
fn on_contact(world: &World, receiver: Entity, other: Entity, ctx: &mut StepContext) {
    let (Ok(kind), Ok(other_kind)) = (
        world.get::<&EntityKind>(receiver).map(|k| *k),
        world.get::<&EntityKind>(other).map(|k| *k),
    ) else {
        return;
    };

    match (kind, other_kind) {
        (EntityKind::Vessel(VesselClass::Enemy), EntityKind::Projectile(_)) => {
            if let Some((owner, amount)) = projectile_owner(world, other) {
                if owner.is_allied_with_player() {
                    spend(world, other);
                    damage::damage_vessel(world, receiver, amount, owner == Faction::Player, ctx);
                }
            }
        }
        (EntityKind::Vessel(VesselClass::Enemy), EntityKind::Vessel(VesselClass::Player)) => {
            // Ramming pays out in proportion to the rammer's remaining health.
            let ratio = world
                .get::<&Health>(receiver)
                .map(|h| h.ratio())
                .unwrap_or(0.0);
            damage::damage_player(world, other, RAM_DAMAGE, ctx);
            let award = Bounty {
                xp: ratio * ENEMY_XP,
                plunder: ENEMY_PLUNDER,
            };
            damage::destroy_vessel(world, receiver, Some(award), ctx);
        }
        (EntityKind::Vessel(VesselClass::Friendly), EntityKind::Projectile(_)) => {
            if let Some((Faction::Hostile, amount)) = projectile_owner(world, other) {
                spend(world, other);
                damage::damage_vessel(world, receiver, amount, false, ctx);
            }
        }
        (EntityKind::Vessel(VesselClass::Player), EntityKind::Projectile(_)) => {
            if let Some((Faction::Hostile, amount)) = projectile_owner(world, other) {
                spend(world, other);
                let defense = world
                    .get::<&PlayerControl>(receiver)
                    .map(|pc| pc.defense)
                    .unwrap_or(0.0);
                damage::damage_player(world, receiver, (amount - defense).max(0.0), ctx);
            }
        }
        (EntityKind::Vessel(VesselClass::Player), EntityKind::College(_)) => {
            debug!("player ran aground on a college");
            damage::signal_defeat(ctx);
        }
        (EntityKind::Vessel(VesselClass::Player), EntityKind::Vessel(VesselClass::Neutral)) => {
            damage::damage_player(world, receiver, RAM_DAMAGE, ctx);
        }
        (EntityKind::Vessel(VesselClass::Neutral), EntityKind::Vessel(VesselClass::Player)) => {
            let award = world.get::<&Bounty>(receiver).ok().map(|b| *b);
            damage::destroy_vessel(world, receiver, award, ctx);
        }
        (EntityKind::Vessel(VesselClass::Neutral), EntityKind::Projectile(_)) => {
            if let Some((owner, amount)) = projectile_owner(world, other) {
                spend(world, other);
                damage::damage_vessel(world, receiver, amount, owner == Faction::Player, ctx);
            }
        }
        (EntityKind::Vessel(VesselClass::Neutral), EntityKind::Vessel(_)) => {
            damage::destroy_vessel(world, receiver, None, ctx);
        }
        (EntityKind::Vessel(VesselClass::Kraken), EntityKind::Vessel(_)) => {
            damage::apply_damage(world, other, KRAKEN_CONTACT_DPS * ctx.delta, false, ctx);
        }
        (EntityKind::Vessel(VesselClass::Kraken), EntityKind::Projectile(_)) => {
            if let Some((Faction::Player, amount)) = projectile_owner(world, other) {
                spend(world, other);
                damage::damage_vessel(world, receiver, amount, true, ctx);
            }
        }
        (EntityKind::College(Faction::Hostile), EntityKind::Projectile(_)) => {
            if let Some((Faction::Player, amount)) = projectile_owner(world, other) {
                spend(world, other);
                damage::damage_college(world, receiver, amount, ctx);
            }
        }
        (EntityKind::Obstacle, EntityKind::Projectile(_)) => {
            spend(world, other);
        }
        (EntityKind::Pickup, EntityKind::Vessel(VesselClass::Player)) => {
            collect_pickup(world, receiver, other, ctx);
        }
        _ => {}
    }
}

/// Hand a pickup's power-up to the player. Collecting an active power-up
/// restarts its timer.
fn collect_pickup(world: &World, pickup: Entity, player: Entity, ctx: &mut StepContext) {
    let kind = {
        let Ok(mut pickup) = world.get::<&mut Pickup>(pickup) else {
            return;
        };
        pickup.collected = true;
        pickup.kind
    };
    if let Ok(mut control) = world.get::<&mut PlayerControl>(player) {
        match control.powerups.iter_mut().find(|p| p.kind == kind) {
            Some(active) => active.remaining_secs = POWERUP_DURATION_SECS,
            None => control.powerups.push(ActivePowerup {
                kind,
                remaining_secs: POWERUP_DURATION_SECS,
            }),
        }
    }
    debug!("collected {}", kind.name());
    ctx.events.push(SimEvent::PowerupCollected { kind });
}
