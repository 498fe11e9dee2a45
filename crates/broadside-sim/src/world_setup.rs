//! Entity spawn factories for setting up the simulation world.
//!
//! Creates vessels, colleges, rocks, projectiles, rays and pickups with
//! the appropriate component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use broadside_ai::profiles::get_profile;
use broadside_core::components::*;
use broadside_core::constants::*;
use broadside_core::enums::*;
use broadside_core::geometry::Polygon;
use broadside_core::health::Health;
use broadside_core::ray::ProjectileRay;

use crate::arena::Arena;

/// College layout as (name, fraction of width, fraction of height, boss).
const COLLEGES: [(&str, f64, f64, bool); 4] = [
    ("Langwith", 1.0 / 6.0, 7.0 / 15.0, false),
    ("Goodricke", 5.0 / 6.0, 7.0 / 15.0, false),
    ("Constantine", 1.0 / 6.0, 5.0 / 6.0, false),
    ("James", 5.0 / 6.0, 5.0 / 6.0, true),
];

/// Rocks as (fraction of width, fraction of height, side length).
const ROCKS: [(f64, f64, f64); 2] = [(0.5, 0.5, 80.0), (0.5, 0.8, 60.0)];

const NEUTRAL_STARTS: [(f64, f64); 3] = [(0.2, 0.3), (0.8, 0.3), (0.5, 0.35)];

/// Populate a fresh session. Returns the number of hostile colleges.
pub fn setup_session(
    world: &mut World,
    arena: &Arena,
    rng: &mut ChaCha8Rng,
    difficulty: Difficulty,
) -> u32 {
    spawn_player(world, arena.at(0.5, 0.1), 90.0);

    for (name, fx, fy, boss) in COLLEGES {
        spawn_college(world, rng, name, arena.at(fx, fy), boss, difficulty);
    }
    for (fx, fy, side) in ROCKS {
        spawn_obstacle(world, arena.at(fx, fy), side, side);
    }
    for (fx, fy) in NEUTRAL_STARTS {
        spawn_vessel(world, VesselClass::Neutral, arena.at(fx, fy), difficulty);
    }
    spawn_vessel(world, VesselClass::Kraken, arena.at(0.5, 0.65), difficulty);

    COLLEGES.len() as u32
}

/// Spawn the player's vessel.
pub fn spawn_player(world: &mut World, position: DVec2, rotation: f64) -> Entity {
    let profile = get_profile(VesselClass::Player);
    let transform = Transform::new(position, rotation);
    world.spawn((
        EntityKind::Vessel(VesselClass::Player),
        transform,
        Hull::boat().placed(&transform),
        Motion {
            speed: profile.speed,
            turn_speed: profile.turn_speed,
        },
        Health::new(profile.max_health),
        PlayerControl::default(),
    ))
}

/// Spawn any vessel class at `position`, facing +x.
pub fn spawn_vessel(
    world: &mut World,
    class: VesselClass,
    position: DVec2,
    difficulty: Difficulty,
) -> Entity {
    let profile = get_profile(class);
    let transform = Transform::new(position, 0.0);
    let motion = Motion {
        speed: profile.speed,
        turn_speed: profile.turn_speed,
    };
    let health = Health::new(profile.scaled_health(difficulty));
    let bounty = Bounty {
        xp: profile.xp,
        plunder: profile.plunder,
    };
    let kind = EntityKind::Vessel(class);

    match class {
        VesselClass::Player => spawn_player(world, position, 0.0),
        VesselClass::Enemy | VesselClass::Friendly => {
            let combatant = Combatant {
                target: None,
                state: AiState::Idle,
                attack_range: ATTACK_RANGE,
                approach_range: APPROACH_RANGE,
                shot_delay: SHOT_DELAY,
                time_since_last_shot: 0.0,
                projectile: profile.projectile,
                damage_multiplier: profile.damage_multiplier(difficulty),
            };
            world.spawn((
                kind,
                transform,
                Hull::boat().placed(&transform),
                motion,
                health,
                bounty,
                Navigator::new(position),
                combatant,
            ))
        }
        VesselClass::Neutral => {
            // Destination on the spawn point forces a retarget on the first step.
            let mut navigator = Navigator::new(position);
            navigator.destination = Some(position);
            world.spawn((
                kind,
                transform,
                Hull::boat().placed(&transform),
                motion,
                health,
                bounty,
                navigator,
            ))
        }
        VesselClass::Kraken => world.spawn((
            kind,
            transform,
            Hull::kraken().placed(&transform),
            motion,
            health,
            bounty,
            Creature {
                direction: DVec2::ONE,
                time_on_direction: 0.0,
                time_since_last_shot: 0.0,
            },
        )),
    }
}

/// Spawn a hostile college. The spawn timer starts at a random offset so
/// colleges do not launch vessels in lockstep.
pub fn spawn_college(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    name: &str,
    position: DVec2,
    boss: bool,
    difficulty: Difficulty,
) -> Entity {
    let (min_interval, max_interval) = difficulty.college_spawn_interval();
    let spawn_interval = rng.gen_range(min_interval..=max_interval);
    let spawn_timer = rng.gen_range(0.0..=spawn_interval);
    let base_health = if boss {
        BOSS_COLLEGE_MAX_HEALTH
    } else {
        COLLEGE_MAX_HEALTH
    };
    let transform = Transform::new(position, 0.0);

    world.spawn((
        EntityKind::College(Faction::Hostile),
        transform,
        Hull::college().placed(&transform),
        Health::new(base_health * difficulty.hp_multiplier()),
        College {
            name: name.to_string(),
            boss,
            invulnerable: boss,
            range: COLLEGE_RANGE,
            fire_interval: COLLEGE_FIRE_INTERVAL_SECS,
            time_since_last_shot: 0.0,
            projectile: if boss {
                ProjectileKind::Boss
            } else {
                ProjectileKind::Stock
            },
            spawn_interval,
            spawn_timer,
        },
    ))
}

/// Spawn a static rectangular rock.
pub fn spawn_obstacle(world: &mut World, position: DVec2, width: f64, height: f64) -> Entity {
    let transform = Transform::new(position, 0.0);
    world.spawn((
        EntityKind::Obstacle,
        transform,
        Hull(Polygon::rectangle(width, height)).placed(&transform),
    ))
}

pub fn spawn_projectile(
    world: &mut World,
    kind: ProjectileKind,
    owner: Faction,
    position: DVec2,
    rotation: f64,
    damage_multiplier: f64,
) -> Entity {
    let transform = Transform::new(position, rotation);
    world.spawn((
        EntityKind::Projectile(kind),
        transform,
        Hull::projectile().placed(&transform),
        Projectile {
            kind,
            owner,
            speed: kind.speed(),
            damage: kind.damage() * damage_multiplier,
            age_secs: 0.0,
            spent: false,
        },
    ))
}

pub fn spawn_ray(world: &mut World, ray: ProjectileRay) -> Entity {
    let transform = Transform::new(ray.origin, ray.rotation);
    world.spawn((EntityKind::Ray, transform, RayBeam(ray)))
}

pub fn spawn_pickup(world: &mut World, kind: PowerupKind, position: DVec2) -> Entity {
    let transform = Transform::new(position, 0.0);
    world.spawn((
        EntityKind::Pickup,
        transform,
        Hull::pickup().placed(&transform),
        Pickup {
            kind,
            collected: false,
        },
    ))
}
