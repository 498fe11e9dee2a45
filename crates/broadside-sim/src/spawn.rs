//! Deferred entity creation.
//!
//! Systems never add entities to the world directly. They push requests into
//! a [`SpawnQueue`], which the engine flushes at the next step boundary so a
//! new entity never takes part in the step that created it.

use glam::DVec2;
use hecs::World;

use broadside_core::enums::{Difficulty, Faction, PowerupKind, ProjectileKind, VesselClass};
use broadside_core::ray::ProjectileRay;

use crate::world_setup;

/// A request to create an entity.
#[derive(Debug, Clone)]
pub enum Spawn {
    Vessel {
        class: VesselClass,
        position: DVec2,
    },
    Projectile {
        kind: ProjectileKind,
        owner: Faction,
        position: DVec2,
        rotation: f64,
        damage_multiplier: f64,
    },
    /// A ray that has already applied its damage and only lingers for display.
    Ray(ProjectileRay),
    Pickup {
        kind: PowerupKind,
        position: DVec2,
    },
}

/// Entity registry surface handed to systems.
pub trait Spawner {
    fn spawn(&mut self, request: Spawn);
}

/// Pending additions, applied at the next step boundary.
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pending: Vec<Spawn>,
}

impl SpawnQueue {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Create every pending entity, in request order.
    pub fn flush(&mut self, world: &mut World, difficulty: Difficulty) {
        for request in self.pending.drain(..) {
            match request {
                Spawn::Vessel { class, position } => {
                    world_setup::spawn_vessel(world, class, position, difficulty);
                }
                Spawn::Projectile {
                    kind,
                    owner,
                    position,
                    rotation,
                    damage_multiplier,
                } => {
                    world_setup::spawn_projectile(
                        world,
                        kind,
                        owner,
                        position,
                        rotation,
                        damage_multiplier,
                    );
                }
                Spawn::Ray(ray) => {
                    world_setup::spawn_ray(world, ray);
                }
                Spawn::Pickup { kind, position } => {
                    world_setup::spawn_pickup(world, kind, position);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Spawner for SpawnQueue {
    fn spawn(&mut self, request: Spawn) {
        self.pending.push(request);
    }
}
