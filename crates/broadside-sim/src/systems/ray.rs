//! Piercing ray resolution and beam lifetime.

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use broadside_core::components::{College, Hull, RayBeam, Transform};
use broadside_core::constants::RAY_PIERCE_COUNT;
use broadside_core::enums::{EntityKind, Faction, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::geometry::Polygon;
use broadside_core::health::{Damageable, Health};
use broadside_core::ray::{ProjectileRay, Shaped};

use crate::spawn::{Spawn, Spawner};
use crate::systems::{damage, StepContext};

/// A candidate struck by a ray. Shape and centre are captured when the ray
/// fires; health is read and written through the world.
struct RayTarget<'w> {
    world: &'w World,
    entity: Entity,
    center: DVec2,
    shape: Polygon,
    /// Takes a hit slot but no damage.
    shielded: bool,
}

impl Shaped for RayTarget<'_> {
    fn center(&self) -> DVec2 {
        self.center
    }

    fn shape(&self) -> &Polygon {
        &self.shape
    }
}

impl Damageable for RayTarget<'_> {
    fn health(&self) -> f64 {
        self.world
            .get::<&Health>(self.entity)
            .map(|h| h.health())
            .unwrap_or(0.0)
    }

    fn max_health(&self) -> f64 {
        self.world
            .get::<&Health>(self.entity)
            .map(|h| h.max_health())
            .unwrap_or(0.0)
    }

    fn damage(&mut self, amount: f64) {
        if self.shielded {
            return;
        }
        if let Ok(mut health) = self.world.get::<&mut Health>(self.entity) {
            health.damage(amount);
        }
    }

    fn kill(&mut self) {
        if let Ok(mut health) = self.world.get::<&mut Health>(self.entity) {
            health.kill();
        }
    }

    fn is_killed(&self) -> bool {
        self.world
            .get::<&Health>(self.entity)
            .map(|h| h.is_killed())
            .unwrap_or(true)
    }
}

/// Whether a player ray may strike this kind of entity.
fn is_ray_target(kind: EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::Vessel(VesselClass::Enemy | VesselClass::Neutral | VesselClass::Kraken)
            | EntityKind::College(Faction::Hostile)
    )
}

fn collect_targets(world: &World) -> Vec<RayTarget<'_>> {
    let mut targets = Vec::new();
    for (entity, (kind, transform, hull, health)) in world
        .query::<(&EntityKind, &Transform, &Hull, &Health)>()
        .iter()
    {
        if !is_ray_target(*kind) || health.is_dead() {
            continue;
        }
        targets.push(RayTarget {
            world,
            entity,
            center: transform.position,
            shape: hull.0.clone(),
            shielded: false,
        });
    }
    for target in &mut targets {
        target.shielded = world
            .get::<&College>(target.entity)
            .map(|c| c.invulnerable)
            .unwrap_or(false);
    }
    targets
}

/// Resolve `beam` immediately against the nearest targets along it, then
/// queue it for display. Returns the number of targets struck.
pub fn fire_ray(world: &World, beam: ProjectileRay, ctx: &mut StepContext) -> u32 {
    let mut targets = collect_targets(world);
    let struck = beam.fire(&mut targets, RAY_PIERCE_COUNT);
    let by_player = beam.owner == Faction::Player;

    for &i in &struck {
        let target = &targets[i];
        if target.is_dead() {
            damage::resolve_lethal(world, target.entity, by_player, ctx);
        }
    }

    let hits = struck.len() as u32;
    debug!(
        "ray from ({:.1}, {:.1}) at {:.1} struck {hits}",
        beam.origin.x, beam.origin.y, beam.rotation
    );
    ctx.events.push(SimEvent::RayFired {
        origin: beam.origin,
        rotation: beam.rotation,
        hits,
    });
    ctx.spawns.spawn(Spawn::Ray(beam));
    hits
}

/// Advance every lingering beam's show window.
pub fn run(world: &mut World, ctx: &mut StepContext) {
    for (_entity, beam) in world.query_mut::<&mut RayBeam>() {
        beam.0.update(ctx.delta);
    }
}
