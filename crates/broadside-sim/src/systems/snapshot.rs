//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! Read-only over the world. Entities awaiting removal at the next step
//! boundary are left out.

use hecs::World;

use broadside_core::components::*;
use broadside_core::enums::*;
use broadside_core::events::SimEvent;
use broadside_core::health::{Damageable, Health};
use broadside_core::state::*;
use broadside_core::types::SimTime;

use crate::engine::handle_of;
use crate::score::ScoreState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    difficulty: Difficulty,
    score: &ScoreState,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        difficulty,
        player: build_player(world),
        vessels: build_vessels(world),
        colleges: build_colleges(world),
        obstacles: build_obstacles(world),
        projectiles: build_projectiles(world),
        rays: build_rays(world),
        pickups: build_pickups(world),
        score: score.view(time.elapsed_secs),
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Transform, &Health, &PlayerControl)>()
        .iter()
        .next()
        .map(|(_, (transform, health, control))| PlayerView {
            position: transform.position,
            rotation: transform.rotation,
            health: health.health(),
            max_health: health.max_health(),
            powerups: control
                .powerups
                .iter()
                .map(|p| (p.kind, p.remaining_secs))
                .collect(),
        })
}

/// Every live non-player vessel, ordered by id.
fn build_vessels(world: &World) -> Vec<VesselView> {
    let mut vessels: Vec<VesselView> = world
        .query::<(&EntityKind, &Transform, &Health)>()
        .iter()
        .filter_map(|(entity, (kind, transform, health))| {
            let class = kind.vessel_class()?;
            if class == VesselClass::Player || health.is_dead() {
                return None;
            }
            let combatant = world.get::<&Combatant>(entity).ok();
            let navigator = world.get::<&Navigator>(entity).ok();
            Some(VesselView {
                id: handle_of(entity).0,
                class,
                position: transform.position,
                rotation: transform.rotation,
                health: health.health(),
                max_health: health.max_health(),
                ai_state: combatant.map(|c| c.state),
                destination: navigator.and_then(|n| n.destination),
            })
        })
        .collect();
    vessels.sort_by_key(|v| v.id);
    vessels
}

fn build_colleges(world: &World) -> Vec<CollegeView> {
    let mut colleges: Vec<CollegeView> = world
        .query::<(&EntityKind, &Transform, &Health, &College)>()
        .iter()
        .filter_map(|(entity, (kind, transform, health, college))| {
            let EntityKind::College(faction) = *kind else {
                return None;
            };
            Some(CollegeView {
                id: handle_of(entity).0,
                name: college.name.clone(),
                faction,
                position: transform.position,
                health: health.health(),
                max_health: health.max_health(),
                boss: college.boss,
                invulnerable: college.invulnerable,
            })
        })
        .collect();
    colleges.sort_by_key(|c| c.id);
    colleges
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    world
        .query::<(&EntityKind, &Transform, &Hull)>()
        .iter()
        .filter(|(_, (kind, _, _))| **kind == EntityKind::Obstacle)
        .map(|(_, (_, transform, hull))| ObstacleView {
            position: transform.position,
            vertices: hull.0.vertices().to_vec(),
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Transform, &Projectile)>()
        .iter()
        .filter(|(_, (_, projectile))| !projectile.spent)
        .map(|(_, (transform, projectile))| ProjectileView {
            kind: projectile.kind,
            owner: projectile.owner,
            position: transform.position,
            rotation: transform.rotation,
        })
        .collect()
}

fn build_rays(world: &World) -> Vec<RayView> {
    world
        .query::<&RayBeam>()
        .iter()
        .filter(|(_, beam)| !beam.0.should_remove())
        .map(|(_, beam)| RayView {
            origin: beam.0.origin,
            end: beam.0.end(),
            owner: beam.0.owner,
        })
        .collect()
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    world
        .query::<(&Transform, &Pickup)>()
        .iter()
        .filter(|(_, (_, pickup))| !pickup.collected)
        .map(|(_, (transform, pickup))| PickupView {
            kind: pickup.kind,
            position: transform.position,
        })
        .collect()
}
