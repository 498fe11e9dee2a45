//! Combat AI system: target acquisition, state selection and broadside fire
//! for enemy and friendly vessels.
//!
//! Calls the combat FSM from broadside-ai, then applies navigation, steering
//! and firing to the ECS components.

use glam::DVec2;
use hecs::{Entity, World};
use log::debug;

use broadside_ai::fsm::{evaluate, CombatContext, CombatDecision};
use broadside_ai::targeting::{nearest, priority_or_nearest, Candidate};
use broadside_core::components::{Combatant, Hull, Motion, Navigator, Transform};
use broadside_core::constants::STARBURST_SHOT_COUNT;
use broadside_core::enums::{EntityKind, Faction, ProjectileKind, VesselClass};
use broadside_core::events::SimEvent;
use broadside_core::health::{Damageable, Health};

use crate::arena::{WorldQuery, WorldView};
use crate::engine::{handle_of, resolve_handle};
use crate::spawn::{Spawn, Spawner};
use crate::systems::{motion, navigation, StepContext};

/// Launch a volley: one shot off each beam, or eight evenly spread shots
/// when `starburst` is set.
#[allow(clippy::too_many_arguments)]
pub fn fire_broadside(
    ctx: &mut StepContext,
    kind: ProjectileKind,
    owner: Faction,
    position: DVec2,
    rotation: f64,
    damage_multiplier: f64,
    starburst: bool,
) {
    let offsets: Vec<f64> = if starburst {
        let step = 360.0 / STARBURST_SHOT_COUNT as f64;
        (0..STARBURST_SHOT_COUNT).map(|i| i as f64 * step).collect()
    } else {
        vec![-90.0, 90.0]
    };
    for offset in offsets {
        ctx.spawns.spawn(Spawn::Projectile {
            kind,
            owner,
            position,
            rotation: rotation + offset,
            damage_multiplier,
        });
    }
    ctx.events.push(SimEvent::ShotFired {
        kind,
        owner,
        position,
    });
}

/// The player as a targeting candidate, while alive.
pub fn player_candidate(world: &World) -> Option<Candidate> {
    world
        .query::<(&EntityKind, &Transform, &Health)>()
        .iter()
        .find(|(_, (kind, _, health))| {
            **kind == EntityKind::Vessel(VesselClass::Player) && !health.is_dead()
        })
        .map(|(entity, (_, transform, _))| Candidate {
            handle: handle_of(entity),
            position: transform.position,
        })
}

/// Run the combat AI for every live enemy and friendly vessel.
pub fn run(world: &mut World, ctx: &mut StepContext) {
    let world: &World = world;
    let view = WorldView::new(ctx.arena, world);
    let player = player_candidate(world);

    let fighters: Vec<(Entity, VesselClass)> = world
        .query::<(&EntityKind, &Combatant)>()
        .iter()
        .filter_map(|(entity, (kind, _))| kind.vessel_class().map(|class| (entity, class)))
        .collect();

    for (entity, class) in fighters {
        // Death check precedes all AI.
        let alive = world
            .get::<&Health>(entity)
            .map(|h| !h.is_dead())
            .unwrap_or(false);
        if !alive {
            continue;
        }

        let Ok(mut query) =
            world.query_one::<(&Transform, &Hull, &Motion, &Combatant, &Navigator)>(entity)
        else {
            continue;
        };
        let Some((transform, hull, motion, combatant, navigator)) = query.get() else {
            continue;
        };
        let mut transform = *transform;
        let mut hull = hull.clone();
        let motion = *motion;
        let mut combatant = combatant.clone();
        let mut navigator = navigator.clone();
        drop(query);

        combatant.time_since_last_shot += ctx.delta;
        let position = transform.position;

        if let Some(previous) = combatant.target {
            if resolve_handle(world, previous).is_none() {
                debug!("{class:?} {entity:?} lost its target");
            }
        }
        let target = match class {
            VesselClass::Enemy => priority_or_nearest(
                position,
                player,
                combatant.approach_range,
                view.vessels(VesselClass::Friendly),
            ),
            // Enemy vessels only; the kraken ignores friendly shots.
            VesselClass::Friendly => nearest(position, view.vessels(VesselClass::Enemy)),
            _ => None,
        };
        combatant.target = target.map(|c| c.handle);

        let decision = evaluate(&CombatContext {
            position,
            rotation: transform.rotation,
            target: target.map(|c| c.position),
            attack_range: combatant.attack_range,
            approach_range: combatant.approach_range,
            shot_ready: combatant.time_since_last_shot >= combatant.shot_delay,
        });
        let state = decision.state();
        if state != combatant.state {
            debug!("{class:?} {entity:?}: {:?} -> {state:?}", combatant.state);
            combatant.state = state;
        }

        match decision {
            CombatDecision::Idle => {
                navigation::update_destination(
                    &mut navigator,
                    position,
                    &view,
                    &mut *ctx.rng,
                );
            }
            CombatDecision::Approach { target } => {
                if navigation::is_destination_valid(&view, position, target) {
                    navigator.destination = Some(target);
                } else {
                    navigation::update_destination(
                        &mut navigator,
                        position,
                        &view,
                        &mut *ctx.rng,
                    );
                }
            }
            CombatDecision::Attack {
                desired_heading,
                fire,
            } => {
                navigator.destination = None;
                motion::turn_toward(
                    &mut transform,
                    &mut hull,
                    &motion,
                    desired_heading,
                    ctx.delta,
                    ctx.arena,
                );
                if fire {
                    let owner = if class == VesselClass::Enemy {
                        Faction::Hostile
                    } else {
                        Faction::Friendly
                    };
                    fire_broadside(
                        ctx,
                        combatant.projectile,
                        owner,
                        transform.position,
                        transform.rotation,
                        combatant.damage_multiplier,
                        false,
                    );
                    combatant.time_since_last_shot = 0.0;
                }
            }
        }

        if navigator.destination.is_some() {
            motion::move_to_destination(
                &mut transform,
                &mut hull,
                &motion,
                navigator.destination,
                ctx.delta,
                ctx.arena,
            );
        }

        if let Ok(mut query) =
            world.query_one::<(&mut Transform, &mut Hull, &mut Combatant, &mut Navigator)>(entity)
        {
            if let Some((t, h, c, n)) = query.get() {
                *t = transform;
                *h = hull;
                *c = combatant;
                *n = navigator;
            }
        }
    }
}
