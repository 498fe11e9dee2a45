//! Tests for the simulation engine, combat systems, contact rules and objectives.

use approx::assert_abs_diff_eq;
use glam::DVec2;
use hecs::{Entity, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use broadside_ai::targeting::Candidate;
use broadside_core::commands::PlayerCommand;
use broadside_core::components::*;
use broadside_core::config::{ConfigError, SimConfig};
use broadside_core::constants::*;
use broadside_core::enums::*;
use broadside_core::events::SimEvent;
use broadside_core::geometry::Polygon;
use broadside_core::health::{Damageable, Health};

use crate::arena::{Arena, WorldQuery};
use crate::engine::{handle_of, resolve_handle, SimulationEngine};
use crate::score::ScoreState;
use crate::spawn::{Spawn, SpawnQueue, Spawner};
use crate::systems::{
    cleanup, college, collision, combat, damage, motion, navigation, player, StepContext,
};
use crate::world_setup;

/// A bare world plus the engine state systems borrow, for staged scenarios.
struct Harness {
    world: World,
    arena: Arena,
    rng: ChaCha8Rng,
    spawns: SpawnQueue,
    score: ScoreState,
    events: Vec<SimEvent>,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: World::new(),
            arena: Arena::new(ARENA_WIDTH, ARENA_HEIGHT),
            rng: ChaCha8Rng::seed_from_u64(7),
            spawns: SpawnQueue::default(),
            score: ScoreState::default(),
            events: Vec::new(),
        }
    }

    fn split(&mut self) -> (&mut World, StepContext<'_>) {
        (
            &mut self.world,
            StepContext {
                delta: DT,
                difficulty: Difficulty::Medium,
                arena: &self.arena,
                rng: &mut self.rng,
                spawns: &mut self.spawns,
                score: &mut self.score,
                events: &mut self.events,
            },
        )
    }

    fn health(&self, entity: Entity) -> f64 {
        self.world.get::<&Health>(entity).unwrap().health()
    }
}

fn started_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap();
    engine.queue_command(PlayerCommand::StartSession { difficulty: None });
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = started_engine(12345);
    let mut engine_b = started_engine(12345);

    for i in 0..600 {
        if i % 45 == 0 {
            for engine in [&mut engine_a, &mut engine_b] {
                engine.queue_commands([
                    PlayerCommand::SetThrottle { value: 1 },
                    PlayerCommand::SetRudder {
                        value: if i % 90 == 0 { 1 } else { -1 },
                    },
                    PlayerCommand::FireBroadside,
                ]);
            }
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at step {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    // Neutral destinations are drawn on the first step.
    let mut diverged = false;
    for _ in 0..10 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Session setup and phases ----

#[test]
fn test_start_session_populates_arena() {
    let mut engine = started_engine(1);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.player.is_some());
    assert_eq!(snap.colleges.len(), 4);
    assert!(snap.colleges.iter().all(|c| c.faction == Faction::Hostile));
    assert_eq!(snap.colleges.iter().filter(|c| c.boss && c.invulnerable).count(), 1);
    assert_eq!(snap.obstacles.len(), 2);
    assert_eq!(
        snap.vessels
            .iter()
            .filter(|v| v.class == VesselClass::Neutral)
            .count(),
        3
    );
    assert_eq!(
        snap.vessels
            .iter()
            .filter(|v| v.class == VesselClass::Kraken)
            .count(),
        1
    );
    assert_eq!(snap.score.colleges_total, 4);
}

#[test]
fn test_start_session_difficulty_override() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::StartSession {
        difficulty: Some(Difficulty::Hard),
    });
    let snap = engine.tick();

    assert_eq!(snap.difficulty, Difficulty::Hard);
    let college = snap.colleges.iter().find(|c| !c.boss).unwrap();
    assert_abs_diff_eq!(college.max_health, COLLEGE_MAX_HEALTH * 1.5);
}

#[test]
fn test_start_session_only_from_setup() {
    let mut engine = started_engine(1);
    engine.tick();
    engine.queue_command(PlayerCommand::StartSession { difficulty: None });
    let snap = engine.tick();
    assert_eq!(snap.colleges.len(), 4, "a second start must not repopulate");
}

#[test]
fn test_setup_phase_does_not_advance() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Setup);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.player.is_none());
}

#[test]
fn test_pause_stops_simulation() {
    let mut engine = started_engine(1);
    engine.tick();
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    engine.tick();
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(engine.time().tick, before.tick);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().tick, before.tick + 1);
}

#[test]
fn test_step_uses_given_delta() {
    let mut engine = started_engine(1);
    engine.step(0.25);
    engine.step(0.5);
    assert_eq!(engine.time().tick, 2);
    assert_abs_diff_eq!(engine.time().elapsed_secs, 0.75, epsilon = 1e-12);

    // Non-positive steps are ignored.
    engine.step(0.0);
    engine.step(-1.0);
    assert_eq!(engine.time().tick, 2);
}

#[test]
fn test_invalid_config_rejected() {
    let zero_arena = SimulationEngine::new(SimConfig {
        arena_width: 0.0,
        ..Default::default()
    });
    assert!(matches!(zero_arena, Err(ConfigError::InvalidArena { .. })));

    let bad_step = SimulationEngine::new(SimConfig {
        dt: -0.1,
        ..Default::default()
    });
    assert!(matches!(bad_step, Err(ConfigError::InvalidStep(_))));
}

// ---- Step boundaries ----

#[test]
fn test_spawns_appear_after_next_boundary() {
    let mut engine = started_engine(3);
    engine.queue_command(PlayerCommand::FireBroadside);

    let player_shots = |snap: &broadside_core::state::GameStateSnapshot| {
        snap.projectiles
            .iter()
            .filter(|p| p.owner == Faction::Player)
            .count()
    };

    let first = engine.tick();
    assert_eq!(player_shots(&first), 0, "shots must wait for the next step");
    assert!(engine.pending_spawns() >= 2);
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ShotFired { owner: Faction::Player, .. })));

    let second = engine.tick();
    assert_eq!(player_shots(&second), 2);
}

#[test]
fn test_dead_entities_removed_at_boundary() {
    let mut h = Harness::new();
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );

    {
        let (world, mut ctx) = h.split();
        assert!(damage::destroy_vessel(world, enemy, None, &mut ctx));
        // Already flagged: a second destruction is ignored.
        assert!(!damage::destroy_vessel(world, enemy, None, &mut ctx));
    }
    assert!(h.world.contains(enemy), "destruction only flags the entity");
    assert_eq!(h.score.vessels_destroyed, 1);

    let mut buffer = Vec::new();
    cleanup::run(&mut h.world, &mut buffer);
    assert!(!h.world.contains(enemy));
}

#[test]
fn test_spawn_queue_flushes_in_order() {
    let mut world = World::new();
    let mut queue = SpawnQueue::default();
    queue.spawn(Spawn::Vessel {
        class: VesselClass::Enemy,
        position: DVec2::new(10.0, 10.0),
    });
    queue.spawn(Spawn::Pickup {
        kind: PowerupKind::Speed,
        position: DVec2::new(20.0, 20.0),
    });
    assert_eq!(queue.len(), 2);
    assert_eq!(world.len(), 0);

    queue.flush(&mut world, Difficulty::Medium);
    assert!(queue.is_empty());
    assert_eq!(world.len(), 2);
    assert_eq!(world.query::<&Combatant>().iter().count(), 1);
    assert_eq!(world.query::<&Pickup>().iter().count(), 1);
}

#[test]
fn test_handles_do_not_resolve_after_despawn() {
    let mut world = World::new();
    let first = world.spawn((Transform::default(),));
    let handle = handle_of(first);
    assert_eq!(resolve_handle(&world, handle), Some(first));

    world.despawn(first).unwrap();
    assert_eq!(resolve_handle(&world, handle), None);

    // A recycled slot carries a newer generation.
    let second = world.spawn((Transform::default(),));
    assert_eq!(resolve_handle(&world, handle), None);
    assert_eq!(resolve_handle(&world, handle_of(second)), Some(second));
}

// ---- Motion ----

#[test]
fn test_boundary_rollback() {
    let arena = Arena::new(ARENA_WIDTH, ARENA_HEIGHT);
    let mut transform = Transform::new(DVec2::new(ARENA_WIDTH - 5.0, 750.0), 0.0);
    let mut hull = Hull::boat().placed(&transform);

    let moved = motion::integrate(&mut transform, &mut hull, 200.0, 0.1, 1.0, &arena);
    assert!(!moved);
    assert_eq!(transform.position, DVec2::new(ARENA_WIDTH - 5.0, 750.0));
    assert_eq!(hull.0.position(), transform.position);

    // Heading back inside is allowed.
    transform.rotation = 180.0;
    assert!(motion::integrate(&mut transform, &mut hull, 200.0, 0.1, 1.0, &arena));
    assert_abs_diff_eq!(transform.position.x, ARENA_WIDTH - 25.0, epsilon = 1e-9);
}

// ---- Navigation ----

/// Query surface whose only random sample is blocked by a wall.
struct Walled {
    wall: Vec<Polygon>,
}

impl WorldQuery for Walled {
    fn is_point_in_bounds(&self, _point: DVec2) -> bool {
        true
    }

    fn random_point_in_bounds(&self, _rng: &mut dyn RngCore) -> DVec2 {
        DVec2::new(200.0, 0.0)
    }

    fn obstacles(&self) -> &[Polygon] {
        &self.wall
    }

    fn vessels(&self, _class: VesselClass) -> Vec<Candidate> {
        Vec::new()
    }
}

fn walled() -> Walled {
    let mut wall = Polygon::rectangle(20.0, 400.0);
    wall.set_transform(DVec2::new(100.0, 0.0), 0.0);
    Walled { wall: vec![wall] }
}

#[test]
fn test_destination_search_falls_back_to_anchor() {
    let query = walled();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let anchor = DVec2::new(5.0, 5.0);

    assert!(!navigation::is_destination_valid(&query, DVec2::ZERO, DVec2::new(200.0, 0.0)));
    let picked = navigation::pick_valid_target(&query, &mut rng, DVec2::ZERO, anchor);
    assert_eq!(picked, anchor);
}

#[test]
fn test_update_destination_only_when_reached() {
    let query = walled();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut nav = Navigator::new(DVec2::new(-50.0, 0.0));
    nav.destination = Some(DVec2::new(-300.0, 0.0));

    let here = DVec2::new(0.0, 0.0);
    assert!(!navigation::update_destination(&mut nav, here, &query, &mut rng));
    assert_eq!(nav.destination, Some(DVec2::new(-300.0, 0.0)));

    nav.destination = Some(DVec2::new(-30.0, 0.0));
    assert!(navigation::update_destination(&mut nav, here, &query, &mut rng));
    // The only sample is walled off, so the old anchor is used.
    assert_eq!(nav.destination, Some(DVec2::new(-50.0, 0.0)));
    assert_eq!(nav.initial_position, here);
}

#[test]
fn test_neutral_first_step_heads_for_fresh_destination() {
    use broadside_core::geometry::{bearing_deg, shortest_angular_distance};

    let mut h = Harness::new();
    let spawn = DVec2::new(500.0, 500.0);
    let neutral =
        world_setup::spawn_vessel(&mut h.world, VesselClass::Neutral, spawn, Difficulty::Medium);
    {
        let (world, mut ctx) = h.split();
        navigation::run_neutral(world, &mut ctx);
    }

    let destination = h
        .world
        .get::<&Navigator>(neutral)
        .unwrap()
        .destination
        .unwrap();
    assert_ne!(destination, spawn);

    let wanted = bearing_deg(spawn, destination);
    let turn_step = h.world.get::<&Motion>(neutral).unwrap().turn_speed * DT;
    let rotation = h.world.get::<&Transform>(neutral).unwrap().rotation;
    let before = shortest_angular_distance(0.0, wanted);
    if before > turn_step {
        assert!(shortest_angular_distance(rotation, wanted) < before);
    }
}

// ---- Combat AI ----

fn set_position(world: &World, entity: Entity, position: DVec2) {
    let mut transform = world.get::<&mut Transform>(entity).unwrap();
    transform.position = position;
    world.get::<&mut Hull>(entity).unwrap().sync(&transform);
}

#[test]
fn test_ai_state_transitions() {
    let mut h = Harness::new();
    world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(1000.0, 500.0),
        Difficulty::Medium,
    );

    {
        let (world, mut ctx) = h.split();
        combat::run(world, &mut ctx);
    }
    {
        let c = h.world.get::<&Combatant>(enemy).unwrap();
        let n = h.world.get::<&Navigator>(enemy).unwrap();
        assert_eq!(c.state, AiState::Approach);
        assert!(c.target.is_some());
        assert_eq!(n.destination, Some(DVec2::new(500.0, 500.0)));
    }

    set_position(&h.world, enemy, DVec2::new(800.0, 500.0));
    {
        let (world, mut ctx) = h.split();
        combat::run(world, &mut ctx);
    }
    {
        let c = h.world.get::<&Combatant>(enemy).unwrap();
        let n = h.world.get::<&Navigator>(enemy).unwrap();
        assert_eq!(c.state, AiState::Attack);
        assert_eq!(n.destination, None);
    }

    set_position(&h.world, enemy, DVec2::new(1400.0, 1400.0));
    {
        let (world, mut ctx) = h.split();
        combat::run(world, &mut ctx);
    }
    let c = h.world.get::<&Combatant>(enemy).unwrap();
    let n = h.world.get::<&Navigator>(enemy).unwrap();
    assert_eq!(c.state, AiState::Idle);
    assert_eq!(c.target, None);
    assert!(n.destination.is_some(), "idle vessels pick a wander destination");
}

#[test]
fn test_friendly_targets_hostiles_only() {
    let mut h = Harness::new();
    world_setup::spawn_player(&mut h.world, DVec2::new(600.0, 500.0), 0.0);
    let friendly = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Friendly,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 900.0),
        Difficulty::Medium,
    );

    {
        let (world, mut ctx) = h.split();
        combat::run(world, &mut ctx);
    }
    let c = h.world.get::<&Combatant>(friendly).unwrap();
    assert_eq!(c.target, Some(handle_of(enemy)));
}

#[test]
fn test_friendly_skips_nearer_kraken() {
    let mut h = Harness::new();
    let friendly = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Friendly,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Kraken,
        DVec2::new(500.0, 800.0),
        Difficulty::Medium,
    );
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 1100.0),
        Difficulty::Medium,
    );

    {
        let (world, mut ctx) = h.split();
        combat::run(world, &mut ctx);
    }
    let c = h.world.get::<&Combatant>(friendly).unwrap();
    assert_eq!(c.target, Some(handle_of(enemy)));
}

// ---- Player weapons ----

#[test]
fn test_player_ray_hits_three_nearest() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(100.0, 500.0), 0.0);
    let enemies: Vec<Entity> = [300.0, 450.0, 600.0, 750.0]
        .iter()
        .map(|&x| {
            world_setup::spawn_vessel(
                &mut h.world,
                VesselClass::Enemy,
                DVec2::new(x, 500.0),
                Difficulty::Medium,
            )
        })
        .collect();
    h.world
        .get::<&mut PlayerControl>(player_entity)
        .unwrap()
        .fire_ray = true;

    {
        let (world, mut ctx) = h.split();
        player::run(world, &mut ctx);
    }

    let damaged = ENEMY_MAX_HEALTH - ProjectileKind::Ray.damage();
    assert_abs_diff_eq!(h.health(enemies[0]), damaged);
    assert_abs_diff_eq!(h.health(enemies[1]), damaged);
    assert_abs_diff_eq!(h.health(enemies[2]), damaged);
    assert_abs_diff_eq!(h.health(enemies[3]), ENEMY_MAX_HEALTH);
    assert!(h
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::RayFired { hits: 3, .. })));
    assert_eq!(h.spawns.len(), 1, "the beam lingers for display");

    let control = h.world.get::<&PlayerControl>(player_entity).unwrap();
    assert!(!control.fire_ray);
    assert!(control.time_since_last_shot < SHOT_DELAY);
}

#[test]
fn test_player_broadside_honours_reload() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    h.world
        .get::<&mut PlayerControl>(player_entity)
        .unwrap()
        .fire_broadside = true;
    {
        let (world, mut ctx) = h.split();
        player::run(world, &mut ctx);
    }
    assert_eq!(h.spawns.len(), 2);

    // Immediately again: still reloading.
    h.world
        .get::<&mut PlayerControl>(player_entity)
        .unwrap()
        .fire_broadside = true;
    {
        let (world, mut ctx) = h.split();
        player::run(world, &mut ctx);
    }
    assert_eq!(h.spawns.len(), 2);
}

#[test]
fn test_starburst_fires_eight() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    {
        let mut control = h.world.get::<&mut PlayerControl>(player_entity).unwrap();
        control.fire_broadside = true;
        control.powerups.push(ActivePowerup {
            kind: PowerupKind::StarburstFire,
            remaining_secs: POWERUP_DURATION_SECS,
        });
    }
    {
        let (world, mut ctx) = h.split();
        player::run(world, &mut ctx);
    }
    assert_eq!(h.spawns.len(), STARBURST_SHOT_COUNT as usize);
}

#[test]
fn test_powerups_expire() {
    let mut control = PlayerControl::default();
    control.powerups.push(ActivePowerup {
        kind: PowerupKind::Speed,
        remaining_secs: 0.5,
    });
    player::tick_powerups(&mut control, 0.3);
    assert!(control.has(PowerupKind::Speed));
    player::tick_powerups(&mut control, 0.3);
    assert!(!control.has(PowerupKind::Speed));
}

// ---- Contacts ----

#[test]
fn test_player_shot_destroys_enemy_and_pays_bounty() {
    let mut h = Harness::new();
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    h.world.get::<&mut Health>(enemy).unwrap().damage(90.0);
    let shot = world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Stock,
        Faction::Player,
        DVec2::new(500.0, 500.0),
        0.0,
        1.0,
    );

    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }

    assert!(h.world.get::<&Projectile>(shot).unwrap().spent);
    assert!(h.world.get::<&Health>(enemy).unwrap().is_dead());
    assert_abs_diff_eq!(h.score.experience, ENEMY_XP);
    assert_abs_diff_eq!(h.score.plunder, ENEMY_PLUNDER);
    assert!(h
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::VesselDestroyed { class: VesselClass::Enemy, .. })));

    let mut buffer = Vec::new();
    cleanup::run(&mut h.world, &mut buffer);
    assert!(!h.world.contains(enemy));
    assert!(!h.world.contains(shot));
}

#[test]
fn test_shot_overlapping_two_enemies_hits_once() {
    let mut h = Harness::new();
    let first = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    let second = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(505.0, 500.0),
        Difficulty::Medium,
    );
    let shot = world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Stock,
        Faction::Player,
        DVec2::new(502.5, 500.0),
        0.0,
        1.0,
    );

    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }

    assert!(h.world.get::<&Projectile>(shot).unwrap().spent);
    let mut healths = [h.health(first), h.health(second)];
    healths.sort_by(f64::total_cmp);
    assert_abs_diff_eq!(healths[0], ENEMY_MAX_HEALTH - ProjectileKind::Stock.damage());
    assert_abs_diff_eq!(healths[1], ENEMY_MAX_HEALTH);
}

#[test]
fn test_friendly_shot_passes_kraken() {
    let mut h = Harness::new();
    let kraken = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Kraken,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    let shot = world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Stock,
        Faction::Friendly,
        DVec2::new(500.0, 500.0),
        0.0,
        1.0,
    );
    let before = h.health(kraken);
    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    assert!(!h.world.get::<&Projectile>(shot).unwrap().spent);
    assert_abs_diff_eq!(h.health(kraken), before);
}

#[test]
fn test_hostile_shot_ignores_enemy() {
    let mut h = Harness::new();
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(500.0, 500.0),
        Difficulty::Medium,
    );
    let shot = world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Enemy,
        Faction::Hostile,
        DVec2::new(500.0, 500.0),
        0.0,
        1.0,
    );
    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    assert!(!h.world.get::<&Projectile>(shot).unwrap().spent);
    assert_abs_diff_eq!(h.health(enemy), ENEMY_MAX_HEALTH);
}

#[test]
fn test_player_defense_and_invincibility() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Enemy,
        Faction::Hostile,
        DVec2::new(500.0, 500.0),
        0.0,
        1.0,
    );
    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    let expected = PLAYER_MAX_HEALTH - (ProjectileKind::Enemy.damage() - PLAYER_DEFENSE);
    assert_abs_diff_eq!(h.health(player_entity), expected);

    h.world
        .get::<&mut PlayerControl>(player_entity)
        .unwrap()
        .powerups
        .push(ActivePowerup {
            kind: PowerupKind::Invincibility,
            remaining_secs: POWERUP_DURATION_SECS,
        });
    let second = world_setup::spawn_projectile(
        &mut h.world,
        ProjectileKind::Enemy,
        Faction::Hostile,
        DVec2::new(500.0, 500.0),
        0.0,
        1.0,
    );
    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    assert!(h.world.get::<&Projectile>(second).unwrap().spent);
    assert_abs_diff_eq!(h.health(player_entity), expected);
}

#[test]
fn test_enemy_ram_pays_by_remaining_health() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    let enemy = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Enemy,
        DVec2::new(520.0, 500.0),
        Difficulty::Medium,
    );
    h.world.get::<&mut Health>(enemy).unwrap().damage(50.0);

    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    assert_abs_diff_eq!(h.health(player_entity), PLAYER_MAX_HEALTH - RAM_DAMAGE);
    assert!(h.world.get::<&Health>(enemy).unwrap().is_dead());
    assert_abs_diff_eq!(h.score.experience, ENEMY_XP * 0.5);
    assert_abs_diff_eq!(h.score.plunder, ENEMY_PLUNDER);
}

#[test]
fn test_pickup_collected_once() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    let pickup = world_setup::spawn_pickup(&mut h.world, PowerupKind::Speed, DVec2::new(500.0, 500.0));

    for _ in 0..2 {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }

    assert!(h.world.get::<&Pickup>(pickup).unwrap().collected);
    assert!(h
        .world
        .get::<&PlayerControl>(player_entity)
        .unwrap()
        .has(PowerupKind::Speed));
    let collected = h
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::PowerupCollected { .. }))
        .count();
    assert_eq!(collected, 1);
}

#[test]
fn test_neutral_rammed_by_player() {
    let mut h = Harness::new();
    let player_entity = world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 500.0), 0.0);
    let neutral = world_setup::spawn_vessel(
        &mut h.world,
        VesselClass::Neutral,
        DVec2::new(500.0, 530.0),
        Difficulty::Medium,
    );
    {
        let (world, mut ctx) = h.split();
        collision::run(world, &mut ctx);
    }
    assert!(h.world.get::<&Health>(neutral).unwrap().is_dead());
    assert_abs_diff_eq!(h.health(player_entity), PLAYER_MAX_HEALTH - RAM_DAMAGE);
    assert_abs_diff_eq!(h.score.experience, NEUTRAL_XP);
}

// ---- Colleges and objectives ----

#[test]
fn test_college_capture_then_boss_then_victory() {
    let mut h = Harness::new();
    let langwith = world_setup::spawn_college(
        &mut h.world,
        &mut h.rng,
        "Langwith",
        DVec2::new(300.0, 300.0),
        false,
        Difficulty::Medium,
    );
    let james = world_setup::spawn_college(
        &mut h.world,
        &mut h.rng,
        "James",
        DVec2::new(1200.0, 1200.0),
        true,
        Difficulty::Medium,
    );

    {
        let (world, mut ctx) = h.split();
        assert!(!damage::damage_college(world, james, 5000.0, &mut ctx));
    }
    assert_abs_diff_eq!(h.health(james), BOSS_COLLEGE_MAX_HEALTH);

    {
        let (world, mut ctx) = h.split();
        assert!(damage::damage_college(world, langwith, 10_000.0, &mut ctx));
        college::update_objectives(world, &mut ctx);
    }
    assert_eq!(
        *h.world.get::<&EntityKind>(langwith).unwrap(),
        EntityKind::College(Faction::Friendly)
    );
    assert_abs_diff_eq!(h.health(langwith), COLLEGE_MAX_HEALTH);
    assert_eq!(h.score.colleges_captured, 1);
    assert!(!h.world.get::<&College>(james).unwrap().invulnerable);
    assert!(h.events.contains(&SimEvent::ObjectiveDestroyed {
        name: "Langwith".into()
    }));
    assert!(h.events.contains(&SimEvent::ObjectiveVulnerable {
        name: "James".into()
    }));
    assert_eq!(h.score.outcome, None);

    {
        let (world, mut ctx) = h.split();
        assert!(damage::damage_college(world, james, 10_000.0, &mut ctx));
        college::update_objectives(world, &mut ctx);
        college::update_objectives(world, &mut ctx);
    }
    assert_eq!(h.score.outcome, Some(GamePhase::Victory));
    let victories = h
        .events
        .iter()
        .filter(|e| **e == SimEvent::Victory)
        .count();
    assert_eq!(victories, 1);
}

#[test]
fn test_captured_college_spawns_friendlies() {
    let mut h = Harness::new();
    let langwith = world_setup::spawn_college(
        &mut h.world,
        &mut h.rng,
        "Langwith",
        DVec2::new(300.0, 300.0),
        false,
        Difficulty::Medium,
    );
    {
        let (world, mut ctx) = h.split();
        damage::capture_college(world, langwith, &mut ctx);
    }
    let interval = h.world.get::<&College>(langwith).unwrap().spawn_interval;

    let steps = (interval / DT).ceil() as usize + 1;
    for _ in 0..steps {
        let (world, mut ctx) = h.split();
        college::run(world, &mut ctx);
    }
    assert_eq!(h.spawns.len(), 1);

    h.spawns.flush(&mut h.world, Difficulty::Medium);
    let friendly = h
        .world
        .query::<&EntityKind>()
        .iter()
        .filter(|(_, k)| **k == EntityKind::Vessel(VesselClass::Friendly))
        .count();
    assert_eq!(friendly, 1);
}

#[test]
fn test_college_fires_at_player_in_range() {
    let mut h = Harness::new();
    world_setup::spawn_player(&mut h.world, DVec2::new(500.0, 300.0), 0.0);
    let langwith = world_setup::spawn_college(
        &mut h.world,
        &mut h.rng,
        "Langwith",
        DVec2::new(300.0, 300.0),
        false,
        Difficulty::Medium,
    );
    h.world
        .get::<&mut College>(langwith)
        .unwrap()
        .time_since_last_shot = COLLEGE_FIRE_INTERVAL_SECS;

    {
        let (world, mut ctx) = h.split();
        college::run(world, &mut ctx);
    }
    assert_eq!(h.spawns.len(), 1);
    assert!(h.events.iter().any(|e| matches!(
        e,
        SimEvent::ShotFired {
            owner: Faction::Hostile,
            ..
        }
    )));
}

#[test]
fn test_defeat_on_running_into_college() {
    let mut engine = started_engine(5);
    let snap = engine.tick();
    let target = snap.colleges[0].position;

    for (_entity, (_control, transform, hull)) in engine
        .world_mut()
        .query_mut::<(&PlayerControl, &mut Transform, &mut Hull)>()
    {
        transform.position = target;
        hull.sync(transform);
    }

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Defeat);
    assert!(snap.events.contains(&SimEvent::Defeat));

    let frozen = engine.time();
    engine.tick();
    assert_eq!(engine.time().tick, frozen.tick);
}

#[test]
fn test_long_session_smoke() {
    let mut engine = started_engine(99);
    for i in 0..3000 {
        if i % 30 == 0 {
            engine.queue_commands([
                PlayerCommand::SetThrottle { value: 1 },
                PlayerCommand::SetRudder { value: 1 },
                PlayerCommand::FireRay,
            ]);
        }
        let snap = engine.tick();
        if let Some(player) = &snap.player {
            assert!(player.health >= 0.0 && player.health <= player.max_health);
            assert!(engine.arena().contains(player.position));
        }
        for vessel in &snap.vessels {
            assert!(vessel.health > 0.0 && vessel.health <= vessel.max_health);
        }
    }
}
