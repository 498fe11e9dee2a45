//! Simulation constants and tuning parameters.

/// Default step rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per step at the default rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Default arena width in world units.
pub const ARENA_WIDTH: f64 = 1500.0;

/// Default arena height in world units.
pub const ARENA_HEIGHT: f64 = 1500.0;

// --- Geometry ---

/// Segments shorter than this are degenerate and never intersect anything.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

// --- Steering ---

/// Tolerance when deciding whether a counter-clockwise turn reaches the desired angle (degrees).
pub const TURN_DIRECTION_EPSILON: f64 = 0.05;

/// Heading error below which a vessel holds its rotation (degrees).
pub const TURN_DEADBAND: f64 = 0.5;

// --- Navigation ---

/// Distance from the destination at which a new one is chosen.
pub const DESTINATION_THRESHOLD: f64 = 50.0;

/// Heading slack carried on every navigator (degrees). Not consulted by steering.
pub const ANGLE_THRESHOLD: f64 = 0.25;

/// Random samples tried before destination search falls back to the anchor.
pub const MAX_DESTINATION_ATTEMPTS: u32 = 100;

// --- Combat AI ---

/// Distance below which an attacker engages.
pub const ATTACK_RANGE: f64 = 400.0;

/// Distance below which an attacker closes on its target.
pub const APPROACH_RANGE: f64 = 650.0;

/// Targets at or beyond this distance are never selected.
pub const TARGET_SEARCH_SENTINEL: f64 = 1000.0;

/// Minimum seconds between shots for every vessel.
pub const SHOT_DELAY: f64 = 0.5;

/// Broadside firing window, exclusive bounds (degrees).
pub const FIRING_WINDOW_MIN: f64 = 80.0;
pub const FIRING_WINDOW_MAX: f64 = 100.0;

// --- Projectiles ---

/// Travelling projectiles are removed after this many seconds.
pub const PROJECTILE_MAX_LIFETIME_SECS: f64 = 4.0;

/// Side length of the square projectile hull.
pub const PROJECTILE_SIZE: f64 = 20.0;

/// Maximum reach of a ray projectile.
pub const RAY_MAX_RANGE: f64 = 625.0;

/// How long a ray lingers after creation (seconds).
pub const RAY_SHOW_SECS: f64 = 0.25;

/// Number of targets a player ray damages.
pub const RAY_PIERCE_COUNT: usize = 3;

// --- Vessels ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;
pub const PLAYER_SPEED: f64 = 200.0;
pub const PLAYER_TURN_SPEED: f64 = 150.0;
/// Subtracted from every projectile hit on the player.
pub const PLAYER_DEFENSE: f64 = 1.0;

pub const ENEMY_MAX_HEALTH: f64 = 100.0;
pub const ENEMY_SPEED: f64 = 75.0;
pub const ENEMY_TURN_SPEED: f64 = 150.0;
pub const ENEMY_XP: f64 = 100.0;
pub const ENEMY_PLUNDER: f64 = 50.0;

pub const FRIENDLY_MAX_HEALTH: f64 = 75.0;
pub const FRIENDLY_SPEED: f64 = 65.0;
pub const FRIENDLY_TURN_SPEED: f64 = 150.0;

pub const NEUTRAL_MAX_HEALTH: f64 = 100.0;
pub const NEUTRAL_SPEED: f64 = 75.0;
pub const NEUTRAL_TURN_SPEED: f64 = 150.0;
pub const NEUTRAL_XP: f64 = 25.0;
pub const NEUTRAL_PLUNDER: f64 = 25.0;

/// Damage dealt to the player by a ramming vessel.
pub const RAM_DAMAGE: f64 = 50.0;

/// Probability that a destroyed enemy vessel drops a power-up.
pub const POWERUP_DROP_CHANCE: f64 = 0.2;

// --- Kraken ---

pub const KRAKEN_MAX_HEALTH: f64 = 1000.0;
pub const KRAKEN_SPEED: f64 = 75.0;
pub const KRAKEN_XP: f64 = 250.0;
pub const KRAKEN_PLUNDER: f64 = 500.0;
/// Player must be closer than this for the kraken to fire.
pub const KRAKEN_ATTACK_RANGE: f64 = 750.0;
pub const KRAKEN_SHOT_INTERVAL_SECS: f64 = 2.0;
pub const KRAKEN_DIRECTION_CHANGE_SECS: f64 = 0.25;
pub const KRAKEN_SPREAD_COUNT: u32 = 6;
pub const KRAKEN_SPREAD_STEP_DEG: f64 = 15.0;
pub const KRAKEN_SPREAD_OFFSET_DEG: f64 = 135.0;
/// Contact damage per second to vessels touching the kraken.
pub const KRAKEN_CONTACT_DPS: f64 = 5.0;

// --- Colleges ---

pub const COLLEGE_SIZE: f64 = 100.0;
pub const COLLEGE_MAX_HEALTH: f64 = 500.0;
pub const BOSS_COLLEGE_MAX_HEALTH: f64 = 1000.0;
pub const COLLEGE_RANGE: f64 = 500.0;
pub const COLLEGE_FIRE_INTERVAL_SECS: f64 = 1.5;
/// Shots deviate uniformly by up to this many degrees either side.
pub const COLLEGE_INACCURACY_DEG: f64 = 10.0;
/// Offset from a college at which its vessels appear.
pub const COLLEGE_SPAWN_OFFSET: f64 = 150.0;

// --- Power-ups ---

pub const POWERUP_DURATION_SECS: f64 = 10.0;
pub const POWERUP_SPEED_MULTIPLIER: f64 = 1.5;
pub const POWERUP_RAPID_FIRE_MULTIPLIER: f64 = 0.5;
pub const POWERUP_DAMAGE_MULTIPLIER: f64 = 1.5;
pub const STARBURST_SHOT_COUNT: u32 = 8;
