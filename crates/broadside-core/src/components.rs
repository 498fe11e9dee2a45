//! ECS components for hecs entities.
//!
//! Components are plain data. Anything beyond a constructor or a small
//! derived accessor lives in the systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::geometry::Polygon;
use crate::ray::ProjectileRay;
use crate::types::EntityHandle;

/// Centre position and facing of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec2,
    /// Facing in degrees, `[0, 360)`.
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: DVec2, rotation: f64) -> Self {
        Self { position, rotation }
    }
}

/// Collision shape. Always placed at the owner's transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hull(pub Polygon);

impl Hull {
    /// Shape of a sailing vessel, bow along +x.
    pub fn boat() -> Self {
        Self(Polygon::new(vec![
            DVec2::new(-50.0, -25.0),
            DVec2::new(18.0, -25.0),
            DVec2::new(50.0, 0.0),
            DVec2::new(18.0, 25.0),
            DVec2::new(-50.0, 25.0),
        ]))
    }

    pub fn kraken() -> Self {
        Self(Polygon::new(vec![
            DVec2::new(-75.0, 0.0),
            DVec2::new(0.0, 75.0),
            DVec2::new(75.0, 0.0),
            DVec2::new(0.0, -75.0),
        ]))
    }

    pub fn college() -> Self {
        Self(Polygon::rectangle(COLLEGE_SIZE, COLLEGE_SIZE))
    }

    pub fn projectile() -> Self {
        Self(Polygon::rectangle(PROJECTILE_SIZE, PROJECTILE_SIZE))
    }

    pub fn pickup() -> Self {
        Self(Polygon::new(vec![
            DVec2::new(-8.0, 0.0),
            DVec2::new(0.0, 8.0),
            DVec2::new(8.0, 0.0),
            DVec2::new(0.0, -8.0),
        ]))
    }

    /// Move the shape onto `transform`.
    pub fn sync(&mut self, transform: &Transform) {
        self.0.set_transform(transform.position, transform.rotation);
    }

    /// Builder form of [`Hull::sync`] for spawn factories.
    pub fn placed(mut self, transform: &Transform) -> Self {
        self.sync(transform);
        self
    }
}

/// Linear and angular speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    /// World units per second.
    pub speed: f64,
    /// Degrees per second.
    pub turn_speed: f64,
}

/// Waypoint navigation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navigator {
    /// Either unset or a point that had a clear path when it was assigned.
    pub destination: Option<DVec2>,
    /// Position at the last retarget. Fallback when destination search fails.
    pub initial_position: DVec2,
    pub destination_threshold: f64,
    pub angle_threshold: f64,
}

impl Navigator {
    pub fn new(initial_position: DVec2) -> Self {
        Self {
            destination: None,
            initial_position,
            destination_threshold: DESTINATION_THRESHOLD,
            angle_threshold: ANGLE_THRESHOLD,
        }
    }
}

/// Combat AI state for vessels that hunt and shoot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    /// Weak reference, re-resolved at every decision.
    pub target: Option<EntityHandle>,
    pub state: AiState,
    pub attack_range: f64,
    pub approach_range: f64,
    pub shot_delay: f64,
    pub time_since_last_shot: f64,
    pub projectile: ProjectileKind,
    pub damage_multiplier: f64,
}

/// Experience and currency awarded when destroyed by the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bounty {
    pub xp: f64,
    pub plunder: f64,
}

/// Travelling projectile state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Faction of the shooter.
    pub owner: Faction,
    pub speed: f64,
    pub damage: f64,
    pub age_secs: f64,
    /// Set once the projectile has delivered its damage.
    pub spent: bool,
}

/// A ray lingering for its show window. Damage was applied at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayBeam(pub ProjectileRay);

/// College objective state. Allegiance is carried by the entity kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub name: String,
    /// The final objective; shielded until it is the last hostile college.
    pub boss: bool,
    pub invulnerable: bool,
    pub range: f64,
    pub fire_interval: f64,
    pub time_since_last_shot: f64,
    pub projectile: ProjectileKind,
    pub spawn_interval: f64,
    pub spawn_timer: f64,
}

/// Wandering sea creature behaviour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Creature {
    /// Current diagonal heading, each axis ±1.
    pub direction: DVec2,
    pub time_on_direction: f64,
    pub time_since_last_shot: f64,
}

/// A collectable power-up floating in the arena.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PowerupKind,
    pub collected: bool,
}

/// A timed effect currently applied to the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerup {
    pub kind: PowerupKind,
    pub remaining_secs: f64,
}

/// Player input latch and modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerControl {
    /// -1 astern, 0 stopped, 1 ahead.
    pub throttle: i8,
    /// -1 starboard, 0 amidships, 1 port.
    pub rudder: i8,
    pub fire_broadside: bool,
    pub fire_ray: bool,
    pub defense: f64,
    pub time_since_last_shot: f64,
    pub powerups: Vec<ActivePowerup>,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self {
            throttle: 0,
            rudder: 0,
            fire_broadside: false,
            fire_ray: false,
            defense: PLAYER_DEFENSE,
            time_since_last_shot: SHOT_DELAY,
            powerups: Vec::new(),
        }
    }
}

impl PlayerControl {
    pub fn has(&self, kind: PowerupKind) -> bool {
        self.powerups.iter().any(|p| p.kind == kind)
    }

    pub fn speed_multiplier(&self) -> f64 {
        if self.has(PowerupKind::Speed) {
            POWERUP_SPEED_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn shot_delay_multiplier(&self) -> f64 {
        if self.has(PowerupKind::RapidFire) {
            POWERUP_RAPID_FIRE_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn damage_multiplier(&self) -> f64 {
        if self.has(PowerupKind::Damage) {
            POWERUP_DAMAGE_MULTIPLIER
        } else {
            1.0
        }
    }
}
