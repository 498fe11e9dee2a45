//! Class-specific vessel profiles.
//!
//! Consolidates per-class parameters for spawning and combat.

use broadside_core::enums::{Difficulty, ProjectileKind, VesselClass};

/// Behavioural profile for a vessel class.
pub struct VesselProfile {
    /// Maximum health before difficulty scaling.
    pub max_health: f64,
    pub speed: f64,
    pub turn_speed: f64,
    /// Experience awarded when destroyed by the player.
    pub xp: f64,
    /// Currency awarded when destroyed by the player.
    pub plunder: f64,
    pub projectile: ProjectileKind,
    /// Whether the class runs the combat state machine.
    pub fights: bool,
    /// Whether health and damage follow the difficulty multipliers.
    pub hostile: bool,
}

impl VesselProfile {
    pub fn scaled_health(&self, difficulty: Difficulty) -> f64 {
        if self.hostile {
            self.max_health * difficulty.hp_multiplier()
        } else {
            self.max_health
        }
    }

    pub fn damage_multiplier(&self, difficulty: Difficulty) -> f64 {
        if self.hostile {
            difficulty.damage_multiplier()
        } else {
            1.0
        }
    }
}

/// Get the profile for a given vessel class.
pub fn get_profile(class: VesselClass) -> VesselProfile {
    use broadside_core::constants::*;

    match class {
        VesselClass::Player => VesselProfile {
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            xp: 0.0,
            plunder: 0.0,
            projectile: ProjectileKind::Stock,
            fights: false,
            hostile: false,
        },
        VesselClass::Enemy => VesselProfile {
            max_health: ENEMY_MAX_HEALTH,
            speed: ENEMY_SPEED,
            turn_speed: ENEMY_TURN_SPEED,
            xp: ENEMY_XP,
            plunder: ENEMY_PLUNDER,
            projectile: ProjectileKind::Enemy,
            fights: true,
            hostile: true,
        },
        VesselClass::Friendly => VesselProfile {
            max_health: FRIENDLY_MAX_HEALTH,
            speed: FRIENDLY_SPEED,
            turn_speed: FRIENDLY_TURN_SPEED,
            xp: 0.0,
            plunder: 0.0,
            projectile: ProjectileKind::Stock,
            fights: true,
            hostile: false,
        },
        VesselClass::Neutral => VesselProfile {
            max_health: NEUTRAL_MAX_HEALTH,
            speed: NEUTRAL_SPEED,
            turn_speed: NEUTRAL_TURN_SPEED,
            xp: NEUTRAL_XP,
            plunder: NEUTRAL_PLUNDER,
            projectile: ProjectileKind::Stock,
            fights: false,
            hostile: false,
        },
        VesselClass::Kraken => VesselProfile {
            max_health: KRAKEN_MAX_HEALTH,
            speed: KRAKEN_SPEED,
            turn_speed: 0.0, // moves diagonally, never rotates
            xp: KRAKEN_XP,
            plunder: KRAKEN_PLUNDER,
            projectile: ProjectileKind::Kraken,
            fights: false,
            hostile: true,
        },
    }
}
