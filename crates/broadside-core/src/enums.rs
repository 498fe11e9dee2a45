//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Allegiance used for targeting and collision filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Friendly,
    Hostile,
    Neutral,
}

impl Faction {
    /// Whether this faction fights on the player's side.
    pub fn is_allied_with_player(self) -> bool {
        matches!(self, Faction::Player | Faction::Friendly)
    }
}

/// Class of a moving, health-bearing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VesselClass {
    Player,
    Enemy,
    Friendly,
    Neutral,
    /// The kraken: a large wandering sea creature.
    Kraken,
}

/// Projectile archetype: each carries a scalar speed and a base damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Damages entities directly without travelling.
    Ray,
    #[default]
    Stock,
    Boss,
    Enemy,
    Kraken,
}

impl ProjectileKind {
    pub fn speed(self) -> f64 {
        match self {
            ProjectileKind::Ray => 0.0,
            ProjectileKind::Stock => 250.0,
            ProjectileKind::Boss => 300.0,
            ProjectileKind::Enemy => 250.0,
            ProjectileKind::Kraken => 250.0,
        }
    }

    pub fn damage(self) -> f64 {
        match self {
            ProjectileKind::Kraken => 30.0,
            _ => 20.0,
        }
    }
}

/// Closed tag identifying what an entity is. Faction is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Vessel(VesselClass),
    /// A college building; carries its current allegiance.
    College(Faction),
    /// Static blocker with no behaviour.
    Obstacle,
    Projectile(ProjectileKind),
    Ray,
    Pickup,
}

impl EntityKind {
    pub fn faction(self) -> Option<Faction> {
        match self {
            EntityKind::Vessel(VesselClass::Player) => Some(Faction::Player),
            EntityKind::Vessel(VesselClass::Friendly) => Some(Faction::Friendly),
            EntityKind::Vessel(VesselClass::Enemy | VesselClass::Kraken) => Some(Faction::Hostile),
            EntityKind::Vessel(VesselClass::Neutral) => Some(Faction::Neutral),
            EntityKind::College(faction) => Some(faction),
            EntityKind::Obstacle
            | EntityKind::Projectile(_)
            | EntityKind::Ray
            | EntityKind::Pickup => None,
        }
    }

    pub fn vessel_class(self) -> Option<VesselClass> {
        match self {
            EntityKind::Vessel(class) => Some(class),
            _ => None,
        }
    }

    /// Whether this entity blocks navigation paths.
    pub fn is_obstacle(self) -> bool {
        matches!(self, EntityKind::College(_) | EntityKind::Obstacle)
    }
}

/// Combat AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// No target in range; wander toward the navigation destination.
    #[default]
    Idle,
    /// Target inside approach range; close the distance.
    Approach,
    /// Target inside attack range; turn broadside and fire.
    Attack,
}

/// Difficulty tier. Each tier's values are independent of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier on hostile health.
    pub fn hp_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier on hostile damage.
    pub fn damage_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Range (seconds) from which a college draws its vessel spawn interval.
    pub fn college_spawn_interval(self) -> (f64, f64) {
        match self {
            Difficulty::Easy => (15.0, 20.0),
            Difficulty::Medium => (10.0, 15.0),
            Difficulty::Hard => (5.0, 10.0),
        }
    }
}

/// Collectable power-up effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    Speed,
    RapidFire,
    Invincibility,
    StarburstFire,
    Damage,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 5] = [
        PowerupKind::Speed,
        PowerupKind::RapidFire,
        PowerupKind::Invincibility,
        PowerupKind::StarburstFire,
        PowerupKind::Damage,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            PowerupKind::Speed => "Speed",
            PowerupKind::RapidFire => "Rapid Fire",
            PowerupKind::Invincibility => "Invincibility",
            PowerupKind::StarburstFire => "Burst Fire",
            PowerupKind::Damage => "Damage Buff",
        }
    }
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Active,
    Paused,
    Victory,
    Defeat,
}
