//! Events emitted by the simulation for feedback and progress tracking.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened during a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A travelling projectile left its launcher.
    ShotFired {
        kind: ProjectileKind,
        owner: Faction,
        position: DVec2,
    },
    /// A ray was fired; `hits` is the number of entities it damaged.
    RayFired { origin: DVec2, rotation: f64, hits: u32 },
    VesselDestroyed { class: VesselClass, position: DVec2 },
    /// A hostile college fell and changed allegiance.
    ObjectiveDestroyed { name: String },
    /// The boss college lost its shield.
    ObjectiveVulnerable { name: String },
    PowerupDropped { kind: PowerupKind, position: DVec2 },
    PowerupCollected { kind: PowerupKind },
    Defeat,
    Victory,
}
