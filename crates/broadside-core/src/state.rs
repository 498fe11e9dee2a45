//! Game state snapshot: the complete visible state after each step.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Everything an observer needs to draw or inspect one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub player: Option<PlayerView>,
    pub vessels: Vec<VesselView>,
    pub colleges: Vec<CollegeView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub rays: Vec<RayView>,
    pub pickups: Vec<PickupView>,
    pub score: ScoreView,
    /// Events raised during the step that produced this snapshot.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub rotation: f64,
    pub health: f64,
    pub max_health: f64,
    /// Active power-ups with seconds remaining.
    pub powerups: Vec<(PowerupKind, f64)>,
}

/// A non-player vessel or creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselView {
    pub id: u64,
    pub class: VesselClass,
    pub position: DVec2,
    pub rotation: f64,
    pub health: f64,
    pub max_health: f64,
    /// Combat state, for vessels that fight.
    pub ai_state: Option<AiState>,
    pub destination: Option<DVec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollegeView {
    pub id: u64,
    pub name: String,
    pub faction: Faction,
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
    pub boss: bool,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: DVec2,
    /// World-space outline.
    pub vertices: Vec<DVec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub owner: Faction,
    pub position: DVec2,
    pub rotation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RayView {
    pub origin: DVec2,
    pub end: DVec2,
    pub owner: Faction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PowerupKind,
    pub position: DVec2,
}

/// Running progress for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub experience: f64,
    pub plunder: f64,
    pub vessels_destroyed: u32,
    pub colleges_captured: u32,
    pub colleges_total: u32,
    pub elapsed_secs: f64,
}
