//! Combat finite state machine.
//!
//! Pure functions that pick the IDLE / APPROACH / ATTACK state for a
//! fighting vessel and compute what it should do this step.
//! No ECS dependency; the simulation resolves targets and obstacle paths.

use glam::DVec2;

use broadside_core::constants::{FIRING_WINDOW_MAX, FIRING_WINDOW_MIN};
use broadside_core::enums::AiState;
use broadside_core::geometry::{bearing_deg, normalize_angle};

/// Input to the combat FSM for a single vessel.
pub struct CombatContext {
    pub position: DVec2,
    pub rotation: f64,
    /// Centre of the resolved target, if any.
    pub target: Option<DVec2>,
    pub attack_range: f64,
    pub approach_range: f64,
    /// Whether the reload gate is open.
    pub shot_ready: bool,
}

/// Output from the combat FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatDecision {
    /// Keep wandering toward the navigation destination.
    Idle,
    /// Head for the target, if the direct path is clear.
    Approach { target: DVec2 },
    /// Drop the destination and turn broadside.
    Attack { desired_heading: f64, fire: bool },
}

impl CombatDecision {
    pub fn state(&self) -> AiState {
        match self {
            CombatDecision::Idle => AiState::Idle,
            CombatDecision::Approach { .. } => AiState::Approach,
            CombatDecision::Attack { .. } => AiState::Attack,
        }
    }
}

/// Transition rule. Both comparisons are strict.
pub fn select_state(distance: Option<f64>, attack_range: f64, approach_range: f64) -> AiState {
    match distance {
        None => AiState::Idle,
        Some(d) if d < attack_range => AiState::Attack,
        Some(d) if d < approach_range => AiState::Approach,
        Some(_) => AiState::Idle,
    }
}

/// Heading that puts `target` abeam: perpendicular to the line between them,
/// on whichever side needs the smaller correction.
pub fn broadside_heading(position: DVec2, rotation: f64, target: DVec2) -> f64 {
    let away = bearing_deg(target, position);
    let relative = normalize_angle(away - rotation);
    let offset = if relative > 180.0 { 90.0 } else { -90.0 };
    normalize_angle(away + offset)
}

/// Whether the current heading sits inside the broadside firing window.
///
/// The relative bearing is shifted by 180° and folded once above 270°, so
/// only one beam lines up with the open interval (80°, 100°).
pub fn in_firing_window(position: DVec2, rotation: f64, target: DVec2) -> bool {
    let away = bearing_deg(target, position);
    let mut relative = normalize_angle(away - rotation + 180.0);
    if relative > 270.0 {
        relative -= 180.0;
    }
    relative > FIRING_WINDOW_MIN && relative < FIRING_WINDOW_MAX
}

/// Evaluate the FSM for one vessel.
pub fn evaluate(ctx: &CombatContext) -> CombatDecision {
    let distance = ctx.target.map(|t| t.distance(ctx.position));
    let Some(target) = ctx.target else {
        return CombatDecision::Idle;
    };

    match select_state(distance, ctx.attack_range, ctx.approach_range) {
        AiState::Idle => CombatDecision::Idle,
        AiState::Approach => CombatDecision::Approach { target },
        AiState::Attack => CombatDecision::Attack {
            desired_heading: broadside_heading(ctx.position, ctx.rotation, target),
            fire: ctx.shot_ready && in_firing_window(ctx.position, ctx.rotation, target),
        },
    }
}
