//! Session progress: experience, plunder and the game-over signals.
//!
//! Stored in `SimulationEngine` and handed to damage handlers explicitly,
//! never as global state.

use log::info;

use broadside_core::enums::GamePhase;
use broadside_core::state::ScoreView;

/// Receiver for rewards and end-of-session signals.
pub trait ProgressSink {
    fn add_experience(&mut self, amount: f64);
    fn add_currency(&mut self, amount: f64);
    fn notify_defeat(&mut self);
    fn notify_objective_destroyed(&mut self, name: &str);
}

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub experience: f64,
    pub plunder: f64,
    pub vessels_destroyed: u32,
    pub colleges_captured: u32,
    pub colleges_total: u32,
    /// Terminal phase requested during the current step, applied by the engine.
    pub outcome: Option<GamePhase>,
}

impl ScoreState {
    /// Record a victory unless the session already ended. Returns whether
    /// this call decided the outcome.
    pub fn notify_victory(&mut self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        info!("all hostile colleges captured");
        self.outcome = Some(GamePhase::Victory);
        true
    }

    pub fn view(&self, elapsed_secs: f64) -> ScoreView {
        ScoreView {
            experience: self.experience,
            plunder: self.plunder,
            vessels_destroyed: self.vessels_destroyed,
            colleges_captured: self.colleges_captured,
            colleges_total: self.colleges_total,
            elapsed_secs,
        }
    }
}

impl ProgressSink for ScoreState {
    fn add_experience(&mut self, amount: f64) {
        self.experience += amount;
    }

    fn add_currency(&mut self, amount: f64) {
        self.plunder += amount;
    }

    fn notify_defeat(&mut self) {
        // Defeat beats a victory reached in the same step.
        if self.outcome != Some(GamePhase::Defeat) {
            info!("player defeated");
            self.outcome = Some(GamePhase::Defeat);
        }
    }

    fn notify_objective_destroyed(&mut self, name: &str) {
        info!("college {name} captured");
        self.colleges_captured += 1;
    }
}
