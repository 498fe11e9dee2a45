//! Player commands fed to the simulation.
//!
//! Commands are queued and applied at the next step boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Helm ---
    /// Set engine direction: -1 astern, 0 stop, 1 ahead. Other values are clamped.
    SetThrottle { value: i8 },
    /// Set rudder: 1 turns counter-clockwise, -1 clockwise, 0 holds.
    SetRudder { value: i8 },

    // --- Weapons ---
    /// Fire both broadsides on the next step, if reloaded.
    FireBroadside,
    /// Fire a piercing ray along the heading on the next step, if reloaded.
    FireRay,

    // --- Session control ---
    /// Populate the arena and begin play. Overrides the configured difficulty when set.
    StartSession { difficulty: Option<Difficulty> },
    Pause,
    Resume,
}
