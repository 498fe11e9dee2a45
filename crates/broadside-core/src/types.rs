//! Fundamental simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point or offset in arena space (world units, +x right, +y up).
pub type Point = DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed steps.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one step of `delta` seconds.
    pub fn advance(&mut self, delta: f64) {
        self.tick += 1;
        self.elapsed_secs += delta;
    }
}

/// Opaque generational handle to another entity.
///
/// The simulation packs its ECS handle into the raw bits; a handle whose
/// entity has since been despawned resolves to "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);
