//! ECS systems that operate on the simulation world each step.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! work). They do not own state; all state lives in components or in the
//! [`StepContext`] the engine lends them.

use rand_chacha::ChaCha8Rng;

use broadside_core::enums::Difficulty;
use broadside_core::events::SimEvent;

use crate::arena::Arena;
use crate::score::ScoreState;
use crate::spawn::SpawnQueue;

pub mod cleanup;
pub mod college;
pub mod collision;
pub mod combat;
pub mod creature;
pub mod damage;
pub mod motion;
pub mod navigation;
pub mod player;
pub mod projectile;
pub mod ray;
pub mod snapshot;

/// Engine state borrowed by the systems for one step.
pub struct StepContext<'a> {
    /// Seconds advanced by this step.
    pub delta: f64,
    pub difficulty: Difficulty,
    pub arena: &'a Arena,
    pub rng: &'a mut ChaCha8Rng,
    pub spawns: &'a mut SpawnQueue,
    pub score: &'a mut ScoreState,
    pub events: &'a mut Vec<SimEvent>,
}
