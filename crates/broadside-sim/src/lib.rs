//! Simulation engine for BROADSIDE.
//!
//! Owns the hecs ECS world, steps every system at a fixed delta,
//! and produces GameStateSnapshots for observers.

pub mod arena;
pub mod engine;
pub mod score;
pub mod spawn;
pub mod systems;
pub mod world_setup;

pub use broadside_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
