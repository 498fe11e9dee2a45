//! Vessel AI for BROADSIDE.
//!
//! Implements steering math, the approach/attack state machine,
//! target selection and per-class vessel profiles.
//! Everything here is pure and operates on plain data.

pub mod fsm;
pub mod profiles;
pub mod steering;
pub mod targeting;

pub use broadside_core as core;

#[cfg(test)]
mod tests;
