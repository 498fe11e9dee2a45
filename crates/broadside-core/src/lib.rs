//! Core types and definitions for the BROADSIDE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, the damage capability, ray resolution,
//! commands, events, configuration and state snapshots.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod health;
pub mod ray;
pub mod state;
pub mod types;
