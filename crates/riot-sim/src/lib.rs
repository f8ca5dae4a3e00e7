//! Simulation engine for RIOT RESPONSE.
//!
//! Owns the hecs ECS world, runs systems once per frame in a fixed order,
//! and produces GameStateSnapshots for the presentation layer.

pub mod engine;
pub mod mission;
pub mod scoring;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use riot_core as core;

#[cfg(test)]
mod tests;
