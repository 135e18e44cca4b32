//! # Forage - Day-Cycle Foraging Simulation
//!
//! Creatures with a limited energy budget wander a walled arena looking for
//! food. A creature that eats and then makes it back to a wall survives the
//! day; the survivors breed the next day's population.
//!
//! ## Features
//!
//! - Deterministic day engine driven by a seeded random generator
//! - Pluggable policies for food spawning, eating rewards, and reproduction
//! - Basic policy (everyone who survives doubles) and Greedy policy (extra
//!   offspring only for creatures that ate twice)
//! - Runtime knobs for food scaling, fixed food counts, speed, and manual stop
//! - CSV day logs and fixed-food sweeps over repeated runs
//!
//! ## Core Modules
//!
//! - [`simulation::ecosystem`] - The day state machine and tick loop
//! - [`simulation::policy`] - The policy interface and policy selection
//! - [`simulation::creature`] - Creature movement and wall handling
//! - [`simulation::run`] - Multi-day and multi-run orchestration

/// Core simulation logic and data structures.
pub mod simulation {
    /// Basic policy: food per creature, refill on eating, two offspring per survivor.
    pub mod basic;
    /// Creature movement, energy, and wall handling.
    pub mod creature;
    /// CSV logs of day results.
    pub mod day_log;
    /// Day engine with the spawn, tick, and settle phases.
    pub mod ecosystem;
    /// Error type for setup and persistence.
    pub mod error;
    /// Food items that creatures collect.
    pub mod food;
    /// Geometric utility functions for distances and random placement.
    pub mod geometric_utils;
    /// Greedy policy: additive energy and reproduction for repeat eaters.
    pub mod greedy;
    /// Trait for entities that occupy a circle in the arena.
    pub mod locatable;
    /// World parameters and runtime configuration.
    pub mod params;
    /// The policy interface plugged into the engine.
    pub mod policy;
    /// Day-to-day and run-to-run orchestration.
    pub mod run;
    /// Day results, run histories, and sweep reports.
    pub mod stats;
}

/// Installs the `tracing` subscriber used by the binaries.
///
/// `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
