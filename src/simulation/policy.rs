//! The capability interface that parameterizes a simulation.
//!
//! A policy decides how much food a day gets, what eating does to a
//! creature, and who populates the next day. The engine itself is shared by
//! every policy.

use clap::ValueEnum;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::basic::BasicPolicy;
use super::creature::Creature;
use super::error::SimError;
use super::food::Food;
use super::greedy::GreedyPolicy;
use super::params::{FoodSupply, Params};

/// Energy a creature starts each day with, in steps.
pub const CREATURE_MAX_ENERGY: u32 = 500;
/// Creature collision and drawing radius.
pub const CREATURE_RADIUS: f32 = 15.0;
/// Food collision and drawing radius.
pub const FOOD_RADIUS: f32 = 5.0;

/// Rules plugged into the day engine.
pub trait SimulationPolicy: fmt::Debug {
    /// Display name of the policy.
    fn name(&self) -> &'static str;

    /// Energy a creature has at the start of each day.
    fn creature_max_energy(&self) -> u32;

    /// Creature radius used for walls and collisions.
    fn creature_radius(&self) -> f32;

    /// Food radius used for collisions.
    fn food_radius(&self) -> f32;

    /// Size of the cohort a fresh simulation starts with.
    fn start_creatures(&self) -> usize;

    /// Number of food items for a day starting with `living` creatures.
    fn food_count(&self, living: usize, supply: FoodSupply, rng: &mut dyn RngCore) -> usize;

    /// Applies the reward for eating the food that sat at `food_index`.
    fn handle_collision(&self, creature: &mut Creature, food_index: usize);

    /// Builds tomorrow's starting cohort from today's survivors.
    fn reproduce(
        &self,
        survivors: &[Creature],
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Vec<Creature>;

    /// Inset used when placing food, so food is never hidden under a wall.
    fn spawn_margin(&self) -> f32 {
        (self.food_radius() + 2.0).max(self.creature_radius() + 2.0)
    }

    /// Creates the day's food set.
    fn spawn_food_for_day(
        &self,
        living: usize,
        supply: FoodSupply,
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Vec<Food> {
        let count = self.food_count(living, supply, rng);
        let margin = self.spawn_margin();
        (0..count)
            .map(|_| Food::new_random(rng, params.box_width, params.box_height, margin))
            .collect()
    }

    /// Creates a creature on a random edge, ready for its first day.
    fn spawn_on_edge(&self, params: &Params, rng: &mut dyn RngCore) -> Creature {
        Creature::new_on_edge(
            rng,
            params,
            self.creature_radius(),
            self.creature_max_energy(),
        )
    }

    /// Creates the starting cohort for a fresh simulation.
    fn initial_cohort(&self, params: &Params, rng: &mut dyn RngCore) -> Vec<Creature> {
        (0..self.start_creatures())
            .map(|_| self.spawn_on_edge(params, rng))
            .collect()
    }
}

/// The available policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PolicyKind {
    /// Every survivor doubles; eating refills energy.
    Basic,
    /// Survivors that ate twice get an extra offspring; eating adds energy.
    Greedy,
}

impl PolicyKind {
    /// All policies, in menu order.
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Basic, PolicyKind::Greedy];

    /// Builds the policy, taking its rule constants from `params`.
    pub fn build(self, params: &Params) -> Box<dyn SimulationPolicy> {
        match self {
            PolicyKind::Basic => Box::new(BasicPolicy::new()),
            PolicyKind::Greedy => Box::new(GreedyPolicy::from_params(params)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Basic => write!(f, "BasicSimulation"),
            PolicyKind::Greedy => write!(f, "GreedySimulation"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "basicsimulation" => Ok(PolicyKind::Basic),
            "greedy" | "greedysimulation" => Ok(PolicyKind::Greedy),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}
