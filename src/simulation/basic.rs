//! The basic policy: one food per creature, refills on eating, every survivor doubles.

use rand::RngCore;

use super::creature::Creature;
use super::params::{FoodSupply, Params};
use super::policy::{CREATURE_MAX_ENERGY, CREATURE_RADIUS, FOOD_RADIUS, SimulationPolicy};

/// Creatures a basic simulation starts with.
pub const BASIC_START_CREATURES: usize = 2;
/// Offspring produced by each survivor.
pub const OFFSPRING_PER_SURVIVOR: usize = 2;

/// Food scales one-to-one with the population and every survivor has two offspring.
#[derive(Debug, Clone, Default)]
pub struct BasicPolicy;

impl BasicPolicy {
    /// Creates the basic policy.
    pub fn new() -> Self {
        Self
    }
}

impl SimulationPolicy for BasicPolicy {
    fn name(&self) -> &'static str {
        "BasicSimulation"
    }

    fn creature_max_energy(&self) -> u32 {
        CREATURE_MAX_ENERGY
    }

    fn creature_radius(&self) -> f32 {
        CREATURE_RADIUS
    }

    fn food_radius(&self) -> f32 {
        FOOD_RADIUS
    }

    fn start_creatures(&self) -> usize {
        BASIC_START_CREATURES
    }

    fn food_count(&self, living: usize, supply: FoodSupply, _rng: &mut dyn RngCore) -> usize {
        match supply {
            FoodSupply::Fixed(count) => count,
            FoodSupply::Scaled | FoodSupply::PolicyDefault => living,
        }
    }

    fn handle_collision(&self, creature: &mut Creature, _food_index: usize) {
        creature.eaten += 1;
        creature.energy = CREATURE_MAX_ENERGY;
    }

    fn reproduce(
        &self,
        survivors: &[Creature],
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Vec<Creature> {
        let parents = survivors.iter().filter(|c| c.is_survivor).count();
        (0..parents * OFFSPRING_PER_SURVIVOR)
            .map(|_| self.spawn_on_edge(params, rng))
            .collect()
    }
}
