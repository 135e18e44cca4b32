//! The greedy policy: a little more food than creatures, additive energy,
//! and reproduction only for creatures that ate at least twice.

use rand::{Rng, RngCore};

use super::creature::Creature;
use super::params::{FoodSupply, Params};
use super::policy::{CREATURE_MAX_ENERGY, CREATURE_RADIUS, FOOD_RADIUS, SimulationPolicy};

/// Creatures a greedy simulation starts with.
pub const GREEDY_START_CREATURES: usize = 3;
/// Food eaten in one day that earns an extra offspring.
pub const EXTRA_OFFSPRING_THRESHOLD: u32 = 2;

/// Rewards creatures that keep eating after their first food.
#[derive(Debug, Clone)]
pub struct GreedyPolicy {
    /// Energy added per food item, capped at the maximum.
    pub food_energy: u32,
    /// Food per living creature before the random offset.
    pub constant: f64,
    /// Fraction of the drawn offset that is applied.
    pub uncertainty: f64,
    /// The offset is drawn from `-range..=range`.
    pub uncertainty_range: i64,
}

impl GreedyPolicy {
    /// Creates the greedy policy from the rule constants in `params`.
    pub fn from_params(params: &Params) -> Self {
        Self {
            food_energy: params.food_energy,
            constant: params.greedy_constant,
            uncertainty: params.greedy_uncertainty,
            uncertainty_range: params.greedy_uncertainty_range.saturating_abs(),
        }
    }

    /// `ceil(constant * living)` shifted by a truncated, scaled random offset.
    ///
    /// Out-of-range products saturate instead of overflowing; a NaN constant
    /// yields no food.
    fn scaled_count(&self, living: usize, rng: &mut dyn RngCore) -> usize {
        let base = (self.constant * living as f64).ceil() as i64;
        let range = self.uncertainty_range.saturating_abs();
        let offset = rng.random_range(-range..=range);
        // truncates toward zero, so small uncertainties leave the base untouched
        let adjusted = (offset as f64 * self.uncertainty) as i64;
        base.saturating_add(adjusted).max(0) as usize
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::from_params(&Params::default())
    }
}

impl SimulationPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "GreedySimulation"
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
        GREEDY_START_CREATURES
    }

    fn food_count(&self, living: usize, supply: FoodSupply, rng: &mut dyn RngCore) -> usize {
        match supply {
            FoodSupply::Scaled => self.scaled_count(living, rng),
            FoodSupply::Fixed(count) => count,
            FoodSupply::PolicyDefault => 0,
        }
    }

    fn handle_collision(&self, creature: &mut Creature, _food_index: usize) {
        creature.eaten += 1;
        creature.energy = creature
            .energy
            .saturating_add(self.food_energy)
            .min(CREATURE_MAX_ENERGY);
    }

    fn reproduce(
        &self,
        survivors: &[Creature],
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Vec<Creature> {
        let mut next_day = Vec::with_capacity(survivors.len() * 2);
        for survivor in survivors.iter().filter(|c| c.is_survivor) {
            next_day.push(self.spawn_on_edge(params, rng));
            if survivor.eaten >= EXTRA_OFFSPRING_THRESHOLD {
                next_day.push(self.spawn_on_edge(params, rng));
            }
        }
        next_day
    }
}
