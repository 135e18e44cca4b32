use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{Result, SimError};

/// Largest step batch the speed controls will accept.
pub const MAX_SPEED_MULTIPLIER: u32 = 128;
/// Largest food-per-creature factor accepted for the greedy policy.
pub const MAX_GREEDY_CONSTANT: f64 = 100.0;
/// Largest half-width accepted for the greedy food offset.
pub const MAX_GREEDY_UNCERTAINTY_RANGE: i64 = 1_000;

/// World and entity constants that stay fixed for the lifetime of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena width.
    pub box_width: f32,
    /// Arena height.
    pub box_height: f32,
    /// Distance a creature travels per elementary step.
    pub step_size: f32,
    /// Chance per step that a creature picks a fresh random heading.
    pub turn_probability: f64,
    /// Chance that a creature picks a fresh random heading after bouncing off a wall.
    pub bounce_turn_probability: f64,
    /// Energy added per food item under the greedy policy.
    pub food_energy: u32,
    /// Food per living creature under the greedy policy.
    pub greedy_constant: f64,
    /// Fraction of the random offset applied to the greedy food count.
    pub greedy_uncertainty: f64,
    /// Half-width of the integer offset drawn for the greedy food count.
    pub greedy_uncertainty_range: i64,
    /// Day ceiling for a single run.
    pub max_days: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            box_width: 500.0,
            box_height: 500.0,
            step_size: 2.5,
            turn_probability: 0.05,
            bounce_turn_probability: 0.5,
            food_energy: 250,
            greedy_constant: 1.1,
            greedy_uncertainty: 0.3,
            greedy_uncertainty_range: 3,
            max_days: 20,
        }
    }
}

impl Params {
    /// Checks that the arena can hold entities inset by `margin` on every side.
    ///
    /// # Arguments
    ///
    /// * `margin` - Largest inset any spawn rule will use
    pub fn validate(&self, margin: f32) -> Result<()> {
        if !(self.box_width.is_finite() && self.box_height.is_finite()) {
            return Err(SimError::InvalidParams(
                "arena dimensions must be finite".to_string(),
            ));
        }
        if self.box_width < 2.0 * margin || self.box_height < 2.0 * margin {
            return Err(SimError::InvalidParams(format!(
                "arena {}x{} is too small for a spawn margin of {}",
                self.box_width, self.box_height, margin
            )));
        }
        if !self.step_size.is_finite() || self.step_size < 0.0 {
            return Err(SimError::InvalidParams(format!(
                "step size must be a non-negative number, got {}",
                self.step_size
            )));
        }
        for (name, p) in [
            ("turn_probability", self.turn_probability),
            ("bounce_turn_probability", self.bounce_turn_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidParams(format!(
                    "{name} must lie in [0, 1], got {p}"
                )));
            }
        }
        if !(0.0..=MAX_GREEDY_CONSTANT).contains(&self.greedy_constant) {
            return Err(SimError::InvalidParams(format!(
                "greedy_constant must lie in [0, {MAX_GREEDY_CONSTANT}], got {}",
                self.greedy_constant
            )));
        }
        if !self.greedy_uncertainty.is_finite() || self.greedy_uncertainty < 0.0 {
            return Err(SimError::InvalidParams(format!(
                "greedy_uncertainty must be a non-negative number, got {}",
                self.greedy_uncertainty
            )));
        }
        if !(0..=MAX_GREEDY_UNCERTAINTY_RANGE).contains(&self.greedy_uncertainty_range) {
            return Err(SimError::InvalidParams(format!(
                "greedy_uncertainty_range must lie in [0, {MAX_GREEDY_UNCERTAINTY_RANGE}], got {}",
                self.greedy_uncertainty_range
            )));
        }
        Ok(())
    }

    /// Loads parameters from a JSON file; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// How many food items a day should receive, resolved from the config at day start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodSupply {
    /// Scale with the living population using the policy's formula.
    Scaled,
    /// Spawn exactly this many items.
    Fixed(usize),
    /// Scaling is off but no count was given; the policy picks.
    PolicyDefault,
}

/// Runtime knobs that the front-end may change between batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scale the daily food count with the population.
    pub food_scaling: bool,
    /// Food count used when scaling is off. Negative values are rejected at day start.
    pub fixed_food_count: Option<i64>,
    /// Elementary steps per render/input poll.
    pub speed_multiplier: u32,
    /// Ends the current day at the next batch boundary. Cleared at every day start.
    pub manual_stop: bool,
    /// Emit the per-day narrative summary.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            food_scaling: true,
            fixed_food_count: None,
            speed_multiplier: 1,
            manual_stop: false,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Resolves the food rule for the coming day.
    ///
    /// A fixed count that fails the non-negative check falls back to scaling.
    pub fn food_supply(&self) -> FoodSupply {
        if self.food_scaling {
            return FoodSupply::Scaled;
        }
        match self.fixed_food_count {
            None => FoodSupply::PolicyDefault,
            Some(count) => match usize::try_from(count) {
                Ok(count) => FoodSupply::Fixed(count),
                Err(_) => {
                    tracing::warn!(
                        fixed_food_count = count,
                        "rejecting negative fixed food count, scaling with population instead"
                    );
                    FoodSupply::Scaled
                }
            },
        }
    }

    /// Speed multiplier clamped to `[1, MAX_SPEED_MULTIPLIER]`.
    pub fn effective_speed(&self) -> u32 {
        self.speed_multiplier.clamp(1, MAX_SPEED_MULTIPLIER)
    }

    /// Doubles the speed multiplier, saturating at the maximum.
    pub fn speed_up(&mut self) {
        self.speed_multiplier = (self.effective_speed() * 2).min(MAX_SPEED_MULTIPLIER);
    }

    /// Halves the speed multiplier, never dropping below 1.
    pub fn slow_down(&mut self) {
        self.speed_multiplier = (self.effective_speed() / 2).max(1);
    }

    /// Loads a config from a JSON file; missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
