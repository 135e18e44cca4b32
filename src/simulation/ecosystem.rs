//! The day engine.
//!
//! A day moves through three phases:
//! - **Spawning**: creatures are reset and the policy places the day's food
//! - **Ticking**: creatures move, bounce, and eat in batches of elementary steps
//! - **Settled**: survivors and deaths are tallied and the dead are removed
//!
//! [`Ecosystem::simulate_day`] runs a whole day synchronously. Front-ends that
//! need to yield between frames call [`Ecosystem::advance_batch`] once per
//! frame instead; it moves through the same phases one batch at a time.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::ControlFlow;

use super::creature::Creature;
use super::error::Result;
use super::food::Food;
use super::locatable::Locatable;
use super::params::{Params, SimulationConfig};
use super::policy::SimulationPolicy;
use super::stats::DayResult;

/// Number of creatures listed in the verbose day summary.
const VERBOSE_CREATURE_LIMIT: usize = 10;

/// Where the current day stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Creatures are being reset and food placed.
    Spawning,
    /// Creatures are moving.
    Ticking,
    /// The day is over and has been tallied.
    Settled,
}

/// Read-only view of the arena handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Current day, starting at 1.
    pub day: u32,
    /// Phase of the current day.
    pub phase: DayPhase,
    /// All creatures, including the dead until the day is settled.
    pub creatures: &'a [Creature],
    /// Food still on the ground.
    pub food: &'a [Food],
    /// Elementary steps per batch.
    pub speed_multiplier: u32,
}

/// Front-end hooks called while a day is simulated.
///
/// Both hooks run between step batches, never in the middle of one.
pub trait DayObserver {
    /// Polls user input, which may change the config (speed, manual stop).
    ///
    /// Returning `Break` abandons the day immediately.
    fn poll_input(&mut self, _config: &mut SimulationConfig) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Draws the current state.
    fn render(&mut self, _frame: &Frame<'_>) {}
}

/// Observer that ignores every hook, for batch runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl DayObserver for Headless {}

/// Owns the creatures, the food, and the random generator of one simulation.
#[derive(Debug)]
pub struct Ecosystem {
    /// Current creatures. Between days this holds only the next day's cohort.
    pub creatures: Vec<Creature>,
    /// Food still on the ground today.
    pub food: Vec<Food>,
    /// Current day, starting at 1. Zero before the first day.
    pub day: u32,
    /// Food items placed at the start of the current day.
    pub food_spawned: usize,
    /// Creatures alive at the start of the current day.
    pub start_creatures: usize,
    /// Phase of the current day.
    pub phase: DayPhase,
    /// Runtime knobs, re-read at every day start and every batch.
    pub config: SimulationConfig,
    params: Params,
    policy: Box<dyn SimulationPolicy>,
    rng: ChaCha8Rng,
}

impl Ecosystem {
    /// Creates an ecosystem with the policy's starting cohort on the arena edges.
    ///
    /// # Arguments
    ///
    /// * `policy` - Rules for food, eating, and reproduction
    /// * `params` - World constants
    /// * `config` - Initial runtime knobs
    /// * `seed` - Seed for every random draw of this simulation
    pub fn new(
        policy: Box<dyn SimulationPolicy>,
        params: Params,
        config: SimulationConfig,
        seed: u64,
    ) -> Result<Self> {
        params.validate(policy.spawn_margin().max(policy.creature_radius()))?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let creatures = policy.initial_cohort(&params, &mut rng);

        tracing::debug!(
            policy = policy.name(),
            creatures = creatures.len(),
            seed,
            "created ecosystem"
        );

        Ok(Self {
            creatures,
            food: Vec::new(),
            day: 0,
            food_spawned: 0,
            start_creatures: 0,
            phase: DayPhase::Settled,
            config,
            params,
            policy,
            rng,
        })
    }

    /// The active policy.
    pub fn policy(&self) -> &dyn SimulationPolicy {
        self.policy.as_ref()
    }

    /// World constants.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Number of creatures that still have energy or already survived.
    pub fn living_count(&self) -> usize {
        self.creatures.iter().filter(|c| !c.is_dead()).count()
    }

    /// Read-only view of the current state.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            day: self.day,
            phase: self.phase,
            creatures: &self.creatures,
            food: &self.food,
            speed_multiplier: self.config.effective_speed(),
        }
    }

    /// Starts the next day.
    ///
    /// Resets every creature, clears the manual stop flag and places the day's
    /// food. Returns the number of creatures starting the day, or `None` when
    /// the population is extinct.
    pub fn begin_day(&mut self) -> Option<usize> {
        self.day += 1;
        self.phase = DayPhase::Spawning;
        self.config.manual_stop = false;

        let max_energy = self.policy.creature_max_energy();
        for creature in &mut self.creatures {
            creature.reset_for_day(max_energy);
        }

        self.start_creatures = self.creatures.len();
        if self.start_creatures == 0 {
            self.food.clear();
            self.food_spawned = 0;
            self.phase = DayPhase::Settled;
            tracing::info!(day = self.day, "population is extinct");
            return None;
        }

        let supply = self.config.food_supply();
        self.food = self.policy.spawn_food_for_day(
            self.start_creatures,
            supply,
            &self.params,
            &mut self.rng,
        );
        self.food_spawned = self.food.len();
        self.phase = DayPhase::Ticking;

        tracing::debug!(
            day = self.day,
            creatures = self.start_creatures,
            food = self.food_spawned,
            ?supply,
            "day started"
        );

        Some(self.start_creatures)
    }

    /// Runs one elementary step over every active creature.
    ///
    /// Each active creature moves, handles the walls, and then eats the first
    /// food in range (at most one per step). When the food runs out, every
    /// creature that has not eaten yet starves on the spot.
    pub fn step(&mut self) {
        let radius = self.policy.creature_radius();
        let reach = radius + self.policy.food_radius();

        for creature in &mut self.creatures {
            if !creature.is_active() {
                continue;
            }

            creature.move_step(&mut self.rng, &self.params);
            creature.handle_edges(&mut self.rng, &self.params, radius);

            if creature.is_alive() {
                if let Some(index) = self.food.iter().position(|f| creature.touches(f, reach)) {
                    self.food.remove(index);
                    self.policy.handle_collision(creature, index);
                }
            }
        }

        if self.food.is_empty() {
            for creature in &mut self.creatures {
                if creature.eaten == 0 && creature.is_active() {
                    creature.kill();
                }
            }
        }
    }

    /// Checks if every creature is either a survivor or out of energy.
    pub fn is_day_done(&self) -> bool {
        !self.creatures.iter().any(Creature::is_active)
    }

    /// Runs up to `speed_multiplier` elementary steps, stopping early once the
    /// day is done. Returns whether the day is done.
    pub fn step_batch(&mut self) -> bool {
        for _ in 0..self.config.effective_speed() {
            if self.is_day_done() {
                break;
            }
            self.step();
        }
        self.is_day_done()
    }

    /// Tallies the day and removes every creature that did not survive.
    ///
    /// Creatures still moving when the day was stopped by hand count as dead.
    pub fn settle(&mut self) -> DayResult {
        self.phase = DayPhase::Settled;

        let survivors = self.creatures.iter().filter(|c| c.is_survivor).count();
        let result = DayResult {
            day: self.day,
            start_creatures: self.start_creatures,
            food_spawned: self.food_spawned,
            survivors,
            died: self.creatures.len() - survivors,
        };

        tracing::info!(
            policy = self.policy.name(),
            day = result.day,
            start = result.start_creatures,
            food = result.food_spawned,
            survived = result.survivors,
            died = result.died,
            "day settled"
        );
        self.creatures.retain(|c| c.is_survivor);
        if self.config.verbose {
            self.log_day_summary(&result);
        }
        result
    }

    /// Advances the simulation by one step batch.
    ///
    /// A new day is started first when the previous one is settled. The
    /// observer is polled after the day has started, so a stop requested on
    /// the first batch of a day applies to that day. Returns `Break` if the
    /// observer quit, `Continue(Some(result))` once the day is settled (an
    /// extinct result when nobody was left to start it), and `Continue(None)`
    /// while the day is still running.
    pub fn advance_batch(
        &mut self,
        observer: &mut impl DayObserver,
    ) -> ControlFlow<(), Option<DayResult>> {
        if self.phase == DayPhase::Settled && self.begin_day().is_none() {
            return ControlFlow::Continue(Some(DayResult::extinct(self.day)));
        }

        if observer.poll_input(&mut self.config).is_break() {
            tracing::info!(day = self.day, "simulation abandoned mid-day");
            return ControlFlow::Break(());
        }

        if self.config.manual_stop {
            tracing::debug!(day = self.day, "day stopped by hand");
        } else if !self.step_batch() {
            observer.render(&self.frame());
            return ControlFlow::Continue(None);
        }

        self.phase = DayPhase::Settled;
        observer.render(&self.frame());
        ControlFlow::Continue(Some(self.settle()))
    }

    /// Runs the current day to its end: spawn, tick until done or stopped,
    /// settle.
    ///
    /// The observer is polled and asked to render once per batch. Returns
    /// `None` if the observer quit, in which case the partial day is left as
    /// is and the next call resumes it.
    pub fn simulate_day(&mut self, observer: &mut impl DayObserver) -> Option<DayResult> {
        loop {
            match self.advance_batch(observer) {
                ControlFlow::Break(()) => return None,
                ControlFlow::Continue(Some(result)) => return Some(result),
                ControlFlow::Continue(None) => {}
            }
        }
    }

    /// Replaces the survivors with the cohort the policy breeds from them.
    pub fn reproduce(&mut self) {
        let next_day = self
            .policy
            .reproduce(&self.creatures, &self.params, &mut self.rng);
        tracing::debug!(
            day = self.day,
            parents = self.creatures.len(),
            offspring = next_day.len(),
            "reproduced"
        );
        self.creatures = next_day;
    }

    fn log_day_summary(&self, result: &DayResult) {
        tracing::info!(
            "{} | Day {:03} | start={} food={} survived={} died={} end={}",
            self.policy.name(),
            result.day,
            result.start_creatures,
            result.food_spawned,
            result.survivors,
            result.died,
            result.end_creatures()
        );
        for (i, creature) in self
            .creatures
            .iter()
            .take(VERBOSE_CREATURE_LIMIT)
            .enumerate()
        {
            tracing::info!("  #{}: {}", i + 1, creature);
        }
        if self.creatures.len() > VERBOSE_CREATURE_LIMIT {
            tracing::info!(
                "  ...(+{} more)",
                self.creatures.len() - VERBOSE_CREATURE_LIMIT
            );
        }
    }
}
