//! Creature movement, energy, and boundary handling.
//!
//! A creature wanders with a slowly drifting heading, paying one unit of
//! energy per step. Until it eats it bounces off the arena walls; once it has
//! eaten, reaching a wall makes it a survivor for the rest of the day.

use geo::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{clamp, point_on_random_edge, random_unit_vector};
use super::locatable::Locatable;
use super::params::Params;

/// A foraging creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Position in 2D space.
    pub pos: Point<f32>,
    /// Unit heading vector.
    pub direction: Point<f32>,
    /// Remaining energy; the creature is dead at 0 unless it is a survivor.
    pub energy: u32,
    /// Food items eaten since the start of the current day.
    pub eaten: u32,
    /// Set when the creature reaches a wall after eating.
    pub is_survivor: bool,
}

impl Creature {
    /// Creates a creature with full energy and a clean day record.
    pub fn new(pos: Point<f32>, direction: Point<f32>, max_energy: u32) -> Self {
        Self {
            pos,
            direction,
            energy: max_energy,
            eaten: 0,
            is_survivor: false,
        }
    }

    /// Creates a creature on a random arena edge with a random heading.
    ///
    /// # Arguments
    ///
    /// * `params` - Arena dimensions
    /// * `radius` - Creature radius, used as the inset from the boundary
    /// * `max_energy` - Starting energy
    pub fn new_on_edge<R: Rng + ?Sized>(
        rng: &mut R,
        params: &Params,
        radius: f32,
        max_energy: u32,
    ) -> Self {
        let pos = point_on_random_edge(rng, params.box_width, params.box_height, radius);
        let direction = random_unit_vector(rng);
        Self::new(pos, direction, max_energy)
    }

    /// Checks if the creature still has energy.
    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    /// Checks if the creature ran out of energy without surviving.
    pub fn is_dead(&self) -> bool {
        !self.is_survivor && self.energy == 0
    }

    /// Checks if the creature still takes part in the current day.
    pub fn is_active(&self) -> bool {
        !self.is_survivor && self.energy > 0
    }

    /// Restores full energy and clears the per-day record.
    pub fn reset_for_day(&mut self, max_energy: u32) {
        self.energy = max_energy;
        self.eaten = 0;
        self.is_survivor = false;
    }

    /// Sets energy to zero.
    pub fn kill(&mut self) {
        self.energy = 0;
    }

    /// Advances one step along the current heading and pays one unit of energy.
    ///
    /// The heading is occasionally replaced by a fresh random one. No bounds
    /// checking happens here; see [`Creature::handle_edges`].
    pub fn move_step<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &Params) {
        if rng.random_bool(params.turn_probability) {
            self.direction = random_unit_vector(rng);
        }
        self.pos = self.pos + self.direction * params.step_size;
        self.energy = self.energy.saturating_sub(1);
    }

    /// Applies the arena walls to the creature.
    ///
    /// A creature that has eaten becomes a survivor as soon as it touches a
    /// wall and is clamped inside. A creature that has not eaten is reflected
    /// back into the arena and may pick a new random heading.
    ///
    /// # Arguments
    ///
    /// * `params` - Arena dimensions and bounce behavior
    /// * `radius` - Creature radius
    pub fn handle_edges<R: Rng + ?Sized>(&mut self, rng: &mut R, params: &Params, radius: f32) {
        let (mut x, mut y) = self.pos.x_y();
        let max_x = params.box_width - radius;
        let max_y = params.box_height - radius;

        if self.eaten > 0 {
            let touched_edge = x <= radius || x >= max_x || y <= radius || y >= max_y;
            if touched_edge {
                self.is_survivor = true;
                self.pos = Point::new(clamp(x, radius, max_x), clamp(y, radius, max_y));
            }
            return;
        }

        let (mut dx, mut dy) = self.direction.x_y();
        let mut bounced = false;
        if x < radius {
            x = radius;
            dx = -dx;
            bounced = true;
        } else if x > max_x {
            x = max_x;
            dx = -dx;
            bounced = true;
        }
        if y < radius {
            y = radius;
            dy = -dy;
            bounced = true;
        } else if y > max_y {
            y = max_y;
            dy = -dy;
            bounced = true;
        }

        self.direction = Point::new(dx, dy);
        // a fresh heading keeps creatures from sliding along a wall
        if bounced && rng.random_bool(params.bounce_turn_probability) {
            self.direction = random_unit_vector(rng);
        }
        self.pos = Point::new(x, y);
    }
}

impl std::fmt::Display for Creature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_alive() { "alive" } else { "dead" };
        write!(
            f,
            "Creature({status}, eaten {}, energy: {}, survivor: {})",
            self.eaten, self.energy, self.is_survivor
        )
    }
}

impl Locatable for Creature {
    fn pos(&self) -> Point<f32> {
        self.pos
    }

    fn pos_mut(&mut self) -> &mut Point<f32> {
        &mut self.pos
    }
}
