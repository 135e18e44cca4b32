//! Food items that creatures collect during a day.

use geo::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::random_point_interior;
use super::locatable::Locatable;

/// A stationary food item.
///
/// Food never changes after it is placed; it simply disappears from the
/// day's food set when a creature reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Position in 2D space.
    pub pos: Point<f32>,
}

impl Food {
    /// Creates a food item at `pos`.
    pub fn new(pos: Point<f32>) -> Self {
        Self { pos }
    }

    /// Creates a food item at a random position at least `margin` inside the arena.
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, margin: f32) -> Self {
        Self::new(random_point_interior(rng, width, height, margin))
    }
}

impl Locatable for Food {
    fn pos(&self) -> Point<f32> {
        self.pos
    }

    fn pos_mut(&mut self) -> &mut Point<f32> {
        &mut self.pos
    }
}
