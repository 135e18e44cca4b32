//! Trait for entities that occupy a circle in the arena.
//!
//! Food and creatures both implement it, which lets collision checks and
//! drawing code treat them uniformly.

use geo::Point;

use super::geometric_utils::distance;

/// Trait for entities with a position in 2D space.
pub trait Locatable {
    /// Returns the entity's position.
    fn pos(&self) -> Point<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Point<f32>;

    /// Checks whether two circles centered on `self` and `other` touch.
    ///
    /// # Arguments
    ///
    /// * `other` - The other entity
    /// * `reach` - Sum of both radii; touching is inclusive of this distance
    fn touches(&self, other: &impl Locatable, reach: f32) -> bool {
        distance(self.pos(), other.pos()) <= reach
    }
}
