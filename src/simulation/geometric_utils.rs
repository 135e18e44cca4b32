//! Geometric utility functions for distances and random placement.
//!
//! All randomness is drawn from the generator passed in, so a seeded
//! generator makes every placement reproducible.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use rand::Rng;
use std::f32::consts::TAU;

/// Restricts `value` to the inclusive range `[min, max]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Euclidean distance between two points.
pub fn distance(a: Point<f32>, b: Point<f32>) -> f32 {
    Euclidean.distance(a, b)
}

/// Returns a unit vector with an angle drawn uniformly from `[0, 2π)`.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Point<f32> {
    let angle = rng.random_range(0.0..TAU);
    Point::new(angle.cos(), angle.sin())
}

/// Picks one of the four borders uniformly and returns a point on it.
///
/// The point sits `margin` inside the true boundary so a circle of radius
/// `margin` is fully visible; the free coordinate is uniform in
/// `[margin, dimension - margin]`.
///
/// # Arguments
///
/// * `width` - Arena width
/// * `height` - Arena height
/// * `margin` - Inset from the boundary
pub fn point_on_random_edge<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    margin: f32,
) -> Point<f32> {
    match rng.random_range(0..4) {
        // top
        0 => Point::new(rng.random_range(margin..=width - margin), margin),
        // bottom
        1 => Point::new(rng.random_range(margin..=width - margin), height - margin),
        // left
        2 => Point::new(margin, rng.random_range(margin..=height - margin)),
        // right
        _ => Point::new(width - margin, rng.random_range(margin..=height - margin)),
    }
}

/// Returns a point with both coordinates uniform in `[margin, dimension - margin]`.
pub fn random_point_interior<R: Rng + ?Sized>(
    rng: &mut R,
    width: f32,
    height: f32,
    margin: f32,
) -> Point<f32> {
    Point::new(
        rng.random_range(margin..=width - margin),
        rng.random_range(margin..=height - margin),
    )
}
