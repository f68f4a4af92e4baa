//! Distance and steering helpers

use crate::core::types::{Vec2, WorldSize};
use rand::Rng;

/// Angle from `from` to `to`, radians
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Advance `from` by `speed` along the bearing to `to`
///
/// Does not stop at the target; callers decide arrival.
pub fn step_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let angle = bearing(from, to);
    Vec2::new(from.x + angle.cos() * speed, from.y + angle.sin() * speed)
}

/// Linear blend from `start` to `end`; `amount` of 0 gives `start`, 1 gives `end`
#[inline]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    (1.0 - amount) * start + amount * end
}

/// Uniform random point inside the world
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, size: WorldSize) -> Vec2 {
    Vec2::new(rng.gen::<f32>() * size.width, rng.gen::<f32>() * size.height)
}
