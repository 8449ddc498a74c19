//! 2D vector helpers.
//!
//! The sandbox works on Bevy's `Vec2` directly; this module adds the two
//! operations the simulation needs on top of the glam API.

use bevy::math::Vec2;

/// Position, velocity and force type used across the sandbox.
pub type Vector2 = Vec2;

pub trait VectorExt {
    /// Moves `self` toward `target` by `factor` of the remaining gap, in place.
    /// Returns the updated value.
    fn self_interpolate(&mut self, target: Vec2, factor: f32) -> Vec2;

    /// Unsigned angle between two vectors in degrees, in `[0, 180]`.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`. A zero-length
    /// operand yields 0 instead of NaN.
    fn angle_between_degrees(self, other: Vec2) -> f32;
}

impl VectorExt for Vec2 {
    fn self_interpolate(&mut self, target: Vec2, factor: f32) -> Vec2 {
        self.x += (target.x - self.x) * factor;
        self.y += (target.y - self.y) * factor;
        *self
    }

    fn angle_between_degrees(self, other: Vec2) -> f32 {
        let magnitudes = self.length() * other.length();
        if magnitudes <= f32::EPSILON {
            return 0.0;
        }
        let cos_theta = (self.dot(other) / magnitudes).clamp(-1.0, 1.0);
        cos_theta.acos().to_degrees()
    }
}
