//! Animatable value types
//!
//! Linear interpolation for the values transitions drive.

use reveal_core::VisualState;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for VisualState {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        VisualState {
            opacity: self.opacity.lerp(&other.opacity, t),
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
            scale: self.scale.lerp(&other.scale, t),
            scale_y: self.scale_y.lerp(&other.scale_y, t),
            rotate_x: self.rotate_x.lerp(&other.rotate_x, t),
            rotate_y: self.rotate_y.lerp(&other.rotate_y, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.scale_y.approx_eq(&other.scale_y, epsilon)
            && self.rotate_x.approx_eq(&other.rotate_x, epsilon)
            && self.rotate_y.approx_eq(&other.rotate_y, epsilon)
    }
}
