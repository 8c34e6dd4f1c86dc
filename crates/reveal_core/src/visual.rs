//! Animatable visual state of a region
//!
//! A `VisualState` is the set of properties an entrance transition may
//! interpolate. The layout position of a region never changes; translation,
//! scale and rotation are visual offsets applied on top of it.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing visual properties
pub const VISUAL_EPSILON: f32 = 1e-4;

/// Animatable properties applied to a region
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualState {
    /// Opacity (0.0 = invisible, 1.0 = opaque)
    pub opacity: f32,
    /// Horizontal offset from the layout position, in pixels
    pub translate_x: f32,
    /// Vertical offset from the layout position, in pixels
    pub translate_y: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Vertical-only scale factor (multiplies `scale` on the y axis)
    pub scale_y: f32,
    /// Rotation around the x axis, in degrees
    pub rotate_x: f32,
    /// Rotation around the y axis, in degrees
    pub rotate_y: f32,
}

impl VisualState {
    /// Fully visible, untransformed. The final state of every entrance.
    pub const VISIBLE: VisualState = VisualState {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        scale_y: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Untransformed but fully transparent
    pub const HIDDEN: VisualState = VisualState {
        opacity: 0.0,
        ..Self::VISIBLE
    };

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn x(mut self, x: f32) -> Self {
        self.translate_x = x;
        self
    }

    pub fn y(mut self, y: f32) -> Self {
        self.translate_y = y;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale_y(mut self, scale_y: f32) -> Self {
        self.scale_y = scale_y;
        self
    }

    pub fn rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = degrees;
        self
    }

    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = degrees;
        self
    }

    fn components(&self) -> [f32; 7] {
        [
            self.opacity,
            self.translate_x,
            self.translate_y,
            self.scale,
            self.scale_y,
            self.rotate_x,
            self.rotate_y,
        ]
    }

    /// Check if the two states differ in at least one animatable property
    pub fn differs_from(&self, other: &VisualState) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .any(|(a, b)| (a - b).abs() > VISUAL_EPSILON)
    }

    /// Check if the region would be drawn at all
    pub fn is_visible(&self) -> bool {
        self.opacity > VISUAL_EPSILON
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::VISIBLE
    }
}
