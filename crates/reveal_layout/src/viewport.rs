//! Viewport position relative to the page

use reveal_core::Rect;

use crate::binding::EntryThreshold;

/// The visible window onto the page, in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Document y of the viewport's top edge
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_y: f32, width: f32, height: f32) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }

    /// Same viewport scrolled to `scroll_y`
    pub fn scrolled_to(self, scroll_y: f32) -> Self {
        Self { scroll_y, ..self }
    }

    /// Document y of the line at `threshold` of the viewport height
    pub fn threshold_line(&self, threshold: EntryThreshold) -> f32 {
        self.scroll_y + self.height * threshold.fraction()
    }

    /// Whether the region's leading edge is at or above the threshold line
    pub fn has_entered(&self, bounds: Rect, threshold: EntryThreshold) -> bool {
        bounds.top() <= self.threshold_line(threshold)
    }
}
