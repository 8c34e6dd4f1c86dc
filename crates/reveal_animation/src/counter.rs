//! Animated number counters
//!
//! A statistic that counts up from zero to its end value once it is revealed.
//! The displayed value is floored to the counter's decimal places, so it
//! never overshoots and lands exactly on `end` when the count finishes.

use crate::easing::Easing;
use crate::transition::Transition;

/// Counter animating from 0 to `end`
#[derive(Clone, Debug)]
pub struct CountUp {
    end: f32,
    decimals: u32,
    transition: Transition<f32>,
    started: bool,
}

impl CountUp {
    pub fn new(end: f32, duration_ms: u32) -> Self {
        Self {
            end,
            decimals: 0,
            transition: Transition::new(0.0, end, duration_ms).easing(Easing::Power2Out),
            started: false,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.transition = self.transition.easing(easing);
        self
    }

    /// Number of decimal places shown
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals.min(6);
        self
    }

    /// Begin counting. A counter only ever starts once.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.transition.start();
        true
    }

    /// Show the end value immediately (reduced motion)
    pub fn complete(&mut self) {
        self.started = true;
        self.transition.finish();
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.transition.tick(dt_ms);
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_counting(&self) -> bool {
        self.transition.is_playing()
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Value to display, floored to the configured decimal places
    pub fn display_value(&self) -> f32 {
        if !self.started {
            return 0.0;
        }
        if self.transition.is_finished() {
            return self.end;
        }
        let scale = 10f32.powi(self.decimals as i32);
        let floored = (self.transition.value() * scale).floor() / scale;
        floored.clamp(0.0, self.end.max(0.0))
    }

    /// Display value formatted with the configured decimal places
    pub fn display(&self) -> String {
        format!("{:.*}", self.decimals as usize, self.display_value())
    }
}
