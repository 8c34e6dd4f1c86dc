//! Timed transitions
//!
//! A transition interpolates from one value to another over a fixed duration,
//! optionally after a start delay. While waiting out the delay the value
//! stays at `from`, so staggered children sit in their initial state until
//! their turn comes.

use crate::easing::Easing;
use crate::values::Interpolate;
use reveal_core::VisualState;

/// A one-shot timed interpolation between two values
#[derive(Clone, Debug)]
pub struct Transition<T: Interpolate> {
    from: T,
    to: T,
    /// Duration in milliseconds (excluding delay)
    duration_ms: u32,
    /// Delay before interpolation starts, in milliseconds
    delay_ms: u32,
    easing: Easing,
    /// Time since start, including delay
    elapsed_ms: f32,
    playing: bool,
}

/// Transition between two visual states
pub type VisualTransition = Transition<VisualState>;

impl<T: Interpolate> Transition<T> {
    /// Create a stopped transition
    pub fn new(from: T, to: T, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0,
            easing: Easing::default(),
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Set start delay (builder pattern)
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set easing (builder pattern)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start (or restart) from the beginning
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    /// Start and return self (builder pattern)
    pub fn started(mut self) -> Self {
        self.start();
        self
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Jump to the end
    pub fn finish(&mut self) {
        self.elapsed_ms = self.total_ms();
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Reached the end (as opposed to merely stopped)
    pub fn is_finished(&self) -> bool {
        !self.playing && self.elapsed_ms >= self.total_ms()
    }

    /// Still inside the start delay
    pub fn is_waiting(&self) -> bool {
        self.playing && self.elapsed_ms < self.delay_ms as f32
    }

    pub fn from_value(&self) -> &T {
        &self.from
    }

    pub fn to_value(&self) -> &T {
        &self.to
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    fn total_ms(&self) -> f32 {
        self.delay_ms.saturating_add(self.duration_ms) as f32
    }

    /// Linear progress through the interpolation (0.0 to 1.0), delay excluded
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 {
            return if self.duration_ms == 0 && self.is_finished() {
                1.0
            } else {
                0.0
            };
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (active / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.elapsed_ms += dt_ms.max(0.0);

        if self.elapsed_ms >= self.total_ms() {
            self.elapsed_ms = self.total_ms();
            self.playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progress() {
        let mut t = Transition::new(0.0_f32, 100.0, 1000).easing(Easing::Linear).started();

        assert!((t.value() - 0.0).abs() < 1e-4);
        t.tick(500.0);
        assert!((t.value() - 50.0).abs() < 1e-4);
        t.tick(500.0);
        assert!((t.value() - 100.0).abs() < 1e-4);
        assert!(!t.is_playing());
        assert!(t.is_finished());
    }

    #[test]
    fn test_delay_holds_initial_value() {
        let mut t = Transition::new(0.0_f32, 1.0, 100)
            .delay(200)
            .easing(Easing::Linear)
            .started();

        t.tick(150.0);
        assert!(t.is_waiting());
        assert_eq!(t.value(), 0.0);

        t.tick(100.0);
        assert!(!t.is_waiting());
        assert!((t.value() - 0.5).abs() < 1e-4);

        t.tick(1000.0);
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut t = Transition::new(0.0_f32, 1.0, 0).started();
        assert_eq!(t.value(), 0.0);
        t.tick(0.0);
        assert!(t.is_finished());
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn test_stopped_transition_does_not_advance() {
        let mut t = Transition::new(0.0_f32, 1.0, 100);
        t.tick(50.0);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn test_finish_jumps_to_end() {
        let mut t = Transition::new(VisualState::HIDDEN, VisualState::VISIBLE, 800).started();
        t.finish();
        assert_eq!(t.value(), VisualState::VISIBLE);
        assert!(!t.is_playing());
    }

    #[test]
    fn test_huge_delay_and_duration_saturate() {
        let mut t = Transition::new(0.0_f32, 1.0, u32::MAX)
            .delay(100)
            .easing(Easing::Linear)
            .started();
        t.tick(1000.0);
        assert!(t.is_playing());
        assert!(!t.is_waiting());
        assert!(t.value() < 1e-3);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut t = Transition::new(0.0_f32, 1.0, 100).easing(Easing::Linear).started();
        t.tick(50.0);
        t.tick(-30.0);
        assert!((t.progress() - 0.5).abs() < 1e-6);
    }
}
