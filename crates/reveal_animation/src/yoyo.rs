//! Endless back-and-forth motion
//!
//! A [`Yoyo`] plays from one value to another, then back again, forever.
//! Used for ambient decorative motion (floating artwork, drifting
//! particles) that is not tied to scrolling. Hosts gate it on the motion
//! preference and simply never start it under reduced motion.

use crate::easing::Easing;
use crate::values::Interpolate;

/// Looping ping-pong interpolation between two values
#[derive(Clone, Debug)]
pub struct Yoyo<T: Interpolate> {
    from: T,
    to: T,
    /// Time for one leg, from `from` to `to`, in milliseconds
    leg_ms: u32,
    delay_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
    playing: bool,
}

impl<T: Interpolate> Yoyo<T> {
    /// Create a stopped yoyo with sine in-out easing
    pub fn new(from: T, to: T, leg_ms: u32) -> Self {
        Self {
            from,
            to,
            leg_ms,
            delay_ms: 0,
            easing: Easing::SineInOut,
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

    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    /// Start and return self (builder pattern)
    pub fn started(mut self) -> Self {
        self.start();
        self
    }

    /// Freeze at the current value
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn leg_ms(&self) -> u32 {
        self.leg_ms
    }

    /// Position in the current cycle, 0.0 at `from` and 1.0 at `to`
    pub fn progress(&self) -> f32 {
        let active = self.elapsed_ms - self.delay_ms as f32;
        if active <= 0.0 || self.leg_ms == 0 {
            return 0.0;
        }
        let leg = self.leg_ms as f32;
        let phase = active.rem_euclid(2.0 * leg) / leg;
        if phase <= 1.0 {
            phase
        } else {
            2.0 - phase
        }
    }

    pub fn value(&self) -> T {
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    /// Advance by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;

        // Keep the clock bounded; the value only depends on the cycle phase
        let delay = self.delay_ms as f32;
        let cycle = 2.0 * self.leg_ms as f32;
        if cycle > 0.0 && self.elapsed_ms > delay + cycle {
            self.elapsed_ms = delay + (self.elapsed_ms - delay).rem_euclid(cycle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(leg_ms: u32) -> Yoyo<f32> {
        Yoyo::new(0.0_f32, -15.0, leg_ms).easing(Easing::Linear).started()
    }

    #[test]
    fn test_goes_there_and_back() {
        let mut y = linear(1000);
        assert_eq!(y.value(), 0.0);

        y.tick(500.0);
        assert!((y.value() + 7.5).abs() < 1e-4);
        y.tick(500.0);
        assert!((y.value() + 15.0).abs() < 1e-4);
        y.tick(500.0);
        assert!((y.value() + 7.5).abs() < 1e-4);
        y.tick(500.0);
        assert!(y.value().abs() < 1e-4);
        assert!(y.is_playing());
    }

    #[test]
    fn test_stays_in_range_over_long_runs() {
        let mut y = linear(3000);
        for _ in 0..10_000 {
            y.tick(16.7);
            let v = y.value();
            assert!((-15.0..=0.0).contains(&v));
        }
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut y = Yoyo::new(0.0_f32, 1.0, 100).delay(200).started();
        y.tick(150.0);
        assert_eq!(y.value(), 0.0);
        y.tick(100.0);
        assert!(y.value() > 0.0);
    }

    #[test]
    fn test_stopped_does_not_advance() {
        let mut y = Yoyo::new(0.0_f32, 1.0, 100);
        y.tick(50.0);
        assert_eq!(y.progress(), 0.0);

        let mut y = linear(100);
        y.tick(50.0);
        y.stop();
        y.tick(f32::NAN);
        y.tick(30.0);
        assert!((y.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sine_easing_is_symmetric() {
        let mut y = Yoyo::new(0.0_f32, 1.0, 1000).started();
        y.tick(250.0);
        let rising = y.value();
        y.tick(1500.0);
        assert!((y.value() - rising).abs() < 1e-4);
    }
}
