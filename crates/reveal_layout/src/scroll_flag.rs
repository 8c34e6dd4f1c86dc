//! Scroll-position flag

/// Boolean that flips once the page scrolls past a fixed offset
///
/// Used for chrome that changes appearance after the first bit of scrolling,
/// such as a navbar gaining a background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFlag {
    threshold: f32,
    value: bool,
}

impl ScrollFlag {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            value: false,
        }
    }

    /// Feed a scroll position; returns the new value if it changed
    pub fn update(&mut self, scroll_y: f32) -> Option<bool> {
        let value = scroll_y > self.threshold;
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(value)
    }

    pub fn is_set(&self) -> bool {
        self.value
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_past_threshold() {
        let mut flag = ScrollFlag::new(50.0);
        assert_eq!(flag.update(10.0), None);
        assert_eq!(flag.update(50.0), None);
        assert_eq!(flag.update(51.0), Some(true));
        assert_eq!(flag.update(400.0), None);
        assert!(flag.is_set());
        assert_eq!(flag.update(0.0), Some(false));
    }
}
