//! Infinite loop carousel
//!
//! The track holds the item sequence twice, back to back, and slides at a
//! constant velocity. Offsets `o` and `o + half_width` render identically,
//! so the offset is kept in `[0, half_width)` by an exact modulo reset and
//! the loop has no visible seam.
//!
//! An empty carousel has zero width, renders nothing and never advances.

use serde::{Deserialize, Serialize};

use reveal_core::{Result, RevealError};

/// Direction the track slides in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselDirection {
    /// Items move toward the left edge
    #[default]
    Left,
    /// Items move toward the right edge
    Right,
}

/// One rendered tile of the doubled track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselTile {
    /// Index into the item sequence
    pub item: usize,
    /// 0 for the first copy, 1 for the second
    pub copy: u8,
    /// Left edge on screen, relative to the carousel's left edge
    pub x: f32,
    pub width: f32,
}

/// Constant-velocity looping track
#[derive(Clone, Debug)]
pub struct LoopCarousel {
    /// Horizontal extent of each item, including its spacing
    extents: Vec<f32>,
    /// Left edge of each item within one copy
    starts: Vec<f32>,
    half_width: f32,
    /// Pixels per second
    velocity: f32,
    offset: f32,
    direction: CarouselDirection,
    pause_on_hover: bool,
    hovered: bool,
}

impl LoopCarousel {
    /// Create a carousel from per-item extents and a velocity in px/s
    pub fn new(extents: Vec<f32>, velocity: f32) -> Result<Self> {
        if !velocity.is_finite() || velocity < 0.0 {
            return Err(RevealError::InvalidVelocity(velocity));
        }
        for (index, width) in extents.iter().copied().enumerate() {
            if !width.is_finite() || width < 0.0 {
                return Err(RevealError::InvalidItemWidth { index, width });
            }
        }

        let mut starts = Vec::with_capacity(extents.len());
        let mut cursor = 0.0;
        for extent in &extents {
            starts.push(cursor);
            cursor += extent;
        }

        Ok(Self {
            extents,
            starts,
            half_width: cursor,
            velocity,
            offset: 0.0,
            direction: CarouselDirection::Left,
            pause_on_hover: false,
            hovered: false,
        })
    }

    /// Create a carousel that completes one loop every `loop_secs` seconds
    pub fn with_loop_duration(extents: Vec<f32>, loop_secs: f32) -> Result<Self> {
        if !loop_secs.is_finite() || loop_secs <= 0.0 {
            return Err(RevealError::InvalidVelocity(loop_secs));
        }
        let mut carousel = Self::new(extents, 0.0)?;
        carousel.velocity = carousel.half_width / loop_secs;
        Ok(carousel)
    }

    /// `count` items of equal extent
    pub fn uniform(count: usize, extent: f32, velocity: f32) -> Result<Self> {
        Self::new(vec![extent; count], velocity)
    }

    pub fn direction(mut self, direction: CarouselDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = enabled;
        self
    }

    pub fn item_count(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty() || self.half_width <= 0.0
    }

    /// Width of the doubled track
    pub fn track_width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Width of one copy of the items
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Velocity actually applied this frame
    pub fn effective_velocity(&self) -> f32 {
        if self.pause_on_hover && self.hovered {
            0.0
        } else {
            self.velocity
        }
    }

    /// Current offset, always in `[0, half_width)`
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Advance by `dt_secs` on the render clock
    pub fn tick(&mut self, dt_secs: f32) {
        if self.is_empty() || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return;
        }
        let advanced = self.offset + self.effective_velocity() * dt_secs;
        self.offset = wrap(advanced, self.half_width);
    }

    /// Horizontal translation applied to the track
    pub fn translate_x(&self) -> f32 {
        self.translate_for(self.offset)
    }

    fn translate_for(&self, offset: f32) -> f32 {
        match self.direction {
            CarouselDirection::Left => -offset,
            CarouselDirection::Right => offset - self.half_width,
        }
    }

    /// All tiles of the doubled track at the current offset
    pub fn tiles(&self) -> Vec<CarouselTile> {
        self.tiles_at(self.offset)
    }

    /// All tiles for an arbitrary offset, without wrapping it
    pub fn tiles_at(&self, offset: f32) -> Vec<CarouselTile> {
        if self.is_empty() {
            return Vec::new();
        }
        let translate = self.translate_for(offset);
        (0u8..2)
            .flat_map(|copy| {
                let base = copy as f32 * self.half_width + translate;
                self.starts
                    .iter()
                    .zip(self.extents.iter())
                    .enumerate()
                    .map(move |(item, (start, width))| CarouselTile {
                        item,
                        copy,
                        x: base + start,
                        width: *width,
                    })
            })
            .collect()
    }

    /// Tiles intersecting `[0, viewport_width)` at the current offset
    pub fn visible_tiles(&self, viewport_width: f32) -> Vec<CarouselTile> {
        self.visible_tiles_at(self.offset, viewport_width)
    }

    /// Tiles intersecting `[0, viewport_width)` for an unwrapped offset
    pub fn visible_tiles_at(&self, offset: f32, viewport_width: f32) -> Vec<CarouselTile> {
        self.tiles_at(offset)
            .into_iter()
            .filter(|t| t.x + t.width > 0.0 && t.x < viewport_width)
            .collect()
    }
}

/// Reduce `value` into `[0, period)`
fn wrap(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Pixel-level view of what is on screen: (item, rounded x)
    fn pixels(tiles: &[CarouselTile]) -> Vec<(usize, i32)> {
        let mut px: Vec<(usize, i32)> = tiles.iter().map(|t| (t.item, t.x.round() as i32)).collect();
        px.sort_by_key(|(_, x)| *x);
        px
    }

    #[test]
    fn test_track_is_double_width() {
        let carousel = LoopCarousel::new(vec![100.0, 150.0, 50.0], 10.0).unwrap();
        assert_eq!(carousel.half_width(), 300.0);
        assert_eq!(carousel.track_width(), 600.0);
        assert_eq!(carousel.tiles().len(), 6);
    }

    #[test]
    fn test_tick_wraps_exactly() {
        let mut carousel = LoopCarousel::uniform(4, 100.0, 100.0).unwrap();
        carousel.tick(3.5);
        assert_eq!(carousel.offset(), 350.0);
        carousel.tick(0.5);
        assert_eq!(carousel.offset(), 0.0);
        carousel.tick(4.25);
        assert_eq!(carousel.offset(), 25.0);
    }

    #[test]
    fn test_non_finite_tick_is_ignored() {
        let mut carousel = LoopCarousel::uniform(4, 100.0, 100.0).unwrap();
        carousel.tick(1.5);
        for dt in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            carousel.tick(dt);
            assert_eq!(carousel.offset(), 150.0);
        }
    }

    #[test]
    fn test_offset_advanced_by_half_width_renders_identically() {
        let mut carousel = LoopCarousel::uniform(10, 240.0, 100.0).unwrap();
        carousel.tick(3.5);
        let before = pixels(&carousel.visible_tiles(1280.0));

        carousel.tick(24.0);
        let after = pixels(&carousel.visible_tiles(1280.0));
        assert_eq!(before, after);
    }

    #[test]
    fn test_reset_point_is_seamless() {
        let carousel = LoopCarousel::uniform(10, 240.0, 100.0).unwrap();
        let half = carousel.half_width();
        assert_eq!(
            pixels(&carousel.visible_tiles_at(half, 1280.0)),
            pixels(&carousel.visible_tiles_at(0.0, 1280.0))
        );
    }

    #[test]
    fn test_empty_carousel_renders_nothing() {
        let mut carousel = LoopCarousel::new(Vec::new(), 50.0).unwrap();
        assert!(carousel.is_empty());
        assert_eq!(carousel.track_width(), 0.0);
        carousel.tick(10.0);
        assert_eq!(carousel.offset(), 0.0);
        assert!(carousel.tiles().is_empty());
        assert!(carousel.visible_tiles(1280.0).is_empty());
    }

    #[test]
    fn test_zero_width_items_behave_as_empty() {
        let mut carousel = LoopCarousel::new(vec![0.0, 0.0], 50.0).unwrap();
        carousel.tick(1.0);
        assert!(carousel.is_empty());
        assert_eq!(carousel.offset(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            LoopCarousel::new(vec![10.0, -1.0], 5.0),
            Err(RevealError::InvalidItemWidth { index: 1, .. })
        ));
        assert!(matches!(
            LoopCarousel::new(vec![10.0], f32::NAN),
            Err(RevealError::InvalidVelocity(_))
        ));
        assert!(LoopCarousel::with_loop_duration(vec![10.0], 0.0).is_err());
    }

    #[test]
    fn test_loop_duration_sets_velocity() {
        let carousel = LoopCarousel::with_loop_duration(vec![150.0; 10], 30.0).unwrap();
        assert!((carousel.velocity() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_hover_pause() {
        let mut carousel = LoopCarousel::uniform(4, 100.0, 100.0)
            .unwrap()
            .pause_on_hover(true);
        carousel.set_hovered(true);
        carousel.tick(1.0);
        assert_eq!(carousel.offset(), 0.0);
        carousel.set_hovered(false);
        carousel.tick(1.0);
        assert_eq!(carousel.offset(), 100.0);
    }

    #[test]
    fn test_right_direction_translation() {
        let mut carousel = LoopCarousel::uniform(4, 100.0, 100.0)
            .unwrap()
            .direction(CarouselDirection::Right);
        assert_eq!(carousel.translate_x(), -400.0);
        carousel.tick(1.0);
        assert_eq!(carousel.translate_x(), -300.0);
    }

    proptest! {
        #[test]
        fn offset_stays_in_range(steps in proptest::collection::vec(0.0f32..5.0, 1..100)) {
            let mut carousel = LoopCarousel::uniform(7, 133.0, 87.0).unwrap();
            for dt in steps {
                carousel.tick(dt);
                prop_assert!(carousel.offset() >= 0.0);
                prop_assert!(carousel.offset() < carousel.half_width());
            }
        }

        #[test]
        fn half_width_shift_is_invisible(offset in 0u32..1000) {
            // Viewport no wider than one copy, as the loop requires
            let carousel = LoopCarousel::uniform(8, 125.0, 0.0).unwrap();
            let offset = offset as f32;
            prop_assert_eq!(
                pixels(&carousel.visible_tiles_at(offset, 1000.0)),
                pixels(&carousel.visible_tiles_at(offset + carousel.half_width(), 1000.0))
            );
        }
    }
}
