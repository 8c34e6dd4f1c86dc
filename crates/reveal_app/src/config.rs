//! Reveal configuration
//!
//! Tunables for the page, read from a `reveal.toml` file. Every field has a
//! default, so an empty file (or no file) gives the stock behavior:
//!
//! ```toml
//! [reveal]
//! threshold = 0.8
//! duration_ms = 800
//! stagger_ms = 100
//! easing = "power3_out"
//!
//! [carousel]
//! loop_duration_secs = 30.0
//! item_width = 144.0
//! item_gap = 48.0
//! pause_on_hover = false
//! direction = "left"
//!
//! [lightbox]
//! close_on_backdrop = true
//! close_on_escape = true
//!
//! [motion]
//! force = "system"
//!
//! [navbar]
//! scrolled_after = 50.0
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use reveal_animation::{Easing, StaggerConfig};
use reveal_core::{MotionPreference, MotionPreferenceSource, RegionId};
use reveal_layout::{
    AnimationBinding, AnimationBindingBuilder, CarouselDirection, DismissPolicy, EntryThreshold,
    LoopCarousel, DEFAULT_DURATION_MS, DEFAULT_THRESHOLD,
};

/// Page configuration stored in reveal.toml
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RevealConfig {
    #[serde(default)]
    pub reveal: RevealSettings,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub lightbox: DismissPolicy,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub navbar: NavbarConfig,
}

/// Defaults applied to every entrance binding
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RevealSettings {
    /// Fraction of the viewport height a region's top must cross
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    /// Delay between consecutive children of a staggered group
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

/// Longest accepted entrance duration or stagger step
pub const MAX_TIMING_MS: u32 = 60_000;

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_stagger_ms() -> u32 {
    100
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            duration_ms: default_duration_ms(),
            stagger_ms: default_stagger_ms(),
            easing: Easing::default(),
        }
    }
}

impl RevealSettings {
    /// Binding builder preloaded with these settings
    pub fn binding(&self, target: RegionId) -> AnimationBindingBuilder {
        AnimationBinding::builder(target)
            .threshold(self.threshold)
            .duration_ms(self.duration_ms)
            .easing(self.easing)
    }

    pub fn stagger(&self) -> StaggerConfig {
        StaggerConfig::new(self.stagger_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CarouselConfig {
    /// Seconds for one full pass of the item sequence
    #[serde(default = "default_loop_duration")]
    pub loop_duration_secs: f32,
    #[serde(default = "default_item_width")]
    pub item_width: f32,
    #[serde(default = "default_item_gap")]
    pub item_gap: f32,
    #[serde(default)]
    pub pause_on_hover: bool,
    #[serde(default)]
    pub direction: CarouselDirection,
}

fn default_loop_duration() -> f32 {
    30.0
}

fn default_item_width() -> f32 {
    144.0
}

fn default_item_gap() -> f32 {
    48.0
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            loop_duration_secs: default_loop_duration(),
            item_width: default_item_width(),
            item_gap: default_item_gap(),
            pause_on_hover: false,
            direction: CarouselDirection::default(),
        }
    }
}

impl CarouselConfig {
    /// Horizontal space one item takes on the track
    pub fn item_extent(&self) -> f32 {
        self.item_width + self.item_gap
    }

    /// Carousel over `count` equally sized items
    pub fn build(&self, count: usize) -> reveal_core::Result<LoopCarousel> {
        Ok(
            LoopCarousel::with_loop_duration(vec![self.item_extent(); count], self.loop_duration_secs)?
                .direction(self.direction)
                .pause_on_hover(self.pause_on_hover),
        )
    }
}

/// Where the reduced-motion preference comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionOverride {
    /// Ask the platform
    #[default]
    System,
    Reduce,
    NoPreference,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub force: MotionOverride,
}

impl MotionConfig {
    /// Wrap the platform source with this override
    pub fn source<'a>(&self, system: &'a dyn MotionPreferenceSource) -> ConfiguredMotion<'a> {
        ConfiguredMotion {
            force: self.force,
            system,
        }
    }
}

/// Platform preference with the configured override applied
pub struct ConfiguredMotion<'a> {
    force: MotionOverride,
    system: &'a dyn MotionPreferenceSource,
}

impl MotionPreferenceSource for ConfiguredMotion<'_> {
    fn motion_preference(&self) -> MotionPreference {
        match self.force {
            MotionOverride::System => self.system.motion_preference(),
            MotionOverride::Reduce => MotionPreference::Reduce,
            MotionOverride::NoPreference => MotionPreference::NoPreference,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavbarConfig {
    /// Scroll offset past which the navbar switches to its scrolled style
    #[serde(default = "default_scrolled_after")]
    pub scrolled_after: f32,
}

fn default_scrolled_after() -> f32 {
    50.0
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_after: default_scrolled_after(),
        }
    }
}

impl RevealConfig {
    /// Load from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load `reveal.toml` from a directory, falling back to defaults
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join("reveal.toml");
        if !config_path.exists() {
            tracing::debug!("no reveal.toml in {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize reveal config")
    }

    /// Reject values the engine would refuse later
    pub fn validate(&self) -> Result<()> {
        EntryThreshold::new(self.reveal.threshold).context("[reveal] threshold")?;
        if self.reveal.duration_ms > MAX_TIMING_MS {
            anyhow::bail!(
                "[reveal] duration_ms must be at most {} (got {})",
                MAX_TIMING_MS,
                self.reveal.duration_ms
            );
        }
        if self.reveal.stagger_ms > MAX_TIMING_MS {
            anyhow::bail!(
                "[reveal] stagger_ms must be at most {} (got {})",
                MAX_TIMING_MS,
                self.reveal.stagger_ms
            );
        }
        self.carousel.build(1).context("[carousel]")?;
        if !self.navbar.scrolled_after.is_finite() {
            anyhow::bail!("[navbar] scrolled_after must be finite");
        }
        Ok(())
    }
}
