//! Page sections
//!
//! Each section mounts its regions into the page's [`RegionTree`] at a given
//! top offset, owns a [`ViewScope`] for its entrance bindings, and reacts to
//! firings and render ticks. Sections are stacked vertically by the page.

mod book;
mod brands;
mod contact;
mod gallery;
mod hero;
mod timeline;

pub use book::BookSection;
pub use brands::BrandSection;
pub use contact::ContactSection;
pub use gallery::GallerySection;
pub use hero::HeroSection;
pub use timeline::TimelineSection;

use anyhow::{Context, Result};

use reveal_core::{MotionPreferenceSource, Rect, RegionId, RegionTree};
use reveal_layout::{AnimationBinding, Firing, SharedTriggerRegistry, TriggerHandle, ViewScope};

use crate::config::RevealConfig;

/// Everything a section needs while mounting
pub struct MountContext<'a> {
    pub regions: &'a mut RegionTree,
    pub registry: &'a SharedTriggerRegistry,
    pub motion: &'a dyn MotionPreferenceSource,
    pub config: &'a RevealConfig,
    /// Page width
    pub width: f32,
    pub viewport_height: f32,
}

impl MountContext<'_> {
    /// Activate the view scope for a section
    pub fn scope(&self, name: &str) -> ViewScope {
        ViewScope::activate(name, self.registry, self.motion)
    }

    /// Mount a section root spanning the page width
    pub fn mount_root(&mut self, name: &str, top: f32, height: f32) -> RegionId {
        self.regions
            .mount_labeled(name, Rect::new(0.0, top, self.width, height))
    }

    pub fn mount_child(&mut self, parent: RegionId, bounds: Rect) -> Result<RegionId> {
        self.regions
            .mount_child(parent, bounds)
            .context("parent region is not mounted")
    }

    /// Build and register a binding through the section's scope
    pub fn bind(
        &mut self,
        scope: &mut ViewScope,
        binding: reveal_core::Result<AnimationBinding>,
    ) -> Result<TriggerHandle> {
        let binding = binding.with_context(|| format!("invalid binding in '{}'", scope.name()))?;
        Ok(scope.bind(binding, self.regions))
    }
}

/// A mounted page section
pub trait Section {
    fn name(&self) -> &'static str;

    /// Region spanning the whole section
    fn root(&self) -> RegionId;

    fn height(&self) -> f32;

    fn scope_mut(&mut self) -> &mut ViewScope;

    /// Called with the firings of each scroll or resize evaluation
    fn on_fired(&mut self, _firings: &[Firing]) {}

    /// Render clock tick
    fn tick(&mut self, _dt_ms: f32, _regions: &mut RegionTree) {}

    /// Release everything the section registered
    fn teardown(&mut self) -> usize {
        self.scope_mut().teardown()
    }
}
