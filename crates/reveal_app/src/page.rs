//! Page composition
//!
//! [`SitePage`] stacks the sections top to bottom over one region tree, one
//! trigger registry and one scroll lock, and turns host input (scroll,
//! resize, render ticks, clicks, keys) into engine calls.

use anyhow::Result;

use reveal_core::{MotionPreferenceSource, RegionTree, ScrollLock};
use reveal_layout::{
    Firing, LightboxEvent, ScrollFlag, SharedTriggerRegistry, Viewport, ViewportTriggerRegistry,
};

use crate::config::RevealConfig;
use crate::content::SiteContent;
use crate::sections::{
    BookSection, BrandSection, ContactSection, GallerySection, HeroSection, MountContext, Section,
    TimelineSection,
};

/// Result of a scroll notification
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollUpdate {
    /// Bindings fired by this scroll, in registration order
    pub fired: Vec<Firing>,
    /// New navbar state, if it changed
    pub navbar_scrolled: Option<bool>,
}

/// The mounted site
pub struct SitePage {
    regions: RegionTree,
    registry: SharedTriggerRegistry,
    scroll_lock: ScrollLock,
    viewport: Viewport,
    navbar: ScrollFlag,
    hero: HeroSection,
    book: BookSection,
    brands: BrandSection,
    gallery: GallerySection,
    timeline: TimelineSection,
    contact: ContactSection,
    height: f32,
    mounted: bool,
}

impl SitePage {
    /// Mount every section and fire whatever is already in view
    pub fn mount(
        config: &RevealConfig,
        content: &SiteContent,
        viewport: Viewport,
        platform: &dyn MotionPreferenceSource,
    ) -> Result<Self> {
        let mut regions = RegionTree::new();
        let registry = ViewportTriggerRegistry::new_shared();
        let scroll_lock = ScrollLock::new();
        let motion = config.motion.source(platform);

        let mut ctx = MountContext {
            regions: &mut regions,
            registry: &registry,
            motion: &motion,
            config,
            width: viewport.width,
            viewport_height: viewport.height,
        };

        let mut top = 0.0;
        let hero = HeroSection::mount(&mut ctx, top, &content.hero)?;
        top += hero.height();
        let book = BookSection::mount(&mut ctx, top, &content.book)?;
        top += book.height();
        let brands = BrandSection::mount(&mut ctx, top, &content.brands)?;
        top += brands.height();
        let gallery = GallerySection::mount(&mut ctx, top, &content.gallery, &scroll_lock)?;
        top += gallery.height();
        let timeline = TimelineSection::mount(&mut ctx, top, &content.timeline)?;
        top += timeline.height();
        let contact = ContactSection::mount(&mut ctx, top)?;
        top += contact.height();

        tracing::info!(
            "site mounted: {} regions, page height {}",
            regions.len(),
            top
        );

        let mut page = Self {
            regions,
            registry,
            scroll_lock,
            viewport,
            navbar: ScrollFlag::new(config.navbar.scrolled_after),
            hero,
            book,
            brands,
            gallery,
            timeline,
            contact,
            height: top,
            mounted: true,
        };
        page.navbar.update(viewport.scroll_y);
        let fired = page.evaluate(false);
        page.dispatch(&fired);
        Ok(page)
    }

    fn sections_mut(&mut self) -> [&mut dyn Section; 6] {
        [
            &mut self.hero,
            &mut self.book,
            &mut self.brands,
            &mut self.gallery,
            &mut self.timeline,
            &mut self.contact,
        ]
    }

    fn evaluate(&mut self, scrolled: bool) -> Vec<Firing> {
        if !self.mounted {
            return Vec::new();
        }
        match self.registry.lock() {
            Ok(mut registry) if scrolled => registry.on_scroll(&self.viewport, &mut self.regions),
            Ok(mut registry) => registry.on_resize(&self.viewport, &mut self.regions),
            Err(_) => {
                tracing::warn!("trigger registry poisoned, skipping evaluation");
                Vec::new()
            }
        }
    }

    fn dispatch(&mut self, fired: &[Firing]) {
        if fired.is_empty() {
            return;
        }
        for section in self.sections_mut() {
            section.on_fired(fired);
        }
    }

    /// Page scrolled to `scroll_y`
    pub fn scroll_to(&mut self, scroll_y: f32) -> ScrollUpdate {
        if !self.mounted {
            return ScrollUpdate::default();
        }
        self.viewport = self.viewport.scrolled_to(scroll_y);
        let navbar_scrolled = self.navbar.update(scroll_y);
        let fired = self.evaluate(true);
        self.dispatch(&fired);
        ScrollUpdate {
            fired,
            navbar_scrolled,
        }
    }

    /// Viewport resized; sections keep their layout
    pub fn resize(&mut self, width: f32, height: f32) -> Vec<Firing> {
        self.viewport = Viewport::new(self.viewport.scroll_y, width, height);
        let fired = self.evaluate(false);
        self.dispatch(&fired);
        fired
    }

    /// Render clock tick; returns true while anything is still moving
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.mounted {
            return false;
        }
        let transitions = match self.registry.lock() {
            Ok(mut registry) => registry.tick(dt_ms, &mut self.regions),
            Err(_) => false,
        };

        let sections: [&mut dyn Section; 6] = [
            &mut self.hero,
            &mut self.book,
            &mut self.brands,
            &mut self.gallery,
            &mut self.timeline,
            &mut self.contact,
        ];
        for section in sections {
            section.tick(dt_ms, &mut self.regions);
        }

        transitions
            || self.book.is_counting()
            || self.book.is_floating()
            || self.hero.is_drifting()
            || self.brands.is_running()
    }

    /// Gallery tile clicked
    pub fn click_gallery_item(&mut self, index: usize) -> bool {
        self.lightbox_event(LightboxEvent::Activate(index))
    }

    pub fn lightbox_event(&mut self, event: LightboxEvent) -> bool {
        if !self.mounted {
            return false;
        }
        self.gallery.handle(event)
    }

    pub fn press_escape(&mut self) -> bool {
        self.lightbox_event(LightboxEvent::Escape)
    }

    /// Whether the host should block page scrolling
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar.is_set()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Total height of the stacked sections
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn regions(&self) -> &RegionTree {
        &self.regions
    }

    pub fn registry(&self) -> &SharedTriggerRegistry {
        &self.registry
    }

    /// Registry entries still observing scroll
    pub fn live_observations(&self) -> usize {
        self.registry
            .lock()
            .map(|r| r.live_observations())
            .unwrap_or(0)
    }

    pub fn hero(&self) -> &HeroSection {
        &self.hero
    }

    pub fn book(&self) -> &BookSection {
        &self.book
    }

    pub fn brands(&self) -> &BrandSection {
        &self.brands
    }

    pub fn brands_mut(&mut self) -> &mut BrandSection {
        &mut self.brands
    }

    pub fn gallery(&self) -> &GallerySection {
        &self.gallery
    }

    pub fn timeline(&self) -> &TimelineSection {
        &self.timeline
    }

    pub fn contact(&self) -> &ContactSection {
        &self.contact
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Tear down every section and drop its regions
    ///
    /// Releases all trigger registrations and the lightbox's scroll lock.
    /// Later input is ignored. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let mut released = 0;
        let mut roots = Vec::with_capacity(6);
        for section in self.sections_mut() {
            released += section.teardown();
            roots.push(section.root());
        }
        for root in roots {
            self.regions.unmount(root);
        }
        self.mounted = false;
        tracing::info!("site unmounted, released {} triggers", released);
    }
}

impl Drop for SitePage {
    fn drop(&mut self) {
        self.unmount();
    }
}
