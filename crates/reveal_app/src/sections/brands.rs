use anyhow::{Context, Result};

use reveal_core::{Rect, RegionId, RegionTree, VisualState};
use reveal_layout::{CarouselTile, LoopCarousel, ViewScope};

use super::{MountContext, Section};
use crate::content::Brand;

const HEIGHT: f32 = 400.0;
const TRACK_HEIGHT: f32 = 112.0;

/// Client logos on an endless marquee
pub struct BrandSection {
    scope: ViewScope,
    root: RegionId,
    title: RegionId,
    track: RegionId,
    brands: Vec<Brand>,
    carousel: LoopCarousel,
    width: f32,
    running: bool,
}

impl BrandSection {
    pub fn mount(ctx: &mut MountContext<'_>, top: f32, brands: &[Brand]) -> Result<Self> {
        let mut scope = ctx.scope("brands");
        let root = ctx.mount_root("brands", top, HEIGHT);
        let title = ctx.mount_child(root, Rect::new(0.0, top + 60.0, ctx.width, 80.0))?;

        let carousel = ctx
            .config
            .carousel
            .build(brands.len())
            .context("invalid carousel configuration")?;
        let track = ctx.mount_child(
            root,
            Rect::new(0.0, top + 200.0, carousel.track_width(), TRACK_HEIGHT),
        )?;

        let settings = ctx.config.reveal.clone();
        ctx.bind(
            &mut scope,
            settings
                .binding(title)
                .trigger(root)
                .from(VisualState::HIDDEN.y(30.0))
                .build(),
        )?;

        // The marquee is decorative motion; it stands still under reduced motion
        let running = scope.should_animate() && !carousel.is_empty();

        Ok(Self {
            scope,
            root,
            title,
            track,
            brands: brands.to_vec(),
            carousel,
            width: ctx.width,
            running,
        })
    }

    pub fn title(&self) -> RegionId {
        self.title
    }

    pub fn track(&self) -> RegionId {
        self.track
    }

    pub fn carousel(&self) -> &LoopCarousel {
        &self.carousel
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.carousel.set_hovered(hovered);
    }

    /// Brands on screen with their tiles, left to right
    pub fn visible_brands(&self) -> Vec<(&Brand, CarouselTile)> {
        let mut tiles = self.carousel.visible_tiles(self.width);
        tiles.sort_by(|a, b| a.x.total_cmp(&b.x));
        tiles
            .into_iter()
            .filter_map(|tile| self.brands.get(tile.item).map(|brand| (brand, tile)))
            .collect()
    }
}

impl Section for BrandSection {
    fn name(&self) -> &'static str {
        "brands"
    }

    fn root(&self) -> RegionId {
        self.root
    }

    fn height(&self) -> f32 {
        HEIGHT
    }

    fn scope_mut(&mut self) -> &mut ViewScope {
        &mut self.scope
    }

    fn tick(&mut self, dt_ms: f32, regions: &mut RegionTree) {
        if !self.running {
            return;
        }
        self.carousel.tick(dt_ms / 1000.0);
        regions.set_visual(self.track, VisualState::VISIBLE.x(self.carousel.translate_x()));
    }
}
