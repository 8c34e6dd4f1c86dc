use anyhow::Result;

use reveal_core::{Rect, RegionId, ScrollLock, VisualState};
use reveal_layout::{LightboxController, LightboxEvent, TriggerHandle, ViewScope};

use super::{MountContext, Section};
use crate::content::ContentItem;

const HEADER_HEIGHT: f32 = 240.0;
const COLUMNS: usize = 3;
const TILE_HEIGHT: f32 = 300.0;
const TILE_GAP: f32 = 24.0;

/// Tiled gallery with a lightbox viewer
pub struct GallerySection {
    scope: ViewScope,
    root: RegionId,
    title: RegionId,
    grid: RegionId,
    tiles: Vec<RegionId>,
    items: Vec<ContentItem>,
    lightbox: LightboxController,
    grid_handle: TriggerHandle,
    height: f32,
}

impl GallerySection {
    pub fn mount(
        ctx: &mut MountContext<'_>,
        top: f32,
        items: &[ContentItem],
        scroll_lock: &ScrollLock,
    ) -> Result<Self> {
        let rows = items.len().div_ceil(COLUMNS);
        let grid_height = rows as f32 * (TILE_HEIGHT + TILE_GAP);
        let height = HEADER_HEIGHT + grid_height + 120.0;

        let mut scope = ctx.scope("gallery");
        let root = ctx.mount_root("gallery", top, height);
        let title = ctx.mount_child(root, Rect::new(0.0, top + 80.0, ctx.width, 100.0))?;

        let grid_top = top + HEADER_HEIGHT;
        let grid = ctx.mount_child(root, Rect::new(0.0, grid_top, ctx.width, grid_height))?;
        let tile_width = (ctx.width - TILE_GAP * (COLUMNS as f32 - 1.0)) / COLUMNS as f32;
        let mut tiles = Vec::with_capacity(items.len());
        for i in 0..items.len() {
            let (row, col) = (i / COLUMNS, i % COLUMNS);
            let bounds = Rect::new(
                col as f32 * (tile_width + TILE_GAP),
                grid_top + row as f32 * (TILE_HEIGHT + TILE_GAP),
                tile_width,
                TILE_HEIGHT,
            );
            tiles.push(ctx.mount_child(grid, bounds)?);
        }

        // Only the grid animates; the heading is static
        let settings = ctx.config.reveal.clone();
        let grid_handle = ctx.bind(
            &mut scope,
            settings
                .binding(grid)
                .from(VisualState::HIDDEN.y(60.0).scale(0.9))
                .stagger_children(settings.stagger())
                .build(),
        )?;

        let lightbox =
            LightboxController::with_dismiss_policy(items.len(), scroll_lock, ctx.config.lightbox);

        Ok(Self {
            scope,
            root,
            title,
            grid,
            tiles,
            items: items.to_vec(),
            lightbox,
            grid_handle,
            height,
        })
    }

    pub fn title(&self) -> RegionId {
        self.title
    }

    pub fn grid(&self) -> RegionId {
        self.grid
    }

    pub fn tiles(&self) -> &[RegionId] {
        &self.tiles
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn grid_handle(&self) -> TriggerHandle {
        self.grid_handle
    }

    pub fn lightbox(&self) -> &LightboxController {
        &self.lightbox
    }

    /// Item shown in the lightbox, if open
    pub fn current_item(&self) -> Option<&ContentItem> {
        self.lightbox
            .current_index()
            .and_then(|i| self.items.get(i))
    }

    /// Route a lightbox event; returns true if the lightbox state changed
    pub fn handle(&mut self, event: LightboxEvent) -> bool {
        self.lightbox.handle(event)
    }
}

impl Section for GallerySection {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn root(&self) -> RegionId {
        self.root
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn scope_mut(&mut self) -> &mut ViewScope {
        &mut self.scope
    }

    fn teardown(&mut self) -> usize {
        self.lightbox.teardown();
        self.scope.teardown()
    }
}
