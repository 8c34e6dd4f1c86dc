use anyhow::Result;

use reveal_animation::{CountUp, StaggerConfig, Yoyo};
use reveal_core::{Rect, RegionId, RegionTree, VisualState};
use reveal_layout::{FireDirection, Firing, TriggerHandle, ViewScope};

use super::{MountContext, Section};
use crate::content::{BookContent, Stat};

const HEIGHT: f32 = 900.0;
const COUNT_DURATION_MS: u32 = 2000;
const COVER_MS: u32 = 1000;
/// Copy starts this long before the cover finishes
const COPY_OVERLAP_MS: u32 = 500;
const FLOAT_LEG_MS: u32 = 3000;
const FLOAT_RISE: f32 = -15.0;

/// Book feature: cover and copy slide in reversibly, stats count up once
pub struct BookSection {
    scope: ViewScope,
    root: RegionId,
    cover: RegionId,
    /// Artwork inside the cover; floats while the cover slides
    cover_art: RegionId,
    float: Yoyo<VisualState>,
    copy: RegionId,
    stats_row: RegionId,
    stats: Vec<(Stat, CountUp)>,
    cover_handle: TriggerHandle,
    copy_handle: TriggerHandle,
    stats_handle: TriggerHandle,
}

impl BookSection {
    pub fn mount(ctx: &mut MountContext<'_>, top: f32, content: &BookContent) -> Result<Self> {
        let mut scope = ctx.scope("book");
        let root = ctx.mount_root("book", top, HEIGHT);
        let half = ctx.width / 2.0;

        let cover = ctx.mount_child(root, Rect::new(0.0, top + 150.0, half, 600.0))?;
        let cover_art = ctx.mount_child(cover, Rect::new(0.0, top + 150.0, half, 600.0))?;
        let mut float = Yoyo::new(
            VisualState::VISIBLE,
            VisualState::VISIBLE.y(FLOAT_RISE),
            FLOAT_LEG_MS,
        );
        ctx.regions.set_visual(cover_art, float.value());
        if scope.should_animate() {
            float.start();
        }
        let copy = ctx.mount_child(root, Rect::new(half, top + 150.0, half, 420.0))?;
        // Title first, then one line per paragraph
        for i in 0..=content.paragraphs.len() {
            ctx.mount_child(copy, Rect::new(half, top + 150.0 + i as f32 * 80.0, half, 72.0))?;
        }

        let stats_row = ctx.mount_child(root, Rect::new(half, top + 620.0, half, 120.0))?;
        let stat_width = half / content.stats.len().max(1) as f32;
        for i in 0..content.stats.len() {
            ctx.mount_child(
                stats_row,
                Rect::new(half + i as f32 * stat_width, top + 620.0, stat_width, 120.0),
            )?;
        }

        let settings = ctx.config.reveal.clone();
        let cover_handle = ctx.bind(
            &mut scope,
            settings
                .binding(cover)
                .trigger(root)
                .from(VisualState::HIDDEN.x(-100.0).rotate_y(-30.0))
                .duration_ms(COVER_MS)
                .toggle()
                .build(),
        )?;
        let copy_handle = ctx.bind(
            &mut scope,
            settings
                .binding(copy)
                .trigger(root)
                .from(VisualState::HIDDEN.x(50.0))
                .delay_ms(COVER_MS - COPY_OVERLAP_MS)
                .stagger_children(StaggerConfig::new(150))
                .toggle()
                .build(),
        )?;
        let stats_handle = ctx.bind(
            &mut scope,
            settings
                .binding(stats_row)
                .from(VisualState::HIDDEN.y(20.0))
                .threshold(0.9)
                .build(),
        )?;

        let mut stats: Vec<(Stat, CountUp)> = content
            .stats
            .iter()
            .map(|stat| {
                let counter = CountUp::new(stat.end, COUNT_DURATION_MS).decimals(stat.decimals);
                (stat.clone(), counter)
            })
            .collect();

        // Nothing will ever fire for an inert handle: show the totals now
        if stats_handle.is_inert() {
            for (_, counter) in &mut stats {
                counter.complete();
            }
        }

        Ok(Self {
            scope,
            root,
            cover,
            cover_art,
            float,
            copy,
            stats_row,
            stats,
            cover_handle,
            copy_handle,
            stats_handle,
        })
    }

    pub fn cover(&self) -> RegionId {
        self.cover
    }

    pub fn cover_art(&self) -> RegionId {
        self.cover_art
    }

    pub fn is_floating(&self) -> bool {
        self.float.is_playing()
    }

    pub fn copy(&self) -> RegionId {
        self.copy
    }

    pub fn stats_row(&self) -> RegionId {
        self.stats_row
    }

    pub fn cover_handle(&self) -> TriggerHandle {
        self.cover_handle
    }

    pub fn copy_handle(&self) -> TriggerHandle {
        self.copy_handle
    }

    /// Formatted value of each stat, suffix included
    pub fn stat_labels(&self) -> Vec<String> {
        self.stats
            .iter()
            .map(|(stat, counter)| format!("{}{}", counter.display(), stat.suffix))
            .collect()
    }

    pub fn is_counting(&self) -> bool {
        self.stats.iter().any(|(_, counter)| counter.is_counting())
    }
}

impl Section for BookSection {
    fn name(&self) -> &'static str {
        "book"
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

    fn on_fired(&mut self, firings: &[Firing]) {
        let revealed = firings
            .iter()
            .any(|f| f.handle == self.stats_handle && f.direction == FireDirection::Forward);
        if revealed {
            tracing::debug!("book stats revealed, counting up");
            for (_, counter) in &mut self.stats {
                counter.start();
            }
        }
    }

    fn tick(&mut self, dt_ms: f32, regions: &mut RegionTree) {
        for (_, counter) in &mut self.stats {
            counter.tick(dt_ms);
        }
        if self.float.is_playing() {
            self.float.tick(dt_ms);
            regions.set_visual(self.cover_art, self.float.value());
        }
    }

    fn teardown(&mut self) -> usize {
        self.float.stop();
        self.scope.teardown()
    }
}
