use anyhow::Result;

use reveal_core::{Rect, RegionId, VisualState};
use reveal_layout::{TriggerHandle, ViewScope};

use super::{MountContext, Section};
use crate::content::TimelineEvent;

const HEADER_HEIGHT: f32 = 200.0;
const ITEM_HEIGHT: f32 = 200.0;

/// Career timeline: the line grows, items slide in from alternating sides
pub struct TimelineSection {
    scope: ViewScope,
    root: RegionId,
    line: RegionId,
    items: Vec<RegionId>,
    item_handles: Vec<TriggerHandle>,
    height: f32,
}

impl TimelineSection {
    pub fn mount(ctx: &mut MountContext<'_>, top: f32, events: &[TimelineEvent]) -> Result<Self> {
        let height = HEADER_HEIGHT + events.len() as f32 * ITEM_HEIGHT + 120.0;
        let mut scope = ctx.scope("timeline");
        let root = ctx.mount_root("timeline", top, height);

        let body_top = top + HEADER_HEIGHT;
        let center = ctx.width / 2.0;
        let line = ctx.mount_child(
            root,
            Rect::new(center, body_top, 1.0, events.len() as f32 * ITEM_HEIGHT),
        )?;

        let mut items = Vec::with_capacity(events.len());
        for i in 0..events.len() {
            let x = if i % 2 == 0 { 0.0 } else { center };
            items.push(ctx.mount_child(
                root,
                Rect::new(x, body_top + i as f32 * ITEM_HEIGHT, center, ITEM_HEIGHT - 48.0),
            )?);
        }

        let settings = ctx.config.reveal.clone();
        ctx.bind(
            &mut scope,
            settings
                .binding(line)
                .trigger(root)
                .from(VisualState::VISIBLE.scale_y(0.0))
                .to(VisualState::VISIBLE)
                .threshold(0.6)
                .duration_ms(1500)
                .build(),
        )?;

        let mut item_handles = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let offset = if i % 2 == 0 { -50.0 } else { 50.0 };
            item_handles.push(ctx.bind(
                &mut scope,
                settings
                    .binding(*item)
                    .from(VisualState::HIDDEN.x(offset))
                    .build(),
            )?);
        }

        Ok(Self {
            scope,
            root,
            line,
            items,
            item_handles,
            height,
        })
    }

    pub fn line(&self) -> RegionId {
        self.line
    }

    pub fn items(&self) -> &[RegionId] {
        &self.items
    }

    pub fn item_handles(&self) -> &[TriggerHandle] {
        &self.item_handles
    }
}

impl Section for TimelineSection {
    fn name(&self) -> &'static str {
        "timeline"
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
}
