use anyhow::Result;

use reveal_core::{Rect, RegionId, VisualState};
use reveal_layout::{TriggerHandle, ViewScope};

use super::{MountContext, Section};

const HEIGHT: f32 = 800.0;

/// Contact form block
pub struct ContactSection {
    scope: ViewScope,
    root: RegionId,
    form: RegionId,
    form_handle: TriggerHandle,
}

impl ContactSection {
    pub fn mount(ctx: &mut MountContext<'_>, top: f32) -> Result<Self> {
        let mut scope = ctx.scope("contact");
        let root = ctx.mount_root("contact", top, HEIGHT);
        let form = ctx.mount_child(
            root,
            Rect::new(ctx.width * 0.2, top + 200.0, ctx.width * 0.6, 480.0),
        )?;

        let settings = ctx.config.reveal.clone();
        let form_handle = ctx.bind(
            &mut scope,
            settings
                .binding(form)
                .trigger(root)
                .from(VisualState::HIDDEN.y(50.0))
                .threshold(0.7)
                .build(),
        )?;

        Ok(Self {
            scope,
            root,
            form,
            form_handle,
        })
    }

    pub fn form(&self) -> RegionId {
        self.form
    }

    pub fn form_handle(&self) -> TriggerHandle {
        self.form_handle
    }
}

impl Section for ContactSection {
    fn name(&self) -> &'static str {
        "contact"
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
}
