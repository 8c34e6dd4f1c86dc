use anyhow::Result;

use reveal_animation::Yoyo;
use reveal_core::{Rect, RegionId, RegionTree, VisualState};
use reveal_layout::{TriggerHandle, ViewScope};

use super::{MountContext, Section};
use crate::content::HeroContent;

const TITLE_HEIGHT: f32 = 120.0;
const WORD_WIDTH: f32 = 320.0;
const PARTICLE_COUNT: usize = 20;

// Entrance sequence, in ms from the hero firing
const ROOT_FADE_MS: u32 = 500;
const WORD_FLIP_MS: u32 = 1000;
const SUBTITLE_MS: u32 = 800;
const CTA_MS: u32 = 600;
const SUBTITLE_OVERLAP_MS: u32 = 500;
const CTA_OVERLAP_MS: u32 = 300;

/// Low-discrepancy spread in `[0, 1)` for particle `i` and parameter `k`
fn spread(i: usize, k: u32) -> f32 {
    const GOLDEN: f32 = 0.618_034;
    ((i as f32 + 1.0) * GOLDEN * (k as f32 + 1.0)).fract()
}

/// Drifting background particle
struct Particle {
    region: RegionId,
    drift: Yoyo<VisualState>,
}

impl Particle {
    fn new(region: RegionId, i: usize) -> Self {
        let rest = VisualState::VISIBLE.opacity(0.3);
        let away = VisualState::VISIBLE
            .x(spread(i, 1) * 100.0 - 50.0)
            .y(spread(i, 2) * 200.0 - 100.0)
            .opacity(0.3 + spread(i, 3) * 0.5);
        let leg_ms = 4000 + (spread(i, 4) * 4000.0) as u32;
        Self {
            region,
            drift: Yoyo::new(rest, away, leg_ms).delay(i as u32 * 500),
        }
    }
}

/// Full-height intro: the title words flip up one after another
pub struct HeroSection {
    scope: ViewScope,
    root: RegionId,
    title: RegionId,
    words: Vec<RegionId>,
    subtitle: RegionId,
    cta: RegionId,
    particles: Vec<Particle>,
    height: f32,
    handles: Vec<TriggerHandle>,
}

impl HeroSection {
    pub fn mount(ctx: &mut MountContext<'_>, top: f32, content: &HeroContent) -> Result<Self> {
        let height = ctx.viewport_height;
        let mut scope = ctx.scope("hero");
        let root = ctx.mount_root("hero", top, height);

        let title_y = top + height * 0.35;
        let title = ctx.mount_child(root, Rect::new(0.0, title_y, ctx.width, TITLE_HEIGHT))?;
        let words = content
            .title_words()
            .enumerate()
            .map(|(i, _)| {
                ctx.mount_child(
                    title,
                    Rect::new(i as f32 * WORD_WIDTH, title_y, WORD_WIDTH, TITLE_HEIGHT),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let subtitle = ctx.mount_child(root, Rect::new(0.0, title_y + 140.0, ctx.width, 60.0))?;
        let cta = ctx.mount_child(root, Rect::new(0.0, title_y + 240.0, ctx.width, 56.0))?;

        let mut particles = Vec::with_capacity(PARTICLE_COUNT);
        for i in 0..PARTICLE_COUNT {
            let size = 2.0 + spread(i, 5) * 6.0;
            let bounds = Rect::new(
                spread(i, 6) * ctx.width,
                top + spread(i, 7) * height,
                size,
                size,
            );
            let region = ctx.mount_child(root, bounds)?;
            let mut particle = Particle::new(region, i);
            ctx.regions.set_visual(region, particle.drift.value());
            if scope.should_animate() {
                particle.drift.start();
            }
            particles.push(particle);
        }

        // Root fades in, then the words flip up one by one; subtitle and
        // call to action overlap the tail of the previous step
        let settings = ctx.config.reveal.clone();
        let word_stagger = settings.stagger();
        let last_word = word_stagger.delay_for_index(words.len().saturating_sub(1), words.len());
        let words_end = (ROOT_FADE_MS + WORD_FLIP_MS).saturating_add(last_word);
        let subtitle_at = words_end.saturating_sub(SUBTITLE_OVERLAP_MS);
        let cta_at = subtitle_at
            .saturating_add(SUBTITLE_MS)
            .saturating_sub(CTA_OVERLAP_MS);
        let handles = vec![
            ctx.bind(
                &mut scope,
                settings
                    .binding(root)
                    .from(VisualState::HIDDEN)
                    .duration_ms(ROOT_FADE_MS)
                    .build(),
            )?,
            ctx.bind(
                &mut scope,
                settings
                    .binding(title)
                    .trigger(root)
                    .from(VisualState::HIDDEN.y(100.0).rotate_x(-90.0))
                    .duration_ms(WORD_FLIP_MS)
                    .delay_ms(ROOT_FADE_MS)
                    .stagger_children(word_stagger)
                    .build(),
            )?,
            ctx.bind(
                &mut scope,
                settings
                    .binding(subtitle)
                    .trigger(root)
                    .from(VisualState::HIDDEN.y(30.0))
                    .duration_ms(SUBTITLE_MS)
                    .delay_ms(subtitle_at)
                    .build(),
            )?,
            ctx.bind(
                &mut scope,
                settings
                    .binding(cta)
                    .trigger(root)
                    .from(VisualState::HIDDEN.scale(0.8))
                    .duration_ms(CTA_MS)
                    .delay_ms(cta_at)
                    .build(),
            )?,
        ];

        Ok(Self {
            scope,
            root,
            title,
            words,
            subtitle,
            cta,
            particles,
            height,
            handles,
        })
    }

    pub fn title(&self) -> RegionId {
        self.title
    }

    pub fn words(&self) -> &[RegionId] {
        &self.words
    }

    pub fn subtitle(&self) -> RegionId {
        self.subtitle
    }

    pub fn cta(&self) -> RegionId {
        self.cta
    }

    pub fn handles(&self) -> &[TriggerHandle] {
        &self.handles
    }

    pub fn particles(&self) -> Vec<RegionId> {
        self.particles.iter().map(|p| p.region).collect()
    }

    /// Whether the background particles are drifting
    pub fn is_drifting(&self) -> bool {
        self.particles.iter().any(|p| p.drift.is_playing())
    }
}

impl Section for HeroSection {
    fn name(&self) -> &'static str {
        "hero"
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

    fn tick(&mut self, dt_ms: f32, regions: &mut RegionTree) {
        for particle in &mut self.particles {
            if particle.drift.is_playing() {
                particle.drift.tick(dt_ms);
                regions.set_visual(particle.region, particle.drift.value());
            }
        }
    }

    fn teardown(&mut self) -> usize {
        for particle in &mut self.particles {
            particle.drift.stop();
        }
        self.scope.teardown()
    }
}
