//! Scroll Demo
//!
//! Mounts the bundled site headlessly and scrolls it top to bottom at a
//! steady pace, logging what fires, then opens the gallery lightbox.
//!
//! Run with: cargo run -p reveal_app --example scroll_demo
//! Set REVEAL_REDUCE_MOTION=1 to simulate the reduced-motion preference.

use std::path::Path;

use anyhow::Result;
use reveal_app::{RevealConfig, SiteContent, SitePage};
use reveal_core::{MotionPreference, SharedMotionPreference};
use reveal_layout::{LightboxEvent, Viewport};

const FRAME_MS: f32 = 16.0;
const SCROLL_PER_FRAME: f32 = 24.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = RevealConfig::load_from_dir(Path::new("."))?;
    let content = SiteContent::bundled()?;

    let platform = SharedMotionPreference::default();
    if std::env::var_os("REVEAL_REDUCE_MOTION").is_some() {
        platform.set(MotionPreference::Reduce);
    }

    let viewport = Viewport::new(0.0, 1280.0, 800.0);
    let mut page = SitePage::mount(&config, &content, viewport, &platform)?;
    let bottom = (page.height() - viewport.height).max(0.0);

    let mut scroll_y = 0.0;
    let mut frame = 0u32;
    while scroll_y < bottom {
        scroll_y = (scroll_y + SCROLL_PER_FRAME).min(bottom);
        let update = page.scroll_to(scroll_y);
        for firing in &update.fired {
            tracing::info!(
                "frame {}: y={} fired {:?}",
                frame,
                scroll_y,
                firing.direction
            );
        }
        if let Some(scrolled) = update.navbar_scrolled {
            tracing::info!("navbar scrolled: {}", scrolled);
        }
        page.tick(FRAME_MS);
        frame += 1;
    }

    // Let the last transitions settle
    for _ in 0..200 {
        page.tick(FRAME_MS);
        let settled = page
            .registry()
            .lock()
            .map(|registry| registry.in_flight() == 0)
            .unwrap_or(true);
        if settled && !page.book().is_counting() {
            break;
        }
    }

    tracing::info!("stats: {}", page.book().stat_labels().join(" / "));
    for (brand, tile) in page.brands().visible_brands() {
        tracing::info!("brand '{}' at x={:.0}", brand.name, tile.x);
    }

    page.click_gallery_item(0);
    for event in [LightboxEvent::Next, LightboxEvent::Next, LightboxEvent::Previous] {
        page.lightbox_event(event);
        if let Some(item) = page.gallery().current_item() {
            tracing::info!(
                "lightbox: {} ({}), scroll locked: {}",
                item.title,
                item.category,
                page.is_scroll_locked()
            );
        }
    }
    page.press_escape();

    page.unmount();
    tracing::info!(
        "unmounted: {} live observations, scroll locked: {}",
        page.live_observations(),
        page.is_scroll_locked()
    );
    Ok(())
}
