//! Reveal App
//!
//! The landing page built on the reveal engine: content model, TOML
//! configuration, the six page sections and their composition into a
//! [`SitePage`] driven by host scroll, clock and pointer input.
//!
//! # Example
//!
//! ```rust
//! use reveal_app::{RevealConfig, SiteContent, SitePage};
//! use reveal_core::MotionPreference;
//! use reveal_layout::Viewport;
//!
//! let content = SiteContent::bundled().unwrap();
//! let viewport = Viewport::new(0.0, 1280.0, 800.0);
//! let mut page = SitePage::mount(
//!     &RevealConfig::default(),
//!     &content,
//!     viewport,
//!     &MotionPreference::NoPreference,
//! )
//! .unwrap();
//!
//! page.click_gallery_item(2);
//! assert!(page.is_scroll_locked());
//! page.press_escape();
//! assert!(!page.is_scroll_locked());
//! ```

pub mod config;
pub mod content;
pub mod page;
pub mod sections;

pub use config::{
    CarouselConfig, ConfiguredMotion, MotionConfig, MotionOverride, NavbarConfig, RevealConfig,
    RevealSettings,
};
pub use content::{BookContent, Brand, ContentItem, HeroContent, SiteContent, Stat, TimelineEvent};
pub use page::{ScrollUpdate, SitePage};
