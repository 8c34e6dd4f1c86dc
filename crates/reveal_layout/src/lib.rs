//! Reveal Layout
//!
//! Scroll-driven and interaction-driven state machines built on
//! `reveal_core` regions and `reveal_animation` transitions:
//!
//! - **Animation bindings** ([`AnimationBinding`]): declarative entrance transitions
//! - **Trigger registry** ([`ViewportTriggerRegistry`]): fires bindings as the viewport scrolls
//! - **View scopes** ([`ViewScope`]): per-view registration with guaranteed release
//! - **Loop carousel** ([`LoopCarousel`]): seamless constant-velocity marquee
//! - **Lightbox** ([`LightboxController`]): modal gallery viewer holding the page scroll lock
//!
//! # Example
//!
//! ```rust
//! use reveal_core::{MotionPreference, Rect, RegionTree, VisualState};
//! use reveal_layout::{AnimationBinding, ViewScope, Viewport, ViewportTriggerRegistry};
//!
//! let registry = ViewportTriggerRegistry::new_shared();
//! let mut regions = RegionTree::new();
//! let section = regions.mount(Rect::new(0.0, 1500.0, 1280.0, 600.0));
//!
//! let mut view = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
//! view.bind(AnimationBinding::builder(section).build().unwrap(), &mut regions);
//! assert_eq!(regions.visual(section), Some(VisualState::HIDDEN));
//!
//! let viewport = Viewport::new(1000.0, 1280.0, 800.0);
//! let fired = registry.lock().unwrap().on_scroll(&viewport, &mut regions);
//! assert_eq!(fired.len(), 1);
//! ```

pub mod binding;
pub mod carousel;
pub mod lifecycle;
pub mod lightbox;
pub mod scroll_flag;
pub mod trigger;
pub mod viewport;

pub use binding::{
    AnimationBinding, AnimationBindingBuilder, EntryThreshold, FiringPolicy, TargetList,
    DEFAULT_DURATION_MS, DEFAULT_THRESHOLD,
};
pub use carousel::{CarouselDirection, CarouselTile, LoopCarousel};
pub use lifecycle::ViewScope;
pub use lightbox::{DismissPolicy, LightboxController, LightboxEvent, LightboxState};
pub use scroll_flag::ScrollFlag;
pub use trigger::{
    EntryPhase, FireDirection, Firing, SharedTriggerRegistry, TriggerHandle,
    ViewportTriggerRegistry,
};
pub use viewport::Viewport;
