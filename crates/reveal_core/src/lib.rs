//! Reveal Core
//!
//! Foundational types shared by the reveal engine:
//!
//! - **Regions**: generational handles to laid-out page areas ([`RegionTree`])
//! - **Visual state**: the animatable properties of a region ([`VisualState`])
//! - **Scroll lock**: the page-level "scroll is locked" flag and per-modal claims
//! - **Motion preference**: the reduced-motion gate read once per view activation
//!
//! # Example
//!
//! ```rust
//! use reveal_core::{Rect, RegionTree, VisualState};
//!
//! let mut regions = RegionTree::new();
//! let section = regions.mount(Rect::new(0.0, 1200.0, 1280.0, 600.0));
//!
//! regions.set_visual(section, VisualState::HIDDEN.y(30.0));
//! assert_eq!(regions.visual(section).map(|v| v.opacity), Some(0.0));
//! ```

pub mod error;
pub mod geometry;
pub mod motion;
pub mod region;
pub mod scroll_lock;
pub mod visual;

pub use error::{Result, RevealError};
pub use geometry::{Point, Rect, Size};
pub use motion::{
    MotionPreference, MotionPreferenceGate, MotionPreferenceSource, SharedMotionPreference,
};
pub use region::{RegionId, RegionTree};
pub use scroll_lock::{LockChangeCallback, LockSubscription, ScrollLock, ScrollLockClaim};
pub use visual::{VisualState, VISUAL_EPSILON};
