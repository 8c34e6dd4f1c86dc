//! Reveal Animation System
//!
//! Timed transitions between visual states and the scheduler that drives
//! them on the render clock.
//!
//! # Features
//!
//! - **Easing**: monotonic ease curves mapping progress onto `[0, 1]`
//! - **Transitions**: delayed, eased interpolation of any [`Interpolate`] value
//! - **Scheduler**: one in-flight transition per region, written into the
//!   [`reveal_core::RegionTree`] each tick
//! - **Stagger**: per-child start delays for list reveals
//! - **Counters**: animated statistics counting up to their end value
//! - **Yoyo**: endless ping-pong motion for ambient decoration

pub mod counter;
pub mod easing;
pub mod scheduler;
pub mod stagger;
pub mod transition;
pub mod values;
pub mod yoyo;

pub use counter::CountUp;
pub use easing::Easing;
pub use scheduler::{TransitionId, TransitionScheduler};
pub use stagger::{StaggerConfig, StaggerDirection};
pub use transition::{Transition, VisualTransition};
pub use values::Interpolate;
pub use yoyo::Yoyo;
