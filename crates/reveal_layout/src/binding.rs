//! Animation bindings
//!
//! An `AnimationBinding` is the declarative unit of scroll-triggered
//! animation: which region to watch, which region(s) to animate, the state
//! they start and end in, and whether the transition fires once or toggles.
//! Bindings are validated on construction and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use reveal_animation::StaggerConfig;
//! use reveal_core::{Rect, RegionTree, VisualState};
//! use reveal_layout::{AnimationBinding, FiringPolicy};
//!
//! let mut regions = RegionTree::new();
//! let grid = regions.mount(Rect::new(0.0, 2000.0, 900.0, 600.0));
//!
//! let binding = AnimationBinding::builder(grid)
//!     .from(VisualState::HIDDEN.y(60.0).scale(0.9))
//!     .threshold(0.8)
//!     .stagger_children(StaggerConfig::new(100))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(binding.policy(), FiringPolicy::Once);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use reveal_animation::{Easing, StaggerConfig, Transition, VisualTransition};
use reveal_core::{RegionId, RegionTree, Result, RevealError, VisualState};

/// Default entry line: region top crosses 80% of the viewport height
pub const DEFAULT_THRESHOLD: f32 = 0.8;

/// Default transition duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 800;

/// Whether a binding fires once or reversibly
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringPolicy {
    /// Fire the forward transition once, then never again
    #[default]
    Once,
    /// Fire forward on entry and reverse on exit, as often as it happens
    Toggle,
}

/// Fraction of the viewport height at which a region counts as entered
///
/// Always in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryThreshold(f32);

impl EntryThreshold {
    pub fn new(fraction: f32) -> Result<Self> {
        if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
            Ok(Self(fraction))
        } else {
            Err(RevealError::InvalidThreshold(fraction))
        }
    }

    pub fn fraction(&self) -> f32 {
        self.0
    }
}

impl Default for EntryThreshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

/// Region plus the delay its transition starts with
pub type TargetList = SmallVec<[(RegionId, u32); 8]>;

/// Declarative scroll-triggered transition
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationBinding {
    target: RegionId,
    trigger: RegionId,
    initial: VisualState,
    final_state: VisualState,
    policy: FiringPolicy,
    threshold: EntryThreshold,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    stagger: Option<StaggerConfig>,
}

impl AnimationBinding {
    /// Start building a binding that animates `target`
    pub fn builder(target: RegionId) -> AnimationBindingBuilder {
        AnimationBindingBuilder::new(target)
    }

    /// Region whose visual state is animated (or whose children are)
    pub fn target(&self) -> RegionId {
        self.target
    }

    /// Region whose position decides when to fire
    pub fn trigger(&self) -> RegionId {
        self.trigger
    }

    pub fn initial_state(&self) -> VisualState {
        self.initial
    }

    pub fn final_state(&self) -> VisualState {
        self.final_state
    }

    pub fn policy(&self) -> FiringPolicy {
        self.policy
    }

    pub fn threshold(&self) -> EntryThreshold {
        self.threshold
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Offset of the forward transition from the moment of firing
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn stagger(&self) -> Option<StaggerConfig> {
        self.stagger
    }

    /// Resolve the animated regions and their start delays
    ///
    /// With a stagger config, every child of the target is animated
    /// independently; a target without children falls back to itself.
    /// `reversed` flips the stagger order so the last child to enter is the
    /// first to leave, and drops the base delay so an exit starts at once.
    pub fn resolve_targets(&self, regions: &RegionTree, reversed: bool) -> TargetList {
        let base = if reversed { 0 } else { self.delay_ms };
        let mut targets = TargetList::new();
        match self.stagger {
            Some(stagger) if !regions.children(self.target).is_empty() => {
                let children = regions.children(self.target);
                let total = children.len();
                for (index, child) in children.iter().enumerate() {
                    let rank = if reversed { total - 1 - index } else { index };
                    let delay = base.saturating_add(stagger.delay_for_index(rank, total));
                    targets.push((*child, delay));
                }
            }
            _ => targets.push((self.target, base)),
        }
        targets
    }

    /// Transition for one target, starting from wherever it currently is
    pub fn transition_to(&self, from: VisualState, to: VisualState, delay_ms: u32) -> VisualTransition {
        Transition::new(from, to, self.duration_ms)
            .delay(delay_ms)
            .easing(self.easing)
    }

    /// Write the initial state to every target
    pub fn apply_initial(&self, regions: &mut RegionTree) {
        for (region, _) in self.resolve_targets(regions, false) {
            regions.set_visual(region, self.initial);
        }
    }

    /// Write the final state to every target, with no transition
    pub fn apply_final(&self, regions: &mut RegionTree) {
        for (region, _) in self.resolve_targets(regions, false) {
            regions.set_visual(region, self.final_state);
        }
    }
}

/// Builder for [`AnimationBinding`]
#[derive(Clone, Debug)]
pub struct AnimationBindingBuilder {
    target: RegionId,
    trigger: Option<RegionId>,
    initial: VisualState,
    final_state: VisualState,
    policy: FiringPolicy,
    threshold: f32,
    duration_ms: u32,
    delay_ms: u32,
    easing: Easing,
    stagger: Option<StaggerConfig>,
}

impl AnimationBindingBuilder {
    fn new(target: RegionId) -> Self {
        Self {
            target,
            trigger: None,
            initial: VisualState::HIDDEN,
            final_state: VisualState::VISIBLE,
            policy: FiringPolicy::Once,
            threshold: DEFAULT_THRESHOLD,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0,
            easing: Easing::default(),
            stagger: None,
        }
    }

    /// Watch a different region than the one animated
    pub fn trigger(mut self, trigger: RegionId) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn from(mut self, initial: VisualState) -> Self {
        self.initial = initial;
        self
    }

    pub fn to(mut self, final_state: VisualState) -> Self {
        self.final_state = final_state;
        self
    }

    pub fn policy(mut self, policy: FiringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `policy(FiringPolicy::Toggle)`
    pub fn toggle(self) -> Self {
        self.policy(FiringPolicy::Toggle)
    }

    /// Fraction of viewport height the trigger's top must cross
    pub fn threshold(mut self, fraction: f32) -> Self {
        self.threshold = fraction;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Hold the forward transition back after firing, to sequence it
    /// after other bindings on the same trigger
    pub fn delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Animate each child of the target with an incremental delay
    pub fn stagger_children(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn build(self) -> Result<AnimationBinding> {
        let threshold = EntryThreshold::new(self.threshold)?;
        if !self.initial.differs_from(&self.final_state) {
            return Err(RevealError::IndistinctStates);
        }

        Ok(AnimationBinding {
            target: self.target,
            trigger: self.trigger.unwrap_or(self.target),
            initial: self.initial,
            final_state: self.final_state,
            policy: self.policy,
            threshold,
            duration_ms: self.duration_ms,
            delay_ms: self.delay_ms,
            easing: self.easing,
            stagger: self.stagger,
        })
    }
}
