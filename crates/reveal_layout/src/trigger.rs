//! Viewport trigger registry
//!
//! Maps registered [`AnimationBinding`]s to live observations of the page
//! scroll position and fires their transitions when the trigger region's
//! leading edge reaches the binding's threshold line.
//!
//! # Firing
//!
//! On every scroll or resize notification, live entries are evaluated in
//! registration order:
//!
//! - `Once`: the first evaluation that finds the region entered fires the
//!   forward transition and moves the entry to its terminal `Fired` phase.
//!   A fired entry is never evaluated again.
//! - `Toggle`: entering fires forward and moves to `Entered`; dropping back
//!   below the threshold line (scrolling up) fires the reverse transition and
//!   re-arms the entry.
//!
//! Firing is decided by the entered condition rather than by scroll deltas,
//! so a page restored mid-scroll, or a fast jump past a region, fires just
//! like a gradual scroll does.
//!
//! # Release
//!
//! [`ViewportTriggerRegistry::release`] removes the entry and cancels any
//! transition it started, synchronously. A released handle can never fire,
//! and releasing it again is a no-op.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use smallvec::SmallVec;

use reveal_animation::{TransitionId, TransitionScheduler};
use reveal_core::{RegionTree, VisualState};

use crate::binding::{AnimationBinding, FiringPolicy};
use crate::viewport::Viewport;

/// Handle to a registry entry
///
/// Inert handles are returned when registration is refused; they refer to
/// nothing and every operation on them is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerHandle(Option<u64>);

impl TriggerHandle {
    /// Handle that refers to nothing
    pub const INERT: TriggerHandle = TriggerHandle(None);

    pub fn is_inert(&self) -> bool {
        self.0.is_none()
    }
}

/// Observation phase of an entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryPhase {
    /// Observing, waiting for the region to enter
    Armed,
    /// Toggle entry whose region is past the threshold
    Entered,
    /// Once entry that has fired; terminal
    Fired,
}

impl EntryPhase {
    pub fn is_observing(&self) -> bool {
        !matches!(self, EntryPhase::Fired)
    }
}

/// Direction of a fired transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FireDirection {
    /// Initial state to final state
    Forward,
    /// Final state back to initial state
    Reverse,
}

/// Record of one firing, returned from evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Firing {
    pub handle: TriggerHandle,
    pub direction: FireDirection,
}

#[derive(Debug)]
struct RegistryEntry {
    binding: AnimationBinding,
    phase: EntryPhase,
    fire_count: u32,
    /// Transitions this entry started; other entries may have replaced them
    animated: SmallVec<[TransitionId; 8]>,
}

/// Registry shared between the page and its views
pub type SharedTriggerRegistry = Arc<Mutex<ViewportTriggerRegistry>>;

/// Scroll-position observer for animation bindings
#[derive(Debug, Default)]
pub struct ViewportTriggerRegistry {
    entries: IndexMap<u64, RegistryEntry>,
    next_id: u64,
    scheduler: TransitionScheduler,
}

impl ViewportTriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry wrapped for sharing with views
    pub fn new_shared() -> SharedTriggerRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Begin observing a binding
    ///
    /// The targets are put into the binding's initial state right away.
    /// Returns an inert handle if the target or trigger region is not
    /// mounted. Call [`Self::on_scroll`] or [`Self::on_resize`] afterwards to
    /// fire bindings whose regions are already in view.
    pub fn register(&mut self, binding: AnimationBinding, regions: &mut RegionTree) -> TriggerHandle {
        if !regions.is_mounted(binding.target()) || !regions.is_mounted(binding.trigger()) {
            tracing::debug!(
                "register: region {:?} is not mounted, returning inert handle",
                binding.target()
            );
            return TriggerHandle::INERT;
        }

        binding.apply_initial(regions);

        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(
            "register trigger {} ({:?}, threshold {})",
            id,
            binding.policy(),
            binding.threshold().fraction()
        );
        self.entries.insert(
            id,
            RegistryEntry {
                binding,
                phase: EntryPhase::Armed,
                fire_count: 0,
                animated: SmallVec::new(),
            },
        );
        TriggerHandle(Some(id))
    }

    /// Stop observing and cancel in-flight transitions
    ///
    /// Returns false for inert or already released handles.
    pub fn release(&mut self, handle: TriggerHandle) -> bool {
        let Some(id) = handle.0 else {
            return false;
        };
        let Some(entry) = self.entries.shift_remove(&id) else {
            return false;
        };

        for id in entry.animated {
            self.scheduler.cancel(id);
        }
        tracing::debug!("released trigger {}", id);
        true
    }

    /// Release and put the targets into their final state
    ///
    /// Used when a view tears down but its regions stay on screen, so they
    /// are never left half-animated or invisible.
    pub fn revert(&mut self, handle: TriggerHandle, regions: &mut RegionTree) -> bool {
        let binding = match handle.0.and_then(|id| self.entries.get(&id)) {
            Some(entry) => entry.binding.clone(),
            None => return false,
        };
        self.release(handle);
        binding.apply_final(regions);
        true
    }

    /// Scroll notification
    pub fn on_scroll(&mut self, viewport: &Viewport, regions: &mut RegionTree) -> Vec<Firing> {
        tracing::trace!("scroll to {}", viewport.scroll_y);
        self.evaluate(viewport, regions)
    }

    /// Resize notification (also used to pick up regions already in view)
    pub fn on_resize(&mut self, viewport: &Viewport, regions: &mut RegionTree) -> Vec<Firing> {
        tracing::trace!("resize to {}x{}", viewport.width, viewport.height);
        self.evaluate(viewport, regions)
    }

    fn evaluate(&mut self, viewport: &Viewport, regions: &mut RegionTree) -> Vec<Firing> {
        let mut firings = Vec::new();
        let Self {
            entries, scheduler, ..
        } = self;

        for (id, entry) in entries.iter_mut() {
            if !entry.phase.is_observing() {
                continue;
            }
            let Some(bounds) = regions.bounds(entry.binding.trigger()) else {
                continue;
            };

            let entered = viewport.has_entered(bounds, entry.binding.threshold());
            let direction = match (entry.binding.policy(), entry.phase, entered) {
                (FiringPolicy::Once, EntryPhase::Armed, true) => {
                    entry.phase = EntryPhase::Fired;
                    FireDirection::Forward
                }
                (FiringPolicy::Toggle, EntryPhase::Armed, true) => {
                    entry.phase = EntryPhase::Entered;
                    FireDirection::Forward
                }
                (FiringPolicy::Toggle, EntryPhase::Entered, false) => {
                    entry.phase = EntryPhase::Armed;
                    FireDirection::Reverse
                }
                _ => continue,
            };

            entry.fire_count += 1;
            fire(entry, direction, scheduler, regions);
            tracing::debug!("trigger {} fired {:?}", id, direction);
            firings.push(Firing {
                handle: TriggerHandle(Some(*id)),
                direction,
            });
        }

        firings
    }

    /// Advance in-flight transitions by `dt_ms`
    ///
    /// Returns true while any transition is still running.
    pub fn tick(&mut self, dt_ms: f32, regions: &mut RegionTree) -> bool {
        self.scheduler.tick(dt_ms, regions)
    }

    /// Number of times the entry has fired (forward and reverse)
    pub fn fire_count(&self, handle: TriggerHandle) -> Option<u32> {
        handle
            .0
            .and_then(|id| self.entries.get(&id))
            .map(|e| e.fire_count)
    }

    pub fn phase(&self, handle: TriggerHandle) -> Option<EntryPhase> {
        handle.0.and_then(|id| self.entries.get(&id)).map(|e| e.phase)
    }

    /// Whether the handle refers to an unreleased entry
    pub fn contains(&self, handle: TriggerHandle) -> bool {
        handle.0.is_some_and(|id| self.entries.contains_key(&id))
    }

    /// Number of unreleased entries (including fired `Once` entries)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries still observing scroll
    pub fn live_observations(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.phase.is_observing())
            .count()
    }

    /// Number of transitions currently in flight
    pub fn in_flight(&self) -> usize {
        self.scheduler.active_count()
    }
}

fn fire(
    entry: &mut RegistryEntry,
    direction: FireDirection,
    scheduler: &mut TransitionScheduler,
    regions: &mut RegionTree,
) {
    let binding = &entry.binding;
    let (goal, reversed): (VisualState, bool) = match direction {
        FireDirection::Forward => (binding.final_state(), false),
        FireDirection::Reverse => (binding.initial_state(), true),
    };

    entry.animated.clear();
    for (region, delay_ms) in binding.resolve_targets(regions, reversed) {
        let from = regions.visual(region).unwrap_or(binding.initial_state());
        let transition = binding.transition_to(from, goal, delay_ms);
        if let Some(id) = scheduler.start(region, transition, regions) {
            entry.animated.push(id);
        }
    }
}
