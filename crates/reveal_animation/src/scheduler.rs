//! Transition scheduler
//!
//! Owns every in-flight region transition and advances them on each render
//! clock tick, writing interpolated visual state into the region tree.
//! A region has at most one in-flight transition: starting a new one
//! replaces the old one.
//!
//! The scheduler is driven from the UI event loop; it never spawns threads.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::transition::VisualTransition;
use reveal_core::{RegionId, RegionTree};

new_key_type! {
    /// Handle to an in-flight transition
    pub struct TransitionId;
}

#[derive(Debug)]
struct ActiveTransition {
    target: RegionId,
    transition: VisualTransition,
}

/// Drives region transitions frame by frame
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    active: SlotMap<TransitionId, ActiveTransition>,
    by_target: FxHashMap<RegionId, TransitionId>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transition on `target`, replacing any in-flight one
    ///
    /// The transition's start value is written immediately so the region
    /// never shows a stale state between now and the next tick.
    pub fn start(
        &mut self,
        target: RegionId,
        mut transition: VisualTransition,
        regions: &mut RegionTree,
    ) -> Option<TransitionId> {
        if !regions.is_mounted(target) {
            tracing::debug!("transition target {:?} is not mounted, skipping", target);
            return None;
        }

        self.cancel_target(target);

        if !transition.is_playing() {
            transition.start();
        }
        regions.set_visual(target, transition.value());

        let id = self.active.insert(ActiveTransition { target, transition });
        self.by_target.insert(target, id);
        Some(id)
    }

    /// Cancel the in-flight transition for a region, leaving its visual state
    /// where it is
    pub fn cancel_target(&mut self, target: RegionId) -> bool {
        match self.by_target.remove(&target) {
            Some(id) => self.active.remove(id).is_some(),
            None => false,
        }
    }

    pub fn cancel(&mut self, id: TransitionId) -> bool {
        match self.active.remove(id) {
            Some(active) => {
                self.by_target.remove(&active.target);
                true
            }
            None => false,
        }
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.active.clear();
        self.by_target.clear();
    }

    pub fn is_animating(&self, target: RegionId) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Number of in-flight transitions
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Advance all transitions by `dt_ms` and write their values
    ///
    /// Completed transitions and those whose region was unmounted are
    /// removed. Returns true if any transitions remain in flight.
    pub fn tick(&mut self, dt_ms: f32, regions: &mut RegionTree) -> bool {
        let mut done = Vec::new();

        for (id, active) in self.active.iter_mut() {
            active.transition.tick(dt_ms);
            if !regions.set_visual(active.target, active.transition.value()) {
                done.push(id);
                continue;
            }
            if !active.transition.is_playing() {
                done.push(id);
            }
        }

        for id in done {
            if let Some(active) = self.active.remove(id) {
                self.by_target.remove(&active.target);
            }
        }

        tracing::trace!("scheduler tick: {} transitions in flight", self.active.len());
        self.has_active()
    }
}
