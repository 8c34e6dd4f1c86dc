//! View lifecycle scoping
//!
//! A [`ViewScope`] is created when a view mounts. It reads the motion
//! preference once, registers the view's bindings through the shared
//! [`ViewportTriggerRegistry`], and remembers every handle it got back.
//! Tearing the scope down (explicitly or by dropping it) releases all of
//! them in a single pass, so nothing the view registered can fire after it
//! is gone.
//!
//! The scope only holds a weak reference to the registry; a registry that
//! has already been dropped has nothing left to release.

use std::sync::{Arc, Mutex, Weak};

use reveal_core::{MotionPreferenceGate, MotionPreferenceSource, RegionTree};

use crate::binding::AnimationBinding;
use crate::trigger::{SharedTriggerRegistry, TriggerHandle, ViewportTriggerRegistry};

/// Registrations owned by one mounted view
#[derive(Debug)]
pub struct ViewScope {
    name: String,
    gate: MotionPreferenceGate,
    registry: Weak<Mutex<ViewportTriggerRegistry>>,
    handles: Vec<TriggerHandle>,
    active: bool,
}

impl ViewScope {
    /// Activate a view, reading the motion preference
    pub fn activate(
        name: impl Into<String>,
        registry: &SharedTriggerRegistry,
        motion: &dyn MotionPreferenceSource,
    ) -> Self {
        let name = name.into();
        let gate = MotionPreferenceGate::read(motion);
        tracing::debug!("view '{}' activated (animate: {})", name, gate.should_animate());
        Self {
            name,
            gate,
            registry: Arc::downgrade(registry),
            handles: Vec::new(),
            active: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn should_animate(&self) -> bool {
        self.gate.should_animate()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Register a binding for this view
    ///
    /// Under reduced motion, or after teardown, nothing is registered: the
    /// targets are put straight into their final state and an inert handle
    /// is returned.
    pub fn bind(&mut self, binding: AnimationBinding, regions: &mut RegionTree) -> TriggerHandle {
        if !self.active || !self.gate.should_animate() {
            binding.apply_final(regions);
            return TriggerHandle::INERT;
        }

        let Some(registry) = self.registry.upgrade() else {
            binding.apply_final(regions);
            return TriggerHandle::INERT;
        };
        let handle = match registry.lock() {
            Ok(mut registry) => registry.register(binding, regions),
            Err(_) => {
                tracing::warn!("view '{}': trigger registry poisoned", self.name);
                binding.apply_final(regions);
                TriggerHandle::INERT
            }
        };

        if !handle.is_inert() {
            self.handles.push(handle);
        }
        handle
    }

    /// Handles registered and not yet released
    pub fn handles(&self) -> &[TriggerHandle] {
        &self.handles
    }

    /// Release every registration; returns how many were live
    ///
    /// Idempotent. Regions keep whatever visual state they had.
    pub fn teardown(&mut self) -> usize {
        self.active = false;
        let handles = std::mem::take(&mut self.handles);
        if handles.is_empty() {
            return 0;
        }

        let released = match self.registry.upgrade() {
            Some(registry) => match registry.lock() {
                Ok(mut registry) => handles.into_iter().filter(|h| registry.release(*h)).count(),
                Err(_) => 0,
            },
            None => 0,
        };
        tracing::debug!("view '{}' torn down, released {} triggers", self.name, released);
        released
    }

    /// Teardown that also settles every target in its final state
    pub fn revert(&mut self, regions: &mut RegionTree) -> usize {
        self.active = false;
        let handles = std::mem::take(&mut self.handles);
        let Some(registry) = self.registry.upgrade() else {
            return 0;
        };
        let reverted = match registry.lock() {
            Ok(mut registry) => handles
                .into_iter()
                .filter(|h| registry.revert(*h, regions))
                .count(),
            Err(_) => 0,
        };
        tracing::debug!("view '{}' reverted {} triggers", self.name, reverted);
        reverted
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;
    use reveal_core::{MotionPreference, Rect, SharedMotionPreference, VisualState};

    fn setup() -> (SharedTriggerRegistry, RegionTree, Vec<reveal_core::RegionId>) {
        let registry = ViewportTriggerRegistry::new_shared();
        let mut regions = RegionTree::new();
        let ids = (0..3)
            .map(|i| regions.mount(Rect::new(0.0, 1000.0 + i as f32 * 600.0, 1280.0, 500.0)))
            .collect();
        (registry, regions, ids)
    }

    #[test]
    fn test_bind_registers() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);

        for id in &ids {
            let h = scope.bind(AnimationBinding::builder(*id).build().unwrap(), &mut regions);
            assert!(!h.is_inert());
        }
        assert_eq!(scope.handles().len(), 3);
        assert_eq!(registry.lock().unwrap().live_observations(), 3);
        assert_eq!(regions.visual(ids[0]), Some(VisualState::HIDDEN));
    }

    #[test]
    fn test_reduced_motion_renders_final_state() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::Reduce);
        assert!(!scope.should_animate());

        for id in &ids {
            let binding = AnimationBinding::builder(*id)
                .from(VisualState::HIDDEN.y(60.0))
                .build()
                .unwrap();
            assert!(scope.bind(binding, &mut regions).is_inert());
        }

        assert_eq!(registry.lock().unwrap().live_observations(), 0);
        for id in &ids {
            assert_eq!(regions.visual(*id), Some(VisualState::VISIBLE));
        }
    }

    #[test]
    fn test_preference_read_once_per_activation() {
        let (registry, mut regions, ids) = setup();
        let platform = SharedMotionPreference::new(MotionPreference::NoPreference);
        let mut scope = ViewScope::activate("home", &registry, &platform);

        platform.set(MotionPreference::Reduce);
        let h = scope.bind(AnimationBinding::builder(ids[0]).build().unwrap(), &mut regions);
        assert!(!h.is_inert());

        drop(scope);
        let scope = ViewScope::activate("home", &registry, &platform);
        assert!(!scope.should_animate());
    }

    #[test]
    fn test_teardown_then_scroll_fires_nothing() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
        for id in &ids {
            scope.bind(
                AnimationBinding::builder(*id).toggle().build().unwrap(),
                &mut regions,
            );
        }

        assert_eq!(scope.teardown(), 3);
        assert_eq!(scope.teardown(), 0);

        let mut registry = registry.lock().unwrap();
        let vp = Viewport::new(0.0, 1280.0, 800.0);
        for y in [0.0, 5000.0, 0.0, 5000.0] {
            assert!(registry.on_scroll(&vp.scrolled_to(y), &mut regions).is_empty());
        }
        assert_eq!(registry.live_observations(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_bind_after_teardown_is_inert() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
        scope.teardown();

        let h = scope.bind(AnimationBinding::builder(ids[0]).build().unwrap(), &mut regions);
        assert!(h.is_inert());
        assert_eq!(regions.visual(ids[0]), Some(VisualState::VISIBLE));
        assert!(registry.lock().unwrap().is_empty());
    }

    #[test]
    fn test_drop_releases() {
        let (registry, mut regions, ids) = setup();
        {
            let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
            scope.bind(AnimationBinding::builder(ids[0]).build().unwrap(), &mut regions);
            assert_eq!(registry.lock().unwrap().len(), 1);
        }
        assert!(registry.lock().unwrap().is_empty());
    }

    #[test]
    fn test_revert_settles_final_state() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
        scope.bind(AnimationBinding::builder(ids[1]).build().unwrap(), &mut regions);
        assert_eq!(regions.visual(ids[1]), Some(VisualState::HIDDEN));

        assert_eq!(scope.revert(&mut regions), 1);
        assert_eq!(regions.visual(ids[1]), Some(VisualState::VISIBLE));
        assert!(registry.lock().unwrap().is_empty());
    }

    #[test]
    fn test_registry_dropped_first() {
        let (registry, mut regions, ids) = setup();
        let mut scope = ViewScope::activate("home", &registry, &MotionPreference::NoPreference);
        scope.bind(AnimationBinding::builder(ids[0]).build().unwrap(), &mut regions);
        drop(registry);
        assert_eq!(scope.teardown(), 0);
    }
}
