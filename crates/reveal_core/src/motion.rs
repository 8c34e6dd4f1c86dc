//! Reduced-motion preference
//!
//! The platform reports whether the user asked for non-essential motion to be
//! suppressed. A view reads the preference exactly once when it activates
//! through [`MotionPreferenceGate::read`]; a change made while the view is
//! mounted takes effect at the next activation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// User motion preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreference {
    /// No preference expressed; animations run
    #[default]
    NoPreference,
    /// User asked for reduced motion; content renders in its final state
    Reduce,
}

impl MotionPreference {
    pub fn is_reduced(&self) -> bool {
        matches!(self, MotionPreference::Reduce)
    }
}

/// Something that can report the platform's reduced-motion preference
pub trait MotionPreferenceSource {
    fn motion_preference(&self) -> MotionPreference;
}

impl MotionPreferenceSource for MotionPreference {
    fn motion_preference(&self) -> MotionPreference {
        *self
    }
}

/// Preference cell the platform layer keeps up to date
///
/// Cloning shares the underlying flag.
#[derive(Clone, Debug, Default)]
pub struct SharedMotionPreference {
    reduced: Arc<AtomicBool>,
}

impl SharedMotionPreference {
    pub fn new(preference: MotionPreference) -> Self {
        Self {
            reduced: Arc::new(AtomicBool::new(preference.is_reduced())),
        }
    }

    /// Called by the platform when the media preference changes
    pub fn set(&self, preference: MotionPreference) {
        self.reduced
            .store(preference.is_reduced(), Ordering::Release);
    }
}

impl MotionPreferenceSource for SharedMotionPreference {
    fn motion_preference(&self) -> MotionPreference {
        if self.reduced.load(Ordering::Acquire) {
            MotionPreference::Reduce
        } else {
            MotionPreference::NoPreference
        }
    }
}

/// Snapshot of the motion preference taken at view activation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionPreferenceGate {
    preference: MotionPreference,
}

impl MotionPreferenceGate {
    /// Read the preference once
    pub fn read(source: &dyn MotionPreferenceSource) -> Self {
        let preference = source.motion_preference();
        tracing::debug!("motion preference read at activation: {:?}", preference);
        Self { preference }
    }

    /// Whether entrance animations may be registered for this activation
    pub fn should_animate(&self) -> bool {
        !self.preference.is_reduced()
    }

    pub fn preference(&self) -> MotionPreference {
        self.preference
    }
}
