//! Page scroll lock
//!
//! The page either scrolls or it doesn't. `ScrollLock` is the single shared
//! flag the host reads ("should page scroll be locked?"), and each modal that
//! may lock it holds its own `ScrollLockClaim`. The page is locked while at
//! least one claim is engaged.
//!
//! Claims are idempotent: engaging an engaged claim or releasing a released
//! one changes nothing, so independent modals can never corrupt each other's
//! lock/unlock pairing. Dropping a claim releases it.
//!
//! # Example
//!
//! ```
//! use reveal_core::ScrollLock;
//!
//! let lock = ScrollLock::new();
//! let mut claim = lock.claimant();
//!
//! claim.engage();
//! claim.engage();
//! assert!(lock.is_locked());
//!
//! claim.release();
//! assert!(!lock.is_locked());
//! ```

use std::sync::{Arc, Mutex, PoisonError, Weak};

use rustc_hash::FxHashSet;

/// Callback invoked with the new lock value whenever it flips
pub type LockChangeCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Handle returned by [`ScrollLock::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LockSubscription(u64);

#[derive(Default)]
struct LockInner {
    engaged: FxHashSet<u64>,
    next_claimant: u64,
    subscribers: Vec<(u64, LockChangeCallback)>,
    next_subscription: u64,
}

impl LockInner {
    fn is_locked(&self) -> bool {
        !self.engaged.is_empty()
    }
}

/// Shared page-level scroll lock flag
#[derive(Clone, Default)]
pub struct ScrollLock {
    inner: Arc<Mutex<LockInner>>,
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("locked", &self.is_locked())
            .field("engaged_claims", &self.engaged_count())
            .finish()
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether page scroll should currently be locked
    pub fn is_locked(&self) -> bool {
        self.inner.lock().map(|i| i.is_locked()).unwrap_or(false)
    }

    /// Number of claims currently holding the lock
    pub fn engaged_count(&self) -> usize {
        self.inner.lock().map(|i| i.engaged.len()).unwrap_or(0)
    }

    /// Create a new, released claim on this lock
    pub fn claimant(&self) -> ScrollLockClaim {
        // Ids must stay unique even if a subscriber panicked under the lock
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.next_claimant += 1;
        let id = inner.next_claimant;
        drop(inner);
        ScrollLockClaim {
            id,
            inner: Arc::downgrade(&self.inner),
            engaged: false,
        }
    }

    /// Register a callback for lock flips (unlocked -> locked and back)
    pub fn subscribe<F>(&self, callback: F) -> LockSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        match self.inner.lock() {
            Ok(mut inner) => {
                inner.next_subscription += 1;
                let id = inner.next_subscription;
                inner.subscribers.push((id, Arc::new(callback)));
                LockSubscription(id)
            }
            Err(_) => LockSubscription(0),
        }
    }

    pub fn unsubscribe(&self, subscription: LockSubscription) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.subscribers.retain(|(id, _)| *id != subscription.0);
        }
    }
}

/// One modal's claim on the page scroll lock
pub struct ScrollLockClaim {
    id: u64,
    inner: Weak<Mutex<LockInner>>,
    engaged: bool,
}

impl std::fmt::Debug for ScrollLockClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockClaim")
            .field("id", &self.id)
            .field("engaged", &self.engaged)
            .finish()
    }
}

impl ScrollLockClaim {
    /// Engage this claim. Returns true if the claim was not already engaged.
    pub fn engage(&mut self) -> bool {
        if self.engaged {
            return false;
        }
        self.engaged = true;
        self.update(true);
        true
    }

    /// Release this claim. Returns true if the claim was engaged.
    pub fn release(&mut self) -> bool {
        if !self.engaged {
            return false;
        }
        self.engaged = false;
        self.update(false);
        true
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    fn update(&self, engage: bool) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };

        let notify = {
            let Ok(mut inner) = inner.lock() else {
                return;
            };
            let was_locked = inner.is_locked();
            if engage {
                inner.engaged.insert(self.id);
            } else {
                inner.engaged.remove(&self.id);
            }
            let now_locked = inner.is_locked();
            if was_locked == now_locked {
                None
            } else {
                let callbacks: Vec<LockChangeCallback> =
                    inner.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
                Some((now_locked, callbacks))
            }
        };

        if let Some((locked, callbacks)) = notify {
            tracing::debug!("page scroll lock -> {}", locked);
            for callback in callbacks {
                callback(locked);
            }
        }
    }
}

impl Drop for ScrollLockClaim {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_claim_ids_stay_unique_after_poisoning() {
        let lock = ScrollLock::new();
        let inner = Arc::clone(&lock.inner);
        let result = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("panicked while holding the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(lock.inner.is_poisoned());

        let a = lock.claimant();
        let b = lock.claimant();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_engage_is_idempotent() {
        let lock = ScrollLock::new();
        let mut claim = lock.claimant();

        assert!(claim.engage());
        assert!(!claim.engage());
        assert_eq!(lock.engaged_count(), 1);

        assert!(claim.release());
        assert!(!claim.release());
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_independent_claims() {
        let lock = ScrollLock::new();
        let mut a = lock.claimant();
        let mut b = lock.claimant();

        a.engage();
        b.engage();
        a.release();
        assert!(lock.is_locked());
        a.release();
        assert!(lock.is_locked());
        b.release();
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_drop_releases() {
        let lock = ScrollLock::new();
        {
            let mut claim = lock.claimant();
            claim.engage();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_claim_outliving_lock_is_inert() {
        let mut claim = {
            let lock = ScrollLock::new();
            lock.claimant()
        };
        assert!(claim.engage());
        assert!(claim.release());
    }

    #[test]
    fn test_subscribers_see_only_flips() {
        let lock = ScrollLock::new();
        let flips = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&flips);
        let sub = lock.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut a = lock.claimant();
        let mut b = lock.claimant();
        a.engage();
        b.engage();
        a.release();
        b.release();
        assert_eq!(flips.load(Ordering::SeqCst), 2);

        lock.unsubscribe(sub);
        a.engage();
        assert_eq!(flips.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscriber_may_read_lock() {
        let lock = ScrollLock::new();
        let reader = lock.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        lock.subscribe(move |locked| {
            sink.lock().unwrap().push((locked, reader.is_locked()));
        });

        let mut claim = lock.claimant();
        claim.engage();
        claim.release();
        assert_eq!(*seen.lock().unwrap(), vec![(true, true), (false, false)]);
    }

    proptest! {
        #[test]
        fn lock_matches_engaged_claims(ops in proptest::collection::vec((0usize..3, any::<bool>()), 0..64)) {
            let lock = ScrollLock::new();
            let mut claims: Vec<ScrollLockClaim> = (0..3).map(|_| lock.claimant()).collect();
            for (which, engage) in ops {
                if engage {
                    claims[which].engage();
                } else {
                    claims[which].release();
                }
                let any_engaged = claims.iter().any(|c| c.is_engaged());
                prop_assert_eq!(lock.is_locked(), any_engaged);
            }
        }
    }
}
