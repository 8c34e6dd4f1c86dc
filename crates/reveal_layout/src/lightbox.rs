//! Lightbox controller
//!
//! Modal gallery viewer state machine. The controller is either `Closed` or
//! `Open(index)` with `index < len`, and it holds a [`ScrollLockClaim`] that
//! is engaged exactly while it is open.
//!
//! | Event           | From     | To                     |
//! |-----------------|----------|------------------------|
//! | `activate(i)`   | any      | `Open(i)`              |
//! | `close()`       | `Open`   | `Closed`               |
//! | `next()`        | `Open(i)`| `Open((i + 1) mod N)`  |
//! | `previous()`    | `Open(i)`| `Open((i - 1 + N) mod N)` |
//! | `jump(j)`       | `Open`   | `Open(j)`              |
//!
//! Everything else is a no-op. Dropping the controller releases its claim,
//! so the page is never left locked.

use serde::{Deserialize, Serialize};

use reveal_core::{ScrollLock, ScrollLockClaim};

/// Lightbox state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightboxState {
    #[default]
    Closed,
    Open(usize),
}

impl LightboxState {
    pub fn is_open(&self) -> bool {
        matches!(self, LightboxState::Open(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            LightboxState::Open(i) => Some(*i),
            LightboxState::Closed => None,
        }
    }
}

/// Which dismiss gestures close the lightbox
///
/// The close control always closes. Clicks on the image or the navigation
/// controls never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissPolicy {
    pub close_on_backdrop: bool,
    pub close_on_escape: bool,
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_escape: true,
        }
    }
}

/// User input routed to the lightbox
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxEvent {
    /// Gallery tile clicked
    Activate(usize),
    /// Close control pressed
    Close,
    Next,
    Previous,
    /// Dot indicator pressed
    Jump(usize),
    /// Click on the overlay outside the content
    BackdropClick,
    /// Escape key pressed
    Escape,
}

/// Lightbox state machine bound to the page scroll lock
#[derive(Debug)]
pub struct LightboxController {
    state: LightboxState,
    len: usize,
    claim: ScrollLockClaim,
    dismiss: DismissPolicy,
}

impl LightboxController {
    /// Controller over `len` items, claiming on `lock`
    pub fn new(len: usize, lock: &ScrollLock) -> Self {
        Self::with_dismiss_policy(len, lock, DismissPolicy::default())
    }

    pub fn with_dismiss_policy(len: usize, lock: &ScrollLock, dismiss: DismissPolicy) -> Self {
        Self {
            state: LightboxState::Closed,
            len,
            claim: lock.claimant(),
            dismiss,
        }
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Index shown, for highlighting the matching dot
    pub fn current_index(&self) -> Option<usize> {
        self.state.index()
    }

    pub fn is_current(&self, index: usize) -> bool {
        self.current_index() == Some(index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dismiss_policy(&self) -> DismissPolicy {
        self.dismiss
    }

    /// Open at `index`, or move there if already open
    ///
    /// Returns false, leaving the state untouched, when `index` is out of
    /// range (including any index into an empty gallery).
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.len {
            tracing::warn!(
                "lightbox activate({}) rejected: {} items",
                index,
                self.len
            );
            return false;
        }
        self.state = LightboxState::Open(index);
        self.claim.engage();
        tracing::debug!("lightbox open at {}", index);
        true
    }

    /// Close; returns false if already closed
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = LightboxState::Closed;
        self.claim.release();
        tracing::debug!("lightbox closed");
        true
    }

    pub fn next(&mut self) -> bool {
        match self.state {
            LightboxState::Open(i) => {
                self.state = LightboxState::Open((i + 1) % self.len);
                true
            }
            LightboxState::Closed => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.state {
            LightboxState::Open(i) => {
                self.state = LightboxState::Open((i + self.len - 1) % self.len);
                true
            }
            LightboxState::Closed => false,
        }
    }

    /// Jump to `index` while open
    pub fn jump(&mut self, index: usize) -> bool {
        if !self.state.is_open() || index >= self.len {
            return false;
        }
        self.state = LightboxState::Open(index);
        true
    }

    /// Route a user event; returns true if the state changed
    pub fn handle(&mut self, event: LightboxEvent) -> bool {
        let before = self.state;
        match event {
            LightboxEvent::Activate(i) => {
                self.activate(i);
            }
            LightboxEvent::Close => {
                self.close();
            }
            LightboxEvent::Next => {
                self.next();
            }
            LightboxEvent::Previous => {
                self.previous();
            }
            LightboxEvent::Jump(j) => {
                self.jump(j);
            }
            LightboxEvent::BackdropClick if self.dismiss.close_on_backdrop => {
                self.close();
            }
            LightboxEvent::Escape if self.dismiss.close_on_escape => {
                self.close();
            }
            LightboxEvent::BackdropClick | LightboxEvent::Escape => {}
        }
        self.state != before
    }

    /// Close and release the page lock; used when the owning view unmounts
    pub fn teardown(&mut self) {
        if self.state.is_open() {
            tracing::debug!("lightbox torn down while open, unlocking page scroll");
        }
        self.state = LightboxState::Closed;
        self.claim.release();
    }
}

impl Drop for LightboxController {
    fn drop(&mut self) {
        self.teardown();
    }
}
