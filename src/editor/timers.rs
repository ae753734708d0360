//! Transient deadlines owned by an editor.
//!
//! Editors never spawn timers. They record deadlines here and the host's
//! event loop drains them on every tick.

use std::time::{Duration, Instant};

/// How long the error state stays visible.
pub const ERROR_FLASH: Duration = Duration::from_millis(1000);

/// Delay between blur and closing the suggestions, so a click on a
/// suggestion still lands.
pub const BLUR_CLOSE_DELAY: Duration = Duration::from_millis(150);

/// How long a duplicate pill is highlighted.
pub const DUPLICATE_FLASH: Duration = Duration::from_millis(150);

/// What a deadline does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Clear the error state.
    ClearError,
    /// Close the suggestions after blur.
    CloseSuggestions,
    /// Stop flashing the duplicate pill.
    ClearFlash,
}

/// Pending deadlines, at most one per kind.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(TimerKind, Instant)>,
}

impl TimerQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `after` from `now`, replacing any pending one.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, after: Duration) {
        self.cancel(kind);
        self.pending.push((kind, now + after));
    }

    /// Drop a pending deadline.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|(k, _)| *k != kind);
    }

    /// Whether a deadline of this kind is pending.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _)| *k == kind)
    }

    /// Remove and return every deadline at or before `now`, earliest first.
    pub fn drain_expired(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut expired: Vec<(TimerKind, Instant)> = Vec::new();
        self.pending.retain(|&(kind, deadline)| {
            if deadline <= now {
                expired.push((kind, deadline));
                false
            } else {
                true
            }
        });
        expired.sort_by_key(|&(_, deadline)| deadline);
        expired.into_iter().map(|(kind, _)| kind).collect()
    }

    /// Drop every pending deadline.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
