//! Per-channel cooldown locks.
//!
//! Each channel is `UNLOCKED → LOCKED → UNLOCKED`: a successful
//! `try_fire` locks it until `now + duration`, and every `try_fire` during
//! that window is refused without touching state.  Locks are timestamps
//! compared against the caller's clock, so there are no timers to cancel.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

/// Gesture channels guarded by a cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Any spell cast (palm, circle, thrust share one lock).
    SpellCast,
    /// Slide swipes in either direction.
    Swipe,
    /// V-sign action.
    VAction,
    /// Wave reset.
    Wave,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpellCast => "spell-cast",
            Self::Swipe => "swipe",
            Self::VAction => "v-action",
            Self::Wave => "wave",
        }
    }

    pub fn all() -> [Channel; 4] {
        [Self::SpellCast, Self::Swipe, Self::VAction, Self::Wave]
    }
}

/// Lock state for a single channel.
#[derive(Debug, Clone, Copy)]
struct Lock {
    duration_ms: f64,
    locked_until_ms: Option<f64>,
}

/// Cooldown locks keyed by channel.
#[derive(Debug, Clone)]
pub struct CooldownController<K> {
    locks: HashMap<K, Lock>,
    /// Times a `try_fire` was refused.
    blocked: u64,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> CooldownController<K> {
    pub fn new() -> Self {
        Self {
            locks: HashMap::new(),
            blocked: 0,
        }
    }

    /// Register a channel with its cooldown duration, replacing any previous one.
    pub fn register(&mut self, channel: K, duration_ms: f64) {
        self.locks.insert(
            channel,
            Lock {
                duration_ms,
                locked_until_ms: None,
            },
        );
    }

    /// Attempt to fire a channel at `now_ms`.
    ///
    /// Returns false (no state change) while locked.  Otherwise locks the
    /// channel for its duration and returns true.  Unregistered channels
    /// never fire.
    pub fn try_fire(&mut self, channel: K, now_ms: f64) -> bool {
        let Some(lock) = self.locks.get_mut(&channel) else {
            return false;
        };
        if let Some(until) = lock.locked_until_ms {
            if now_ms < until {
                self.blocked += 1;
                debug!("Cooldown blocked {:?} ({:.0}ms left)", channel, until - now_ms);
                return false;
            }
        }
        lock.locked_until_ms = Some(now_ms + lock.duration_ms);
        true
    }

    /// Whether a channel is locked at `now_ms`.
    pub fn is_locked(&self, channel: K, now_ms: f64) -> bool {
        self.remaining_ms(channel, now_ms) > 0.0
    }

    /// Milliseconds until a channel unlocks (0 when unlocked).
    pub fn remaining_ms(&self, channel: K, now_ms: f64) -> f64 {
        self.locks
            .get(&channel)
            .and_then(|l| l.locked_until_ms)
            .map(|until| (until - now_ms).max(0.0))
            .unwrap_or(0.0)
    }

    /// Report channels whose lock has elapsed by `now_ms`, and mark them unlocked.
    ///
    /// Each expiry is reported once; this is where the caller hooks
    /// "on unlock" behavior.
    pub fn poll_expired(&mut self, now_ms: f64) -> Vec<K> {
        let mut expired = Vec::new();
        for (channel, lock) in self.locks.iter_mut() {
            if let Some(until) = lock.locked_until_ms {
                if now_ms >= until {
                    lock.locked_until_ms = None;
                    expired.push(*channel);
                }
            }
        }
        expired
    }

    /// Unlock a single channel immediately.
    pub fn unlock(&mut self, channel: K) {
        if let Some(lock) = self.locks.get_mut(&channel) {
            lock.locked_until_ms = None;
        }
    }

    /// Drop every pending lock (session teardown).
    pub fn clear(&mut self) {
        for lock in self.locks.values_mut() {
            lock.locked_until_ms = None;
        }
    }

    /// Number of refused `try_fire` calls.
    pub fn blocked_count(&self) -> u64 {
        self.blocked
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Default for CooldownController<K> {
    fn default() -> Self {
        Self::new()
    }
}
