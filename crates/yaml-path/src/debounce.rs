//! Trailing-edge debouncing.
//!
//! Hosts call [`Debouncer::trigger`] on every event and schedule a timer when
//! it returns `true`. When the timer fires they call [`Debouncer::poll`],
//! which either releases the call or asks for another wait because newer
//! events pushed the deadline back. The last event wins; the debouncer never
//! sleeps or spawns anything itself.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// What to do when a scheduled timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// The input settled; run the debounced work now.
    Ready,

    /// More events arrived; wait this long and poll again.
    Reschedule(Duration),

    /// Nothing pending for this key (already fired or cancelled).
    Idle,
}

/// Coalesces bursts of events per key into one trailing call.
#[derive(Debug)]
pub struct Debouncer<K> {
    delay: Duration,
    deadlines: HashMap<K, Instant>,
}

impl<K: Eq + Hash> Debouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadlines: HashMap::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an event for `key` at `now`.
    ///
    /// Returns `true` when no timer is pending for `key` and the caller must
    /// schedule one for [`Debouncer::delay`] from now. Otherwise the pending
    /// timer's deadline is pushed back and `false` is returned.
    pub fn trigger(&mut self, key: K, now: Instant) -> bool {
        self.deadlines.insert(key, now + self.delay).is_none()
    }

    /// Called when a timer for `key` fires at `now`.
    pub fn poll(&mut self, key: &K, now: Instant) -> Poll {
        let Some(&deadline) = self.deadlines.get(key) else {
            return Poll::Idle;
        };
        if deadline > now {
            return Poll::Reschedule(deadline - now);
        }
        self.deadlines.remove(key);
        Poll::Ready
    }

    /// Forget `key`, e.g. when its view closes. A timer still in flight will
    /// poll as [`Poll::Idle`].
    pub fn cancel(&mut self, key: &K) {
        self.deadlines.remove(key);
    }

    /// Whether a call for `key` is waiting to be released.
    pub fn is_pending(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn test_single_event_fires_after_delay() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        assert!(debouncer.trigger(1, t0));
        assert_eq!(debouncer.poll(&1, t0 + DELAY), Poll::Ready);
        assert_eq!(debouncer.poll(&1, t0 + DELAY), Poll::Idle);
    }

    #[test]
    fn test_burst_is_coalesced() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        assert!(debouncer.trigger("view", t0));
        assert!(!debouncer.trigger("view", t0 + Duration::from_millis(50)));
        assert!(!debouncer.trigger("view", t0 + Duration::from_millis(150)));

        // The first timer fires at t0 + 200ms but the last event was at 150ms.
        assert_eq!(
            debouncer.poll(&"view", t0 + DELAY),
            Poll::Reschedule(Duration::from_millis(150))
        );
        assert_eq!(debouncer.poll(&"view", t0 + Duration::from_millis(350)), Poll::Ready);
        assert!(!debouncer.is_pending(&"view"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        assert!(debouncer.trigger(1, t0));
        assert!(debouncer.trigger(2, t0 + Duration::from_millis(100)));
        assert_eq!(debouncer.poll(&1, t0 + DELAY), Poll::Ready);
        assert_eq!(
            debouncer.poll(&2, t0 + DELAY),
            Poll::Reschedule(Duration::from_millis(100))
        );
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(DELAY);
        let t0 = Instant::now();

        debouncer.trigger(1, t0);
        debouncer.cancel(&1);
        assert_eq!(debouncer.poll(&1, t0 + DELAY), Poll::Idle);
        assert!(debouncer.trigger(1, t0 + DELAY));
    }
}
