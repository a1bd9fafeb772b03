//! Explicit pending-timer debouncing.
//!
//! The debouncer never sleeps or spawns anything. Callers hand it the
//! current instant, ask for the next deadline, and call [`Debouncer::fire`]
//! once that deadline has passed. The session loop waits on the deadline
//! with `tokio::time::sleep_until`; tests drive the clock by hand.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Coalesces bursts of values, releasing only the latest after a quiet window
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value and restart the quiet window from `now`
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.window,
        });
    }

    /// Deadline of the pending value, if any
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its deadline has passed
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.flush()
        } else {
            None
        }
    }

    /// Take the pending value regardless of its deadline
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_fire_before_deadline_keeps_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("e", start);

        assert_eq!(debouncer.fire(start + Duration::from_millis(199)), None);
        assert!(debouncer.is_pending());
    }

    #[test]
    fn test_fire_after_deadline_releases_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("echo", start);

        assert_eq!(debouncer.fire(start + WINDOW), Some("echo"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.fire(start + WINDOW * 2), None);
    }

    #[test]
    fn test_reschedule_resets_deadline_and_keeps_latest() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.schedule("e", start);
        debouncer.schedule("ec", start + Duration::from_millis(150));

        assert_eq!(debouncer.fire(start + WINDOW), None);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(350))
        );
        assert_eq!(debouncer.fire(start + Duration::from_millis(350)), Some("ec"));
    }

    #[test]
    fn test_cancel_and_flush() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.schedule(1, start);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);

        debouncer.schedule(2, start);
        assert_eq!(debouncer.flush(), Some(2));
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_zero_window_fires_immediately() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.schedule("now", start);
        assert_eq!(debouncer.fire(start), Some("now"));
    }
}
