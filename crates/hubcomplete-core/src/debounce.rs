use std::time::{Duration, Instant};

struct Pending<T> {
    due: Instant,
    payload: T,
}

/// Holds at most one unit of work until a quiet window has passed.
///
/// Scheduling again restarts the window and drops whatever was pending, so
/// only the most recent payload can ever come out of [`Debouncer::poll`].
/// The host drives it by calling `poll` with the current time.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `payload` to be released `delay` after `now`
    pub fn schedule(&mut self, payload: T, now: Instant) {
        self.pending = Some(Pending {
            due: now + self.delay,
            payload,
        });
    }

    /// Drop the pending payload, returns true if there was one
    pub fn cancel_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending payload if its quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }
}
