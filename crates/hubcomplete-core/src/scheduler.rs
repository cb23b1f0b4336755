use crate::debounce::Debouncer;
use crate::{MIN_QUERY_CHARS, is_qualifying};
use std::time::{Duration, Instant};

/// A search that survived the quiet window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Generation the request was scheduled in
    pub id: u64,
    pub query: String,
}

/// What the scheduler did with an input change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Below the minimum length: pending work cancelled, nothing will be sent
    TooShort,
    /// A search is scheduled after the quiet window
    Scheduled,
}

/// Turns raw input changes into at most one pending search.
///
/// Every input change starts a new generation. A completion is only current
/// if it carries the latest generation; anything older has been superseded.
pub struct QueryScheduler {
    debouncer: Debouncer<SearchRequest>,
    generation: u64,
}

impl QueryScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(debounce),
            generation: 0,
        }
    }

    pub fn min_chars(&self) -> usize {
        MIN_QUERY_CHARS
    }

    pub fn on_input_changed(&mut self, value: &str, now: Instant) -> Gate {
        self.generation += 1;

        if !is_qualifying(value) {
            if self.debouncer.cancel_pending() {
                log::debug!("Cancelled pending search, query too short");
            }
            return Gate::TooShort;
        }

        self.debouncer.schedule(
            SearchRequest {
                id: self.generation,
                query: value.to_string(),
            },
            now,
        );
        Gate::Scheduled
    }

    /// The request whose quiet window has elapsed, if any
    pub fn poll(&mut self, now: Instant) -> Option<SearchRequest> {
        self.debouncer.poll(now)
    }

    /// Cancel pending work and invalidate anything already in flight
    pub fn cancel_pending(&mut self) -> bool {
        self.generation += 1;
        self.debouncer.cancel_pending()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Whether a completion for request `id` may still be applied
    pub fn is_current(&self, id: u64) -> bool {
        id == self.generation
    }
}
