//! Trailing debounce driven by the host's clock
//!
//! Time is passed in as a [`Duration`] since an arbitrary host epoch (for a
//! browser, `performance.now()`). The debouncer never sleeps; the event loop
//! calls [`Debouncer::poll`] and runs the deferred work when it fires.

use std::time::Duration;

/// Trailing-edge debouncer owned by a single controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Request the deferred work, pushing any pending deadline back
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Drop a pending request. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Returns true exactly once when the quiet period has elapsed
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
