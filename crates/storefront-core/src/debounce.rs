//! Timer-coalescing wrappers.
//!
//! Neither type owns a timer. The host asks for the deadline, arms a timer
//! for it, and polls when the timer fires.

use crate::clock::Millis;

/// Coalesces bursts of calls into one, delivered after a quiet period.
///
/// Every call pushes the deadline out and replaces the pending value, so
/// only the last value of a burst is delivered.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Millis,
    pending: Option<(Millis, T)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(quiet: Millis) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a call. Returns the new deadline.
    pub fn call(&mut self, now: Millis, value: T) -> Millis {
        let deadline = now.saturating_add(self.quiet);
        self.pending = Some((deadline, value));
        deadline
    }

    /// Deliver the pending value if the quiet period has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Lets at most one call through per period.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Millis,
    reopens_at: Option<Millis>,
}

impl Throttle {
    /// Create a throttle with the given period.
    pub fn new(limit: Millis) -> Self {
        Self {
            limit,
            reopens_at: None,
        }
    }

    /// Returns true if the call may run now, closing the gate for one period.
    pub fn try_acquire(&mut self, now: Millis) -> bool {
        match self.reopens_at {
            Some(at) if now < at => false,
            _ => {
                self.reopens_at = Some(now.saturating_add(self.limit));
                true
            }
        }
    }

    /// When the gate reopens, if closed at `now`.
    pub fn reopens_at(&self, now: Millis) -> Option<Millis> {
        self.reopens_at.filter(|at| now < *at)
    }

    /// Reopen immediately.
    pub fn reset(&mut self) {
        self.reopens_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_delivers_last_value_after_quiet() {
        let mut debouncer = Debouncer::new(250);
        assert_eq!(debouncer.call(0, 800), 250);
        assert_eq!(debouncer.call(100, 600), 350);

        assert_eq!(debouncer.poll(250), None);
        assert_eq!(debouncer.poll(350), Some(600));
        assert_eq!(debouncer.poll(1000), None);
    }

    #[test]
    fn test_debounce_cancel() {
        let mut debouncer = Debouncer::new(10);
        debouncer.call(0, ());
        debouncer.cancel();
        assert_eq!(debouncer.poll(100), None);
    }

    #[test]
    fn test_throttle_gate() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.try_acquire(0));
        assert!(!throttle.try_acquire(5));
        assert_eq!(throttle.reopens_at(5), Some(16));
        assert!(throttle.try_acquire(16));
        assert_eq!(throttle.reopens_at(40), None);
    }

    #[test]
    fn test_throttle_reset() {
        let mut throttle = Throttle::new(1000);
        assert!(throttle.try_acquire(0));
        throttle.reset();
        assert!(throttle.try_acquire(1));
    }
}
