//! Virtual clock and timer queue for the single-threaded event loop.
//!
//! Time is a plain millisecond counter owned by the host. Hosts advance it
//! either from a script or from a real clock; the queue only orders
//! deadlines.

use serde::{Deserialize, Serialize};

/// Milliseconds on the page clock.
pub type Millis = u64;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    deadline: Millis,
    period: Option<Millis>,
    payload: T,
}

/// A timer whose deadline has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<T> {
    /// The timer's handle.
    pub id: TimerId,
    /// The deadline it fired for.
    pub deadline: Millis,
    /// Caller-defined payload.
    pub payload: T,
}

/// Pending one-shot and interval timers.
///
/// Due timers come out in deadline order; timers sharing a deadline come
/// out in the order they were registered.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_id: u64,
}

impl<T: Clone> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }

    /// Fire `payload` once, `delay` after `now`.
    pub fn schedule_once(&mut self, now: Millis, delay: Millis, payload: T) -> TimerId {
        self.push(now.saturating_add(delay), None, payload)
    }

    /// Fire `payload` every `period`, starting one period after `now`.
    ///
    /// A zero period is treated as one millisecond so the queue always
    /// makes progress.
    pub fn schedule_interval(&mut self, now: Millis, period: Millis, payload: T) -> TimerId {
        let period = period.max(1);
        self.push(now.saturating_add(period), Some(period), payload)
    }

    fn push(&mut self, deadline: Millis, period: Option<Millis>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline,
            period,
            payload,
        });
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let len_before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() < len_before
    }

    /// Check whether a timer is still pending.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Take the next timer due at or before `now`.
    ///
    /// Interval timers are re-armed one period after the deadline they
    /// fired for, so a host that falls behind catches up one firing at a
    /// time.
    pub fn pop_due(&mut self, now: Millis) -> Option<FiredTimer<T>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        match self.timers[index].period {
            Some(period) => {
                let timer = &mut self.timers[index];
                let fired = FiredTimer {
                    id: timer.id,
                    deadline: timer.deadline,
                    payload: timer.payload.clone(),
                };
                timer.deadline = timer.deadline.saturating_add(period);
                Some(fired)
            }
            None => {
                let timer = self.timers.remove(index);
                Some(FiredTimer {
                    id: timer.id,
                    deadline: timer.deadline,
                    payload: timer.payload,
                })
            }
        }
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Check if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
