// SPDX-License-Identifier: MPL-2.0
//! Virtual-time timer queue.
//!
//! Every "wait" in the application is expressed as an event scheduled on a
//! [`TimerQueue`]. The queue never looks at the wall clock: time only moves
//! when the owner pops due events up to a deadline and then calls
//! [`TimerQueue::advance_to`]. Tests drive it tick by tick; the GUI drives it
//! from the elapsed wall-clock time between messages.
//!
//! # Example
//!
//! ```
//! use patternboard::scheduler::TimerQueue;
//! use std::time::Duration;
//!
//! let mut timers = TimerQueue::new();
//! let first = timers.schedule(Duration::from_millis(200), "first");
//! let _second = timers.schedule(Duration::from_millis(100), "second");
//! assert!(timers.cancel(first));
//!
//! let deadline = timers.now() + Duration::from_secs(1);
//! let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(deadline))
//!     .map(|(_, event)| event)
//!     .collect();
//! timers.advance_to(deadline);
//!
//! assert_eq!(fired, vec!["second"]);
//! assert_eq!(timers.now(), Duration::from_secs(1));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Cancellation token for one scheduled event.
///
/// Handles are never reused within a queue, so a stale handle can only ever
/// refer to an event that already fired or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Returns the raw sequence number behind this handle.
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Ordered set of pending events keyed by due time.
///
/// Events due at the same instant fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    now: Duration,
    next_sequence: u64,
    pending: BTreeMap<(Duration, u64), E>,
    due_times: HashMap<u64, Duration>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_sequence: 0,
            pending: BTreeMap::new(),
            due_times: HashMap::new(),
        }
    }
}

impl<E> TimerQueue<E> {
    /// Creates an empty queue whose clock reads zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from queue creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `event` to fire `delay` after the current virtual time.
    ///
    /// Delays past the end of representable time fire at `Duration::MAX`.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let due = self.now.saturating_add(delay);
        self.pending.insert((due, sequence), event);
        self.due_times.insert(sequence, due);
        TimerHandle(sequence)
    }

    /// Cancels a pending event.
    ///
    /// Returns `true` if the event was still pending. Cancelling an event that
    /// already fired or was already cancelled is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.due_times.remove(&handle.0) {
            Some(due) => self.pending.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Drops every pending event.
    ///
    /// Returns the number of events that were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.due_times.clear();
        count
    }

    /// Returns whether `handle` still refers to a pending event.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.due_times.contains_key(&handle.0)
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending event.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Removes and returns the earliest event due at or before `deadline`.
    ///
    /// The clock jumps to the popped event's due time, so anything the caller
    /// schedules while handling it is measured from the moment it fired.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerHandle, E)> {
        let (due, sequence) = *self.pending.keys().next()?;
        if due > deadline {
            return None;
        }

        let event = self.pending.remove(&(due, sequence))?;
        self.due_times.remove(&sequence);
        self.now = self.now.max(due);
        Some((TimerHandle(sequence), event))
    }

    /// Moves the clock forward to `deadline`.
    ///
    /// The clock never runs backwards; an earlier deadline is ignored. Callers
    /// should drain [`TimerQueue::pop_due`] first, otherwise events that fell
    /// due stay pending and fire on the next drain.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut TimerQueue<&'static str>, deadline: Duration) -> Vec<&'static str> {
        let fired = std::iter::from_fn(|| timers.pop_due(deadline))
            .map(|(_, event)| event)
            .collect();
        timers.advance_to(deadline);
        fired
    }

    #[test]
    fn new_queue_is_empty_at_time_zero() {
        let timers: TimerQueue<()> = TimerQueue::new();
        assert!(timers.is_empty());
        assert_eq!(timers.now(), Duration::ZERO);
        assert_eq!(timers.next_due(), None);
    }

    #[test]
    fn events_fire_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(300), "c");
        timers.schedule(Duration::from_millis(100), "a");
        timers.schedule(Duration::from_millis(200), "b");

        assert_eq!(drain(&mut timers, Duration::from_secs(1)), vec!["a", "b", "c"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn simultaneous_events_fire_in_scheduling_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(100), "first");
        timers.schedule(Duration::from_millis(100), "second");

        assert_eq!(
            drain(&mut timers, Duration::from_millis(100)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn events_after_deadline_stay_pending() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(100), "early");
        timers.schedule(Duration::from_millis(500), "late");

        assert_eq!(drain(&mut timers, Duration::from_millis(499)), vec!["early"]);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.now(), Duration::from_millis(499));
        assert_eq!(drain(&mut timers, Duration::from_millis(500)), vec!["late"]);
    }

    #[test]
    fn deadline_is_inclusive() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_secs(1), "tick");
        assert_eq!(drain(&mut timers, Duration::from_secs(1)), vec!["tick"]);
    }

    #[test]
    fn cancelled_event_never_fires() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(Duration::from_millis(100), "cancelled");
        timers.schedule(Duration::from_millis(200), "kept");

        assert!(timers.cancel(handle));
        assert!(!timers.is_pending(handle));
        assert_eq!(drain(&mut timers, Duration::from_secs(1)), vec!["kept"]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(Duration::from_millis(100), "once");

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(Duration::from_millis(100), "fired");
        drain(&mut timers, Duration::from_secs(1));

        assert!(!timers.cancel(handle));
    }

    #[test]
    fn pop_due_moves_clock_to_event_time() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(250), "tick");

        let (_, event) = timers
            .pop_due(Duration::from_secs(1))
            .expect("event should be due");
        assert_eq!(event, "tick");
        assert_eq!(timers.now(), Duration::from_millis(250));

        // Rescheduling from inside the handler is relative to the fire time.
        timers.schedule(Duration::from_millis(250), "next");
        assert_eq!(timers.next_due(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut timers: TimerQueue<()> = TimerQueue::new();
        timers.advance_to(Duration::from_secs(2));
        timers.advance_to(Duration::from_secs(1));
        assert_eq!(timers.now(), Duration::from_secs(2));
    }

    #[test]
    fn handles_are_unique() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(Duration::ZERO, ());
        let b = timers.schedule(Duration::ZERO, ());
        assert_ne!(a, b);
        assert!(b.sequence() > a.sequence());
    }

    #[test]
    fn huge_delay_saturates_instead_of_overflowing() {
        let mut timers = TimerQueue::new();
        timers.advance_to(Duration::from_millis(1));
        let handle = timers.schedule(Duration::MAX, "forever");

        assert_eq!(timers.next_due(), Some(Duration::MAX));
        assert!(drain(&mut timers, Duration::from_secs(3600)).is_empty());
        assert_eq!(drain(&mut timers, Duration::MAX), vec!["forever"]);
        assert!(!timers.is_pending(handle));
    }

    #[test]
    fn cancel_all_empties_queue() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(Duration::from_millis(10), "a");
        timers.schedule(Duration::from_millis(20), "b");

        assert_eq!(timers.cancel_all(), 2);
        assert!(timers.is_empty());
        assert!(!timers.is_pending(handle));
        assert!(drain(&mut timers, Duration::from_secs(1)).is_empty());
    }
}
