// SPDX-License-Identifier: MPL-2.0
//! Notification and timed-state manager.
//!
//! [`Feedback`] owns the toast list and one slot per [`OperationKind`]. Every
//! wait is a [`Timer`] event on a virtual-time [`TimerQueue`]; nothing happens
//! between calls, and time only moves inside [`Feedback::advance`].
//!
//! Each slot remembers the handle of its single outstanding timer. A fired
//! timer whose handle does not match the one held by its slot is ignored, so
//! cancelled or superseded timers can never touch a restarted operation.
//!
//! # Example
//!
//! ```
//! use patternboard::feedback::{Feedback, OperationKind, Status};
//! use patternboard::random::Constant;
//! use std::time::Duration;
//!
//! let mut feedback = Feedback::new(Constant::new(0.5));
//! assert!(feedback.start(OperationKind::Save));
//!
//! feedback.advance(Duration::from_secs(2));
//! assert_eq!(feedback.operation(OperationKind::Save).status(), Status::Succeeded);
//! assert_eq!(feedback.notification_count(), 1);
//! ```

mod operation;

pub use operation::{Notice, OperationKind, OperationState, Pacing, Settle, Status};

use crate::config::defaults::{
    DEFAULT_NOTIFICATION_DURATION_MS, FAILURE_CHANCE, FAILURE_MESSAGE, RETRY_DELAY_MS,
};
use crate::random::RandomSource;
use crate::scheduler::{TimerHandle, TimerQueue};
use crate::ui::notifications::{Manager, Notification, NotificationId, Severity};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A state change reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    NotificationShown(NotificationId),
    NotificationDismissed(NotificationId),
    NotificationsCleared,
    OperationChanged(OperationKind),
}

/// Registration token returned by [`Feedback::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Events carried by the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    /// A notification reached the end of its lifetime.
    Expire(NotificationId),
    /// A delay operation (or a retry) resolves.
    Settle(OperationKind),
    /// A countdown or progress operation advances one step.
    Tick(OperationKind),
}

#[derive(Debug)]
struct Slot {
    state: OperationState,
    timer: Option<TimerHandle>,
    retrying: bool,
}

impl Slot {
    fn new(kind: OperationKind) -> Self {
        Self {
            state: OperationState::idle(kind),
            timer: None,
            retrying: false,
        }
    }
}

type Observer = Box<dyn FnMut(&Change)>;

/// Owner of all transient UI feedback state.
pub struct Feedback {
    notifications: Manager,
    slots: Vec<Slot>,
    timers: TimerQueue<Timer>,
    random: Box<dyn RandomSource>,
    default_duration: Duration,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    revision: u64,
}

impl fmt::Debug for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Feedback")
            .field("now", &self.timers.now())
            .field("notifications", &self.notifications)
            .field("slots", &self.slots)
            .field("pending_timers", &self.timers.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Feedback {
    /// Creates an empty manager drawing outcomes from `random`.
    pub fn new(random: impl RandomSource + 'static) -> Self {
        Self {
            notifications: Manager::new(),
            slots: OperationKind::ALL.into_iter().map(Slot::new).collect(),
            timers: TimerQueue::new(),
            random: Box::new(random),
            default_duration: Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
            observers: Vec::new(),
            next_observer: 0,
            revision: 0,
        }
    }

    /// Overrides the lifetime used by [`Feedback::show`].
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Lifetime used by [`Feedback::show`].
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    /// Shows a notification for the default duration.
    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.show_for(message, severity, self.default_duration)
    }

    /// Shows a notification that expires after `duration`.
    pub fn show_for(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> NotificationId {
        let id = self
            .notifications
            .push(severity, message, duration, self.timers.now());
        let handle = self.timers.schedule(duration, Timer::Expire(id));
        self.notifications.set_expiry(id, handle);

        debug!(%id, ?severity, ?duration, "notification shown");
        self.emit(Change::NotificationShown(id));
        id
    }

    /// Removes a notification and cancels its expiry.
    ///
    /// Returns `false` if the notification is already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let Some(expiry) = self.notifications.remove(id) else {
            debug!(%id, "dismiss ignored: notification not present");
            return false;
        };
        if let Some(handle) = expiry {
            self.timers.cancel(handle);
        }

        debug!(%id, "notification dismissed");
        self.emit(Change::NotificationDismissed(id));
        true
    }

    /// Removes every notification.
    ///
    /// Pending expiry timers stay scheduled and find nothing when they fire.
    pub fn clear(&mut self) {
        let removed = self.notifications.clear();
        if removed > 0 {
            debug!(removed, "notifications cleared");
            self.emit(Change::NotificationsCleared);
        }
    }

    fn show_notice(&mut self, notice: Notice) -> NotificationId {
        self.show_for(notice.message, notice.severity, notice.duration)
    }

    // ---------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------

    /// Starts an operation.
    ///
    /// Returns `false` and changes nothing if `kind` is already running.
    pub fn start(&mut self, kind: OperationKind) -> bool {
        if self.slot(kind).state.is_running() {
            debug!(%kind, "start ignored: already running");
            return false;
        }

        self.cancel_timer(kind);
        let delay = match kind.pacing() {
            Pacing::Delay(delay) => delay,
            Pacing::Countdown { tick, .. } | Pacing::Progress { tick, .. } => tick,
        };
        let event = match kind.pacing() {
            Pacing::Delay(_) => Timer::Settle(kind),
            Pacing::Countdown { .. } | Pacing::Progress { .. } => Timer::Tick(kind),
        };
        let handle = self.timers.schedule(delay, event);

        let slot = self.slot_mut(kind);
        slot.state.begin();
        slot.timer = Some(handle);
        slot.retrying = false;

        debug!(%kind, ?delay, "operation started");
        self.emit(Change::OperationChanged(kind));
        if let Some(notice) = kind.start_notice() {
            self.show_notice(notice);
        }
        true
    }

    /// Stops an operation and returns it to `Idle`.
    ///
    /// Returns `false` if the operation was already idle.
    pub fn cancel(&mut self, kind: OperationKind) -> bool {
        if self.slot(kind).state.status() == Status::Idle {
            debug!(%kind, "cancel ignored: idle");
            return false;
        }

        self.cancel_timer(kind);
        let slot = self.slot_mut(kind);
        slot.state.reset();
        slot.retrying = false;

        debug!(%kind, "operation cancelled");
        self.emit(Change::OperationChanged(kind));
        true
    }

    /// Cancels a running operation, starts it otherwise.
    ///
    /// Returns whether the operation is running afterwards.
    pub fn toggle(&mut self, kind: OperationKind) -> bool {
        if self.slot(kind).state.is_running() {
            self.cancel(kind);
            false
        } else {
            self.start(kind)
        }
    }

    /// Puts an operation into `Failed` with the standard failure message.
    pub fn fail(&mut self, kind: OperationKind) {
        self.cancel_timer(kind);
        let slot = self.slot_mut(kind);
        slot.state.fail(FAILURE_MESSAGE);
        slot.retrying = false;

        warn!(%kind, "operation failed");
        self.emit(Change::OperationChanged(kind));
    }

    /// Retries an operation after a fixed delay.
    ///
    /// The outcome is drawn from the random source and always held for
    /// display. Returns `false` and changes nothing while running.
    pub fn retry(&mut self, kind: OperationKind) -> bool {
        if self.slot(kind).state.is_running() {
            debug!(%kind, "retry ignored: already running");
            return false;
        }

        self.show_notice(Notice::RETRYING);

        self.cancel_timer(kind);
        let handle = self
            .timers
            .schedule(Duration::from_millis(RETRY_DELAY_MS), Timer::Settle(kind));
        let slot = self.slot_mut(kind);
        slot.state.begin();
        slot.timer = Some(handle);
        slot.retrying = true;

        debug!(%kind, "retry scheduled");
        self.emit(Change::OperationChanged(kind));
        true
    }

    /// Returns a finished operation to `Idle`.
    ///
    /// Returns `false` unless the operation was `Succeeded` or `Failed`.
    pub fn acknowledge(&mut self, kind: OperationKind) -> bool {
        match self.slot(kind).state.status() {
            Status::Succeeded | Status::Failed => {
                self.slot_mut(kind).state.reset();
                self.emit(Change::OperationChanged(kind));
                true
            }
            Status::Idle | Status::Running => false,
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Cancels every timer, resets every operation and drops all notifications.
    ///
    /// The manager stays usable afterwards.
    pub fn dispose(&mut self) {
        let cancelled = self.timers.cancel_all();
        for kind in OperationKind::ALL {
            let slot = self.slot_mut(kind);
            slot.timer = None;
            slot.retrying = false;
            if slot.state.status() != Status::Idle {
                slot.state.reset();
                self.emit(Change::OperationChanged(kind));
            }
        }
        self.clear();
        debug!(cancelled, "feedback disposed");
    }

    /// Moves the virtual clock forward by `elapsed`, firing due timers.
    ///
    /// Timers scheduled while handling a fired timer also fire in this call
    /// when they fall due inside the window. Returns the number of timers fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let deadline = self.timers.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some((handle, timer)) = self.timers.pop_due(deadline) {
            fired += 1;
            self.fire(handle, timer);
        }
        self.timers.advance_to(deadline);
        fired
    }

    // ---------------------------------------------------------------------
    // Observation
    // ---------------------------------------------------------------------

    /// Registers a callback invoked synchronously after every change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Change) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    /// Counter bumped on every change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ---------------------------------------------------------------------
    // Snapshots
    // ---------------------------------------------------------------------

    /// Live notifications, oldest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.visible()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn operation(&self, kind: OperationKind) -> &OperationState {
        &self.slot(kind).state
    }

    /// Every operation state, in [`OperationKind::ALL`] order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationState> {
        self.slots.iter().map(|slot| &slot.state)
    }

    /// Whether anything is scheduled, including inert expiry timers.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn slot(&self, kind: OperationKind) -> &Slot {
        &self.slots[kind as usize]
    }

    fn slot_mut(&mut self, kind: OperationKind) -> &mut Slot {
        &mut self.slots[kind as usize]
    }

    fn cancel_timer(&mut self, kind: OperationKind) {
        if let Some(handle) = self.slot_mut(kind).timer.take() {
            self.timers.cancel(handle);
        }
    }

    fn emit(&mut self, change: Change) {
        self.revision += 1;
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
    }

    fn fire(&mut self, handle: TimerHandle, timer: Timer) {
        match timer {
            Timer::Expire(id) => {
                if self.notifications.remove(id).is_some() {
                    debug!(%id, "notification expired");
                    self.emit(Change::NotificationDismissed(id));
                }
            }
            Timer::Settle(kind) => {
                if self.claim(kind, handle) {
                    self.settle(kind);
                }
            }
            Timer::Tick(kind) => {
                if self.claim(kind, handle) {
                    self.tick(kind);
                }
            }
        }
    }

    /// Releases the slot's timer if `handle` is the one it holds.
    fn claim(&mut self, kind: OperationKind, handle: TimerHandle) -> bool {
        let slot = self.slot_mut(kind);
        if slot.timer != Some(handle) || !slot.state.is_running() {
            debug!(%kind, timer = handle.sequence(), "stale timer ignored");
            return false;
        }
        slot.timer = None;
        true
    }

    fn settle(&mut self, kind: OperationKind) {
        let retrying = std::mem::take(&mut self.slot_mut(kind).retrying);
        let succeeded = if retrying || kind.can_fail() {
            self.random.next_unit() >= FAILURE_CHANCE
        } else {
            true
        };

        if !succeeded {
            self.slot_mut(kind).state.fail(FAILURE_MESSAGE);
            warn!(%kind, retrying, "simulated attempt failed");
            self.emit(Change::OperationChanged(kind));
            self.show_notice(Notice::FAILED);
            return;
        }

        let (settle, notice) = if retrying {
            (Settle::Hold, Some(Notice::RETRY_SUCCEEDED))
        } else {
            (kind.settle(), kind.done_notice())
        };
        self.slot_mut(kind).state.succeed(settle);
        info!(%kind, retrying, "operation completed");
        self.emit(Change::OperationChanged(kind));
        if let Some(notice) = notice {
            self.show_notice(notice);
        }
    }

    fn tick(&mut self, kind: OperationKind) {
        let finished = match kind.pacing() {
            Pacing::Countdown { tick, .. } => {
                let remaining = self.slot_mut(kind).state.count_down();
                if remaining > 0 {
                    self.reschedule(kind, tick);
                }
                remaining == 0
            }
            Pacing::Progress {
                tick,
                min_step,
                max_step,
            } => {
                // Sample is in [0, 1), so the raw step lands in (0, max_step].
                let step = ((1.0 - self.random.next_unit()) * f64::from(max_step)) as f32;
                let step = step.max(min_step);
                let done = self.slot_mut(kind).state.add_progress(step);
                if !done {
                    self.reschedule(kind, tick);
                }
                done
            }
            Pacing::Delay(_) => true,
        };

        if finished {
            self.slot_mut(kind).state.succeed(kind.settle());
            info!(%kind, "operation completed");
        }
        self.emit(Change::OperationChanged(kind));
        if finished {
            if let Some(notice) = kind.done_notice() {
                self.show_notice(notice);
            }
        }
    }

    fn reschedule(&mut self, kind: OperationKind, delay: Duration) {
        let handle = self.timers.schedule(delay, Timer::Tick(kind));
        self.slot_mut(kind).timer = Some(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use crate::random::{Constant, Sequence};
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SUCCESS_ROLL: f64 = 0.5;
    const FAILURE_ROLL: f64 = 0.1;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn manager(roll: f64) -> Feedback {
        Feedback::new(Constant::new(roll))
    }

    fn messages(feedback: &Feedback) -> Vec<String> {
        feedback
            .notifications()
            .map(|n| n.message().to_string())
            .collect()
    }

    fn count_message(feedback: &Feedback, message: &str) -> usize {
        feedback
            .notifications()
            .filter(|n| n.message() == message)
            .count()
    }

    fn record(feedback: &mut Feedback) -> Rc<RefCell<Vec<Change>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        feedback.subscribe(move |change| sink.borrow_mut().push(*change));
        changes
    }

    #[test]
    fn notifications_keep_call_order_with_unique_ids() {
        let mut feedback = manager(SUCCESS_ROLL);
        let ids: Vec<_> = ["one", "two", "three"]
            .into_iter()
            .map(|message| feedback.show(message, Severity::Info))
            .collect();

        assert_eq!(messages(&feedback), vec!["one", "two", "three"]);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn notification_expires_after_its_duration() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.show("hello", Severity::Success);

        feedback.advance(ms(DEFAULT_NOTIFICATION_DURATION_MS - 1));
        assert_eq!(feedback.notification_count(), 1);

        feedback.advance(ms(1));
        assert_eq!(feedback.notification_count(), 0);
        assert!(!feedback.has_pending_timers());
    }

    #[test]
    fn show_for_uses_explicit_duration() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.show_for("short", Severity::Warning, ms(500));
        feedback.show("long", Severity::Info);

        feedback.advance(ms(500));
        assert_eq!(messages(&feedback), vec!["long"]);
    }

    #[test]
    fn with_default_duration_changes_show_lifetime() {
        let mut feedback = manager(SUCCESS_ROLL).with_default_duration(ms(1000));
        let id = feedback.show("quick", Severity::Info);
        assert_eq!(
            feedback.notifications().next().map(Notification::duration),
            Some(ms(1000))
        );

        feedback.advance(ms(1000));
        assert!(!feedback.dismiss(id));
    }

    #[test]
    fn dismiss_cancels_expiry_and_later_expiry_is_noop() {
        let mut feedback = manager(SUCCESS_ROLL);
        let id = feedback.show("bye", Severity::Info);
        let changes = record(&mut feedback);

        assert!(feedback.dismiss(id));
        assert!(!feedback.has_pending_timers());

        feedback.advance(ms(DEFAULT_NOTIFICATION_DURATION_MS * 2));
        assert_eq!(*changes.borrow(), vec![Change::NotificationDismissed(id)]);
    }

    #[test]
    fn dismiss_unknown_is_noop() {
        let mut feedback = manager(SUCCESS_ROLL);
        let id = feedback.show("x", Severity::Info);
        feedback.dismiss(id);
        let revision = feedback.revision();

        assert!(!feedback.dismiss(id));
        assert_eq!(feedback.revision(), revision);
    }

    #[test]
    fn clear_leaves_expiry_timers_inert() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.show("a", Severity::Info);
        feedback.show("b", Severity::Info);
        feedback.clear();
        assert_eq!(feedback.notification_count(), 0);
        assert!(feedback.has_pending_timers());

        feedback.advance(ms(3000));
        feedback.show("fresh", Severity::Success);
        let changes = record(&mut feedback);

        // The cleared notifications' timers fire here and must find nothing.
        feedback.advance(ms(1000));
        assert!(changes.borrow().is_empty());
        assert_eq!(messages(&feedback), vec!["fresh"]);
    }

    #[test]
    fn clear_on_empty_list_emits_nothing() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.clear();
        assert_eq!(feedback.revision(), 0);
    }

    #[test]
    fn save_succeeds_after_delay_with_one_notice() {
        let mut feedback = manager(SUCCESS_ROLL);
        assert!(feedback.start(OperationKind::Save));
        assert!(feedback.operation(OperationKind::Save).is_running());

        feedback.advance(ms(SAVE_DELAY_MS - 1));
        assert!(feedback.operation(OperationKind::Save).is_running());
        assert_eq!(feedback.notification_count(), 0);

        feedback.advance(ms(1));
        assert_eq!(
            feedback.operation(OperationKind::Save).status(),
            Status::Succeeded
        );
        assert_eq!(messages(&feedback), vec![SAVE_DONE_MESSAGE]);
    }

    #[test]
    fn delete_uses_its_own_delay() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Delete);

        feedback.advance(ms(DELETE_DELAY_MS));
        assert_eq!(
            feedback.operation(OperationKind::Delete).status(),
            Status::Succeeded
        );
        assert_eq!(count_message(&feedback, DELETE_DONE_MESSAGE), 1);
    }

    #[test]
    fn start_while_running_changes_nothing() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Cooldown);
        feedback.advance(ms(1000));
        let before = feedback.operation(OperationKind::Cooldown).clone();
        let revision = feedback.revision();
        let count = feedback.notification_count();

        assert!(!feedback.start(OperationKind::Cooldown));
        assert_eq!(feedback.operation(OperationKind::Cooldown), &before);
        assert_eq!(feedback.revision(), revision);
        assert_eq!(feedback.notification_count(), count);
    }

    #[test]
    fn cooldown_counts_down_to_idle_with_one_completion_notice() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Cooldown);
        assert_eq!(messages(&feedback), vec![COOLDOWN_STARTED_MESSAGE]);
        assert_eq!(feedback.operation(OperationKind::Cooldown).remaining(), 5);

        for expected in (1..COOLDOWN_SECS).rev() {
            feedback.advance(Duration::from_secs(1));
            let state = feedback.operation(OperationKind::Cooldown);
            assert!(state.is_running());
            assert_eq!(state.remaining(), expected);
        }

        feedback.advance(Duration::from_secs(1));
        let state = feedback.operation(OperationKind::Cooldown);
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.remaining(), 0);
        assert_eq!(count_message(&feedback, COOLDOWN_DONE_MESSAGE), 1);

        feedback.advance(Duration::from_secs(10));
        assert!(!feedback.has_pending_timers());
    }

    #[test]
    fn timers_scheduled_while_firing_run_in_the_same_advance() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Cooldown);

        feedback.advance(Duration::from_secs(u64::from(COOLDOWN_SECS)));
        assert_eq!(
            feedback.operation(OperationKind::Cooldown).status(),
            Status::Idle
        );
        assert_eq!(count_message(&feedback, COOLDOWN_DONE_MESSAGE), 1);
    }

    #[test]
    fn unbounded_toast_lifetime_does_not_overflow() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.advance(ms(1));
        feedback.show_for("forever", Severity::Info, Duration::MAX);

        let now = feedback.now();
        let toast = feedback.notifications().next().expect("toast shown");
        assert_eq!(toast.remaining(now), Duration::MAX - ms(1));
        assert!(toast.remaining_fraction(now) > 0.99);

        feedback.advance(Duration::from_secs(86_400));
        assert_eq!(feedback.notification_count(), 1);

        feedback.advance(Duration::MAX);
        assert_eq!(feedback.notification_count(), 0);
        assert_eq!(feedback.now(), Duration::MAX);
    }

    #[test]
    fn upload_reaches_exactly_hundred_with_maximum_steps() {
        let mut feedback = manager(0.0);
        feedback.start(OperationKind::Upload);

        for tick in 1..=6 {
            feedback.advance(ms(UPLOAD_TICK_MS));
            assert_abs_diff_eq!(
                feedback.operation(OperationKind::Upload).progress(),
                15.0 * tick as f32,
                epsilon = 1e-4
            );
        }

        feedback.advance(ms(UPLOAD_TICK_MS));
        let state = feedback.operation(OperationKind::Upload);
        assert_eq!(state.status(), Status::Succeeded);
        assert_eq!(state.progress(), 100.0);
        assert_eq!(count_message(&feedback, UPLOAD_DONE_MESSAGE), 1);
    }

    #[test]
    fn upload_finishes_when_rolls_stay_at_the_top() {
        let mut feedback = manager(1.0);
        feedback.start(OperationKind::Upload);

        let mut ticks = 0;
        while feedback.operation(OperationKind::Upload).is_running() {
            feedback.advance(ms(UPLOAD_TICK_MS));
            ticks += 1;
            assert!(ticks <= 200, "upload did not finish");
        }

        let state = feedback.operation(OperationKind::Upload);
        assert_eq!(state.status(), Status::Succeeded);
        assert_eq!(state.progress(), 100.0);

        // Once the completion toast expires the queue drains completely.
        feedback.advance(ms(MAX_NOTIFICATION_DURATION_MS));
        assert!(!feedback.has_pending_timers());
    }

    #[test]
    fn upload_progress_never_exceeds_hundred() {
        let mut feedback = Feedback::new(Sequence::new([0.9, 0.2, 0.55, 0.0, 0.35]));
        feedback.start(OperationKind::Upload);

        let mut ticks = 0;
        while feedback.operation(OperationKind::Upload).is_running() {
            feedback.advance(ms(UPLOAD_TICK_MS));
            ticks += 1;
            assert!(feedback.operation(OperationKind::Upload).progress() <= 100.0);
            assert!(ticks < 200, "upload did not finish");
        }

        let state = feedback.operation(OperationKind::Upload);
        assert_eq!(state.status(), Status::Succeeded);
        assert_abs_diff_eq!(state.progress(), 100.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(state.completion(), 100.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn connect_rolls_the_random_source() {
        let mut ok = manager(SUCCESS_ROLL);
        ok.start(OperationKind::Connect);
        ok.advance(ms(CONNECT_DELAY_MS));
        assert_eq!(ok.operation(OperationKind::Connect).status(), Status::Succeeded);
        assert_eq!(messages(&ok), vec![OPERATION_DONE_MESSAGE]);

        let mut bad = manager(FAILURE_ROLL);
        bad.start(OperationKind::Connect);
        bad.advance(ms(CONNECT_DELAY_MS));
        let state = bad.operation(OperationKind::Connect);
        assert_eq!(state.status(), Status::Failed);
        assert_eq!(state.error(), Some(FAILURE_MESSAGE));
        assert_eq!(messages(&bad), vec![FAILURE_NOTICE_MESSAGE]);
    }

    #[test]
    fn retry_with_success_roll_ends_succeeded() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.fail(OperationKind::Connect);
        assert_eq!(
            feedback.operation(OperationKind::Connect).error(),
            Some(FAILURE_MESSAGE)
        );

        assert!(feedback.retry(OperationKind::Connect));
        let state = feedback.operation(OperationKind::Connect);
        assert!(state.is_running());
        assert!(state.error().is_none());
        assert_eq!(messages(&feedback), vec![RETRYING_MESSAGE]);

        feedback.advance(ms(RETRY_DELAY_MS));
        let state = feedback.operation(OperationKind::Connect);
        assert_eq!(state.status(), Status::Succeeded);
        assert!(state.error().is_none());
        assert_eq!(count_message(&feedback, OPERATION_DONE_MESSAGE), 1);
        assert!(feedback
            .notifications()
            .all(|n| n.severity() != Severity::Error));
    }

    #[test]
    fn retry_with_failure_roll_ends_failed_with_one_error_notice() {
        let mut feedback = manager(FAILURE_ROLL);
        feedback.fail(OperationKind::Connect);
        feedback.retry(OperationKind::Connect);

        feedback.advance(ms(RETRY_DELAY_MS));
        let state = feedback.operation(OperationKind::Connect);
        assert_eq!(state.status(), Status::Failed);
        assert_eq!(state.error(), Some(FAILURE_MESSAGE));

        let errors: Vec<_> = feedback
            .notifications()
            .filter(|n| n.severity() == Severity::Error)
            .map(Notification::message)
            .collect();
        assert_eq!(errors, vec![FAILURE_NOTICE_MESSAGE]);
    }

    #[test]
    fn retry_of_a_reset_kind_holds_its_outcome() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.retry(OperationKind::Bounce);
        feedback.advance(ms(RETRY_DELAY_MS));

        assert_eq!(
            feedback.operation(OperationKind::Bounce).status(),
            Status::Succeeded
        );
    }

    #[test]
    fn retry_while_running_is_ignored() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Connect);
        let revision = feedback.revision();

        assert!(!feedback.retry(OperationKind::Connect));
        assert_eq!(feedback.revision(), revision);
        assert_eq!(feedback.notification_count(), 0);
    }

    #[test]
    fn cancel_idle_is_noop() {
        let mut feedback = manager(SUCCESS_ROLL);
        assert!(!feedback.cancel(OperationKind::Save));
        assert_eq!(feedback.revision(), 0);
        assert!(!feedback.has_pending_timers());
    }

    #[test]
    fn cancel_stops_the_pending_timer() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Save);

        assert!(feedback.cancel(OperationKind::Save));
        assert_eq!(feedback.operation(OperationKind::Save).status(), Status::Idle);
        assert!(!feedback.has_pending_timers());

        feedback.advance(ms(SAVE_DELAY_MS * 2));
        assert_eq!(feedback.operation(OperationKind::Save).status(), Status::Idle);
        assert_eq!(feedback.notification_count(), 0);
    }

    #[test]
    fn stale_timer_does_not_touch_restarted_operation() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Save);
        feedback.advance(ms(1000));
        feedback.cancel(OperationKind::Save);
        feedback.start(OperationKind::Save);

        feedback.advance(ms(1000));
        assert!(feedback.operation(OperationKind::Save).is_running());

        feedback.advance(ms(1000));
        assert_eq!(
            feedback.operation(OperationKind::Save).status(),
            Status::Succeeded
        );
        assert_eq!(count_message(&feedback, SAVE_DONE_MESSAGE), 1);
    }

    #[test]
    fn fail_cancels_running_timer() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Save);
        feedback.fail(OperationKind::Save);

        feedback.advance(ms(SAVE_DELAY_MS * 2));
        assert_eq!(feedback.operation(OperationKind::Save).status(), Status::Failed);
        assert_eq!(feedback.notification_count(), 0);
    }

    #[test]
    fn toggle_starts_and_cancels_refresh() {
        let mut feedback = manager(SUCCESS_ROLL);
        assert!(feedback.toggle(OperationKind::Refresh));
        assert!(feedback.operation(OperationKind::Refresh).is_running());

        assert!(!feedback.toggle(OperationKind::Refresh));
        assert_eq!(
            feedback.operation(OperationKind::Refresh).status(),
            Status::Idle
        );
        assert!(!feedback.has_pending_timers());
    }

    #[test]
    fn reset_kinds_return_to_idle_silently() {
        let mut feedback = manager(SUCCESS_ROLL);
        for kind in [
            OperationKind::Refresh,
            OperationKind::Bounce,
            OperationKind::Pulse,
            OperationKind::Wobble,
        ] {
            feedback.start(kind);
        }

        feedback.advance(ms(REFRESH_DELAY_MS));
        assert!(feedback.operations().all(|s| s.status() == Status::Idle));
        assert_eq!(feedback.notification_count(), 0);
    }

    #[test]
    fn acknowledge_clears_finished_states_only() {
        let mut feedback = manager(SUCCESS_ROLL);
        assert!(!feedback.acknowledge(OperationKind::Save));

        feedback.start(OperationKind::Save);
        assert!(!feedback.acknowledge(OperationKind::Save));

        feedback.advance(ms(SAVE_DELAY_MS));
        assert!(feedback.acknowledge(OperationKind::Save));
        assert_eq!(feedback.operation(OperationKind::Save).status(), Status::Idle);

        feedback.fail(OperationKind::Connect);
        assert!(feedback.acknowledge(OperationKind::Connect));
        assert!(feedback.operation(OperationKind::Connect).error().is_none());
    }

    #[test]
    fn dispose_leaves_no_pending_timers() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.start(OperationKind::Upload);
        feedback.start(OperationKind::Cooldown);
        feedback.retry(OperationKind::Connect);
        feedback.show("pending", Severity::Warning);

        feedback.dispose();
        assert!(!feedback.has_pending_timers());
        assert_eq!(feedback.notification_count(), 0);
        assert!(feedback.operations().all(|s| s.status() == Status::Idle));

        assert!(feedback.start(OperationKind::Save));
        feedback.advance(ms(SAVE_DELAY_MS));
        assert_eq!(
            feedback.operation(OperationKind::Save).status(),
            Status::Succeeded
        );
    }

    #[test]
    fn observers_see_changes_in_order_until_unsubscribed() {
        let mut feedback = manager(SUCCESS_ROLL);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let observer = feedback.subscribe(move |change| sink.borrow_mut().push(*change));

        feedback.start(OperationKind::Cooldown);
        let notice = feedback.notifications().next().map(Notification::id);
        assert_eq!(
            *changes.borrow(),
            vec![
                Change::OperationChanged(OperationKind::Cooldown),
                Change::NotificationShown(notice.expect("start notice")),
            ]
        );

        assert!(feedback.unsubscribe(observer));
        assert!(!feedback.unsubscribe(observer));
        feedback.clear();
        assert_eq!(changes.borrow().len(), 2);
    }

    #[test]
    fn revision_counts_every_change() {
        let mut feedback = manager(SUCCESS_ROLL);
        let id = feedback.show("a", Severity::Info);
        feedback.start(OperationKind::Save);
        feedback.dismiss(id);

        assert_eq!(feedback.revision(), 3);
    }

    #[test]
    fn advance_reports_fired_timers_and_moves_clock() {
        let mut feedback = manager(SUCCESS_ROLL);
        feedback.show_for("a", Severity::Info, ms(100));
        feedback.show_for("b", Severity::Info, ms(200));

        assert_eq!(feedback.advance(ms(150)), 1);
        assert_eq!(feedback.now(), ms(150));
        assert_eq!(feedback.advance(ms(100)), 1);
        assert_eq!(feedback.advance(ms(100)), 0);
        assert_eq!(feedback.now(), ms(350));
    }
}
