// SPDX-License-Identifier: MPL-2.0
//! Notification list management.
//!
//! The `Manager` owns the ordered list of live notifications together with
//! the expiry timer handle of each one. It does not schedule anything itself;
//! [`Feedback`](crate::feedback::Feedback) pairs it with the timer queue.

use super::notification::{Notification, NotificationId, Severity};
use crate::scheduler::TimerHandle;
use std::collections::VecDeque;
use std::time::Duration;

/// Messages for notification state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    expiry: Option<TimerHandle>,
}

/// Ordered collection of live notifications (oldest first).
#[derive(Debug, Default)]
pub struct Manager {
    entries: VecDeque<Entry>,
    next_id: u64,
}

impl Manager {
    /// Creates a new empty notification manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notification with the next id and appends it to the tail.
    ///
    /// The expiry handle is attached separately with [`Manager::set_expiry`]
    /// once the caller has scheduled it.
    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
        shown_at: Duration,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId::from_raw(self.next_id);
        self.entries.push_back(Entry {
            notification: Notification::new(id, severity, message, duration, shown_at),
            expiry: None,
        });
        id
    }

    /// Records the expiry timer of a live notification.
    pub fn set_expiry(&mut self, id: NotificationId, handle: TimerHandle) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.notification.id() == id) {
            entry.expiry = Some(handle);
        }
    }

    /// Removes a notification by its ID.
    ///
    /// Returns `None` if the notification is not present (already dismissed,
    /// expired or cleared). Otherwise returns the expiry handle it held, which
    /// may itself be `None` if the removal comes from that very timer.
    pub fn remove(&mut self, id: NotificationId) -> Option<Option<TimerHandle>> {
        let pos = self.entries.iter().position(|e| e.notification.id() == id)?;
        self.entries.remove(pos).map(|entry| entry.expiry)
    }

    /// Returns the live notifications in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|e| &e.notification)
    }

    /// Returns the number of live notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether there are no live notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all notifications and returns how many were removed.
    ///
    /// Expiry timers are left alone; they find nothing when they fire.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}
