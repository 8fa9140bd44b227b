// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use std::fmt;
use std::time::Duration;

/// Unique identifier for a notification.
///
/// Ids are allocated by a [`Manager`](super::Manager) from a monotonic
/// counter and are never reused within that manager's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric id.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level determines visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Something failed.
    Error,
    /// Informational message.
    Info,
    /// Warning that doesn't block operation.
    Warning,
}

impl Severity {
    /// All severities, in display order of the demo buttons.
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Info,
        Severity::Warning,
    ];

    /// Sample message used by the demo buttons for each severity.
    #[must_use]
    pub fn sample_message(self) -> &'static str {
        match self {
            Severity::Success => "Operation completed successfully!",
            Severity::Error => "Something went wrong. Please try again.",
            Severity::Info => "Here is some helpful information for you.",
            Severity::Warning => "Please review your input before proceeding.",
        }
    }

    /// Short label for buttons and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message: String,
    duration: Duration,
    /// Virtual time at which the notification was shown.
    shown_at: Duration,
}

impl Notification {
    pub(crate) fn new(
        id: NotificationId,
        severity: Severity,
        message: impl Into<String>,
        duration: Duration,
        shown_at: Duration,
    ) -> Self {
        Self {
            id,
            severity,
            message: message.into(),
            duration,
            shown_at,
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns how long the notification stays visible.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the virtual time at which the notification was shown.
    #[must_use]
    pub fn shown_at(&self) -> Duration {
        self.shown_at
    }

    /// Returns the time left before the notification expires at `now`.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        self.shown_at
            .saturating_add(self.duration)
            .saturating_sub(now)
    }

    /// Returns the fraction of the lifetime still left at `now`, in `[0, 1]`.
    #[must_use]
    pub fn remaining_fraction(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.remaining(now).as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}
