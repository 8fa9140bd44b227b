// SPDX-License-Identifier: MPL-2.0
//! Timed operation kinds and their observable state.

use crate::config::defaults::*;
use crate::ui::notifications::Severity;
use std::fmt;
use std::time::Duration;

/// Identity of a simulated asynchronous action.
///
/// At most one operation of each kind runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Save,
    Delete,
    Upload,
    Cooldown,
    /// Connection attempt that fails 30% of the time.
    Connect,
    /// Skeleton loading of the demo cards.
    Refresh,
    Bounce,
    Pulse,
    Wobble,
}

/// How an operation's timers are paced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// A single timer after a fixed delay.
    Delay(Duration),
    /// A repeating tick counting `from` down to zero.
    Countdown { from: u32, tick: Duration },
    /// A repeating tick adding a random step in `[min_step, max_step]` percent.
    Progress {
        tick: Duration,
        min_step: f32,
        max_step: f32,
    },
}

/// Where an operation lands after completing on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Park in `Succeeded`/`Failed` until acknowledged.
    Hold,
    /// Return straight to `Idle`.
    Reset,
}

/// A notification emitted by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub message: &'static str,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notice {
    const fn success(message: &'static str, duration_ms: u64) -> Self {
        Self {
            message,
            severity: Severity::Success,
            duration: Duration::from_millis(duration_ms),
        }
    }

    const fn info(message: &'static str, duration_ms: u64) -> Self {
        Self {
            message,
            severity: Severity::Info,
            duration: Duration::from_millis(duration_ms),
        }
    }

    const fn error(message: &'static str, duration_ms: u64) -> Self {
        Self {
            message,
            severity: Severity::Error,
            duration: Duration::from_millis(duration_ms),
        }
    }

    /// Info notice emitted when a retry starts.
    pub const RETRYING: Notice = Notice::info(RETRYING_MESSAGE, SHORT_NOTICE_DURATION_MS);

    /// Success notice emitted when a retry (or connection attempt) succeeds.
    pub const RETRY_SUCCEEDED: Notice =
        Notice::success(OPERATION_DONE_MESSAGE, DEFAULT_NOTIFICATION_DURATION_MS);

    /// Error notice emitted when a simulated attempt fails.
    pub const FAILED: Notice = Notice::error(FAILURE_NOTICE_MESSAGE, DEFAULT_NOTIFICATION_DURATION_MS);
}

impl OperationKind {
    /// Every kind, in display order.
    pub const ALL: [OperationKind; 9] = [
        OperationKind::Save,
        OperationKind::Delete,
        OperationKind::Upload,
        OperationKind::Cooldown,
        OperationKind::Connect,
        OperationKind::Refresh,
        OperationKind::Bounce,
        OperationKind::Pulse,
        OperationKind::Wobble,
    ];

    /// Timer pacing for this kind.
    #[must_use]
    pub fn pacing(self) -> Pacing {
        match self {
            OperationKind::Save => Pacing::Delay(Duration::from_millis(SAVE_DELAY_MS)),
            OperationKind::Delete => Pacing::Delay(Duration::from_millis(DELETE_DELAY_MS)),
            OperationKind::Connect => Pacing::Delay(Duration::from_millis(CONNECT_DELAY_MS)),
            OperationKind::Refresh => Pacing::Delay(Duration::from_millis(REFRESH_DELAY_MS)),
            OperationKind::Bounce => Pacing::Delay(Duration::from_millis(BOUNCE_MS)),
            OperationKind::Pulse => Pacing::Delay(Duration::from_millis(PULSE_MS)),
            OperationKind::Wobble => Pacing::Delay(Duration::from_millis(WOBBLE_MS)),
            OperationKind::Upload => Pacing::Progress {
                tick: Duration::from_millis(UPLOAD_TICK_MS),
                min_step: UPLOAD_MIN_STEP,
                max_step: UPLOAD_MAX_STEP,
            },
            OperationKind::Cooldown => Pacing::Countdown {
                from: COOLDOWN_SECS,
                tick: Duration::from_secs(1),
            },
        }
    }

    /// Where this kind lands after completing on its own.
    #[must_use]
    pub fn settle(self) -> Settle {
        match self {
            OperationKind::Save
            | OperationKind::Delete
            | OperationKind::Upload
            | OperationKind::Connect => Settle::Hold,
            OperationKind::Cooldown
            | OperationKind::Refresh
            | OperationKind::Bounce
            | OperationKind::Pulse
            | OperationKind::Wobble => Settle::Reset,
        }
    }

    /// Whether a plain `start` may fail.
    #[must_use]
    pub fn can_fail(self) -> bool {
        self == OperationKind::Connect
    }

    /// Notice emitted when the operation starts.
    #[must_use]
    pub fn start_notice(self) -> Option<Notice> {
        match self {
            OperationKind::Cooldown => Some(Notice::info(
                COOLDOWN_STARTED_MESSAGE,
                SHORT_NOTICE_DURATION_MS,
            )),
            _ => None,
        }
    }

    /// Notice emitted when the operation completes successfully.
    #[must_use]
    pub fn done_notice(self) -> Option<Notice> {
        match self {
            OperationKind::Save => Some(Notice::success(
                SAVE_DONE_MESSAGE,
                DEFAULT_NOTIFICATION_DURATION_MS,
            )),
            OperationKind::Delete => Some(Notice::success(
                DELETE_DONE_MESSAGE,
                DEFAULT_NOTIFICATION_DURATION_MS,
            )),
            OperationKind::Upload => Some(Notice::success(
                UPLOAD_DONE_MESSAGE,
                DEFAULT_NOTIFICATION_DURATION_MS,
            )),
            OperationKind::Cooldown => Some(Notice::success(
                COOLDOWN_DONE_MESSAGE,
                SHORT_NOTICE_DURATION_MS,
            )),
            OperationKind::Connect => Some(Notice::RETRY_SUCCEEDED),
            OperationKind::Refresh
            | OperationKind::Bounce
            | OperationKind::Pulse
            | OperationKind::Wobble => None,
        }
    }

    /// Short label for buttons and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Save => "Save",
            OperationKind::Delete => "Delete",
            OperationKind::Upload => "Upload",
            OperationKind::Cooldown => "Cooldown",
            OperationKind::Connect => "Connect",
            OperationKind::Refresh => "Refresh",
            OperationKind::Bounce => "Bounce",
            OperationKind::Pulse => "Pulse",
            OperationKind::Wobble => "Wobble",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Observable state of one operation kind.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationState {
    kind: OperationKind,
    status: Status,
    progress: f32,
    remaining: u32,
    error: Option<String>,
}

impl OperationState {
    pub(crate) fn idle(kind: OperationKind) -> Self {
        Self {
            kind,
            status: Status::Idle,
            progress: 0.0,
            remaining: 0,
            error: None,
        }
    }

    /// Puts the state in `Running` with fresh progress and countdown values.
    pub(crate) fn begin(&mut self) {
        self.status = Status::Running;
        self.progress = 0.0;
        self.remaining = match self.kind.pacing() {
            Pacing::Countdown { from, .. } => from,
            Pacing::Delay(_) | Pacing::Progress { .. } => 0,
        };
        self.error = None;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::idle(self.kind);
    }

    pub(crate) fn succeed(&mut self, settle: Settle) {
        match settle {
            Settle::Hold => {
                self.status = Status::Succeeded;
                self.error = None;
            }
            Settle::Reset => self.reset(),
        }
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = Status::Failed;
        self.error = Some(message.into());
    }

    /// Decrements the countdown and returns the new remaining value.
    pub(crate) fn count_down(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    /// Adds `step` percent and returns whether the operation reached 100%.
    pub(crate) fn add_progress(&mut self, step: f32) -> bool {
        self.progress = (self.progress + step).min(100.0);
        self.progress >= 100.0
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Upload progress in percent (`0..=100`).
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Seconds left on a countdown.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Error message of a failed operation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Completion in percent, for progress bars.
    ///
    /// Progress kinds report their progress; countdowns report the elapsed
    /// share of the countdown; delay kinds report 0 while running.
    #[must_use]
    pub fn completion(&self) -> f32 {
        if self.status == Status::Succeeded {
            return 100.0;
        }
        match self.kind.pacing() {
            Pacing::Progress { .. } => self.progress,
            Pacing::Countdown { from, .. } if self.status == Status::Running => {
                (from - self.remaining.min(from)) as f32 / from as f32 * 100.0
            }
            Pacing::Countdown { .. } | Pacing::Delay(_) => 0.0,
        }
    }
}
