// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::notifications;
use crate::ui::patterns;
use crate::ui::theming::ThemeMode;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Patterns(patterns::Message),
    Notification(notifications::NotificationMessage),
    /// Switch to the next theme mode and persist it.
    CycleTheme,
    /// Periodic tick that lets pending timers fire without user input.
    Tick(Instant),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PATTERNBOARD_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Seed for reproducible simulated outcomes.
    pub seed: Option<u64>,
    /// Theme for this session; the saved preference is left untouched.
    pub theme: Option<ThemeMode>,
}
