// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` owns the [`Feedback`] manager and feeds it wall-clock time:
//! before any message is handled, the virtual clock is advanced by the time
//! elapsed since the previous message. A periodic tick keeps timers moving
//! while nothing else happens.

mod clock;
mod message;
mod subscription;
mod view;

pub use clock::WallClock;
pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::feedback::Feedback;
use crate::random::Seeded;
use crate::ui::notifications::{NotificationMessage, Severity};
use crate::ui::patterns;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    feedback: Feedback,
    clock: WallClock,
    theme_mode: ThemeMode,
    config: Config,
    /// Explicit `--config-dir`, reused when saving preferences.
    config_dir: Option<PathBuf>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("theme_mode", &self.theme_mode)
            .field("feedback", &self.feedback)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 760;

/// Builds the window settings.
///
/// Close requests are routed through `App::update` so the feedback state is
/// disposed before the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads preferences and builds the feedback manager from `Flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let (config, config_warning) = config::load_with_override(config_dir.clone());

        let random = match flags.seed {
            Some(seed) => Seeded::from_seed(seed),
            None => Seeded::from_entropy(),
        };
        let feedback =
            Feedback::new(random).with_default_duration(config.notifications.default_duration());

        let mut app = App {
            feedback,
            clock: WallClock::new(Instant::now()),
            theme_mode: flags.theme.unwrap_or(config.general.theme_mode),
            config,
            config_dir,
        };

        if let Some(warning) = config_warning {
            app.feedback.show(warning, Severity::Warning);
        }

        tracing::info!(
            theme = %app.theme_mode,
            seeded = flags.seed.is_some(),
            "patternboard started"
        );
        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.feedback.notification_count() {
            0 => "Patternboard".to_string(),
            count => format!("Patternboard ({count})"),
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(self.feedback.has_pending_timers());

        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let elapsed = self.clock.lap(Instant::now());
        self.feedback.advance(elapsed);

        match message {
            Message::Patterns(patterns_message) => {
                patterns::update(&mut self.feedback, patterns_message);
                Task::none()
            }
            Message::Notification(NotificationMessage::Dismiss(id)) => {
                self.feedback.dismiss(id);
                Task::none()
            }
            Message::CycleTheme => {
                self.cycle_theme();
                Task::none()
            }
            // The clock already advanced above; the tick only wakes the loop.
            Message::Tick(_instant) => Task::none(),
            Message::WindowCloseRequested(window_id) => {
                self.feedback.dispose();
                tracing::info!("feedback disposed, closing window");
                window::close(window_id)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            feedback: &self.feedback,
            theme_mode: self.theme_mode,
        })
    }

    /// Switches to the next theme mode and saves it as the new preference.
    fn cycle_theme(&mut self) {
        self.theme_mode = self.theme_mode.cycle();
        self.config.general.theme_mode = self.theme_mode;

        if let Err(err) = config::save_with_override(&self.config, self.config_dir.clone()) {
            tracing::warn!(error = %err, "failed to save settings");
            self.feedback
                .show(format!("Could not save settings: {err}"), Severity::Warning);
        }
    }
}
