// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::config::DRIVER_TICK_MS;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Routes window close requests so the feedback state can be disposed first.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = event {
            Some(Message::WindowCloseRequested(window_id))
        } else {
            None
        }
    })
}

/// Creates a periodic tick subscription that drives pending timers.
///
/// Idle boards schedule nothing, so the tick only runs while timers are pending.
pub fn create_tick_subscription(has_pending_timers: bool) -> Subscription<Message> {
    if has_pending_timers {
        time::every(Duration::from_millis(DRIVER_TICK_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
