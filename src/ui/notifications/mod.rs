// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to confirm actions (save success, errors,
//! cooldown started) without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager`, the ordered list of live notifications
//! - [`toast`] - Toast widget component for rendering notifications
//!
//! Lifetimes are not handled here: [`Feedback`](crate::feedback::Feedback)
//! schedules one expiry timer per notification and removes it when it fires.
//!
//! # Usage
//!
//! ```ignore
//! let overlay = Toast::view_overlay(feedback.notifications(), feedback.now())
//!     .map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::{accent_color, Toast};
