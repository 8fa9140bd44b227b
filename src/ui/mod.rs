// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Follows the Elm-style "state down, messages up" pattern: views borrow the
//! [`Feedback`](crate::feedback::Feedback) snapshot and emit messages that
//! `App::update` applies.
//!
//! - [`patterns`] - The pattern board screen
//! - [`notifications`] - Toast notification list and widget
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod notifications;
pub mod patterns;
pub mod styles;
pub mod theming;
