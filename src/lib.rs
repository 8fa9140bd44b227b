// SPDX-License-Identifier: MPL-2.0
//! `patternboard` is a gallery of UI feedback patterns built with the Iced GUI
//! framework: toast notifications, cooldown buttons, loading and progress
//! states, error handling with retry, skeleton loading and animation cues.
//!
//! All transient state lives in [`feedback::Feedback`], which runs every
//! simulated wait on the virtual-time [`scheduler::TimerQueue`] and draws its
//! outcomes from an injectable [`random::RandomSource`]. The Iced front end in
//! [`app`] only renders snapshots and advances the clock.

#![doc(html_root_url = "https://docs.rs/patternboard/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod feedback;
pub mod random;
pub mod scheduler;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
