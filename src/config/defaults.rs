// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for the timings and
//! messages used by the feedback manager. Constants are organized by category.
//!
//! # Categories
//!
//! - **Notifications**: Toast lifetime bounds
//! - **Operations**: Fixed delays and tick intervals per operation kind
//! - **Retry**: Retry delay and simulated failure rate
//! - **Messages**: User-facing notice texts
//! - **Driver**: Wall-clock tick used by the GUI

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default toast lifetime (in milliseconds).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 4000;

/// Minimum configurable toast lifetime (in milliseconds).
pub const MIN_NOTIFICATION_DURATION_MS: u64 = 500;

/// Maximum configurable toast lifetime (in milliseconds).
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 30_000;

/// Lifetime of the short informational notices (cooldown, retry).
pub const SHORT_NOTICE_DURATION_MS: u64 = 2000;

// ==========================================================================
// Operation Defaults
// ==========================================================================

/// Simulated save duration (in milliseconds).
pub const SAVE_DELAY_MS: u64 = 2000;

/// Simulated delete duration (in milliseconds).
pub const DELETE_DELAY_MS: u64 = 1500;

/// Simulated connection attempt duration (in milliseconds).
pub const CONNECT_DELAY_MS: u64 = 1500;

/// Skeleton loading duration (in milliseconds).
pub const REFRESH_DELAY_MS: u64 = 3000;

/// Upload progress tick interval (in milliseconds).
pub const UPLOAD_TICK_MS: u64 = 200;

/// Largest progress increment per upload tick (percent).
pub const UPLOAD_MAX_STEP: f32 = 15.0;

/// Smallest progress increment per upload tick (percent).
pub const UPLOAD_MIN_STEP: f32 = 0.5;

/// Cooldown length (in one-second ticks).
pub const COOLDOWN_SECS: u32 = 5;

/// Bounce animation cue length (in milliseconds).
pub const BOUNCE_MS: u64 = 600;

/// Pulse animation cue length (in milliseconds).
pub const PULSE_MS: u64 = 800;

/// Wobble animation cue length (in milliseconds).
pub const WOBBLE_MS: u64 = 600;

// ==========================================================================
// Retry Defaults
// ==========================================================================

/// Delay before a retry resolves (in milliseconds).
pub const RETRY_DELAY_MS: u64 = 1500;

/// Probability that a simulated attempt fails.
/// A sample below this value is a failure (70% success rate).
pub const FAILURE_CHANCE: f64 = 0.3;

// ==========================================================================
// Messages
// ==========================================================================

pub const SAVE_DONE_MESSAGE: &str = "Data saved successfully!";
pub const DELETE_DONE_MESSAGE: &str = "Item deleted successfully!";
pub const UPLOAD_DONE_MESSAGE: &str = "File uploaded successfully!";
pub const COOLDOWN_STARTED_MESSAGE: &str = "Action executed! Cooldown started.";
pub const COOLDOWN_DONE_MESSAGE: &str = "Cooldown complete! Ready to use again.";
pub const OPERATION_DONE_MESSAGE: &str = "Operation completed successfully!";
pub const RETRYING_MESSAGE: &str = "Retrying operation...";
pub const FAILURE_NOTICE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Error text shown in the error panel of a failed operation.
pub const FAILURE_MESSAGE: &str =
    "Failed to connect to the server. Please check your internet connection and try again.";

// ==========================================================================
// Driver Defaults
// ==========================================================================

/// Wall-clock tick interval while timers are pending (in milliseconds).
pub const DRIVER_TICK_MS: u64 = 50;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Notification validation
    assert!(MIN_NOTIFICATION_DURATION_MS > 0);
    assert!(MAX_NOTIFICATION_DURATION_MS >= MIN_NOTIFICATION_DURATION_MS);
    assert!(DEFAULT_NOTIFICATION_DURATION_MS >= MIN_NOTIFICATION_DURATION_MS);
    assert!(DEFAULT_NOTIFICATION_DURATION_MS <= MAX_NOTIFICATION_DURATION_MS);

    // Operation validation
    assert!(UPLOAD_TICK_MS > 0);
    assert!(UPLOAD_MAX_STEP > 0.0);
    assert!(UPLOAD_MAX_STEP <= 100.0);
    assert!(UPLOAD_MIN_STEP > 0.0);
    assert!(UPLOAD_MIN_STEP <= UPLOAD_MAX_STEP);
    assert!(COOLDOWN_SECS > 0);

    // Retry validation
    assert!(FAILURE_CHANCE >= 0.0);
    assert!(FAILURE_CHANCE < 1.0);

    // The driver must tick faster than the shortest timer it drives.
    assert!(DRIVER_TICK_MS > 0);
    assert!(DRIVER_TICK_MS <= UPLOAD_TICK_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_defaults_are_valid() {
        assert_eq!(DEFAULT_NOTIFICATION_DURATION_MS, 4000);
        assert!(DEFAULT_NOTIFICATION_DURATION_MS >= MIN_NOTIFICATION_DURATION_MS);
        assert!(DEFAULT_NOTIFICATION_DURATION_MS <= MAX_NOTIFICATION_DURATION_MS);
        assert!(SHORT_NOTICE_DURATION_MS < DEFAULT_NOTIFICATION_DURATION_MS);
    }

    #[test]
    fn cooldown_defaults_are_valid() {
        assert_eq!(COOLDOWN_SECS, 5);
    }

    #[test]
    fn retry_defaults_match_success_rate() {
        assert_eq!(RETRY_DELAY_MS, 1500);
        assert!((1.0 - FAILURE_CHANCE - 0.7).abs() < 1e-9);
    }

    #[test]
    fn upload_defaults_are_valid() {
        assert_eq!(UPLOAD_TICK_MS, 200);
        assert_eq!(UPLOAD_MAX_STEP, 15.0);
        // Bounds a full upload at 200 ticks.
        assert!(100.0 / UPLOAD_MIN_STEP <= 200.0);
    }
}
