//! # Feature: Reminders
//!
//! Recurring "reach out to your contacts" reminders at a user-chosen cadence,
//! delivered through a platform notification backend.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: true
//!
//! ## Changelog
//! - 1.2.0: Optimistic toggle with rollback on backend refusal
//! - 1.1.0: Weekly cadence
//! - 1.0.0: Initial release with the daily reminder

pub mod scheduler;

pub use scheduler::{
    Frequency, NotificationBackend, ReminderScheduler, ScheduledReminder, ToggleOutcome,
    NOTIFICATION_STORAGE_KEY,
};
