//! # Features Layer
//!
//! All feature modules of the contact tracker core: the roster itself, the
//! pure view engines (recency grouping and search), reminder scheduling, and
//! the theme preference.

pub mod recency;
pub mod reminders;
pub mod roster;
pub mod search;
pub mod theme;

pub use recency::{group_by_recency, ContactSection, RecencyBucket};
pub use reminders::{
    Frequency, NotificationBackend, ReminderScheduler, ScheduledReminder, ToggleOutcome,
};
pub use roster::{ensure_unique_name, ContactStore, RosterEvent};
pub use search::{available_filters, filter_contacts};
pub use theme::{ThemePreference, ThemeStore};
