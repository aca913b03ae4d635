// Core layer - domain types and validation
pub mod core;

// Features layer - all feature modules
pub mod features;

// Infrastructure - durable key-value storage
pub mod storage;

// Re-export core domain types
pub use crate::core::{Category, CategoryFilter, CategoryRegistry, Contact, ValidationError};

// Re-export feature items
pub use crate::features::{
    // Recency grouping
    group_by_recency, ContactSection, RecencyBucket,
    // Reminders
    Frequency, NotificationBackend, ReminderScheduler, ScheduledReminder, ToggleOutcome,
    // Roster
    ContactStore, RosterEvent,
    // Search
    available_filters, filter_contacts,
    // Theme
    ThemePreference, ThemeStore,
};

// Re-export storage items
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
