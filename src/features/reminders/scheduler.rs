//! Reminder scheduling over a black-box notification backend.
//!
//! The backend owns delivery and permissions; this module owns the cadence
//! choice, the persisted preference, and the optimistic enable/disable toggle.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Storage key for the notification preference
pub const NOTIFICATION_STORAGE_KEY: &str = "notification-storage";

/// How often the contact reminder fires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

impl Frequency {
    /// Interval length in seconds
    pub fn seconds(&self) -> u64 {
        match self {
            Frequency::Daily => 86_400,
            Frequency::Weekly => 604_800,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(anyhow::anyhow!("Invalid reminder frequency: {}", s)),
        }
    }
}

/// A reminder the backend reports as scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub interval_secs: u64,
    pub repeating: bool,
}

/// Platform notification service, consumed as a black box.
///
/// `schedule` returns `false` when the platform refuses (typically a
/// permission denial); there is no richer error contract than that boolean.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    async fn schedule(&self, interval_secs: u64, repeating: bool) -> bool;
    async fn cancel_all(&self);
    async fn scheduled(&self) -> Vec<ScheduledReminder>;
}

/// Outcome of an optimistic toggle transition.
///
/// The toggle sits in a pending state while the backend call is in flight;
/// it resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend accepted; the optimistic state stands
    Confirmed,
    /// The backend refused; the optimistic state was reverted
    RolledBack,
}

/// Serialized shape of the persisted preference
#[derive(Debug, Default, Serialize, Deserialize)]
struct NotificationPreference {
    frequency: Frequency,
}

/// Schedules the recurring contact reminder
pub struct ReminderScheduler {
    backend: Arc<dyn NotificationBackend>,
    store: Arc<dyn KeyValueStore>,
    frequency: Frequency,
    enabled: bool,
}

impl ReminderScheduler {
    /// Restore the persisted frequency preference. Reminders start disabled
    /// until the user toggles them on.
    pub async fn load(backend: Arc<dyn NotificationBackend>, store: Arc<dyn KeyValueStore>) -> Self {
        let frequency = match store.get(NOTIFICATION_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<NotificationPreference>(&raw) {
                Ok(pref) => pref.frequency,
                Err(e) => {
                    warn!("Corrupt notification preference, using default: {e}");
                    Frequency::default()
                }
            },
            Ok(None) => Frequency::default(),
            Err(e) => {
                warn!("Failed to read notification preference, using default: {e}");
                Frequency::default()
            }
        };
        ReminderScheduler {
            backend,
            store,
            frequency,
            enabled: false,
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reminders the backend currently has scheduled
    pub async fn scheduled(&self) -> Vec<ScheduledReminder> {
        self.backend.scheduled().await
    }

    /// Flip the reminder toggle optimistically.
    ///
    /// The in-memory state changes first; a refusing backend rolls it back.
    pub async fn set_enabled(&mut self, enabled: bool) -> ToggleOutcome {
        self.enabled = enabled;
        if !enabled {
            self.backend.cancel_all().await;
            info!("Contact reminders disabled");
            return ToggleOutcome::Confirmed;
        }
        let outcome = self.reschedule().await;
        if outcome == ToggleOutcome::RolledBack {
            self.enabled = false;
        }
        outcome
    }

    /// Change the cadence, persisting the choice and rescheduling while the
    /// toggle is on. A refused reschedule rolls the toggle back off.
    pub async fn set_frequency(&mut self, frequency: Frequency) -> ToggleOutcome {
        self.frequency = frequency;
        self.persist_preference().await;
        if !self.enabled {
            return ToggleOutcome::Confirmed;
        }
        let outcome = self.reschedule().await;
        if outcome == ToggleOutcome::RolledBack {
            self.enabled = false;
        }
        outcome
    }

    /// Cancel-then-schedule, so repeated enables never stack reminders
    async fn reschedule(&self) -> ToggleOutcome {
        self.backend.cancel_all().await;
        if self.backend.schedule(self.frequency.seconds(), true).await {
            info!("Contact reminder scheduled {}", self.frequency);
            ToggleOutcome::Confirmed
        } else {
            warn!("Backend refused the reminder schedule, rolling back");
            ToggleOutcome::RolledBack
        }
    }

    async fn persist_preference(&self) {
        let pref = NotificationPreference {
            frequency: self.frequency,
        };
        match serde_json::to_string(&pref) {
            Ok(raw) => {
                if let Err(e) = self.store.set(NOTIFICATION_STORAGE_KEY, &raw).await {
                    warn!("Failed to persist notification preference: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize notification preference: {e}"),
        }
    }
}
