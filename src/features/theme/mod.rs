//! # Feature: Theme Preference
//!
//! Persisted light/dark/system choice. Rendering is the platform's job; this
//! only remembers what the user picked.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: true

use std::str::FromStr;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Storage key for the theme preference
pub const THEME_STORAGE_KEY: &str = "theme-storage";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
            ThemePreference::System => write!(f, "system"),
        }
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(anyhow::anyhow!("Invalid theme preference: {}", s)),
        }
    }
}

/// Serialized shape of the persisted preference
#[derive(Debug, Default, Serialize, Deserialize)]
struct ThemeState {
    preference: ThemePreference,
}

/// Remembers the user's theme choice across sessions
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    preference: ThemePreference,
}

impl ThemeStore {
    /// Restore the persisted preference, defaulting to `System` on missing or
    /// corrupt data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let preference = match store.get(THEME_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<ThemeState>(&raw) {
                Ok(state) => state.preference,
                Err(e) => {
                    warn!("Corrupt theme preference, using default: {e}");
                    ThemePreference::default()
                }
            },
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                warn!("Failed to read theme preference, using default: {e}");
                ThemePreference::default()
            }
        };
        ThemeStore { store, preference }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Apply and persist a new preference
    pub async fn set_preference(&mut self, preference: ThemePreference) {
        self.preference = preference;
        let state = ThemeState { preference };
        match serde_json::to_string(&state) {
            Ok(raw) => {
                if let Err(e) = self.store.set(THEME_STORAGE_KEY, &raw).await {
                    warn!("Failed to persist theme preference: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize theme preference: {e}"),
        }
    }
}
