//! Contact domain type.
//!
//! Contacts are owned by the roster store; no other component mutates one in
//! place. Serialized field names stay camelCase so snapshots written by
//! earlier versions of the app remain readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::category::UNTAGGED;

/// A person the user keeps in touch with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Opaque unique identifier, assigned at creation and never changed
    pub id: String,
    /// Display name, unique case-insensitively within the roster
    pub name: String,
    /// User-set emphasis flag with no derived meaning
    pub should_contact: bool,
    /// Category name referencing the registry; the sentinel when never tagged
    #[serde(default = "default_contact_type")]
    pub contact_type: String,
    /// When the user last reached out; `None` means never contacted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<DateTime<Utc>>,
}

fn default_contact_type() -> String {
    UNTAGGED.to_string()
}

impl Contact {
    /// Build a new contact with a freshly minted identifier
    pub fn new(
        name: impl Into<String>,
        should_contact: bool,
        contact_type: impl Into<String>,
        last_contact: Option<DateTime<Utc>>,
    ) -> Self {
        Contact {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            should_contact,
            contact_type: contact_type.into(),
            last_contact,
        }
    }

    /// Whether the contact still carries the sentinel category
    pub fn is_untagged(&self) -> bool {
        self.contact_type == UNTAGGED
    }
}
