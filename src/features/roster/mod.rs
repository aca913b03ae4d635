//! # Feature: Contact Roster
//!
//! The authoritative contact collection: create/update/delete with change
//! events, the duplicate-name guard, and snapshot persistence through the
//! key-value store.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Background persistence task replaces inline writes
//! - 1.1.0: Change events over a broadcast channel
//! - 1.0.0: Initial release with the in-memory roster

pub mod store;
pub mod validate;

pub use store::{ContactStore, RosterEvent, CONTACT_STORAGE_KEY};
pub use validate::{ensure_unique_name, normalize_name};
