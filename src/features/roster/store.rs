//! In-memory contact store with background snapshot persistence.
//!
//! Mutations apply to the in-memory roster immediately; the full collection is
//! then snapshotted and handed to a background task that writes it through the
//! key-value store, so callers never wait on durable storage.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

use crate::core::{Contact, ValidationError};
use crate::features::roster::validate::{ensure_unique_name, normalize_name};
use crate::storage::KeyValueStore;

/// Storage key for the roster snapshot
pub const CONTACT_STORAGE_KEY: &str = "contact-storage";

/// Capacity of the change-event channel; laggards miss events, not state
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Delay before the single persistence retry
const PERSIST_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Change notification emitted after every successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    Added { id: String },
    Updated { id: String },
    Removed { id: String },
}

/// Serialized shape of the persisted roster
#[derive(Debug, Default, Serialize, Deserialize)]
struct RosterSnapshot {
    contacts: Vec<Contact>,
}

/// The authoritative contact collection.
///
/// Constructed once at process start and passed by handle to every consumer;
/// views learn about changes through [`ContactStore::subscribe`], never
/// through ambient globals.
pub struct ContactStore {
    contacts: Vec<Contact>,
    persist_tx: mpsc::UnboundedSender<String>,
    events: broadcast::Sender<RosterEvent>,
}

impl ContactStore {
    /// Load the roster from durable storage, falling back to an empty roster
    /// on missing or corrupt data. Never fatal.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let contacts = match store.get(CONTACT_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<RosterSnapshot>(&raw) {
                Ok(snapshot) => snapshot.contacts,
                Err(e) => {
                    warn!("Corrupt roster snapshot, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read roster snapshot, starting empty: {e}");
                Vec::new()
            }
        };

        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        // Snapshot writes happen off the caller's path, one at a time
        tokio::spawn(Self::background_persister(store, persist_rx));

        debug!("Roster loaded with {} contact(s)", contacts.len());
        ContactStore {
            contacts,
            persist_tx,
            events,
        }
    }

    /// All contacts in insertion order
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a contact by id
    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events.subscribe()
    }

    /// Duplicate-name guard for the write path.
    ///
    /// Callers run this before [`ContactStore::add`] or
    /// [`ContactStore::update`]; pass the id of the contact being edited so it
    /// may keep its own name.
    pub fn ensure_unique_name(
        &self,
        candidate: &str,
        exclude_id: Option<&str>,
    ) -> Result<(), ValidationError> {
        ensure_unique_name(&self.contacts, candidate, exclude_id)
    }

    /// Append a new contact and return it.
    ///
    /// Only the non-empty-name constraint is enforced here; the duplicate-name
    /// guard belongs to the caller (see [`ContactStore::ensure_unique_name`]),
    /// so this always succeeds given a usable name.
    pub fn add(
        &mut self,
        name: &str,
        should_contact: bool,
        contact_type: &str,
        last_contact: Option<DateTime<Utc>>,
    ) -> Result<Contact, ValidationError> {
        let name = normalize_name(name)?;
        let contact = Contact::new(name, should_contact, contact_type, last_contact);
        self.contacts.push(contact.clone());
        self.changed(RosterEvent::Added {
            id: contact.id.clone(),
        });
        Ok(contact)
    }

    /// Replace every mutable field of the contact with the given id.
    ///
    /// Unknown ids are a silent no-op so updates stay idempotent under races
    /// with remove.
    pub fn update(
        &mut self,
        id: &str,
        name: &str,
        should_contact: bool,
        contact_type: &str,
        last_contact: Option<DateTime<Utc>>,
    ) -> Result<(), ValidationError> {
        let name = normalize_name(name)?;
        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            debug!("Update for unknown contact {id}, ignoring");
            return Ok(());
        };
        contact.name = name;
        contact.should_contact = should_contact;
        contact.contact_type = contact_type.to_string();
        contact.last_contact = last_contact;
        self.changed(RosterEvent::Updated { id: id.to_string() });
        Ok(())
    }

    /// Remove the contact with the given id; unknown ids are a no-op
    pub fn remove(&mut self, id: &str) {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        if self.contacts.len() == before {
            debug!("Remove for unknown contact {id}, ignoring");
            return;
        }
        self.changed(RosterEvent::Removed { id: id.to_string() });
    }

    /// Emit a change event and queue a snapshot write
    fn changed(&self, event: RosterEvent) {
        // Send only fails with zero subscribers, which is fine
        let _ = self.events.send(event);
        self.queue_persist();
    }

    fn queue_persist(&self) {
        let snapshot = RosterSnapshot {
            contacts: self.contacts.clone(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => {
                if let Err(e) = self.persist_tx.send(raw) {
                    warn!("Failed to queue roster snapshot: {e}");
                }
            }
            Err(e) => error!("Failed to serialize roster snapshot: {e}"),
        }
    }

    /// Background task that writes queued snapshots through the key-value
    /// store. A failed write gets one retry; after that the snapshot is
    /// dropped, since the next mutation queues a fresh full snapshot anyway.
    async fn background_persister(
        store: Arc<dyn KeyValueStore>,
        mut receiver: mpsc::UnboundedReceiver<String>,
    ) {
        while let Some(snapshot) = receiver.recv().await {
            if let Err(e) = store.set(CONTACT_STORAGE_KEY, &snapshot).await {
                warn!("Roster snapshot write failed, retrying once: {e}");
                tokio::time::sleep(PERSIST_RETRY_DELAY).await;
                if let Err(e) = store.set(CONTACT_STORAGE_KEY, &snapshot).await {
                    error!("Roster snapshot write failed after retry, dropping: {e}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UNTAGGED;
    use crate::storage::MemoryStore;
    use tokio::sync::broadcast::error::TryRecvError;

    async fn empty_store() -> (ContactStore, Arc<MemoryStore>) {
        let kv = Arc::new(MemoryStore::new());
        let store = ContactStore::load(kv.clone()).await;
        (store, kv)
    }

    /// Poll until the background persister has written a snapshot
    async fn wait_for_snapshot(kv: &MemoryStore) -> String {
        for _ in 0..100 {
            if let Some(raw) = kv.peek(CONTACT_STORAGE_KEY) {
                return raw;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("snapshot was never persisted");
    }

    #[tokio::test]
    async fn test_add_appends_in_insertion_order() {
        let (mut store, _kv) = empty_store().await;
        store.add("Eve", false, UNTAGGED, None).unwrap();
        store.add("Adam", true, "Family", None).unwrap();

        let names: Vec<&str> = store.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eve", "Adam"]);
        assert!(store.contacts()[1].should_contact);
        assert_eq!(store.contacts()[1].contact_type, "Family");
    }

    #[tokio::test]
    async fn test_add_trims_and_rejects_empty_names() {
        let (mut store, _kv) = empty_store().await;
        let contact = store.add("  Eve  ", false, UNTAGGED, None).unwrap();
        assert_eq!(contact.name, "Eve");
        assert_eq!(
            store.add("   ", false, UNTAGGED, None),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(store.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_rejected_by_the_guard() {
        let (mut store, _kv) = empty_store().await;
        store.add("Eve", false, UNTAGGED, None).unwrap();

        // The write path runs the guard first and stops on failure
        let err = store.ensure_unique_name("eve", None).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { .. }));
        assert_eq!(store.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_all_mutable_fields() {
        let (mut store, _kv) = empty_store().await;
        let contact = store.add("Eve", false, UNTAGGED, None).unwrap();
        let when = Utc::now();

        store
            .update(&contact.id, "Eve Adams", true, "Family", Some(when))
            .unwrap();

        let updated = store.get(&contact.id).unwrap();
        assert_eq!(updated.name, "Eve Adams");
        assert!(updated.should_contact);
        assert_eq!(updated.contact_type, "Family");
        assert_eq!(updated.last_contact, Some(when));
        // Identity never changes
        assert_eq!(updated.id, contact.id);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_a_noop() {
        let (mut store, _kv) = empty_store().await;
        store.add("Eve", false, UNTAGGED, None).unwrap();
        store
            .update("missing", "Someone", false, UNTAGGED, None)
            .unwrap();
        assert_eq!(store.contacts().len(), 1);
        assert_eq!(store.contacts()[0].name, "Eve");
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_a_noop() {
        let (mut store, _kv) = empty_store().await;
        store.add("Eve", false, UNTAGGED, None).unwrap();
        store.remove("missing");
        assert_eq!(store.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_deletes_by_id() {
        let (mut store, _kv) = empty_store().await;
        let eve = store.add("Eve", false, UNTAGGED, None).unwrap();
        store.add("Adam", false, UNTAGGED, None).unwrap();
        store.remove(&eve.id);

        let names: Vec<&str> = store.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Adam"]);
    }

    #[tokio::test]
    async fn test_events_report_each_mutation() {
        let (mut store, _kv) = empty_store().await;
        let mut events = store.subscribe();

        let contact = store.add("Eve", false, UNTAGGED, None).unwrap();
        store
            .update(&contact.id, "Eve", true, UNTAGGED, None)
            .unwrap();
        store.remove(&contact.id);

        assert_eq!(
            events.try_recv().unwrap(),
            RosterEvent::Added {
                id: contact.id.clone()
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            RosterEvent::Updated {
                id: contact.id.clone()
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            RosterEvent::Removed {
                id: contact.id.clone()
            }
        );
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_noop_mutations_emit_no_events() {
        let (mut store, _kv) = empty_store().await;
        let mut events = store.subscribe();
        store.remove("missing");
        store
            .update("missing", "Someone", false, UNTAGGED, None)
            .unwrap();
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_mutations_reach_durable_storage() {
        let (mut store, kv) = empty_store().await;
        store.add("Eve", false, "Friend", None).unwrap();

        let raw = wait_for_snapshot(&kv).await;
        let snapshot: RosterSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.contacts.len(), 1);
        assert_eq!(snapshot.contacts[0].name, "Eve");
        assert_eq!(snapshot.contacts[0].contact_type, "Friend");
    }

    #[tokio::test]
    async fn test_load_restores_persisted_contacts() {
        let kv = Arc::new(MemoryStore::new());
        {
            let mut store = ContactStore::load(kv.clone()).await;
            store.add("Eve", true, "Family", None).unwrap();
            wait_for_snapshot(&kv).await;
        }

        let reloaded = ContactStore::load(kv).await;
        assert_eq!(reloaded.contacts().len(), 1);
        assert_eq!(reloaded.contacts()[0].name, "Eve");
        assert!(reloaded.contacts()[0].should_contact);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_empty() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(CONTACT_STORAGE_KEY, "not json at all").await.unwrap();

        let store = ContactStore::load(kv).await;
        assert!(store.contacts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_is_retried_once() {
        let (mut store, kv) = empty_store().await;
        kv.fail_next_writes(1);
        store.add("Eve", false, UNTAGGED, None).unwrap();

        // First attempt fails, the retry lands
        let raw = wait_for_snapshot(&kv).await;
        assert!(raw.contains("Eve"));
        assert_eq!(store.contacts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_snapshot_self_heals_on_next_mutation() {
        let (mut store, kv) = empty_store().await;

        // Both the write and its retry fail; the snapshot is dropped
        kv.fail_next_writes(2);
        store.add("Eve", false, UNTAGGED, None).unwrap();

        // The next mutation snapshots the full roster again
        store.add("Adam", false, UNTAGGED, None).unwrap();
        let raw = wait_for_snapshot(&kv).await;
        let snapshot: RosterSnapshot = serde_json::from_str(&raw).unwrap();
        let names: Vec<&str> = snapshot.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eve", "Adam"]);
    }
}
