use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::models::note::Note;
use crate::services::storage::{self, StorageBackend, StoreError};

const NOTES_KEY: &str = "subscription-notes";

/// One note per subscription id; saving again keeps the creation time.
pub struct NotesStore {
    backend: Arc<dyn StorageBackend>,
    notes: RwLock<HashMap<String, Note>>,
}

impl NotesStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let notes = storage::load_or_default(backend.as_ref(), NOTES_KEY);
        Self {
            backend,
            notes: RwLock::new(notes),
        }
    }

    pub fn list(&self) -> Vec<Note> {
        self.notes.read().unwrap().values().cloned().collect()
    }

    pub fn get(&self, subscription_id: &str) -> Option<Note> {
        self.notes.read().unwrap().get(subscription_id).cloned()
    }

    pub fn has(&self, subscription_id: &str) -> bool {
        self.notes.read().unwrap().contains_key(subscription_id)
    }

    pub fn save_note(&self, subscription_id: &str, content: String) -> Result<Note, StoreError> {
        let now = Utc::now();
        let mut notes = self.notes.write().unwrap();
        let created_at = notes
            .get(subscription_id)
            .map(|n| n.created_at)
            .unwrap_or(now);
        let note = Note {
            subscription_id: subscription_id.to_string(),
            content,
            created_at,
            updated_at: now,
        };
        notes.insert(subscription_id.to_string(), note.clone());
        storage::save(self.backend.as_ref(), NOTES_KEY, &*notes)?;
        Ok(note)
    }

    pub fn delete(&self, subscription_id: &str) -> Result<bool, StoreError> {
        let mut notes = self.notes.write().unwrap();
        let removed = notes.remove(subscription_id).is_some();
        storage::save(self.backend.as_ref(), NOTES_KEY, &*notes)?;
        Ok(removed)
    }

    pub fn count(&self) -> usize {
        self.notes.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStorage;

    #[test]
    fn resaving_preserves_creation_time() {
        let store = NotesStore::new(Arc::new(MemoryStorage::new()));
        let first = store.save_note("netflix", "essai gratuit".to_string()).unwrap();
        let second = store.save_note("netflix", "résilier".to_string()).unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(store.count(), 1);
        assert_eq!(store.get("netflix").unwrap().content, "résilier");
    }

    #[test]
    fn delete_reports_presence() {
        let store = NotesStore::new(Arc::new(MemoryStorage::new()));
        store.save_note("spotify", "duo?".to_string()).unwrap();
        assert!(store.delete("spotify").unwrap());
        assert!(!store.delete("spotify").unwrap());
        assert!(!store.has("spotify"));
    }
}
