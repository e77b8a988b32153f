use std::sync::{Arc, RwLock};

use chrono::Utc;

use crate::models::history::{HistoryItem, MAX_HISTORY_ITEMS};
use crate::services::storage::{self, StorageBackend, StoreError};

const HISTORY_KEY: &str = "subscription-history";

/// Recently viewed subscriptions, newest first, capped at ten.
pub struct HistoryStore {
    backend: Arc<dyn StorageBackend>,
    items: RwLock<Vec<HistoryItem>>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let items = storage::load_or_default(backend.as_ref(), HISTORY_KEY);
        Self {
            backend,
            items: RwLock::new(items),
        }
    }

    pub fn list(&self) -> Vec<HistoryItem> {
        self.items.read().unwrap().clone()
    }

    /// Records a view. An id already in the list moves to the front with a
    /// fresh timestamp instead of appearing twice.
    pub fn add(&self, id: &str, name: &str, logo: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().unwrap();
        items.retain(|item| item.id != id);
        items.insert(
            0,
            HistoryItem {
                id: id.to_string(),
                name: name.to_string(),
                logo: logo.to_string(),
                timestamp: Utc::now(),
            },
        );
        items.truncate(MAX_HISTORY_ITEMS);
        storage::save(self.backend.as_ref(), HISTORY_KEY, &*items)
    }

    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut items = self.items.write().unwrap();
        items.retain(|item| item.id != id);
        storage::save(self.backend.as_ref(), HISTORY_KEY, &*items)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut items = self.items.write().unwrap();
        items.clear();
        storage::save(self.backend.as_ref(), HISTORY_KEY, &*items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStorage;

    fn store() -> HistoryStore {
        HistoryStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn newest_entries_come_first() {
        let s = store();
        s.add("netflix", "Netflix", "N").unwrap();
        s.add("spotify", "Spotify", "S").unwrap();
        let items = s.list();
        assert_eq!(items[0].id, "spotify");
        assert_eq!(items[1].id, "netflix");
    }

    #[test]
    fn readding_moves_to_front_without_duplicating() {
        let s = store();
        s.add("netflix", "Netflix", "N").unwrap();
        s.add("spotify", "Spotify", "S").unwrap();
        s.add("netflix", "Netflix", "N").unwrap();

        let items = s.list();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "netflix");
    }

    #[test]
    fn never_grows_past_the_cap() {
        let s = store();
        for i in 0..25 {
            s.add(&format!("svc-{}", i), "Svc", "S").unwrap();
        }
        let items = s.list();
        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        // Most recent survives, oldest are gone.
        assert_eq!(items[0].id, "svc-24");
        assert!(items.iter().all(|i| i.id != "svc-0"));
    }
}
