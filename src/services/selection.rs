use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::services::storage::{self, StorageBackend, StoreError};

const SELECTION_KEY: &str = "subscription-selection";

/// The user's selected subscriptions: catalog id mapped to the chosen plan
/// index. Created empty, mutated by the UI, never expires.
pub struct SelectionStore {
    backend: Arc<dyn StorageBackend>,
    selection: RwLock<HashMap<String, usize>>,
}

impl SelectionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let selection = storage::load_or_default(backend.as_ref(), SELECTION_KEY);
        Self {
            backend,
            selection: RwLock::new(selection),
        }
    }

    pub fn get(&self) -> HashMap<String, usize> {
        self.selection.read().unwrap().clone()
    }

    pub fn set_plan(&self, subscription_id: &str, plan_index: usize) -> Result<(), StoreError> {
        let mut selection = self.selection.write().unwrap();
        selection.insert(subscription_id.to_string(), plan_index);
        storage::save(self.backend.as_ref(), SELECTION_KEY, &*selection)
    }

    pub fn remove(&self, subscription_id: &str) -> Result<bool, StoreError> {
        let mut selection = self.selection.write().unwrap();
        let removed = selection.remove(subscription_id).is_some();
        storage::save(self.backend.as_ref(), SELECTION_KEY, &*selection)?;
        Ok(removed)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut selection = self.selection.write().unwrap();
        selection.clear();
        storage::save(self.backend.as_ref(), SELECTION_KEY, &*selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStorage;

    #[test]
    fn set_overwrites_the_plan_index() {
        let store = SelectionStore::new(Arc::new(MemoryStorage::new()));
        store.set_plan("netflix", 0).unwrap();
        store.set_plan("netflix", 2).unwrap();
        assert_eq!(store.get().get("netflix"), Some(&2));
    }

    #[test]
    fn remove_reports_whether_present() {
        let store = SelectionStore::new(Arc::new(MemoryStorage::new()));
        store.set_plan("netflix", 0).unwrap();
        assert!(store.remove("netflix").unwrap());
        assert!(!store.remove("netflix").unwrap());
    }

    #[test]
    fn selection_round_trips_through_storage() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        {
            let store = SelectionStore::new(backend.clone());
            store.set_plan("netflix", 1).unwrap();
            store.set_plan("spotify", 0).unwrap();
        }
        let reloaded = SelectionStore::new(backend);
        let selection = reloaded.get();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.get("netflix"), Some(&1));
    }
}
