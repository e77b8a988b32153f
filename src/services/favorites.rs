use std::sync::{Arc, RwLock};

use crate::services::storage::{self, StorageBackend, StoreError};

const FAVORITES_KEY: &str = "subscription-favorites";

/// Favorite subscription ids, kept in insertion order.
pub struct FavoritesStore {
    backend: Arc<dyn StorageBackend>,
    favorites: RwLock<Vec<String>>,
}

impl FavoritesStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let favorites = storage::load_or_default(backend.as_ref(), FAVORITES_KEY);
        Self {
            backend,
            favorites: RwLock::new(favorites),
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.favorites.read().unwrap().clone()
    }

    pub fn is_favorite(&self, subscription_id: &str) -> bool {
        self.favorites
            .read()
            .unwrap()
            .iter()
            .any(|id| id == subscription_id)
    }

    /// Adds the id if absent, removes it otherwise. Returns whether the id
    /// is a favorite after the call.
    pub fn toggle(&self, subscription_id: &str) -> Result<bool, StoreError> {
        let mut favorites = self.favorites.write().unwrap();
        let now_favorite = if let Some(pos) = favorites.iter().position(|id| id == subscription_id)
        {
            favorites.remove(pos);
            false
        } else {
            favorites.push(subscription_id.to_string());
            true
        };
        storage::save(self.backend.as_ref(), FAVORITES_KEY, &*favorites)?;
        Ok(now_favorite)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut favorites = self.favorites.write().unwrap();
        favorites.clear();
        storage::save(self.backend.as_ref(), FAVORITES_KEY, &*favorites)
    }

    pub fn count(&self) -> usize {
        self.favorites.read().unwrap().len()
    }
}
