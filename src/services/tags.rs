use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::models::tag::{CreateTagRequest, Tag};
use crate::services::storage::{self, StorageBackend, StoreError};

const TAGS_KEY: &str = "subscription-tags";
const MAPPING_KEY: &str = "subscription-tags-mapping";

/// Tag registry plus the subscription-to-tags assignment map. The two live
/// under separate storage keys and persist independently.
pub struct TagsStore {
    backend: Arc<dyn StorageBackend>,
    tags: RwLock<Vec<Tag>>,
    mapping: RwLock<HashMap<String, Vec<Uuid>>>,
}

impl TagsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let tags = storage::load_or_default(backend.as_ref(), TAGS_KEY);
        let mapping = storage::load_or_default(backend.as_ref(), MAPPING_KEY);
        Self {
            backend,
            tags: RwLock::new(tags),
            mapping: RwLock::new(mapping),
        }
    }

    pub fn list(&self) -> Vec<Tag> {
        self.tags.read().unwrap().clone()
    }

    pub fn create(&self, request: CreateTagRequest) -> Result<Tag, StoreError> {
        let tag = Tag::new(request);
        let mut tags = self.tags.write().unwrap();
        tags.push(tag.clone());
        storage::save(self.backend.as_ref(), TAGS_KEY, &*tags)?;
        Ok(tag)
    }

    /// Deletes a tag and removes it from every subscription it was on.
    pub fn delete(&self, tag_id: Uuid) -> Result<bool, StoreError> {
        let mut tags = self.tags.write().unwrap();
        let before = tags.len();
        tags.retain(|t| t.id != tag_id);
        let removed = tags.len() != before;
        storage::save(self.backend.as_ref(), TAGS_KEY, &*tags)?;

        if removed {
            let mut mapping = self.mapping.write().unwrap();
            for assigned in mapping.values_mut() {
                assigned.retain(|id| *id != tag_id);
            }
            storage::save(self.backend.as_ref(), MAPPING_KEY, &*mapping)?;
        }
        Ok(removed)
    }

    pub fn assign(&self, subscription_id: &str, tag_id: Uuid) -> Result<(), StoreError> {
        let mut mapping = self.mapping.write().unwrap();
        let assigned = mapping.entry(subscription_id.to_string()).or_default();
        if !assigned.contains(&tag_id) {
            assigned.push(tag_id);
        }
        storage::save(self.backend.as_ref(), MAPPING_KEY, &*mapping)
    }

    pub fn unassign(&self, subscription_id: &str, tag_id: Uuid) -> Result<(), StoreError> {
        let mut mapping = self.mapping.write().unwrap();
        if let Some(assigned) = mapping.get_mut(subscription_id) {
            assigned.retain(|id| *id != tag_id);
        }
        storage::save(self.backend.as_ref(), MAPPING_KEY, &*mapping)
    }

    /// Resolved tags of one subscription, in registry order.
    pub fn tags_for(&self, subscription_id: &str) -> Vec<Tag> {
        let mapping = self.mapping.read().unwrap();
        let Some(assigned) = mapping.get(subscription_id) else {
            return Vec::new();
        };
        self.tags
            .read()
            .unwrap()
            .iter()
            .filter(|t| assigned.contains(&t.id))
            .cloned()
            .collect()
    }

    /// Ids of every subscription carrying `tag_id`.
    pub fn subscriptions_with(&self, tag_id: Uuid) -> Vec<String> {
        self.mapping
            .read()
            .unwrap()
            .iter()
            .filter(|(_, assigned)| assigned.contains(&tag_id))
            .map(|(id, _)| id.clone())
            .collect()
    }
}
