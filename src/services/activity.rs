use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};

use crate::models::activity::{ActivityEntry, LogActivityRequest, MAX_ACTIVITY_ENTRIES};
use crate::services::storage::{self, StorageBackend, StoreError};

const ACTIVITY_KEY: &str = "subscription-activity-log";

/// Append-only journal of user actions, oldest entries trimmed past 100.
pub struct ActivityLogStore {
    backend: Arc<dyn StorageBackend>,
    entries: RwLock<Vec<ActivityEntry>>,
}

impl ActivityLogStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let entries = storage::load_or_default(backend.as_ref(), ACTIVITY_KEY);
        Self {
            backend,
            entries: RwLock::new(entries),
        }
    }

    pub fn list(&self) -> Vec<ActivityEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn log(&self, request: LogActivityRequest) -> Result<ActivityEntry, StoreError> {
        let entry = ActivityEntry::new(request);
        let mut entries = self.entries.write().unwrap();
        entries.push(entry.clone());
        if entries.len() > MAX_ACTIVITY_ENTRIES {
            let excess = entries.len() - MAX_ACTIVITY_ENTRIES;
            entries.drain(..excess);
        }
        storage::save(self.backend.as_ref(), ACTIVITY_KEY, &*entries)?;
        Ok(entry)
    }

    pub fn recent(&self, days: u32) -> Vec<ActivityEntry> {
        let cutoff = Utc::now() - Duration::days(days as i64);
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    pub fn for_subscription(&self, subscription_id: &str) -> Vec<ActivityEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.subscription_id.as_deref() == Some(subscription_id))
            .cloned()
            .collect()
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
        storage::save(self.backend.as_ref(), ACTIVITY_KEY, &*entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityAction;
    use crate::services::storage::MemoryStorage;

    fn store() -> ActivityLogStore {
        ActivityLogStore::new(Arc::new(MemoryStorage::new()))
    }

    fn entry(action: ActivityAction, sub: Option<&str>) -> LogActivityRequest {
        LogActivityRequest {
            action,
            details: "test".to_string(),
            subscription_id: sub.map(|s| s.to_string()),
            subscription_name: None,
            previous_value: None,
            new_value: None,
        }
    }

    #[test]
    fn log_caps_at_one_hundred_trimming_oldest() {
        let s = store();
        for i in 0..110 {
            let mut req = entry(ActivityAction::Add, None);
            req.details = format!("entry {}", i);
            s.log(req).unwrap();
        }
        let entries = s.list();
        assert_eq!(entries.len(), MAX_ACTIVITY_ENTRIES);
        assert_eq!(entries[0].details, "entry 10");
        assert_eq!(entries.last().unwrap().details, "entry 109");
    }

    #[test]
    fn filter_by_subscription() {
        let s = store();
        s.log(entry(ActivityAction::Favorite, Some("netflix"))).unwrap();
        s.log(entry(ActivityAction::Note, Some("spotify"))).unwrap();
        s.log(entry(ActivityAction::Budget, None)).unwrap();

        let netflix = s.for_subscription("netflix");
        assert_eq!(netflix.len(), 1);
        assert_eq!(netflix[0].action, ActivityAction::Favorite);
    }

    #[test]
    fn recent_includes_fresh_entries() {
        let s = store();
        s.log(entry(ActivityAction::Add, None)).unwrap();
        assert_eq!(s.recent(7).len(), 1);
    }
}
