use std::sync::{Arc, RwLock};

use rust_decimal::Decimal;

use crate::models::budget::{Budget, BudgetUpdate, BudgetUsage};
use crate::services::storage::{self, StorageBackend, StoreError};

const BUDGET_KEY: &str = "subscription-budget";

/// The single per-user monthly budget. Disabled by default; updates are
/// partial merges over the stored value.
pub struct BudgetStore {
    backend: Arc<dyn StorageBackend>,
    budget: RwLock<Budget>,
}

impl BudgetStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let budget = storage::load_or_default(backend.as_ref(), BUDGET_KEY);
        Self {
            backend,
            budget: RwLock::new(budget),
        }
    }

    pub fn get(&self) -> Budget {
        self.budget.read().unwrap().clone()
    }

    pub fn update(&self, update: BudgetUpdate) -> Result<Budget, StoreError> {
        let mut budget = self.budget.write().unwrap();
        budget.merge(update);
        storage::save(self.backend.as_ref(), BUDGET_KEY, &*budget)?;
        Ok(budget.clone())
    }

    pub fn calculate_usage(&self, spent: Decimal) -> Option<BudgetUsage> {
        self.budget.read().unwrap().calculate_usage(spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStorage;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_to_disabled() {
        let store = BudgetStore::new(Arc::new(MemoryStorage::new()));
        let budget = store.get();
        assert!(!budget.enabled);
        assert_eq!(budget.alert_threshold, 80);
        assert!(store.calculate_usage(dec!(10)).is_none());
    }

    #[test]
    fn update_persists_across_reconstruction() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        {
            let store = BudgetStore::new(backend.clone());
            store
                .update(BudgetUpdate {
                    monthly: Some(dec!(100)),
                    alert_threshold: None,
                    enabled: Some(true),
                })
                .unwrap();
        }
        let reloaded = BudgetStore::new(backend);
        let usage = reloaded.calculate_usage(dec!(80)).unwrap();
        assert!(usage.is_near_threshold);
    }
}
