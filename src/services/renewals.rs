use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{Duration, NaiveDate};

use crate::models::renewal::{CreateRenewalRequest, Renewal, UpdateRenewalRequest};
use crate::services::storage::{self, StorageBackend, StoreError};

const RENEWALS_KEY: &str = "subscription-renewals";

/// Renewal reminders keyed by subscription id, upsert semantics.
pub struct RenewalStore {
    backend: Arc<dyn StorageBackend>,
    renewals: RwLock<HashMap<String, Renewal>>,
}

impl RenewalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let renewals = storage::load_or_default(backend.as_ref(), RENEWALS_KEY);
        Self {
            backend,
            renewals: RwLock::new(renewals),
        }
    }

    pub fn list(&self) -> Vec<Renewal> {
        self.renewals.read().unwrap().values().cloned().collect()
    }

    pub fn get(&self, subscription_id: &str) -> Option<Renewal> {
        self.renewals.read().unwrap().get(subscription_id).cloned()
    }

    pub fn upsert(&self, request: CreateRenewalRequest) -> Result<Renewal, StoreError> {
        let renewal = Renewal::new(request);
        let mut renewals = self.renewals.write().unwrap();
        renewals.insert(renewal.subscription_id.clone(), renewal.clone());
        storage::save(self.backend.as_ref(), RENEWALS_KEY, &*renewals)?;
        Ok(renewal)
    }

    pub fn update(
        &self,
        subscription_id: &str,
        update: UpdateRenewalRequest,
    ) -> Result<Option<Renewal>, StoreError> {
        let mut renewals = self.renewals.write().unwrap();
        let Some(renewal) = renewals.get_mut(subscription_id) else {
            return Ok(None);
        };
        renewal.merge(update);
        let updated = renewal.clone();
        storage::save(self.backend.as_ref(), RENEWALS_KEY, &*renewals)?;
        Ok(Some(updated))
    }

    pub fn delete(&self, subscription_id: &str) -> Result<bool, StoreError> {
        let mut renewals = self.renewals.write().unwrap();
        let removed = renewals.remove(subscription_id).is_some();
        storage::save(self.backend.as_ref(), RENEWALS_KEY, &*renewals)?;
        Ok(removed)
    }

    /// Renewals falling inside `[today, today + days_ahead]`, soonest first.
    pub fn upcoming(&self, today: NaiveDate, days_ahead: u32) -> Vec<Renewal> {
        let horizon = today + Duration::days(days_ahead as i64);
        let mut upcoming: Vec<Renewal> = self
            .renewals
            .read()
            .unwrap()
            .values()
            .filter(|r| r.next_renewal_date >= today && r.next_renewal_date <= horizon)
            .cloned()
            .collect();
        upcoming.sort_by_key(|r| r.next_renewal_date);
        upcoming
    }

    /// Renewals whose alert window covers `today`.
    pub fn alerts_due(&self, today: NaiveDate) -> Vec<Renewal> {
        let mut due: Vec<Renewal> = self
            .renewals
            .read()
            .unwrap()
            .values()
            .filter(|r| r.alert_due(today))
            .cloned()
            .collect();
        due.sort_by_key(|r| r.next_renewal_date);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::renewal::BillingCycle;
    use crate::services::storage::MemoryStorage;
    use rust_decimal_macros::dec;

    fn store() -> RenewalStore {
        RenewalStore::new(Arc::new(MemoryStorage::new()))
    }

    fn request(id: &str, date: NaiveDate, alert_days: u32) -> CreateRenewalRequest {
        CreateRenewalRequest {
            subscription_id: id.to_string(),
            subscription_name: id.to_string(),
            next_renewal_date: date,
            billing_cycle: BillingCycle::Monthly,
            price: dec!(9.99),
            alert_days_before: alert_days,
            auto_renew: true,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn upsert_replaces_by_subscription_id() {
        let s = store();
        s.upsert(request("netflix", day(2026, 9, 10), 7)).unwrap();
        s.upsert(request("netflix", day(2026, 10, 10), 7)).unwrap();

        assert_eq!(s.list().len(), 1);
        assert_eq!(
            s.get("netflix").unwrap().next_renewal_date,
            day(2026, 10, 10)
        );
    }

    #[test]
    fn upcoming_is_windowed_and_sorted() {
        let s = store();
        let today = day(2026, 9, 1);
        s.upsert(request("later", day(2026, 9, 20), 7)).unwrap();
        s.upsert(request("soon", day(2026, 9, 3), 7)).unwrap();
        s.upsert(request("past", day(2026, 8, 20), 7)).unwrap();
        s.upsert(request("far", day(2026, 12, 1), 7)).unwrap();

        let upcoming = s.upcoming(today, 30);
        let ids: Vec<&str> = upcoming.iter().map(|r| r.subscription_id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "later"]);
    }

    #[test]
    fn alerts_respect_each_renewals_window() {
        let s = store();
        let today = day(2026, 9, 10);
        // Window opens 2026-09-08: due.
        s.upsert(request("due", day(2026, 9, 15), 7)).unwrap();
        // Window opens 2026-09-14: not yet.
        s.upsert(request("quiet", day(2026, 9, 15), 1)).unwrap();

        let due = s.alerts_due(today);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].subscription_id, "due");
    }
}
