use std::sync::{Arc, RwLock};

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::spending::{
    EvolutionDirection, RecordSnapshotRequest, SpendingEvolution, SpendingSnapshot,
};
use crate::services::storage::{self, StorageBackend, StoreError};

const SPENDING_KEY: &str = "subscription-spending-history";

/// Monthly spending snapshots, one per calendar month (same-month records
/// overwrite), kept in chronological append order.
pub struct SpendingHistoryStore {
    backend: Arc<dyn StorageBackend>,
    snapshots: RwLock<Vec<SpendingSnapshot>>,
}

impl SpendingHistoryStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let snapshots = storage::load_or_default(backend.as_ref(), SPENDING_KEY);
        Self {
            backend,
            snapshots: RwLock::new(snapshots),
        }
    }

    pub fn list(&self) -> Vec<SpendingSnapshot> {
        self.snapshots.read().unwrap().clone()
    }

    pub fn record(&self, request: RecordSnapshotRequest) -> Result<SpendingSnapshot, StoreError> {
        let now = Utc::now();
        let month = format!("{:04}-{:02}", now.year(), now.month());
        self.record_for_month(month, request)
    }

    /// Month is injected separately so tests can exercise the upsert without
    /// depending on the wall clock.
    pub fn record_for_month(
        &self,
        month: String,
        request: RecordSnapshotRequest,
    ) -> Result<SpendingSnapshot, StoreError> {
        let snapshot = SpendingSnapshot {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            month,
            total_monthly: request.total_monthly,
            total_yearly: request.total_yearly,
            subscription_count: request.subscription_count,
            subscriptions: request.subscriptions,
        };

        let mut snapshots = self.snapshots.write().unwrap();
        if let Some(existing) = snapshots.iter_mut().find(|s| s.month == snapshot.month) {
            *existing = snapshot.clone();
        } else {
            snapshots.push(snapshot.clone());
        }
        storage::save(self.backend.as_ref(), SPENDING_KEY, &*snapshots)?;
        Ok(snapshot)
    }

    /// The most recent `months` snapshots in chronological order.
    pub fn last_months(&self, months: usize) -> Vec<SpendingSnapshot> {
        let snapshots = self.snapshots.read().unwrap();
        let start = snapshots.len().saturating_sub(months);
        snapshots[start..].to_vec()
    }

    /// Change between the two latest snapshots; `None` with fewer than two.
    pub fn evolution(&self) -> Option<SpendingEvolution> {
        let snapshots = self.snapshots.read().unwrap();
        if snapshots.len() < 2 {
            return None;
        }
        let latest = &snapshots[snapshots.len() - 1];
        let previous = &snapshots[snapshots.len() - 2];

        let monthly_change = latest.total_monthly - previous.total_monthly;
        let percentage_change = if previous.total_monthly.is_zero() {
            None
        } else {
            Some((monthly_change / previous.total_monthly * Decimal::ONE_HUNDRED).round_dp(2))
        };
        let direction = if monthly_change > Decimal::ZERO {
            EvolutionDirection::Up
        } else if monthly_change < Decimal::ZERO {
            EvolutionDirection::Down
        } else {
            EvolutionDirection::Stable
        };

        Some(SpendingEvolution {
            monthly_change,
            percentage_change,
            direction,
        })
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut snapshots = self.snapshots.write().unwrap();
        snapshots.clear();
        storage::save(self.backend.as_ref(), SPENDING_KEY, &*snapshots)
    }
}
