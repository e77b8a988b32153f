use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One subscription line inside a snapshot, denormalized so history stays
/// readable even after the catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub id: String,
    pub name: String,
    pub monthly_price: Decimal,
}

/// Monthly spending snapshot, keyed by calendar month. Recording twice in
/// the same month overwrites the existing snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSnapshot {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// `YYYY-MM` key.
    pub month: String,
    pub total_monthly: Decimal,
    pub total_yearly: Decimal,
    pub subscription_count: usize,
    pub subscriptions: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSnapshotRequest {
    pub total_monthly: Decimal,
    pub total_yearly: Decimal,
    pub subscription_count: usize,
    pub subscriptions: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvolutionDirection {
    Up,
    Down,
    Stable,
}

/// Month-over-month change between the two most recent snapshots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingEvolution {
    pub monthly_change: Decimal,
    /// Absent when the previous month recorded zero spend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_change: Option<Decimal>,
    pub direction: EvolutionDirection,
}
