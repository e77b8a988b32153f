use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A service from the static catalog. Reference data only: loaded once at
/// startup and never mutated afterwards. Other entities point at it by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub color: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub plans: Vec<Plan>,
}

/// One pricing tier of a subscription. Plan order is significant: index 0 is
/// the default plan shown to users, though plans are not guaranteed sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    pub monthly_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationOption {
    pub label: String,
    pub months: u32,
    pub value: String,
}

/// On-disk shape of `data/subscriptions.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub subscriptions: Vec<Subscription>,
    pub duration_options: Vec<DurationOption>,
}

impl Subscription {
    /// Cheapest monthly price across all plans. Catalog loading rejects
    /// subscriptions without plans, so zero only appears for free tiers.
    pub fn min_monthly_price(&self) -> Decimal {
        self.plans
            .iter()
            .map(|p| p.monthly_price)
            .min()
            .unwrap_or(Decimal::ZERO)
    }
}
