use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Weekly,
    Monthly,
    Yearly,
}

/// A renewal reminder, one per tracked subscription id (upsert semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renewal {
    pub subscription_id: String,
    pub subscription_name: String,
    pub next_renewal_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub price: Decimal,
    /// How many days ahead of the renewal date the reminder opens.
    pub alert_days_before: u32,
    pub auto_renew: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRenewalRequest {
    #[validate(length(min = 1))]
    pub subscription_id: String,
    #[validate(length(min = 1))]
    pub subscription_name: String,
    pub next_renewal_date: NaiveDate,
    pub billing_cycle: BillingCycle,
    pub price: Decimal,
    #[validate(range(min = 0, max = 90))]
    pub alert_days_before: u32,
    pub auto_renew: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRenewalRequest {
    pub next_renewal_date: Option<NaiveDate>,
    pub billing_cycle: Option<BillingCycle>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0, max = 90))]
    pub alert_days_before: Option<u32>,
    pub auto_renew: Option<bool>,
}

impl Renewal {
    pub fn new(request: CreateRenewalRequest) -> Self {
        Self {
            subscription_id: request.subscription_id,
            subscription_name: request.subscription_name,
            next_renewal_date: request.next_renewal_date,
            billing_cycle: request.billing_cycle,
            price: request.price,
            alert_days_before: request.alert_days_before,
            auto_renew: request.auto_renew,
            created_at: Utc::now(),
        }
    }

    pub fn merge(&mut self, update: UpdateRenewalRequest) {
        if let Some(date) = update.next_renewal_date {
            self.next_renewal_date = date;
        }
        if let Some(cycle) = update.billing_cycle {
            self.billing_cycle = cycle;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(days) = update.alert_days_before {
            self.alert_days_before = days;
        }
        if let Some(auto) = update.auto_renew {
            self.auto_renew = auto;
        }
    }

    /// The alert window is `[date - alert_days_before, date]`, inclusive.
    pub fn alert_due(&self, today: NaiveDate) -> bool {
        let opens = self.next_renewal_date - Duration::days(self.alert_days_before as i64);
        today >= opens && today <= self.next_renewal_date
    }
}
