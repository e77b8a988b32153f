use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A promo code the user saved for a subscription. Codes are free text;
/// `discount` is a display string ("-50% pendant 3 mois"), not an amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: Uuid,
    pub subscription_id: String,
    pub subscription_name: String,
    pub code: String,
    pub description: String,
    pub discount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromoCodeRequest {
    #[validate(length(min = 1))]
    pub subscription_id: String,
    #[validate(length(min = 1))]
    pub subscription_name: String,
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    pub description: String,
    pub discount: String,
    pub expiry_date: Option<NaiveDate>,
}

impl PromoCode {
    pub fn new(request: CreatePromoCodeRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            subscription_id: request.subscription_id,
            subscription_name: request.subscription_name,
            code: request.code,
            description: request.description,
            discount: request.discount,
            expiry_date: request.expiry_date,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Active and not expired as of `today`. Codes without an expiry date
    /// never expire.
    pub fn usable(&self, today: NaiveDate) -> bool {
        self.is_active && self.expiry_date.map_or(true, |d| d > today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(expiry: Option<NaiveDate>) -> PromoCode {
        PromoCode::new(CreatePromoCodeRequest {
            subscription_id: "deezer".to_string(),
            subscription_name: "Deezer".to_string(),
            code: "DEEZER3M".to_string(),
            description: "Offre de rentrée".to_string(),
            discount: "-50% pendant 3 mois".to_string(),
            expiry_date: expiry,
        })
    }

    #[test]
    fn expiry_is_exclusive_on_the_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert!(!promo(Some(today)).usable(today));
        assert!(promo(Some(today.succ_opt().unwrap())).usable(today));
        assert!(promo(None).usable(today));
    }

    #[test]
    fn toggled_off_codes_are_not_usable() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let mut p = promo(None);
        p.is_active = false;
        assert!(!p.usable(today));
    }
}
