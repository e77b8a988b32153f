use std::sync::{Arc, RwLock};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::promo::{CreatePromoCodeRequest, PromoCode};
use crate::services::storage::{self, StorageBackend, StoreError};

const PROMO_KEY: &str = "subscription-promo-codes";

pub struct PromoCodeStore {
    backend: Arc<dyn StorageBackend>,
    codes: RwLock<Vec<PromoCode>>,
}

impl PromoCodeStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let codes = storage::load_or_default(backend.as_ref(), PROMO_KEY);
        Self {
            backend,
            codes: RwLock::new(codes),
        }
    }

    pub fn list(&self) -> Vec<PromoCode> {
        self.codes.read().unwrap().clone()
    }

    pub fn add(&self, request: CreatePromoCodeRequest) -> Result<PromoCode, StoreError> {
        let code = PromoCode::new(request);
        let mut codes = self.codes.write().unwrap();
        codes.push(code.clone());
        storage::save(self.backend.as_ref(), PROMO_KEY, &*codes)?;
        Ok(code)
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut codes = self.codes.write().unwrap();
        let before = codes.len();
        codes.retain(|c| c.id != id);
        let removed = codes.len() != before;
        storage::save(self.backend.as_ref(), PROMO_KEY, &*codes)?;
        Ok(removed)
    }

    pub fn toggle(&self, id: Uuid) -> Result<Option<PromoCode>, StoreError> {
        let mut codes = self.codes.write().unwrap();
        let Some(code) = codes.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        code.is_active = !code.is_active;
        let updated = code.clone();
        storage::save(self.backend.as_ref(), PROMO_KEY, &*codes)?;
        Ok(Some(updated))
    }

    /// Codes that are active and not expired as of `today`.
    pub fn usable(&self, today: NaiveDate) -> Vec<PromoCode> {
        self.codes
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.usable(today))
            .cloned()
            .collect()
    }

    pub fn usable_now(&self) -> Vec<PromoCode> {
        self.usable(Utc::now().date_naive())
    }

    pub fn for_subscription(&self, subscription_id: &str) -> Vec<PromoCode> {
        self.codes
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.subscription_id == subscription_id)
            .cloned()
            .collect()
    }
}
