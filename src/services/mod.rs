pub mod activity;
pub mod budget;
pub mod catalog;
pub mod favorites;
pub mod goals;
pub mod history;
pub mod insights;
pub mod notes;
pub mod promo;
pub mod renewals;
pub mod selection;
pub mod spending;
pub mod storage;
pub mod tags;

use std::sync::Arc;

use storage::StorageBackend;

/// All personalization stores, constructed over one shared storage backend.
/// Each store owns its own key and serializes independently (no store holds
/// a live reference to another; cross-references stay string ids).
pub struct Stores {
    pub selection: selection::SelectionStore,
    pub budget: budget::BudgetStore,
    pub goals: goals::GoalsStore,
    pub renewals: renewals::RenewalStore,
    pub favorites: favorites::FavoritesStore,
    pub history: history::HistoryStore,
    pub notes: notes::NotesStore,
    pub tags: tags::TagsStore,
    pub promo_codes: promo::PromoCodeStore,
    pub activity: activity::ActivityLogStore,
    pub spending: spending::SpendingHistoryStore,
}

impl Stores {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            selection: selection::SelectionStore::new(backend.clone()),
            budget: budget::BudgetStore::new(backend.clone()),
            goals: goals::GoalsStore::new(backend.clone()),
            renewals: renewals::RenewalStore::new(backend.clone()),
            favorites: favorites::FavoritesStore::new(backend.clone()),
            history: history::HistoryStore::new(backend.clone()),
            notes: notes::NotesStore::new(backend.clone()),
            tags: tags::TagsStore::new(backend.clone()),
            promo_codes: promo::PromoCodeStore::new(backend.clone()),
            activity: activity::ActivityLogStore::new(backend.clone()),
            spending: spending::SpendingHistoryStore::new(backend),
        }
    }
}
