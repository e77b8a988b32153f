use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recently viewed subscription. The history list is newest-first,
/// de-duplicated by id and capped at [`MAX_HISTORY_ITEMS`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub timestamp: DateTime<Utc>,
}

pub const MAX_HISTORY_ITEMS: usize = 10;
