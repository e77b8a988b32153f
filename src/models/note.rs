use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form note attached to a catalog subscription, one per id.
/// Re-saving keeps the original creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub subscription_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
