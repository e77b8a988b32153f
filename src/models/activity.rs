use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Add,
    Remove,
    Modify,
    Favorite,
    Unfavorite,
    Note,
    Budget,
    Goal,
    Tag,
    Renewal,
}

/// One entry of the user activity journal. The log keeps the most recent
/// [`MAX_ACTIVITY_ENTRIES`] entries, trimming the oldest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub action: ActivityAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_name: Option<String>,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<serde_json::Value>,
}

pub const MAX_ACTIVITY_ENTRIES: usize = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    pub action: ActivityAction,
    pub details: String,
    pub subscription_id: Option<String>,
    pub subscription_name: Option<String>,
    pub previous_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
}

impl ActivityEntry {
    pub fn new(request: LogActivityRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action: request.action,
            subscription_id: request.subscription_id,
            subscription_name: request.subscription_name,
            details: request.details,
            previous_value: request.previous_value,
            new_value: request.new_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_lowercase() {
        let json = serde_json::to_string(&ActivityAction::Unfavorite).unwrap();
        assert_eq!(json, "\"unfavorite\"");
    }
}
