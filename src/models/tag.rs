use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User-defined label. Assignment to subscriptions lives in a separate
/// id-to-tag-ids mapping so tags and assignments persist independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    #[validate(length(min = 1, message = "tag name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1))]
    pub color: String,
}

impl Tag {
    pub fn new(request: CreateTagRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            color: request.color,
            created_at: Utc::now(),
        }
    }
}
