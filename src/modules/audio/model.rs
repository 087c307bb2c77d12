use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AudioAsset {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub gcs_uri: String,
    pub content_type: String,
    pub created_at: bson::DateTime,
}

impl AudioAsset {
    pub fn new(gcs_uri: String, content_type: String) -> Self {
        Self {
            id: None,
            gcs_uri,
            content_type,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.try_to_rfc3339_string().unwrap_or_default()
    }
}
