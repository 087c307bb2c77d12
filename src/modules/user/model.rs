use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Denormalized summary snapshot embedded on the user document for fast
/// per-user listing. Consistent with the standalone record only at write
/// time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedSummary {
    pub topic: String,
    pub points: Vec<String>,
    pub date: bson::DateTime,
}

impl SavedSummary {
    pub fn new(topic: String, points: Vec<String>) -> Self {
        Self {
            topic,
            points,
            date: bson::DateTime::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub saved_summaries: Vec<SavedSummary>,
    pub created_at: bson::DateTime,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: None,
            name,
            email,
            saved_summaries: Vec::new(),
            created_at: bson::DateTime::now(),
        }
    }
}
