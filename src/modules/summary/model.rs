use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummaryRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub topic: String,
    pub points: Vec<String>,
    pub date: bson::DateTime,
}

impl SummaryRecord {
    pub fn new(user_id: ObjectId, topic: String, points: Vec<String>) -> Self {
        Self {
            id: None,
            user_id,
            topic,
            points,
            date: bson::DateTime::now(),
        }
    }

    pub fn date_rfc3339(&self) -> String {
        self.date.try_to_rfc3339_string().unwrap_or_default()
    }
}
