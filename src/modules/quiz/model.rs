use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: u32,
    pub correct_answer: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Quiz {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: Option<String>,
    pub difficulty: String,
    pub questions: Vec<QuizQuestion>,
    pub created_at: bson::DateTime,
}

impl Quiz {
    pub fn new(user_id: Option<String>, difficulty: String, questions: Vec<QuizQuestion>) -> Self {
        Self {
            id: None,
            user_id,
            difficulty,
            questions,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.try_to_rfc3339_string().unwrap_or_default()
    }
}
