use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 100, message = "Content must be at least 100 characters"))]
    pub content: String,
    pub difficulty: Option<String>,
    #[validate(range(min = 1, max = 20, message = "question_count must be between 1 and 20"))]
    pub question_count: Option<u32>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizQuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: u32,
    pub correct_answer: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: String,
    pub difficulty: String,
    pub questions: Vec<QuizQuestionResponse>,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
