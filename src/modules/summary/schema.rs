use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TranscribeRequest {
    #[serde(rename = "audioID")]
    #[validate(length(min = 1, message = "audioID cannot be empty"))]
    pub audio_id: String,
    #[serde(rename = "userId")]
    #[validate(length(min = 1, message = "userId cannot be empty"))]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub message: String,
    pub summary: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateSummaryRequest {
    #[validate(length(min = 1, message = "Transcription cannot be empty"))]
    pub transcription: String,
    #[serde(rename = "audioDuration", default)]
    pub audio_duration: f64,
}

#[derive(Debug, Serialize)]
pub struct GenerateSummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveSummaryRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1, message = "Topic cannot be empty"))]
    pub topic: String,
    pub points: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSummaryRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1, message = "Topic cannot be empty"))]
    pub topic: String,
    pub points: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub id: String,
    pub user_id: String,
    pub topic: String,
    pub points: Vec<String>,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub summaries: Vec<SummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
