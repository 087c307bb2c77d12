use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SavedSummaryResponse {
    pub topic: String,
    pub points: Vec<String>,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct SavedSummariesResponse {
    pub summaries: Vec<SavedSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
