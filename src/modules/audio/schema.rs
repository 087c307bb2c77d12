use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "audioID")]
    pub audio_id: String,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub id: String,
    pub gcs_uri: String,
    pub content_type: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
