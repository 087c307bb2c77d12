use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bson::oid::ObjectId;

use crate::modules::audio::{
    crud::AudioCrud,
    schema::{AudioResponse, MessageResponse, UploadResponse},
};
use crate::services::pipeline::Pipeline;
use crate::AppState;

pub async fn upload(
    State(pipeline): State<Pipeline>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, (StatusCode, Json<MessageResponse>)> {
    // Extract audio file from multipart
    let mut audio_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: format!("Failed to read multipart: {}", e) }),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "audio" || name == "file" {
            file_name = field.file_name().map(|s| s.to_string());
            let data = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(MessageResponse { message: format!("Failed to read file: {}", e) }),
                )
            })?;
            audio_data = Some(data.to_vec());
        }
    }

    let audio_data = audio_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Audio file is required".to_string() }),
        )
    })?;

    let file_name = file_name.unwrap_or_else(|| "audio.webm".to_string());

    let audio_id = pipeline
        .process_upload(audio_data, &file_name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse { message: e.to_string() }),
            )
        })?;

    Ok(Json(UploadResponse { audio_id }))
}

pub async fn get_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AudioResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = AudioCrud::new(&state.db);

    match crud.find_by_id(&oid).await {
        Ok(Some(asset)) => Ok(Json(AudioResponse {
            id: asset.id.map(|id| id.to_hex()).unwrap_or_default(),
            gcs_uri: asset.gcs_uri.clone(),
            content_type: asset.content_type.clone(),
            created_at: asset.created_at_rfc3339(),
        })),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "Audio not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}

pub async fn delete_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = AudioCrud::new(&state.db);

    match crud.delete(&oid).await {
        Ok(true) => Ok(Json(MessageResponse { message: "Audio deleted successfully".to_string() })),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "Audio not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}
