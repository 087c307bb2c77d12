use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bson::oid::ObjectId;
use validator::Validate;

use crate::modules::summary::{
    crud::SummaryCrud,
    model::SummaryRecord,
    schema::{
        GenerateSummaryRequest, GenerateSummaryResponse, MessageResponse, SaveSummaryRequest,
        SummariesResponse, SummaryResponse, TranscribeRequest, TranscribeResponse,
        UpdateSummaryRequest, UserQuery,
    },
};
use crate::services::pipeline::{Pipeline, PipelineError};
use crate::AppState;

fn to_response(s: &SummaryRecord) -> SummaryResponse {
    SummaryResponse {
        id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
        user_id: s.user_id.to_hex(),
        topic: s.topic.clone(),
        points: s.points.clone(),
        date: s.date_rfc3339(),
    }
}

fn parse_oid(id: &str) -> Result<ObjectId, (StatusCode, Json<MessageResponse>)> {
    ObjectId::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })
}

pub async fn transcribe(
    State(pipeline): State<Pipeline>,
    Json(payload): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, (StatusCode, Json<MessageResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: e.to_string() }),
        ));
    }

    let report = pipeline
        .transcribe_and_summarize(&payload.audio_id, &payload.user_id)
        .await
        .map_err(|e| {
            let status = match e {
                PipelineError::UserNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(MessageResponse { message: e.to_string() }))
        })?;

    Ok(Json(TranscribeResponse {
        message: "Transcription and summarization successful".to_string(),
        summary: report.text,
    }))
}

pub async fn generate_summary(
    State(pipeline): State<Pipeline>,
    Json(payload): Json<GenerateSummaryRequest>,
) -> Result<Json<GenerateSummaryResponse>, (StatusCode, Json<MessageResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: e.to_string() }),
        ));
    }

    let report = pipeline
        .summarizer
        .summarize(&payload.transcription, payload.audio_duration)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse { message: e.to_string() }),
            )
        })?;

    Ok(Json(GenerateSummaryResponse { summary: report.text }))
}

pub async fn save_summary(
    State(state): State<AppState>,
    Json(payload): Json<SaveSummaryRequest>,
) -> Result<(StatusCode, Json<SummaryResponse>), (StatusCode, Json<MessageResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: e.to_string() }),
        ));
    }

    let user_oid = parse_oid(&payload.user_id)?;

    let crud = SummaryCrud::new(&state.db);
    let mut summary = SummaryRecord::new(user_oid, payload.topic, payload.points);

    let id = crud.create(summary.clone()).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )
    })?;

    summary.id = Some(id);
    Ok((StatusCode::CREATED, Json(to_response(&summary))))
}

pub async fn list_summaries(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<SummariesResponse>, (StatusCode, Json<MessageResponse>)> {
    let user_oid = parse_oid(&query.user_id)?;

    let crud = SummaryCrud::new(&state.db);

    let summaries = crud.find_by_user(&user_oid).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )
    })?;

    Ok(Json(SummariesResponse {
        summaries: summaries.iter().map(to_response).collect(),
    }))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = parse_oid(&id)?;

    let crud = SummaryCrud::new(&state.db);

    match crud.find_by_id(&oid).await {
        Ok(Some(summary)) => Ok(Json(to_response(&summary))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "Summary not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}

pub async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSummaryRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: e.to_string() }),
        ));
    }

    let oid = parse_oid(&id)?;
    let user_oid = parse_oid(&payload.user_id)?;

    let crud = SummaryCrud::new(&state.db);

    match crud.update(&oid, &user_oid, payload.topic, payload.points).await {
        Ok(true) => Ok(Json(MessageResponse {
            message: "Summary updated successfully".to_string(),
        })),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "Summary not found or does not belong to the user".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}

pub async fn delete_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = parse_oid(&id)?;
    let user_oid = parse_oid(&query.user_id)?;

    let crud = SummaryCrud::new(&state.db);

    match crud.delete(&oid, &user_oid).await {
        Ok(true) => Ok(Json(MessageResponse {
            message: "Summary deleted successfully".to_string(),
        })),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "Summary not found or does not belong to the user".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}
