use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::modules::user::{
    crud::UserCrud,
    schema::{MessageResponse, SavedSummariesResponse, SavedSummaryResponse},
};
use crate::AppState;

pub async fn saved_summaries(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedSummariesResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = UserCrud::new(&state.db);

    match crud.find_by_id(&oid).await {
        Ok(Some(user)) => {
            let summaries = user
                .saved_summaries
                .iter()
                .map(|s| {
                    let date: DateTime<Utc> = s.date.into();
                    SavedSummaryResponse {
                        topic: s.topic.clone(),
                        points: s.points.clone(),
                        date: date.to_rfc3339(),
                    }
                })
                .collect();
            Ok(Json(SavedSummariesResponse { summaries }))
        }
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "User not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}
