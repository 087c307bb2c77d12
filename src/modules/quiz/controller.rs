use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bson::oid::ObjectId;
use validator::Validate;

use crate::modules::quiz::{
    crud::QuizCrud,
    generator,
    model::Quiz,
    schema::{GenerateQuizRequest, MessageResponse, QuizQuestionResponse, QuizResponse},
};
use crate::AppState;

fn to_response(quiz: &Quiz) -> QuizResponse {
    QuizResponse {
        id: quiz.id.map(|id| id.to_hex()).unwrap_or_default(),
        difficulty: quiz.difficulty.clone(),
        questions: quiz
            .questions
            .iter()
            .map(|q| QuizQuestionResponse {
                question: q.question.clone(),
                options: q.options.clone(),
                correct_index: q.correct_index,
                correct_answer: q.correct_answer.clone(),
            })
            .collect(),
        created_at: quiz.created_at_rfc3339(),
    }
}

pub async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<Json<QuizResponse>, (StatusCode, Json<MessageResponse>)> {
    if let Err(e) = payload.validate() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: e.to_string() }),
        ));
    }

    let difficulty = payload.difficulty.unwrap_or_else(|| "medium".to_string());
    let question_count = payload.question_count.unwrap_or(5);

    let questions =
        generator::generate_questions(&state.llm, &payload.content, &difficulty, question_count)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse { message: e.to_string() }),
                )
            })?;

    let crud = QuizCrud::new(&state.db, state.redis.clone());
    let mut quiz = Quiz::new(payload.user_id, difficulty, questions);

    let id = crud.create(quiz.clone()).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )
    })?;

    quiz.id = Some(id);
    Ok(Json(to_response(&quiz)))
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuizResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = QuizCrud::new(&state.db, state.redis.clone());

    match crud.find_by_id(&oid).await {
        Ok(Some(quiz)) => Ok(Json(to_response(&quiz))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "Quiz not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}

pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<MessageResponse>)> {
    let oid = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse { message: "Invalid ID format".to_string() }),
        )
    })?;

    let crud = QuizCrud::new(&state.db, state.redis.clone());

    match crud.delete(&oid).await {
        Ok(true) => Ok(Json(MessageResponse { message: "Quiz deleted successfully".to_string() })),
        Ok(false) => Err((
            StatusCode::NOT_FOUND,
            Json(MessageResponse { message: "Quiz not found".to_string() }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse { message: e.to_string() }),
        )),
    }
}
