use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use virtunotes::services::llm::{GenerateText, GenerationError, LlmClient};

#[derive(Clone)]
struct StubChat {
    status: StatusCode,
    body: Value,
}

async fn chat_completions(
    State(stub): State<StubChat>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    assert_eq!(
        headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer test-key"
    );
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["max_tokens"], 1000);

    (stub.status, Json(stub.body.clone()))
}

async fn spawn_stub(stub: StubChat) -> String {
    let app = Router::new()
        .route("/chat/completions", post(chat_completions))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn returns_the_first_choice_content_trimmed() {
    let base_url = spawn_stub(StubChat {
        status: StatusCode::OK,
        body: json!({
            "choices": [
                { "message": { "content": "  generated text\n" } },
                { "message": { "content": "ignored second choice" } }
            ]
        }),
    })
    .await;

    let client = LlmClient::new(base_url, "test-key");
    let text = client.generate("say something").await.unwrap();
    assert_eq!(text, "generated text");
}

#[tokio::test]
async fn surfaces_the_api_error_message() {
    let base_url = spawn_stub(StubChat {
        status: StatusCode::TOO_MANY_REQUESTS,
        body: json!({ "error": { "message": "Rate limit reached" } }),
    })
    .await;

    let client = LlmClient::new(base_url, "test-key");
    let err = client.generate("say something").await.unwrap_err();

    match err {
        GenerationError::ApiError(message) => assert_eq!(message, "Rate limit reached"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_are_invalid() {
    let base_url = spawn_stub(StubChat {
        status: StatusCode::OK,
        body: json!({ "choices": [] }),
    })
    .await;

    let client = LlmClient::new(base_url, "test-key");
    let err = client.generate("say something").await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}
