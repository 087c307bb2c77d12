use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use virtunotes::services::speech::{RecognitionConfig, RecognitionError, SpeechClient};

#[derive(Clone)]
struct StubSpeech {
    polls_until_done: usize,
    polls: Arc<AtomicUsize>,
    result: Value,
}

async fn handle_submit(State(_stub): State<StubSpeech>, Json(body): Json<Value>) -> Json<Value> {
    // The orchestrator always submits the fixed recognition config.
    assert_eq!(body["config"]["encoding"], "LINEAR16");
    assert_eq!(body["config"]["sampleRateHertz"], 48000);
    assert_eq!(body["config"]["languageCode"], "en-US");

    Json(json!({ "name": "op-123" }))
}

async fn handle_poll(State(stub): State<StubSpeech>) -> Json<Value> {
    let polled = stub.polls.fetch_add(1, Ordering::SeqCst) + 1;
    if polled < stub.polls_until_done {
        Json(json!({ "name": "op-123", "done": false }))
    } else {
        Json(json!({ "name": "op-123", "done": true, "response": stub.result }))
    }
}

async fn spawn_stub(stub: StubSpeech) -> String {
    let app = Router::new()
        .route("/v1/speech:longrunningrecognize", post(handle_submit))
        .route("/v1/operations/op-123", get(handle_poll))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn transcript_joins_top_alternatives_in_order() {
    let stub = StubSpeech {
        polls_until_done: 3,
        polls: Arc::new(AtomicUsize::new(0)),
        result: json!({
            "results": [
                { "alternatives": [
                    { "transcript": "first segment", "confidence": 0.92 },
                    { "transcript": "ignored runner-up", "confidence": 0.41 }
                ]},
                { "alternatives": [] },
                { "alternatives": [{ "transcript": "third segment", "confidence": 0.88 }] }
            ]
        }),
    };
    let polls = stub.polls.clone();
    let base_url = spawn_stub(stub).await;

    let client = SpeechClient::new(base_url)
        .with_polling(Duration::from_millis(10), Duration::from_secs(5));

    let transcript = client
        .transcribe("gs://test-bucket/audio-abc.wav", RecognitionConfig::default())
        .await
        .unwrap();

    // Segments without alternatives are skipped, the rest joined by newline.
    assert_eq!(transcript, "first segment\nthird segment");
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn no_recognized_speech_yields_empty_transcript() {
    let stub = StubSpeech {
        polls_until_done: 1,
        polls: Arc::new(AtomicUsize::new(0)),
        result: json!({ "results": [] }),
    };
    let base_url = spawn_stub(stub).await;

    let client = SpeechClient::new(base_url)
        .with_polling(Duration::from_millis(10), Duration::from_secs(5));

    let transcript = client
        .transcribe("gs://test-bucket/audio-silent.wav", RecognitionConfig::default())
        .await
        .unwrap();

    assert!(transcript.is_empty());
}

#[tokio::test]
async fn job_that_never_completes_times_out() {
    let stub = StubSpeech {
        polls_until_done: usize::MAX,
        polls: Arc::new(AtomicUsize::new(0)),
        result: json!({ "results": [] }),
    };
    let base_url = spawn_stub(stub).await;

    let client = SpeechClient::new(base_url)
        .with_polling(Duration::from_millis(20), Duration::from_millis(200));

    let err = client
        .transcribe("gs://test-bucket/audio-stuck.wav", RecognitionConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RecognitionError::Timeout(_)));
}
