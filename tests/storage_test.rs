use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;

use virtunotes::services::storage::StorageClient;

/// In-memory stand-in for the bucket HTTP API, binding an ephemeral local
/// listener.
#[derive(Clone, Default)]
struct StubStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    exists_checks: Arc<AtomicUsize>,
    downloads: Arc<AtomicUsize>,
}

async fn handle_upload(
    State(store): State<StubStore>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> (StatusCode, String) {
    let name = params.get("name").cloned().unwrap_or_default();
    store.objects.lock().unwrap().insert(name, body.to_vec());
    (StatusCode::OK, "{}".to_string())
}

async fn handle_object(
    State(store): State<StubStore>,
    Path((_bucket, name)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Vec<u8>) {
    let is_media = params.get("alt").map(|v| v == "media").unwrap_or(false);
    if is_media {
        store.downloads.fetch_add(1, Ordering::SeqCst);
    } else {
        store.exists_checks.fetch_add(1, Ordering::SeqCst);
    }

    match store.objects.lock().unwrap().get(&name) {
        Some(data) if is_media => (StatusCode::OK, data.clone()),
        Some(_) => (StatusCode::OK, b"{}".to_vec()),
        None => (StatusCode::NOT_FOUND, Vec::new()),
    }
}

async fn spawn_stub(store: StubStore) -> String {
    let app = Router::new()
        .route("/upload/storage/v1/b/{bucket}/o", post(handle_upload))
        .route("/storage/v1/b/{bucket}/o/{name}", get(handle_object))
        .with_state(store);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn upload_then_exists_then_download_roundtrip() {
    let store = StubStore::default();
    let base_url = spawn_stub(store.clone()).await;

    let client = StorageClient::new(base_url, "test-bucket")
        .with_retry(3, Duration::from_millis(10));

    let uri = client
        .upload(b"fake wav bytes".to_vec(), "audio-abc123.wav")
        .await
        .unwrap();
    assert_eq!(uri, "gs://test-bucket/audio-abc123.wav");

    assert!(client.exists(&uri).await.unwrap());

    let downloaded = client.download(&uri).await.unwrap();
    assert_eq!(downloaded, b"fake wav bytes");
}

#[tokio::test]
async fn download_of_missing_object_is_a_read_error() {
    let store = StubStore::default();
    let base_url = spawn_stub(store.clone()).await;

    let client = StorageClient::new(base_url, "test-bucket");
    let uri = client.object_uri("audio-missing.wav");

    assert!(client.download(&uri).await.is_err());
}

#[tokio::test]
async fn exists_exhausts_bounded_retries_and_returns_false() {
    let store = StubStore::default();
    let base_url = spawn_stub(store.clone()).await;

    // Default policy: 5 attempts, 2 seconds apart.
    let client = StorageClient::new(base_url, "test-bucket");
    let uri = client.object_uri("audio-never-appears.wav");

    let started = Instant::now();
    let exists = client.exists(&uri).await.unwrap();
    let elapsed = started.elapsed();

    assert!(!exists);
    assert_eq!(store.exists_checks.load(Ordering::SeqCst), 5);
    assert!(elapsed >= Duration::from_secs(8), "elapsed {elapsed:?}");
    assert_eq!(store.downloads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn exists_succeeds_once_the_object_appears() {
    let store = StubStore::default();
    let base_url = spawn_stub(store.clone()).await;

    let client = StorageClient::new(base_url, "test-bucket")
        .with_retry(10, Duration::from_millis(50));
    let uri = client.object_uri("audio-late.wav");

    let objects = store.objects.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        objects
            .lock()
            .unwrap()
            .insert("audio-late.wav".to_string(), vec![1, 2, 3]);
    });

    assert!(client.exists(&uri).await.unwrap());
}
