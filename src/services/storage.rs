use reqwest::Client;
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";
const DEFAULT_BUCKET: &str = "edu-echo-gs";
const DEFAULT_EXISTS_RETRIES: u32 = 5;
const DEFAULT_EXISTS_DELAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Failed to write object {name}: {detail}")]
    WriteError { name: String, detail: String },
    #[error("Failed to read object {uri}: {detail}")]
    ReadError { uri: String, detail: String },
    #[error("Invalid object URI: {0}")]
    InvalidUri(String),
}

/// Object store gateway over the bucket's JSON/media HTTP API. The store is
/// eventually consistent after writes, so existence checks retry with a
/// fixed delay before giving up.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    bucket: String,
    api_key: Option<String>,
    exists_retries: u32,
    exists_delay: Duration,
}

impl StorageClient {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            bucket: bucket.into(),
            api_key: None,
            exists_retries: DEFAULT_EXISTS_RETRIES,
            exists_delay: DEFAULT_EXISTS_DELAY,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("STORAGE_EMULATOR_HOST").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let bucket = env::var("GCS_BUCKET_NAME").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());

        let mut client = Self::new(base_url, bucket);
        client.api_key = env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty());
        client
    }

    pub fn with_retry(mut self, retries: u32, delay: Duration) -> Self {
        self.exists_retries = retries;
        self.exists_delay = delay;
        self
    }

    pub fn object_uri(&self, name: &str) -> String {
        format!("gs://{}/{}", self.bucket, name)
    }

    fn object_name<'a>(&self, uri: &'a str) -> Result<&'a str, StorageError> {
        let prefix = format!("gs://{}/", self.bucket);
        uri.strip_prefix(&prefix)
            .ok_or_else(|| StorageError::InvalidUri(uri.to_string()))
    }

    fn key_query(&self) -> String {
        match &self.api_key {
            Some(key) => format!("&key={key}"),
            None => String::new(),
        }
    }

    pub async fn upload(&self, buffer: Vec<u8>, name: &str) -> Result<String, StorageError> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}{}",
            self.base_url,
            self.bucket,
            name,
            self.key_query()
        );

        let response = self
            .client
            .post(url)
            .header("Content-Type", "audio/wav")
            .body(buffer)
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StorageError::WriteError {
                name: name.to_string(),
                detail,
            });
        }

        Ok(self.object_uri(name))
    }

    /// Polls for the object with bounded retries. Exhausting the retries is
    /// a soft miss and returns `Ok(false)`, not an error.
    pub async fn exists(&self, uri: &str) -> Result<bool, StorageError> {
        let name = self.object_name(uri)?;
        let url = format!(
            "{}/storage/v1/b/{}/o/{}?fields=name{}",
            self.base_url,
            self.bucket,
            name,
            self.key_query()
        );

        for attempt in 0..self.exists_retries {
            let response = self.client.get(&url).send().await?;
            if response.status().is_success() {
                return Ok(true);
            }
            tracing::debug!(uri, attempt, "object not visible yet");
            tokio::time::sleep(self.exists_delay).await;
        }

        Ok(false)
    }

    pub async fn download(&self, uri: &str) -> Result<Vec<u8>, StorageError> {
        let name = self.object_name(uri)?;
        let url = format!(
            "{}/storage/v1/b/{}/o/{}?alt=media{}",
            self.base_url,
            self.bucket,
            name,
            self.key_query()
        );

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StorageError::ReadError {
                uri: uri.to_string(),
                detail,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(StorageError::ReadError {
                uri: uri.to_string(),
                detail: "Downloaded buffer is empty".to_string(),
            });
        }

        Ok(bytes.to_vec())
    }
}
