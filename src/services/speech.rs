use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://speech.googleapis.com";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Recognition job did not complete within {0:?}")]
    Timeout(Duration),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: String,
    pub sample_rate_hertz: u32,
    pub language_code: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            encoding: "LINEAR16".to_string(),
            sample_rate_hertz: 48000,
            language_code: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct OperationHandle {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Operation {
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<RecognizeResponse>,
    #[serde(default)]
    error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
struct OperationError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

/// Drives a long-running recognition job: submit once, then poll the
/// returned operation until it completes or the client-side timeout fires.
#[derive(Clone)]
pub struct SpeechClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    poll_interval: Duration,
    job_timeout: Duration,
}

impl SpeechClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            job_timeout: DEFAULT_JOB_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("SPEECH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut client = Self::new(base_url);
        client.api_key = env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty());
        client
    }

    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.job_timeout = timeout;
        self
    }

    fn key_query(&self) -> String {
        match &self.api_key {
            Some(key) => format!("?key={key}"),
            None => String::new(),
        }
    }

    /// Submits the stored object for recognition and assembles the
    /// transcript from the top-scoring alternative of each result, in
    /// order, separated by newlines. No recognized speech yields an empty
    /// transcript, not an error.
    pub async fn transcribe(
        &self,
        uri: &str,
        config: RecognitionConfig,
    ) -> Result<String, RecognitionError> {
        let request = RecognizeRequest {
            config,
            audio: RecognitionAudio {
                uri: uri.to_string(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/speech:longrunningrecognize{}",
                self.base_url,
                self.key_query()
            ))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RecognitionError::ApiError(error_text));
        }

        let handle: OperationHandle = response
            .json()
            .await
            .map_err(|e| RecognitionError::InvalidResponse(e.to_string()))?;

        let result = tokio::time::timeout(self.job_timeout, self.poll_operation(&handle.name))
            .await
            .map_err(|_| RecognitionError::Timeout(self.job_timeout))??;

        let transcript = result
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(transcript)
    }

    async fn poll_operation(&self, name: &str) -> Result<RecognizeResponse, RecognitionError> {
        let url = format!("{}/v1/operations/{}{}", self.base_url, name, self.key_query());

        loop {
            let response = self.client.get(&url).send().await?;

            if !response.status().is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(RecognitionError::ApiError(error_text));
            }

            let operation: Operation = response
                .json()
                .await
                .map_err(|e| RecognitionError::InvalidResponse(e.to_string()))?;

            if let Some(error) = operation.error {
                return Err(RecognitionError::ApiError(error.message));
            }

            if operation.done {
                return Ok(operation.response.unwrap_or(RecognizeResponse {
                    results: Vec::new(),
                }));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
