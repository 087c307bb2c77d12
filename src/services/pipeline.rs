use bson::oid::ObjectId;
use mongodb::Database;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::audio::{crud::AudioCrud, model::AudioAsset};
use crate::modules::summary::{crud::SummaryCrud, model::SummaryRecord};
use crate::modules::user::{crud::UserCrud, model::SavedSummary};
use crate::services::notify::{self, Notifier};
use crate::services::probe::{self, ProbeError};
use crate::services::speech::{RecognitionConfig, RecognitionError, SpeechClient};
use crate::services::storage::{StorageClient, StorageError};
use crate::services::summarize::{SummarizeError, Summarizer, SummaryReport};
use crate::services::transcode::{self, TranscodeError};

/// Hard ceiling on processable audio length, in seconds.
pub const MAX_ALLOWED_DURATION: f64 = 7200.0;

/// Opaque 32-hex-char audio identifier; the stored object name is derived
/// from it deterministically.
pub fn new_audio_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("File {0} does not exist in storage after multiple checks.")]
    ObjectMissing(String),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error("Audio is too long to be processed.")]
    DurationExceeded(f64),
    #[error(transparent)]
    Recognition(#[from] RecognitionError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
    #[error("User not found")]
    UserNotFound,
    #[error("Database error: {0}")]
    Persistence(#[from] mongodb::error::Error),
}

/// Sequences upload -> transcode -> store -> transcribe -> summarize ->
/// persist as a linear chain of fallible stages. Every dependency is an
/// explicitly constructed handle, so the whole pipeline can run against
/// test doubles.
#[derive(Clone)]
pub struct Pipeline {
    pub db: Database,
    pub storage: StorageClient,
    pub speech: SpeechClient,
    pub summarizer: Summarizer,
    pub notifier: Notifier,
}

impl Pipeline {
    pub fn new(
        db: Database,
        storage: StorageClient,
        speech: SpeechClient,
        summarizer: Summarizer,
        notifier: Notifier,
    ) -> Self {
        Self {
            db,
            storage,
            speech,
            summarizer,
            notifier,
        }
    }

    /// Transcodes the uploaded buffer to WAV, stores it under a
    /// content-addressed name and persists the asset record. Returns the
    /// 32-hex-char audio identifier.
    pub async fn process_upload(
        &self,
        buffer: Vec<u8>,
        file_name: &str,
    ) -> Result<String, PipelineError> {
        let source_ext = file_name.rsplit('.').next().unwrap_or("webm").to_lowercase();
        let wav = transcode::convert_to_wav(&buffer, &source_ext).await?;

        let audio_id = new_audio_id();
        let object_name = format!("audio-{audio_id}.wav");

        let gcs_uri = self.storage.upload(wav, &object_name).await?;
        tracing::info!(%gcs_uri, "audio uploaded");

        let crud = AudioCrud::new(&self.db);
        crud.create(AudioAsset::new(gcs_uri, "audio/wav".to_string()))
            .await?;

        self.notifier.broadcast(notify::UPLOAD_SUCCESS);

        Ok(audio_id)
    }

    /// Runs the stored audio through recognition and summarization and
    /// persists the result for the owning user. Emits a best-effort
    /// failure notification before surfacing any stage error.
    pub async fn transcribe_and_summarize(
        &self,
        audio_id: &str,
        user_id: &str,
    ) -> Result<SummaryReport, PipelineError> {
        match self.run_transcription(audio_id, user_id).await {
            Ok(report) => {
                self.notifier.broadcast(notify::SUMMARY_SUCCESS);
                Ok(report)
            }
            Err(err) => {
                tracing::error!(error = %err, audio_id, "pipeline failed");
                self.notifier.broadcast(notify::PIPELINE_FAILURE);
                Err(err)
            }
        }
    }

    async fn run_transcription(
        &self,
        audio_id: &str,
        user_id: &str,
    ) -> Result<SummaryReport, PipelineError> {
        let cleaned_id = audio_id.replace('-', "");
        let gcs_uri = self.storage.object_uri(&format!("audio-{cleaned_id}.wav"));

        // The store is eventually consistent; poll before trusting the
        // upload to be visible.
        if !self.storage.exists(&gcs_uri).await? {
            return Err(PipelineError::ObjectMissing(gcs_uri));
        }

        let wav = self.storage.download(&gcs_uri).await?;
        tracing::debug!(bytes = wav.len(), %gcs_uri, "audio downloaded");

        let duration = probe::compute_duration(&wav)?;
        if duration > MAX_ALLOWED_DURATION {
            return Err(PipelineError::DurationExceeded(duration));
        }

        let transcript = self
            .speech
            .transcribe(&gcs_uri, RecognitionConfig::default())
            .await?;

        let report = self.summarizer.summarize(&transcript, duration).await?;

        let user_oid =
            ObjectId::parse_str(user_id).map_err(|_| PipelineError::UserNotFound)?;
        let user_crud = UserCrud::new(&self.db);
        user_crud
            .find_by_id(&user_oid)
            .await?
            .ok_or(PipelineError::UserNotFound)?;

        user_crud
            .push_saved_summary(
                &user_oid,
                SavedSummary::new(report.topic.clone(), report.points.clone()),
            )
            .await?;

        let summary_crud = SummaryCrud::new(&self.db);
        summary_crud
            .create(SummaryRecord::new(
                user_oid,
                report.topic.clone(),
                report.points.clone(),
            ))
            .await?;

        Ok(report)
    }
}
