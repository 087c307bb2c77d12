use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 100;

pub const UPLOAD_SUCCESS: &str = "Audio uploaded successfully and saved to database.";
pub const SUMMARY_SUCCESS: &str = "Transcription and summarization successful.";
pub const PIPELINE_FAILURE: &str = "Error during transcription process.";

/// Process-wide fan-out of pipeline milestones. Observers subscribe while
/// connected and are dropped on disconnect; there is no history and no
/// replay for late joiners.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<String>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Best-effort broadcast: having no connected observers is not an
    /// error.
    pub fn broadcast(&self, message: &str) {
        let _ = self.tx.send(message.to_string());
    }

    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
