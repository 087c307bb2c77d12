use thiserror::Error;
use tokio::process::Command;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("ffmpeg failed: {0}")]
    FfmpegError(String),
    #[error("ffmpeg produced no output file")]
    MissingOutput,
}

/// Converts an arbitrary uploaded audio container into a 48 kHz linear-PCM
/// WAV buffer by shelling out to ffmpeg. Both temp files live inside a
/// per-call `TempDir`, so they are removed on every exit path.
pub async fn convert_to_wav(input: &[u8], source_ext: &str) -> Result<Vec<u8>, TranscodeError> {
    let dir = tempfile::tempdir()?;
    let unique = Uuid::new_v4();

    let ext = if source_ext.is_empty() { "webm" } else { source_ext };
    let input_path = dir.path().join(format!("{unique}.{ext}"));
    let output_path = dir.path().join(format!("{unique}.wav"));

    tokio::fs::write(&input_path, input).await?;

    let output = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(&input_path)
        .arg("-ar")
        .arg("48000")
        .arg(&output_path)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(TranscodeError::FfmpegError(stderr));
    }

    if !output_path.exists() {
        return Err(TranscodeError::MissingOutput);
    }

    let wav = tokio::fs::read(&output_path).await?;
    Ok(wav)
}
