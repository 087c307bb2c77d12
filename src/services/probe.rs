use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to decode audio buffer: {0}")]
    DecodeError(#[from] hound::Error),
    #[error("Audio has a zero sample rate")]
    ZeroSampleRate,
}

/// Computes the playable duration of a WAV buffer in seconds from its
/// header, without decoding the sample data.
pub fn compute_duration(buffer: &[u8]) -> Result<f64, ProbeError> {
    let reader = hound::WavReader::new(Cursor::new(buffer))?;
    let spec = reader.spec();

    if spec.sample_rate == 0 {
        return Err(ProbeError::ZeroSampleRate);
    }

    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}
