use std::sync::Arc;
use thiserror::Error;

use crate::services::llm::{GenerateText, GenerationError};

/// Approximate per-chunk budget for the generation backend, measured in
/// characters rather than exact tokenizer tokens.
pub const MAX_TOKENS: usize = 1000;

/// Separator between per-chunk reports in the final summary.
pub const CHUNK_SEPARATOR: &str = "\n\n-----------\n\n";

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Transcription is empty or not understandable. No summary generated.")]
    EmptyTranscript,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Greedily splits `text` into chunks of at most `max_chars` characters.
/// While the remainder exceeds one window the break prefers the last
/// sentence terminator inside the window; a window without one is hard-cut
/// at `max_chars`. Leading whitespace of the remainder is trimmed at each
/// break, so concatenating the chunks reproduces the text modulo break-point
/// whitespace.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let window_end = match rest.char_indices().nth(max_chars) {
            Some((idx, _)) => idx,
            None => {
                chunks.push(rest.to_string());
                break;
            }
        };

        let window = &rest[..window_end];
        let cut = window.rfind('.').map(|idx| idx + 1).unwrap_or(window_end);

        let chunk = rest[..cut].trim_end();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        rest = rest[cut..].trim_start();
    }

    chunks
}

/// Structured form of one generation response.
#[derive(Debug, Clone)]
pub struct ChunkSummary {
    pub topic: String,
    pub points: Vec<String>,
    pub summary: String,
}

impl ChunkSummary {
    /// Renders the chunk back into the report layout: topic, point lines,
    /// then the free-text synthesis when present.
    pub fn render(&self) -> String {
        let mut rendered = format!("{}\n\n{}", self.topic, self.points.join("\n\n"));
        if !self.summary.is_empty() {
            rendered.push_str("\n\n");
            rendered.push_str(&self.summary);
        }
        rendered
    }
}

const TOPIC_PREFIXES: [&str; 3] = ["Topic Title:", "Primary Topic:", "Topic Heading:"];

/// Parses a raw generation response into `{topic, points, summary}`. The
/// backend enforces no schema, so a response yielding none of the three
/// sections is treated as unparseable.
pub fn parse_summary_response(text: &str) -> Result<ChunkSummary, GenerationError> {
    let mut topic = String::new();
    let mut points: Vec<String> = Vec::new();
    let mut summary = String::new();

    for section in text.split("\n\n") {
        let section = section.trim();
        if section.is_empty() || section.starts_with("**Key Points:**") {
            continue;
        }

        if let Some(title) = section.strip_prefix("**Title:**") {
            points.push(title.trim().to_string());
        } else if let Some(explanation) = section.strip_prefix("**Explanation:**") {
            if let Some(last) = points.last_mut() {
                last.push_str(": ");
                last.push_str(explanation.trim());
            }
        } else if let Some(rest) = section
            .strip_prefix("**Summary:**")
            .or_else(|| section.strip_prefix("Summary:"))
        {
            summary = rest.trim().to_string();
        } else if section.starts_with('-') {
            // Dash-prefixed "Title: Explanation" point lines, one per line.
            for line in section.lines() {
                let point = line.trim().trim_start_matches('-').trim();
                if !point.is_empty() {
                    points.push(point.to_string());
                }
            }
        } else if topic.is_empty() {
            let mut heading = section;
            for prefix in TOPIC_PREFIXES {
                if let Some(stripped) = heading.strip_prefix(prefix) {
                    heading = stripped.trim_start();
                    break;
                }
            }
            topic = heading.to_string();
        }
    }

    if topic.is_empty() && points.is_empty() && summary.is_empty() {
        return Err(GenerationError::InvalidResponse(format!(
            "Could not parse summary from response: \"{text}\""
        )));
    }

    Ok(ChunkSummary {
        topic,
        points,
        summary,
    })
}

fn build_prompt(chunk: &str) -> String {
    let mut prompt = format!(
        "Given a class lecture transcription, summarize the key content. \
         The transcription is: \"{chunk}\".\n\n"
    );
    prompt.push_str("Here's what I need:\n");
    prompt.push_str("- A short and clear topic title.\n");
    prompt.push_str(
        "- The most important points discussed, formatted as 'Title: Explanation'. \
         Each point should start with a dash and be on a new line.\n",
    );
    prompt.push_str(
        "- A coherent summary that ties together the main points, \
         placed under the heading 'Summary:'.\n\n",
    );
    prompt.push_str(
        "The summary should be clear, concise, and reflect only the content \
         covered in the lecture.\n",
    );
    prompt
}

/// Final merged report for a whole transcript.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub topic: String,
    pub points: Vec<String>,
    pub text: String,
}

/// Drives the generation backend once per transcript chunk, in document
/// order, and stitches the per-chunk reports into one. Any per-chunk
/// failure aborts the remaining chunks; no partial summary is returned.
#[derive(Clone)]
pub struct Summarizer {
    backend: Arc<dyn GenerateText>,
}

impl Summarizer {
    pub fn new(backend: Arc<dyn GenerateText>) -> Self {
        Self { backend }
    }

    pub async fn summarize(
        &self,
        transcript: &str,
        duration: f64,
    ) -> Result<SummaryReport, SummarizeError> {
        if transcript.trim().is_empty() || transcript.to_lowercase().contains("unintelligible") {
            return Err(SummarizeError::EmptyTranscript);
        }

        tracing::info!(duration, chars = transcript.len(), "summarizing transcript");

        let chunks = split_into_chunks(transcript, MAX_TOKENS);

        let mut topic = String::new();
        let mut points = Vec::new();
        let mut rendered = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            let prompt = build_prompt(chunk);
            let response = self.backend.generate(&prompt).await?;
            let parsed = parse_summary_response(&response)?;

            if topic.is_empty() {
                topic = parsed.topic.clone();
            }
            points.extend(parsed.points.iter().cloned());
            rendered.push(parsed.render());
        }

        if topic.is_empty() {
            topic = "Generated Topic".to_string();
        }

        Ok(SummaryReport {
            topic,
            points,
            text: rendered.join(CHUNK_SEPARATOR),
        })
    }
}
