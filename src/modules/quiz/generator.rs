use std::sync::Arc;

use crate::modules::quiz::model::QuizQuestion;
use crate::services::llm::{GenerateText, GenerationError};

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

fn build_prompt(content: &str, difficulty: &str) -> String {
    format!(
        "Based on the following content, create a '{difficulty}' level quiz question \
         with four multiple-choice options labeled A, B, C, and D, and indicate the \
         correct answer.\nContent: \"{content}\""
    )
}

/// Strips markdown emphasis and collapses whitespace so the marker scan
/// below sees one flat line.
fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`'))
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn find_after(text: &str, marker: &str, from: usize) -> Option<(usize, usize)> {
    let pos = text[from..].find(marker)? + from;
    Some((pos, pos + marker.len()))
}

/// Parses a free-text quiz response of the shape
/// `Question: ... A. ... B. ... C. ... D. ... Answer: X`. The backend
/// enforces no schema, so anything that does not scan is unparseable.
pub fn parse_quiz_question(text: &str) -> Result<QuizQuestion, GenerationError> {
    let flat = normalize(text);

    let unparseable =
        || GenerationError::InvalidResponse(format!("Could not parse quiz question: \"{flat}\""));

    let (_, q_start) = find_after(&flat, "Question:", 0).ok_or_else(unparseable)?;

    let mut option_bounds = Vec::with_capacity(4);
    let mut cursor = q_start;
    for letter in OPTION_LETTERS {
        let marker = format!("{letter}.");
        let (pos, start) = find_after(&flat, &marker, cursor).ok_or_else(unparseable)?;
        option_bounds.push((pos, start));
        cursor = start;
    }

    let (answer_pos, answer_start) = find_after(&flat, "Correct Answer:", cursor)
        .or_else(|| find_after(&flat, "Answer:", cursor))
        .ok_or_else(unparseable)?;

    let question = flat[q_start..option_bounds[0].0].trim().to_string();

    let mut options = Vec::with_capacity(4);
    for i in 0..4 {
        let end = if i + 1 < 4 { option_bounds[i + 1].0 } else { answer_pos };
        options.push(flat[option_bounds[i].1..end].trim().to_string());
    }

    let letter = flat[answer_start..]
        .trim()
        .chars()
        .next()
        .ok_or_else(unparseable)?;
    let correct_index = OPTION_LETTERS
        .iter()
        .position(|l| l.chars().next() == Some(letter))
        .ok_or_else(unparseable)? as u32;

    if question.is_empty() || options.iter().any(|o| o.is_empty()) {
        return Err(unparseable());
    }

    let correct_answer = options[correct_index as usize].clone();

    Ok(QuizQuestion {
        question,
        options,
        correct_index,
        correct_answer,
    })
}

/// Issues one generation call per requested question against the shared
/// text-generation capability. A response that cannot be parsed aborts the
/// whole batch, matching the summarizer's failure policy.
pub async fn generate_questions(
    backend: &Arc<dyn GenerateText>,
    content: &str,
    difficulty: &str,
    question_count: u32,
) -> Result<Vec<QuizQuestion>, GenerationError> {
    let prompt = build_prompt(content, difficulty);
    let mut questions = Vec::with_capacity(question_count as usize);

    for _ in 0..question_count {
        let response = backend.generate(&prompt).await?;
        questions.push(parse_quiz_question(&response)?);
    }

    Ok(questions)
}
