use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use virtunotes::modules::quiz::generator::{generate_questions, parse_quiz_question};
use virtunotes::services::llm::{GenerateText, GenerationError};

struct ScriptedBackend {
    responses: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(mut responses: Vec<&str>) -> Arc<Self> {
        responses.reverse();
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl GenerateText for ScriptedBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self.responses.lock().unwrap().pop();
        response.ok_or_else(|| GenerationError::InvalidResponse("script exhausted".to_string()))
    }
}

#[test]
fn parses_a_plain_question_block() {
    let text = "Question: What keeps a binary heap valid?\n\
                A. Sorted leaves\n\
                B. The heap property\n\
                C. Balanced colors\n\
                D. A hash of every node\n\
                Correct Answer: B. The heap property";

    let question = parse_quiz_question(text).unwrap();
    assert_eq!(question.question, "What keeps a binary heap valid?");
    assert_eq!(question.options.len(), 4);
    assert_eq!(question.options[1], "The heap property");
    assert_eq!(question.correct_index, 1);
    assert_eq!(question.correct_answer, "The heap property");
}

#[test]
fn strips_markdown_emphasis_before_parsing() {
    let text = "**Question:** Which layer retries reads?\n\n\
                **A.** The codec\n\
                **B.** The scheduler\n\
                **C.** The storage gateway\n\
                **D.** The parser\n\n\
                **Answer:** C";

    let question = parse_quiz_question(text).unwrap();
    assert_eq!(question.question, "Which layer retries reads?");
    assert_eq!(question.correct_answer, "The storage gateway");
    assert_eq!(question.correct_index, 2);
}

#[test]
fn missing_markers_are_unparseable() {
    let err = parse_quiz_question("Here are some thoughts about heaps.").unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));

    // Only three options present.
    let err = parse_quiz_question(
        "Question: Pick one. A. first B. second C. third Answer: A",
    )
    .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[test]
fn answer_letter_outside_options_is_unparseable() {
    let err = parse_quiz_question(
        "Question: Pick one. A. first B. second C. third D. fourth Answer: E",
    )
    .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn generates_one_question_per_requested_count() {
    let block = |topic: &str| {
        format!(
            "Question: What is {topic}? A. one B. two C. three D. four Answer: A"
        )
    };
    let first = block("alpha");
    let second = block("beta");
    let backend = ScriptedBackend::new(vec![&first, &second]);
    let shared: Arc<dyn GenerateText> = backend.clone();

    let questions = generate_questions(&shared, "Course content about alpha and beta.", "medium", 2)
        .await
        .unwrap();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].question, "What is alpha?");
    assert_eq!(questions[1].question, "What is beta?");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unparseable_response_aborts_the_batch() {
    let backend = ScriptedBackend::new(vec![
        "Question: Fine. A. a B. b C. c D. d Answer: D",
        "not a question at all",
        "Question: Never reached. A. a B. b C. c D. d Answer: A",
    ]);

    let shared: Arc<dyn GenerateText> = backend.clone();
    let err = generate_questions(&shared, "Course content long enough to quiz on.", "hard", 3)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidResponse(_)));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}
