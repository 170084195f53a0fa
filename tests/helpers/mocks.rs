use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use docassist::application::ports::{
    ModelError, ModelHandles, ModelLoader, QuestionAnswerer, TextGenerator,
};
use docassist::domain::Answer;

/// Returns a fixed output and remembers every input it was given.
pub struct RecordingGenerator {
    output: String,
    inputs: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn new(output: &str) -> Arc<Self> {
        Arc::new(Self {
            output: output.to_string(),
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, input: &str) -> Result<String, ModelError> {
        self.inputs.lock().unwrap().push(input.to_string());
        Ok(self.output.clone())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _input: &str) -> Result<String, ModelError> {
        Err(ModelError::InferenceFailed("decoder exploded".to_string()))
    }
}

/// Answers with the context's longest word, like an extractive model would
/// copy a span out of the context.
pub struct RecordingQa {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingQa {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionAnswerer for RecordingQa {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), context.to_string()));

        let word = context
            .split_whitespace()
            .max_by_key(|w| w.chars().count())
            .unwrap_or_default();
        let byte_start = context.find(word).unwrap_or(0);
        let start = context[..byte_start].chars().count();

        Ok(Answer {
            text: word.to_string(),
            score: 0.42,
            start,
            end: start + word.chars().count(),
        })
    }
}

pub struct Pipelines {
    pub summarizer: Arc<RecordingGenerator>,
    pub question_answerer: Arc<RecordingQa>,
    pub grammar_fixer: Arc<RecordingGenerator>,
}

impl Pipelines {
    pub fn new() -> Self {
        Self {
            summarizer: RecordingGenerator::new("A short document about cats."),
            question_answerer: RecordingQa::new(),
            grammar_fixer: RecordingGenerator::new("This is a corrected sentence."),
        }
    }

    pub fn handles(&self) -> ModelHandles {
        ModelHandles {
            summarizer: self.summarizer.clone(),
            question_answerer: self.question_answerer.clone(),
            grammar_fixer: self.grammar_fixer.clone(),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.summarizer.inputs().len()
            + self.question_answerer.calls().len()
            + self.grammar_fixer.inputs().len()
    }
}

/// Hands out clones of the same handles and counts how often it was asked.
pub struct CountingLoader {
    handles: ModelHandles,
    delay: Duration,
    loads: AtomicUsize,
    failures_left: AtomicUsize,
}

impl CountingLoader {
    pub fn new(handles: ModelHandles) -> Arc<Self> {
        Self::build(handles, Duration::ZERO, 0)
    }

    pub fn slow(handles: ModelHandles, delay: Duration) -> Arc<Self> {
        Self::build(handles, delay, 0)
    }

    pub fn failing_first(handles: ModelHandles, failures: usize) -> Arc<Self> {
        Self::build(handles, Duration::ZERO, failures)
    }

    fn build(handles: ModelHandles, delay: Duration, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            handles,
            delay,
            loads: AtomicUsize::new(0),
            failures_left: AtomicUsize::new(failures),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for CountingLoader {
    fn load(&self) -> Result<ModelHandles, ModelError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ModelError::LoadFailed("weights unavailable".to_string()));
        }

        Ok(self.handles.clone())
    }
}
