//! In-process `TextGenerator` fakes for workflow and handler tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

type Responder = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

/// Records every prompt it receives and answers with a scripted responder.
pub struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
    responder: Responder,
    /// Prompts containing the needle wait this long before answering.
    delay: Option<(String, Duration)>,
}

impl RecordingGenerator {
    pub fn new(responder: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: None,
        }
    }

    /// Holds back answers to prompts containing `needle`, so a test can interleave
    /// other session actions with an in-flight call. An empty needle slows every prompt.
    pub fn with_delay_for(mut self, needle: &str, delay: Duration) -> Self {
        self.delay = Some((needle.to_string(), delay));
        self
    }

    /// Answers every prompt with the same text.
    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Fails every prompt as the provider would on a quota error.
    pub fn failing() -> Self {
        Self::new(|_| {
            Err(LlmError::Api {
                status: 429,
                message: "quota exhausted".to_string(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Number of recorded prompts containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.contains(needle))
            .count()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some((needle, delay)) = &self.delay {
            if prompt.contains(needle.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }
        (self.responder)(prompt)
    }
}
