//! Scripted model for unit tests

use async_trait::async_trait;
use std::sync::Mutex;

use super::{GeminiError, GenerateRequest, GenerateResponse, GenerativeModel};

/// Answers every call from a fixed script and records the requests it saw
pub struct ScriptedModel {
    reply: Mutex<Box<dyn FnMut(&GenerateRequest) -> Result<GenerateResponse, GeminiError> + Send>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn new(
        reply: impl FnMut(&GenerateRequest) -> Result<GenerateResponse, GeminiError> + Send + 'static,
    ) -> Self {
        Self {
            reply: Mutex::new(Box::new(reply)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with a JSON response body
    pub fn answering(body: serde_json::Value) -> Self {
        Self::new(move |_| Ok(serde_json::from_value(body.clone()).unwrap()))
    }

    /// Always answer with plain text
    pub fn text(text: &str) -> Self {
        Self::answering(serde_json::json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
    }

    /// Always fail
    pub fn failing() -> Self {
        Self::new(|_| Err(GeminiError::Unavailable))
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GeminiError> {
        let result = {
            let mut reply = self.reply.lock().unwrap();
            (*reply)(&request)
        };
        self.requests.lock().unwrap().push(request);
        result
    }
}
