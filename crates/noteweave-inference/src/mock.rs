//! Mock generation backend for deterministic testing.
//!
//! Records every call and returns configured responses, so tests can assert
//! both the prompts sent and the number of generation attempts.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use noteweave_core::{Error, GenerationBackend, Result};

/// One recorded generation call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
}

/// Mock generation backend.
#[derive(Clone)]
pub struct MockGenerationBackend {
    response: String,
    failure: Option<String>,
    model: String,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    /// Create a mock that answers every call with "Mock response".
    pub fn new() -> Self {
        Self {
            response: "Mock response".to_string(),
            failure: None,
            model: "mock-model".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the fixed response.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Make every call fail with the given message.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of generation calls made.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall {
                system: system.to_string(),
                prompt: prompt.to_string(),
            });

        match &self.failure {
            Some(message) => Err(Error::Generation(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
