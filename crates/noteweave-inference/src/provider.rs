//! Provider selection for generation backends.
//!
//! The engine receives a settings snapshot per invocation and resolves it
//! to a boxed backend here. The backend lives on the caller's stack/heap
//! for the duration of the operation, with no shared mutable state.

use tracing::debug;

use noteweave_core::{GenerationBackend, GenerationSettings, Provider, Result};

use crate::ollama::{OllamaBackend, OllamaConfig};
use crate::openai::{OpenAiBackend, OpenAiConfig};

/// Resolve a settings snapshot to a boxed generation backend.
pub fn backend_for(settings: &GenerationSettings) -> Result<Box<dyn GenerationBackend>> {
    debug!(
        provider = %settings.provider,
        model = %settings.model,
        "Resolving generation backend"
    );
    match settings.provider {
        Provider::OpenAi => Ok(Box::new(OpenAiBackend::new(OpenAiConfig::from(settings))?)),
        Provider::Ollama => Ok(Box::new(OllamaBackend::new(OllamaConfig::from(settings))?)),
    }
}
