//! # noteweave-inference
//!
//! Generation backend abstraction for noteweave.
//!
//! This crate provides:
//! - OpenAI-compatible chat-completions backend
//! - Ollama `/api/generate` backend
//! - Provider-selected backend resolution from a settings snapshot
//! - Deterministic mock backend for tests (feature `mock`)
//!
//! # Example
//!
//! ```rust,no_run
//! use noteweave_core::{GenerationBackend, GenerationSettings};
//! use noteweave_inference::backend_for;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = GenerationSettings::default();
//!     let backend = backend_for(&settings).unwrap();
//!     let reply = backend.generate("2+2=").await.unwrap();
//!     println!("{reply}");
//! }
//! ```

pub mod ollama;
pub mod openai;
pub mod provider;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use noteweave_core::{GenerationBackend, GenerationSettings, Provider};

pub use ollama::{OllamaBackend, OllamaConfig};
pub use openai::{OpenAiBackend, OpenAiConfig};
pub use provider::backend_for;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockGenerationBackend;
