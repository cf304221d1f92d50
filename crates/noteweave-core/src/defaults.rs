//! Centralized default constants for noteweave.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic strings and numbers.

// =============================================================================
// TEMPLATE CONVENTION
// =============================================================================

/// Canonical alias (and marker literal) of the template root block.
pub const MAGIC_ALIAS: &str = "Magic";

/// Marker property set on the template root block.
pub const MARKER_PROPERTY: &str = "ai";

/// Admissible values of the marker property's choice set.
pub const MARKER_CHOICES: [&str; 2] = ["template", "reference"];

/// Property listing the tag references applied to a block.
pub const TAGS_PROPERTY: &str = "_tags";

/// Choice-set property carried by tag blocks ("what kind of tag is this").
pub const TAG_KIND_PROPERTY: &str = "_is";

/// Reference sub-property naming an explicit template annotation.
pub const TEMPLATE_SUBPROPERTY: &str = "magic";

// =============================================================================
// GENERATION
// =============================================================================

/// Default OpenAI-compatible API base URL.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default generation model.
pub const GEN_MODEL: &str = "gpt-3.5-turbo";

/// Default Ollama endpoint.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default sampling temperature.
pub const TEMPERATURE: f32 = 0.7;

/// Default maximum output tokens.
pub const MAX_TOKENS: u32 = 2000;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 120;
