//! Structured logging field name constants for noteweave.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (child blocks, refs) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "engine", "inference", "graph"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "accessor", "resolver", "ollama", "bootstrap"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve", "assemble", "generate", "ensure_template_root"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Block identifier being operated on.
pub const BLOCK_ID: &str = "block_id";

/// Resolved template block identifier.
pub const TEMPLATE_ID: &str = "template_id";

/// Template resolution strategy in effect.
pub const STRATEGY: &str = "strategy";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for generation.
pub const MODEL: &str = "model";

/// Provider identifier ("openai", "ollama").
pub const PROVIDER: &str = "provider";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
