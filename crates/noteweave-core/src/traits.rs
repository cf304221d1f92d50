//! Core traits for noteweave abstractions.
//!
//! These traits define the seams between the engine and its collaborators
//! (host block store, host transaction subsystem, generation service, host
//! notification surface), enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::edits::EditBatch;
use crate::error::Result;
use crate::models::{Block, BlockId};

// =============================================================================
// BLOCK BACKEND
// =============================================================================

/// Persistence backend for block lookups.
///
/// The in-memory cache is consulted first by the engine; this trait covers
/// the fallback fetch path only.
#[async_trait]
pub trait BlockBackend: Send + Sync {
    /// Fetch a block by identifier. `Ok(None)` means the block does not
    /// exist (distinct from a transport failure).
    async fn get_block(&self, id: BlockId) -> Result<Option<Block>>;

    /// Resolve a registered alias to a block identifier.
    async fn block_id_by_alias(&self, alias: &str) -> Result<Option<BlockId>>;
}

// =============================================================================
// GRAPH EDITOR
// =============================================================================

/// Transactional write surface of the host graph.
#[async_trait]
pub trait GraphEditor: Send + Sync {
    /// Apply an edit batch atomically. The host applies every command or
    /// none. Returns the identifiers of blocks created by `InsertBlock`
    /// commands, in batch order.
    async fn apply(&self, batch: EditBatch) -> Result<Vec<BlockId>>;
}

// =============================================================================
// GENERATION BACKEND
// =============================================================================

/// Remote text-generation service.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a response from a user prompt.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    /// Generate a response with separate system instructions. An empty
    /// system prompt must not produce a system message on the wire.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Model the backend will generate with.
    fn model_name(&self) -> &str;
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// User-visible toast surface supplied by the host.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotifyLevel, message: &str);
}
