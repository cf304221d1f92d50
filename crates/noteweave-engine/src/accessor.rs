//! Cache-then-backend block resolution.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, instrument};

use noteweave_core::{canonical_id, Block, BlockBackend, BlockId, Error, Result};

/// Shared in-memory block cache, owned and populated by the host.
pub type BlockCache = Arc<RwLock<HashMap<BlockId, Block>>>;

/// Resolves blocks by identifier, preferring the in-memory cache and
/// falling back to one backend fetch on a miss.
///
/// Mirror identifiers are canonicalized before lookup, so text assembly
/// always reads canonical content. The accessor never writes into the
/// cache; the host owns it.
#[derive(Clone)]
pub struct BlockAccessor {
    cache: BlockCache,
    backend: Arc<dyn BlockBackend>,
}

impl BlockAccessor {
    pub fn new(cache: BlockCache, backend: Arc<dyn BlockBackend>) -> Self {
        Self { cache, backend }
    }

    /// Map a mirror identifier to its canonical source identifier.
    pub fn canonicalize(id: BlockId) -> BlockId {
        canonical_id(id)
    }

    /// Resolve a block. A cache hit never touches the backend; a miss
    /// issues exactly one backend fetch, whose `None` signals not-found.
    #[instrument(skip(self), fields(subsystem = "engine", component = "accessor", op = "resolve"))]
    pub async fn resolve(&self, id: BlockId) -> Result<Option<Block>> {
        let id = canonical_id(id);

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned();
        if cached.is_some() {
            return Ok(cached);
        }

        debug!(block_id = id, "Cache miss, fetching from backend");
        self.backend.get_block(id).await
    }

    /// Resolve a block that must exist.
    pub async fn require(&self, id: BlockId) -> Result<Block> {
        self.resolve(id)
            .await?
            .ok_or(Error::BlockNotFound(canonical_id(id)))
    }
}
