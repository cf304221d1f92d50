//! Shared test doubles for engine tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use noteweave_core::{
    Block, BlockBackend, BlockId, EditBatch, EditCommand, GraphEditor, Notifier, NotifyLevel,
    Result,
};

use crate::accessor::BlockCache;
use crate::plugin::HostCommands;

/// Build a block cache seeded with the given blocks.
pub(crate) fn cache_with(blocks: Vec<Block>) -> BlockCache {
    Arc::new(RwLock::new(
        blocks.into_iter().map(|b| (b.id, b)).collect(),
    ))
}

/// In-memory backend that counts fetches.
pub(crate) struct MemoryBackend {
    blocks: Mutex<HashMap<BlockId, Block>>,
    aliases: Mutex<HashMap<String, BlockId>>,
    fetches: AtomicUsize,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self {
            blocks: Mutex::new(HashMap::new()),
            aliases: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_block(self, block: Block) -> Self {
        self.blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(block.id, block);
        self
    }

    pub(crate) fn with_alias(self, alias: &str, id: BlockId) -> Self {
        self.aliases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(alias.to_string(), id);
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockBackend for MemoryBackend {
    async fn get_block(&self, id: BlockId) -> Result<Option<Block>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .blocks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }

    async fn block_id_by_alias(&self, alias: &str) -> Result<Option<BlockId>> {
        Ok(self
            .aliases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(alias)
            .copied())
    }
}

/// Editor that records every batch and hands out synthetic block ids.
pub(crate) struct RecordingEditor {
    batches: Mutex<Vec<EditBatch>>,
    next_id: AtomicI64,
}

impl RecordingEditor {
    pub(crate) fn new() -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }

    pub(crate) fn batches(&self) -> Vec<EditBatch> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl GraphEditor for RecordingEditor {
    async fn apply(&self, batch: EditBatch) -> Result<Vec<BlockId>> {
        let created = batch
            .commands
            .iter()
            .filter(|c| matches!(c, EditCommand::InsertBlock { .. }))
            .map(|_| self.next_id.fetch_add(1, Ordering::SeqCst))
            .collect();
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch);
        Ok(created)
    }
}

/// Notifier that records every toast in order.
pub(crate) struct RecordingNotifier {
    messages: Mutex<Vec<(NotifyLevel, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn messages(&self) -> Vec<(NotifyLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotifyLevel, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

/// Host command surface that records registrations.
pub(crate) struct RecordingHost {
    pub(crate) registered: Mutex<Vec<String>>,
    pub(crate) unregistered: Mutex<Vec<String>>,
    pub(crate) focused: Option<BlockId>,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            registered: Mutex::new(Vec::new()),
            unregistered: Mutex::new(Vec::new()),
            focused: None,
        }
    }

    pub(crate) fn with_focused(mut self, id: BlockId) -> Self {
        self.focused = Some(id);
        self
    }

    pub(crate) fn registered(&self) -> Vec<String> {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn unregistered(&self) -> Vec<String> {
        self.unregistered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HostCommands for RecordingHost {
    fn register_editor_command(&self, id: &str, _label: &str) {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.to_string());
    }

    fn register_slash_command(&self, id: &str, _icon: &str, _group: &str, _title: &str, _command: &str) {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.to_string());
    }

    fn unregister_editor_command(&self, id: &str) {
        self.unregistered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.to_string());
    }

    fn unregister_slash_command(&self, id: &str) {
        self.unregistered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(id.to_string());
    }

    fn focused_block(&self) -> Option<BlockId> {
        self.focused
    }
}
