//! Declarative edit batches applied atomically by the host.
//!
//! Noteweave never mutates blocks directly: it describes a multi-step edit
//! as an ordered [`EditBatch`] and hands it to the host's transaction
//! subsystem, which applies the whole batch or none of it. A command may
//! address a block created earlier in the same batch via
//! [`BlockTarget::Created`], which keeps multi-step bootstraps (insert
//! block, then alias it) free of orphans on failure.

use serde::{Deserialize, Serialize};

use crate::models::{BlockId, ContentFragment, Property};

/// Insertion position relative to the parent block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertPosition {
    FirstChild,
    LastChild,
}

/// Addresses a block either by identifier or by its ordinal among the
/// blocks created earlier in the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockTarget {
    Existing(BlockId),
    Created(usize),
}

/// A single step in an [`EditBatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Insert a new block under `parent` (or at the document root when
    /// `parent` is `None`).
    InsertBlock {
        parent: Option<BlockId>,
        position: InsertPosition,
        content: Vec<ContentFragment>,
    },
    /// Replace the entire content of a block.
    SetContent {
        block: BlockTarget,
        content: Vec<ContentFragment>,
    },
    /// Register an alias pointing at a block.
    CreateAlias { alias: String, block: BlockTarget },
    /// Set or replace properties on a block.
    SetProperties {
        block: BlockTarget,
        properties: Vec<Property>,
    },
}

/// An ordered list of edit commands applied as one atomic transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditBatch {
    pub commands: Vec<EditCommand>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_block(
        mut self,
        parent: Option<BlockId>,
        position: InsertPosition,
        content: Vec<ContentFragment>,
    ) -> Self {
        self.commands.push(EditCommand::InsertBlock {
            parent,
            position,
            content,
        });
        self
    }

    pub fn set_content(mut self, block: BlockTarget, content: Vec<ContentFragment>) -> Self {
        self.commands.push(EditCommand::SetContent { block, content });
        self
    }

    pub fn create_alias(mut self, alias: impl Into<String>, block: BlockTarget) -> Self {
        self.commands.push(EditCommand::CreateAlias {
            alias: alias.into(),
            block,
        });
        self
    }

    pub fn set_properties(mut self, block: BlockTarget, properties: Vec<Property>) -> Self {
        self.commands
            .push(EditCommand::SetProperties { block, properties });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of `InsertBlock` commands in the batch.
    pub fn creation_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, EditCommand::InsertBlock { .. }))
            .count()
    }
}
