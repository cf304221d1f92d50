//! Committing generated text back into the note graph.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use noteweave_core::{
    BlockId, BlockTarget, ContentFragment, EditBatch, GraphEditor, InsertPosition, Result,
};

/// Where the generated text lands relative to the target block.
///
/// Appending preserves the user's original prompt text; replacing is
/// destructive and opt-in per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Append the text as a new trailing child block of the target.
    #[default]
    AppendChild,
    /// Replace the target block's entire content with the text.
    ReplaceContent,
}

/// Writes generated output through the host's transactional edit surface.
pub struct ResultWriter {
    editor: Arc<dyn GraphEditor>,
    mode: WriteMode,
}

impl ResultWriter {
    pub fn new(editor: Arc<dyn GraphEditor>, mode: WriteMode) -> Self {
        Self { editor, mode }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Commit `text` under (or into) the target block as one atomic edit.
    #[instrument(skip(self, text), fields(subsystem = "engine", component = "writer", op = "write", block_id = target, mode = ?self.mode))]
    pub async fn write(&self, target: BlockId, text: &str) -> Result<()> {
        let content = vec![ContentFragment::text(text)];
        let batch = match self.mode {
            WriteMode::AppendChild => {
                EditBatch::new().insert_block(Some(target), InsertPosition::LastChild, content)
            }
            WriteMode::ReplaceContent => {
                EditBatch::new().set_content(BlockTarget::Existing(target), content)
            }
        };

        self.editor.apply(batch).await?;
        debug!(response_len = text.len(), "Generated text committed");
        Ok(())
    }
}
