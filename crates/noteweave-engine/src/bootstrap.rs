//! Idempotent provisioning of the canonical template root.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use noteweave_core::{
    defaults, BlockBackend, BlockId, BlockTarget, ContentFragment, EditBatch, Error, GraphEditor,
    InsertPosition, Property, PropertyValue, Result,
};

/// Ensures the "Magic" template root exists and carries the expected
/// marker property.
pub struct TemplateBootstrap {
    backend: Arc<dyn BlockBackend>,
    editor: Arc<dyn GraphEditor>,
}

impl TemplateBootstrap {
    pub fn new(backend: Arc<dyn BlockBackend>, editor: Arc<dyn GraphEditor>) -> Self {
        Self { backend, editor }
    }

    /// Ensure the template root exists and its marker property is current.
    ///
    /// Creation (insert block, then register the alias) happens in one
    /// atomic batch, so a failure leaves neither an orphaned alias nor an
    /// orphaned block. With the alias already present and
    /// `force_update_schema` false this performs no edits at all; repeated
    /// invocations converge to the same shape.
    #[instrument(skip(self), fields(subsystem = "engine", component = "bootstrap", op = "ensure_template_root"))]
    pub async fn ensure_template_root(&self, force_update_schema: bool) -> Result<BlockId> {
        let existing = self.backend.block_id_by_alias(defaults::MAGIC_ALIAS).await?;

        let root = match existing {
            Some(id) => {
                debug!(block_id = id, "Template root already present");
                id
            }
            None => {
                let batch = EditBatch::new()
                    .insert_block(
                        None,
                        InsertPosition::LastChild,
                        vec![ContentFragment::text(defaults::MAGIC_ALIAS)],
                    )
                    .create_alias(defaults::MAGIC_ALIAS, BlockTarget::Created(0));
                let created = self.editor.apply(batch).await?;
                let id = *created
                    .first()
                    .ok_or_else(|| Error::Edit("insert returned no block id".to_string()))?;
                info!(block_id = id, "Created template root");
                id
            }
        };

        if force_update_schema || existing.is_none() {
            let marker = Property::new(
                defaults::MARKER_PROPERTY,
                PropertyValue::Choices(
                    defaults::MARKER_CHOICES.iter().map(|c| c.to_string()).collect(),
                ),
            );
            let batch =
                EditBatch::new().set_properties(BlockTarget::Existing(root), vec![marker]);
            self.editor.apply(batch).await?;
            debug!(block_id = root, "Marker property updated");
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use noteweave_core::EditCommand;

    use crate::test_support::{MemoryBackend, RecordingEditor};

    #[tokio::test]
    async fn test_creates_root_and_alias_in_one_batch() {
        let backend = Arc::new(MemoryBackend::new());
        let editor = Arc::new(RecordingEditor::new());
        let bootstrap = TemplateBootstrap::new(backend, editor.clone());

        let root = bootstrap.ensure_template_root(false).await.unwrap();

        let batches = editor.batches();
        assert_eq!(batches.len(), 2);

        // Creation batch: insert then alias, atomically.
        assert_eq!(batches[0].commands.len(), 2);
        assert!(matches!(
            batches[0].commands[0],
            EditCommand::InsertBlock { parent: None, .. }
        ));
        assert_eq!(
            batches[0].commands[1],
            EditCommand::CreateAlias {
                alias: "Magic".to_string(),
                block: BlockTarget::Created(0),
            }
        );

        // Marker property batch targets the created root.
        match &batches[1].commands[0] {
            EditCommand::SetProperties { block, properties } => {
                assert_eq!(*block, BlockTarget::Existing(root));
                assert_eq!(properties[0].name, "ai");
                assert_eq!(
                    properties[0].value,
                    PropertyValue::Choices(vec![
                        "template".to_string(),
                        "reference".to_string()
                    ])
                );
            }
            other => panic!("Expected SetProperties, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_call_performs_zero_creations() {
        let backend = Arc::new(MemoryBackend::new().with_alias("Magic", 7));
        let editor = Arc::new(RecordingEditor::new());
        let bootstrap = TemplateBootstrap::new(backend, editor.clone());

        let root = bootstrap.ensure_template_root(false).await.unwrap();
        assert_eq!(root, 7);
        assert!(editor.batches().is_empty());

        let root = bootstrap.ensure_template_root(false).await.unwrap();
        assert_eq!(root, 7);
        assert!(editor.batches().is_empty());
    }

    #[tokio::test]
    async fn test_force_updates_marker_without_creation() {
        let backend = Arc::new(MemoryBackend::new().with_alias("Magic", 7));
        let editor = Arc::new(RecordingEditor::new());
        let bootstrap = TemplateBootstrap::new(backend, editor.clone());

        bootstrap.ensure_template_root(true).await.unwrap();

        let batches = editor.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].creation_count(), 0);
        assert!(matches!(
            batches[0].commands[0],
            EditCommand::SetProperties { .. }
        ));
    }

    #[tokio::test]
    async fn test_repeated_force_calls_are_idempotent() {
        let backend = Arc::new(MemoryBackend::new().with_alias("Magic", 7));
        let editor = Arc::new(RecordingEditor::new());
        let bootstrap = TemplateBootstrap::new(backend, editor.clone());

        bootstrap.ensure_template_root(true).await.unwrap();
        bootstrap.ensure_template_root(true).await.unwrap();

        let batches = editor.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0], batches[1]);
    }
}
