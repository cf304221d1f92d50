//! End-to-end generation command.
//!
//! `MagicCommand` wires the engine together: resolve a template for the
//! target block, assemble prompts from the two block trees, call the
//! generation backend picked from the current settings snapshot, and write
//! the response back through the transactional editor. Every failure is
//! reduced to a user-facing toast; the command itself never returns an
//! error to the host.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use noteweave_core::{
    BlockId, Error, GenerationBackend, GenerationSettings, Notifier, NotifyLevel, Result,
};
use noteweave_inference::backend_for;

use crate::accessor::BlockAccessor;
use crate::assembler::assemble;
use crate::resolver::TemplateResolver;
use crate::writer::ResultWriter;

/// Builds a generation backend from a settings snapshot.
///
/// Constructed per invocation so settings changes apply to the next run
/// without restarting anything.
pub type GeneratorFactory =
    Arc<dyn Fn(&GenerationSettings) -> Result<Box<dyn GenerationBackend>> + Send + Sync>;

pub struct MagicCommand {
    accessor: BlockAccessor,
    resolver: TemplateResolver,
    writer: ResultWriter,
    notifier: Arc<dyn Notifier>,
    settings: watch::Receiver<GenerationSettings>,
    factory: GeneratorFactory,
}

impl MagicCommand {
    pub fn new(
        accessor: BlockAccessor,
        resolver: TemplateResolver,
        writer: ResultWriter,
        notifier: Arc<dyn Notifier>,
        settings: watch::Receiver<GenerationSettings>,
    ) -> Self {
        Self {
            accessor,
            resolver,
            writer,
            notifier,
            settings,
            factory: Arc::new(backend_for),
        }
    }

    /// Replace the default provider dispatch with a custom factory.
    pub fn with_generator_factory(mut self, factory: GeneratorFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Run the full generation pipeline against `target`.
    ///
    /// Errors never propagate: each is logged and surfaced as an error
    /// toast with a message matching the failure class.
    pub async fn execute(&self, target: Option<BlockId>) {
        if let Err(e) = self.run(target).await {
            warn!(error = %e, "Generation command failed");
            self.notifier.notify(NotifyLevel::Error, &toast_message(&e));
        }
    }

    #[instrument(skip_all, fields(subsystem = "engine", component = "command", op = "generate"))]
    async fn run(&self, target: Option<BlockId>) -> Result<()> {
        let target_id =
            target.ok_or_else(|| Error::NotFound("no target block for generation".to_string()))?;
        let target = self.accessor.require(target_id).await?;

        let template_id = self
            .resolver
            .resolve(&target)
            .await?
            .ok_or(Error::NoTemplate)?;
        let template = self
            .accessor
            .resolve(template_id)
            .await?
            .ok_or(Error::NoTemplate)?;
        debug!(block_id = target.id, template_id, "Template resolved");

        let parts = assemble(&self.accessor, Some(&template), &target).await?;

        self.notifier
            .notify(NotifyLevel::Info, "Generating AI response...");

        let settings = self.settings.borrow().clone().clamped();
        let backend = (self.factory)(&settings)?;

        let start = Instant::now();
        let response = backend
            .generate_with_system(&parts.system, &parts.user)
            .await?;
        info!(
            model = backend.model_name(),
            prompt_len = parts.user.len(),
            response_len = response.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );

        self.writer.write(target.id, &response).await?;
        self.notifier
            .notify(NotifyLevel::Success, "AI response generated");
        Ok(())
    }
}

/// Map an engine error to the toast text shown to the user.
fn toast_message(e: &Error) -> String {
    match e {
        Error::NotFound(_) | Error::BlockNotFound(_) => "Block not found".to_string(),
        Error::NoTemplate | Error::MalformedProperty(_) => "No AI template found".to_string(),
        Error::AmbiguousTemplate => "Too many AI template found".to_string(),
        other => other.to_string(),
    }
}
