//! Host plugin lifecycle.
//!
//! `Plugin` owns the registration of the generation commands with the host,
//! bootstraps the template root on load, and keeps the template root marker
//! schema current while generation settings change.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use noteweave_core::{BlockId, GenerationSettings, Result};

use crate::bootstrap::TemplateBootstrap;
use crate::command::MagicCommand;

/// Command surface the host exposes to plugins.
pub trait HostCommands: Send + Sync {
    /// Register an editor command invokable from the block context menu.
    fn register_editor_command(&self, id: &str, label: &str);

    /// Register a slash command that triggers an editor command.
    fn register_slash_command(&self, id: &str, icon: &str, group: &str, title: &str, command: &str);

    fn unregister_editor_command(&self, id: &str);

    fn unregister_slash_command(&self, id: &str);

    /// Block currently focused in the editor, if any.
    fn focused_block(&self) -> Option<BlockId>;
}

fn editor_command_id(name: &str) -> String {
    format!("{name}.generate")
}

fn slash_command_id(name: &str) -> String {
    format!("{name}.magic")
}

pub struct Plugin {
    name: String,
    host: Arc<dyn HostCommands>,
    command: Arc<MagicCommand>,
    settings_task: Option<JoinHandle<()>>,
}

impl Plugin {
    /// Load the plugin: ensure the template root exists, register the
    /// host commands, and watch settings for schema refreshes.
    ///
    /// Bootstrap failure aborts the load; nothing is registered in that
    /// case.
    #[instrument(skip_all, fields(subsystem = "engine", component = "plugin", op = "load"))]
    pub async fn load(
        name: impl Into<String>,
        host: Arc<dyn HostCommands>,
        command: Arc<MagicCommand>,
        bootstrap: Arc<TemplateBootstrap>,
        settings: watch::Receiver<GenerationSettings>,
    ) -> Result<Self> {
        let name = name.into();

        let root = bootstrap.ensure_template_root(false).await?;
        info!(template_root = root, "Template root ready");

        let editor_id = editor_command_id(&name);
        host.register_editor_command(&editor_id, "Generate AI Response");
        host.register_slash_command(
            &slash_command_id(&name),
            "\u{2728}",
            "Magic Note",
            "Magic",
            &editor_id,
        );

        // Settings changes may switch providers; refresh the marker schema
        // so the template root stays consistent with the active config.
        let settings_task = tokio::spawn({
            let bootstrap = Arc::clone(&bootstrap);
            let mut settings = settings;
            async move {
                while settings.changed().await.is_ok() {
                    if let Err(e) = bootstrap.ensure_template_root(true).await {
                        warn!(error = %e, "Template root refresh failed");
                    }
                }
            }
        });

        Ok(Self {
            name,
            host,
            command,
            settings_task: Some(settings_task),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run generation against the given block, falling back to the host's
    /// focused block when none is given.
    pub async fn execute(&self, block: Option<BlockId>) {
        let target = block.or_else(|| self.host.focused_block());
        self.command.execute(target).await;
    }

    /// Unregister the host commands and stop the settings watcher.
    pub fn unload(&mut self) {
        self.host
            .unregister_editor_command(&editor_command_id(&self.name));
        self.host
            .unregister_slash_command(&slash_command_id(&self.name));
        if let Some(task) = self.settings_task.take() {
            task.abort();
        }
    }
}

impl Drop for Plugin {
    fn drop(&mut self) {
        if let Some(task) = self.settings_task.take() {
            task.abort();
        }
    }
}
