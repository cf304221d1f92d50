//! Prompt assembly from block trees.

use tracing::{instrument, warn};

use noteweave_core::{Block, Result};

use crate::accessor::BlockAccessor;

/// Assembled system and user prompts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptParts {
    pub system: String,
    pub user: String,
}

/// Concatenate descendant text in document order into prompts.
///
/// The system prompt is the template's children joined without separators;
/// the user prompt is the target's children each followed by a newline
/// (trailing newline preserved). Every child goes through the accessor's
/// cache-then-backend path; a child that cannot be resolved contributes an
/// empty string rather than aborting assembly.
#[instrument(skip_all, fields(subsystem = "engine", component = "assembler", op = "assemble", block_id = target.id))]
pub async fn assemble(
    accessor: &BlockAccessor,
    template: Option<&Block>,
    target: &Block,
) -> Result<PromptParts> {
    let mut system = String::new();
    if let Some(template) = template {
        for &child in &template.children {
            system.push_str(&child_text(accessor, child).await);
        }
    }

    let mut user = String::new();
    for &child in &target.children {
        user.push_str(&child_text(accessor, child).await);
        user.push('\n');
    }

    Ok(PromptParts { system, user })
}

async fn child_text(accessor: &BlockAccessor, child: i64) -> String {
    match accessor.resolve(child).await {
        Ok(Some(block)) => block.text_or_empty().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            warn!(block_id = child, error = %e, "Child fetch failed, using empty text");
            String::new()
        }
    }
}
