//! # noteweave-engine
//!
//! Template resolution, prompt assembly, and result writing for the
//! noteweave block graph.
//!
//! The engine turns a target block into a generated response in four
//! stages: resolve the applicable template ([`TemplateResolver`]),
//! assemble the system and user prompts from the block trees
//! ([`assemble`]), call the configured generation backend, and write the
//! response back through the host's transactional editor
//! ([`ResultWriter`]). [`MagicCommand`] orchestrates the pipeline and
//! [`Plugin`] binds it to a host's command surface.

pub mod accessor;
pub mod assembler;
pub mod bootstrap;
pub mod command;
pub mod plugin;
pub mod resolver;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use accessor::{BlockAccessor, BlockCache};
pub use assembler::{assemble, PromptParts};
pub use bootstrap::TemplateBootstrap;
pub use command::{GeneratorFactory, MagicCommand};
pub use plugin::{HostCommands, Plugin};
pub use resolver::{TemplateResolver, TemplateStrategy};
pub use writer::{ResultWriter, WriteMode};
