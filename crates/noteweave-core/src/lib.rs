//! # noteweave-core
//!
//! Core types, traits, and abstractions for noteweave.
//!
//! This crate provides the block graph data model, the error taxonomy, and
//! the trait seams that other noteweave crates depend on.

pub mod defaults;
pub mod edits;
pub mod error;
pub mod logging;
pub mod models;
pub mod settings;
pub mod traits;

// Re-export commonly used types at crate root
pub use edits::{BlockTarget, EditBatch, EditCommand, InsertPosition};
pub use error::{Error, Result};
pub use models::{
    canonical_id, Block, BlockId, BlockRef, ContentFragment, Property, PropertyValue, RefKind,
};
pub use settings::{GenerationSettings, Provider};
pub use traits::{BlockBackend, GenerationBackend, GraphEditor, Notifier, NotifyLevel};
