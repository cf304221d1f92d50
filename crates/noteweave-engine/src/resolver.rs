//! Template resolution for target blocks.
//!
//! Three schema conventions exist in the wild for expressing "this block is
//! governed by template T"; each is one [`TemplateStrategy`], selected by
//! deployment configuration and never mixed within one invocation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use noteweave_core::{
    defaults, Block, BlockId, Error, PropertyValue, RefKind, Result,
};

use crate::accessor::BlockAccessor;

/// Which schema convention identifies the governing template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStrategy {
    /// The block's `_tags` reference-set names tag blocks; a tag whose
    /// `_is` choice-set contains the marker is the template.
    #[default]
    TagMembership,
    /// An outgoing tag-application reference aliased with the marker, or a
    /// reference to a block that carries such a reference back.
    ReciprocalAlias,
    /// An outgoing reference annotated with a `magic` sub-property naming
    /// exactly one of the block's own references.
    RefSubProperty,
}

/// Resolves the governing template block for a target block.
pub struct TemplateResolver {
    accessor: BlockAccessor,
    strategy: TemplateStrategy,
}

impl TemplateResolver {
    pub fn new(accessor: BlockAccessor, strategy: TemplateStrategy) -> Self {
        Self { accessor, strategy }
    }

    pub fn strategy(&self) -> TemplateStrategy {
        self.strategy
    }

    /// Determine the applicable template for `block`.
    ///
    /// `Ok(None)` means no template applies; [`Error::AmbiguousTemplate`]
    /// and [`Error::MalformedProperty`] abort resolution before any
    /// network call is made.
    #[instrument(skip(self, block), fields(subsystem = "engine", component = "resolver", op = "resolve", block_id = block.id, strategy = ?self.strategy))]
    pub async fn resolve(&self, block: &Block) -> Result<Option<BlockId>> {
        let resolved = match self.strategy {
            TemplateStrategy::TagMembership => self.resolve_tag_membership(block).await?,
            TemplateStrategy::ReciprocalAlias => self.resolve_reciprocal_alias(block).await?,
            TemplateStrategy::RefSubProperty => self.resolve_ref_subproperty(block)?,
        };
        debug!(template_id = ?resolved, "Template resolution complete");
        Ok(resolved)
    }

    /// Strategy A: direct tag membership.
    ///
    /// The `_tags` reference-set lists applied tag edges; each edge's
    /// target is a tag block. Matching tags are scanned in order and the
    /// first one carrying non-empty instruction children wins.
    async fn resolve_tag_membership(&self, block: &Block) -> Result<Option<BlockId>> {
        let Some(prop) = block.property(defaults::TAGS_PROPERTY) else {
            return Ok(None);
        };
        let PropertyValue::BlockRefs(tag_ref_ids) = &prop.value else {
            debug!(block_id = block.id, "_tags property has unexpected type");
            return Ok(None);
        };

        for tag_ref in block
            .refs
            .iter()
            .filter(|r| r.kind == RefKind::TagApplication && tag_ref_ids.contains(&r.id))
        {
            let Some(tag) = self.accessor.resolve(tag_ref.to).await? else {
                continue;
            };

            let is_magic = tag.property(defaults::TAG_KIND_PROPERTY).is_some_and(|p| {
                matches!(
                    &p.value,
                    PropertyValue::Choices(choices)
                        if choices.iter().any(|c| c == defaults::MAGIC_ALIAS)
                )
            });

            if is_magic && !tag.children.is_empty() {
                return Ok(Some(tag.id));
            }
        }
        Ok(None)
    }

    /// Strategy B: reciprocal reference with alias.
    ///
    /// A direct tag-application edge aliased with the marker wins first;
    /// otherwise any referenced block carrying a marker-aliased edge back
    /// to the target is the template. First match wins.
    async fn resolve_reciprocal_alias(&self, block: &Block) -> Result<Option<BlockId>> {
        for r in &block.refs {
            if r.kind == RefKind::TagApplication
                && r.alias.as_deref() == Some(defaults::MAGIC_ALIAS)
            {
                return Ok(Some(r.to));
            }
        }

        for r in &block.refs {
            let Some(candidate) = self.accessor.resolve(r.to).await? else {
                continue;
            };
            let reciprocal = candidate.refs.iter().any(|back| {
                back.to == block.id
                    && back.kind == RefKind::TagApplication
                    && back.alias.as_deref() == Some(defaults::MAGIC_ALIAS)
            });
            if reciprocal {
                return Ok(Some(candidate.id));
            }
        }
        Ok(None)
    }

    /// Strategy C: reference with a `magic` sub-property.
    ///
    /// The sub-property must name exactly one of the block's own outgoing
    /// references; more than one candidate is ambiguous, zero or an
    /// unknown reference is malformed.
    fn resolve_ref_subproperty(&self, block: &Block) -> Result<Option<BlockId>> {
        for r in &block.refs {
            let Some(prop) = r
                .sub_properties
                .iter()
                .find(|p| p.name == defaults::TEMPLATE_SUBPROPERTY)
            else {
                continue;
            };

            let PropertyValue::BlockRefs(ids) = &prop.value else {
                return Err(Error::MalformedProperty(
                    "magic sub-property is not a reference set".to_string(),
                ));
            };

            return match ids.as_slice() {
                [] => Err(Error::MalformedProperty(
                    "magic sub-property is empty".to_string(),
                )),
                [ref_id] => {
                    let target = block.refs.iter().find(|r2| r2.id == *ref_id).ok_or_else(
                        || {
                            Error::MalformedProperty(format!(
                                "magic sub-property names unknown reference {}",
                                ref_id
                            ))
                        },
                    )?;
                    Ok(Some(target.to))
                }
                _ => Err(Error::AmbiguousTemplate),
            };
        }
        Ok(None)
    }
}
