//! Data model for the outline block graph.
//!
//! Blocks are nodes in a tree-structured document graph, owned and mutated
//! exclusively by the host graph/transaction subsystem. Noteweave reads
//! blocks and submits declarative edit batches; it never mutates a `Block`
//! in place.

use serde::{Deserialize, Serialize};

/// Block identifier assigned by the host graph.
///
/// Mirror (duplicate/alias) blocks carry the negated identifier of their
/// canonical source; see [`canonical_id`].
pub type BlockId = i64;

/// Map a mirror identifier to its canonical source identifier.
///
/// Pure function over the identifier value: mirrors are encoded as negative
/// ids, so the canonical id is the absolute value. Canonical ids map to
/// themselves.
pub fn canonical_id(id: BlockId) -> BlockId {
    id.abs()
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// Typed value of a block or reference property.
///
/// The host wire format tags values with a numeric type code; the codes in
/// use here are `1` (text), `2` (reference-set), `4` (number), and `6`
/// (choice-set).
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Free text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Ordered set of block/reference identifiers ("reference-set").
    BlockRefs(Vec<BlockId>),
    /// Ordered set of choice strings ("choice-set").
    Choices(Vec<String>),
}

impl PropertyValue {
    fn type_code(&self) -> u8 {
        match self {
            Self::Text(_) => 1,
            Self::BlockRefs(_) => 2,
            Self::Number(_) => 4,
            Self::Choices(_) => 6,
        }
    }
}

/// A named, typed value attached to a block or reference.
///
/// Identity is (owner, name): an owner has at most one property per name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PropertyWire", into = "PropertyWire")]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Host wire shape of a property: `{name, type, value}`.
#[derive(Serialize, Deserialize)]
struct PropertyWire {
    name: String,
    #[serde(rename = "type")]
    type_code: u8,
    value: serde_json::Value,
}

impl TryFrom<PropertyWire> for Property {
    type Error = String;

    fn try_from(wire: PropertyWire) -> std::result::Result<Self, Self::Error> {
        let value = match wire.type_code {
            1 => PropertyValue::Text(
                serde_json::from_value(wire.value)
                    .map_err(|e| format!("property '{}': {}", wire.name, e))?,
            ),
            2 => PropertyValue::BlockRefs(
                serde_json::from_value(wire.value)
                    .map_err(|e| format!("property '{}': {}", wire.name, e))?,
            ),
            4 => PropertyValue::Number(
                serde_json::from_value(wire.value)
                    .map_err(|e| format!("property '{}': {}", wire.name, e))?,
            ),
            6 => PropertyValue::Choices(
                serde_json::from_value(wire.value)
                    .map_err(|e| format!("property '{}': {}", wire.name, e))?,
            ),
            code => {
                return Err(format!(
                    "property '{}': unknown type code {}",
                    wire.name, code
                ))
            }
        };
        Ok(Property {
            name: wire.name,
            value,
        })
    }
}

impl From<Property> for PropertyWire {
    fn from(prop: Property) -> Self {
        let type_code = prop.value.type_code();
        let value = match prop.value {
            PropertyValue::Text(s) => serde_json::Value::from(s),
            PropertyValue::Number(n) => serde_json::Value::from(n),
            PropertyValue::BlockRefs(ids) => serde_json::Value::from(ids),
            PropertyValue::Choices(cs) => serde_json::Value::from(cs),
        };
        PropertyWire {
            name: prop.name,
            type_code,
            value,
        }
    }
}

// =============================================================================
// REFERENCES
// =============================================================================

/// Relation kind of a [`BlockRef`].
///
/// Wire codes: `1` = plain link, `2` = tag application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RefKind {
    Link,
    TagApplication,
}

impl TryFrom<u8> for RefKind {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Link),
            2 => Ok(Self::TagApplication),
            other => Err(format!("unknown reference kind {}", other)),
        }
    }
}

impl From<RefKind> for u8 {
    fn from(kind: RefKind) -> u8 {
        match kind {
            RefKind::Link => 1,
            RefKind::TagApplication => 2,
        }
    }
}

/// A typed directed edge from a source block to a target block.
///
/// The edge itself has an identifier distinct from both endpoints, and may
/// carry its own properties (sub-properties), used to attach an explicit
/// "which template" annotation to the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRef {
    /// Edge identifier.
    pub id: BlockId,
    /// Target block identifier.
    pub to: BlockId,
    /// Relation kind.
    #[serde(rename = "type")]
    pub kind: RefKind,
    /// Optional alias string carried on the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Ordered sub-properties carried on the edge.
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "data")]
    pub sub_properties: Vec<Property>,
}

impl BlockRef {
    pub fn new(id: BlockId, to: BlockId, kind: RefKind) -> Self {
        Self {
            id,
            to,
            kind,
            alias: None,
            sub_properties: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_sub_property(mut self, prop: Property) -> Self {
        self.sub_properties.push(prop);
        self
    }
}

// =============================================================================
// BLOCKS
// =============================================================================

/// A node in the outline tree: unit of text, properties, and references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Ordered child block identifiers (document order).
    #[serde(default)]
    pub children: Vec<BlockId>,
    /// Free text payload; may be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Ordered typed properties.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Ordered outgoing references.
    #[serde(default)]
    pub refs: Vec<BlockRef>,
}

impl Block {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Look up a property by name. A block has at most one per name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Text payload, defaulting to the empty string when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

// =============================================================================
// CONTENT FRAGMENTS
// =============================================================================

/// A content fragment submitted in edit commands.
///
/// Wire shape: `{"t": "t", "v": "..."}` for plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFragment {
    #[serde(rename = "t")]
    pub kind: String,
    #[serde(rename = "v")]
    pub value: String,
}

impl ContentFragment {
    /// Plain text fragment.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: "t".to_string(),
            value: value.into(),
        }
    }
}
