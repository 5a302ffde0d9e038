//! Typed content blocks.
//!
//! A block is an `{id, type, value}` triple. In Rust the `type` is not a
//! separate field: every domain has a value enum whose variant *is* the
//! block type, so a block cannot carry a value of the wrong shape. The
//! serialized form still spells out `"type"` and `"value"` so project files
//! stay readable and compatible with earlier exports.

pub mod album;
pub mod bio;
pub mod prompt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;
use uuid::Uuid;

/// Opaque, timestamp-derived block identifier.
///
/// Ids are never reused: they embed a UUIDv7, whose leading bits are the
/// creation time in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a fresh id prefixed with a human readable slug
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::now_v7()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The discriminant of a block value: what the sidebar offers and what a
/// card header shows.
pub trait BlockKind: Copy + Eq + fmt::Debug + 'static {
    /// Every kind in sidebar order
    const ALL: &'static [Self];

    /// Display label, identical to the serialized `"type"` string
    fn label(self) -> &'static str;

    /// Short lowercase prefix used for generated ids
    fn slug(self) -> &'static str;
}

/// A per-domain value sum type.
pub trait BlockValue: Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned {
    type Kind: BlockKind;

    fn kind(&self) -> Self::Kind;

    /// Default value for a freshly added block of `kind`
    fn default_for(kind: Self::Kind) -> Self;
}

/// One block in an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block<V> {
    pub id: BlockId,
    #[serde(flatten)]
    pub value: V,
}

impl<V: BlockValue> Block<V> {
    /// Create a block of `kind` holding that kind's default value
    pub fn new(kind: V::Kind) -> Self {
        Self {
            id: BlockId::generate(kind.slug()),
            value: V::default_for(kind),
        }
    }

    pub fn with_value(value: V) -> Self {
        Self {
            id: BlockId::generate(value.kind().slug()),
            value,
        }
    }

    pub fn kind(&self) -> V::Kind {
        self.value.kind()
    }
}

/// Toggle `option` in an ordered selection: remove it if present, append it
/// otherwise.
pub fn toggle_tag(selected: &mut Vec<String>, option: &str) {
    if let Some(pos) = selected.iter().position(|s| s == option) {
        selected.remove(pos);
    } else {
        selected.push(option.to_string());
    }
}

/// Generate an id for a nested list item (links, tracks).
pub fn item_id(prefix: &str) -> String {
    BlockId::generate(prefix).0
}
