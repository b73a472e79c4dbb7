#![forbid(unsafe_code)]

//! List item model.
//!
//! The engine treats [`ItemFields`] as an opaque payload: it moves and removes
//! whole [`Item`]s and forwards field replacements verbatim, but never reads
//! or rewrites individual fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque identifier of an item. Unique within a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Displayable payload of a recipe item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    /// Display title.
    pub title: String,
    /// Chosen image reference.
    #[serde(default)]
    pub image_url: String,
    /// Cook time in minutes.
    #[serde(default, rename = "cookTime")]
    pub cook_time_mins: u32,
    /// Tags, conventionally `#`-prefixed.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Recipe body.
    #[serde(default)]
    pub recipe_text: String,
    /// Page the item was scraped from.
    #[serde(default, rename = "url", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ItemFields {
    /// Create fields with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Returns true if the recipe body has visible content.
    #[must_use]
    pub fn has_recipe(&self) -> bool {
        !self.recipe_text.trim().is_empty()
    }

    /// Number of tags.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

/// An entry in the ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, immutable after creation.
    pub id: ItemId,
    /// Opaque payload.
    #[serde(flatten)]
    pub fields: ItemFields,
}

impl Item {
    /// Create an item.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, fields: ItemFields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Create an item with only a title.
    #[must_use]
    pub fn titled(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self::new(id, ItemFields::titled(title))
    }
}
