//! Raw Block and Page Payloads
//!
//! Read-only views over the JSON objects returned by the remote content API.
//!
//! The core only relies on a small read contract: `id`, `type`,
//! `has_children`, `archived`, `in_trash` and the kind-specific payload stored
//! under a key equal to the block's `type` (e.g. `{"type": "paragraph",
//! "paragraph": {...}}`). Every other field is kept verbatim in `properties`.
//!
//! # Examples
//!
//! ```rust
//! use blocktree_core::models::RawBlock;
//! use serde_json::json;
//!
//! let block: RawBlock = serde_json::from_value(json!({
//!     "id": "b1",
//!     "type": "paragraph",
//!     "has_children": false,
//!     "paragraph": { "rich_text": [], "color": "default" }
//! })).unwrap();
//!
//! assert_eq!(block.block_type, "paragraph");
//! assert!(block.payload().is_some());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Partial user reference (`{"object": "user", "id": "..."}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialUser {
    pub id: String,
}

/// One block as returned by the content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block identifier (empty when the payload omitted it)
    #[serde(default)]
    pub id: String,

    /// Type tag, also the key of the kind-specific payload
    #[serde(rename = "type", default)]
    pub block_type: String,

    #[serde(default)]
    pub has_children: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub in_trash: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<PartialUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<PartialUser>,

    /// Everything else, including the kind payload under `properties[block_type]`
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl RawBlock {
    /// Create a block with the given kind payload
    ///
    /// Mostly useful for fixtures; real blocks are deserialized from the API.
    pub fn new(id: impl Into<String>, block_type: impl Into<String>, payload: Value) -> Self {
        let block_type = block_type.into();
        let mut properties = Map::new();
        properties.insert(block_type.clone(), payload);

        Self {
            id: id.into(),
            block_type,
            has_children: false,
            archived: false,
            in_trash: false,
            created_time: None,
            last_edited_time: None,
            created_by: None,
            last_edited_by: None,
            properties,
        }
    }

    /// Mark the block as having children on the remote side
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }

    /// The kind-specific payload (`properties[block_type]`)
    pub fn payload(&self) -> Option<&Value> {
        self.properties.get(&self.block_type)
    }

    /// A top-level field other than the kind payload (e.g. `icon` on child pages)
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Whether the block carries the fields the builder requires
    pub fn has_required_fields(&self) -> bool {
        !self.id.is_empty() && !self.block_type.is_empty()
    }

    /// Whether the block was deleted on the remote side
    pub fn is_removed(&self) -> bool {
        self.archived || self.in_trash
    }
}

/// Page object as returned by the content API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Value>,

    /// Page properties keyed by property name
    #[serde(default)]
    pub properties: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<PartialUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<PartialUser>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub in_trash: bool,
}

impl RawPage {
    /// Minimal page with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            cover: None,
            properties: Map::new(),
            created_time: None,
            last_edited_time: None,
            created_by: None,
            last_edited_by: None,
            archived: false,
            in_trash: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_payload_and_extra_fields() {
        let block: RawBlock = serde_json::from_value(json!({
            "object": "block",
            "id": "abc",
            "type": "child_page",
            "has_children": true,
            "icon": { "type": "emoji", "emoji": "📄" },
            "child_page": { "title": "Sub page" },
            "created_by": { "object": "user", "id": "u1" }
        }))
        .unwrap();

        assert_eq!(block.id, "abc");
        assert!(block.has_children);
        assert_eq!(block.payload().unwrap()["title"], "Sub page");
        assert_eq!(block.field("icon").unwrap()["emoji"], "📄");
        assert_eq!(block.created_by.as_ref().unwrap().id, "u1");
    }

    #[test]
    fn test_missing_fields_default() {
        let block: RawBlock = serde_json::from_value(json!({})).unwrap();
        assert!(!block.has_required_fields());
        assert!(!block.is_removed());
        assert!(block.payload().is_none());
    }

    #[test]
    fn test_removed_flags() {
        let mut block = RawBlock::new("b", "paragraph", json!({}));
        assert!(!block.is_removed());
        block.in_trash = true;
        assert!(block.is_removed());
    }
}
