//! Document Root
//!
//! The page-level wrapper handed to downstream renderers. Created once per
//! conversion run by the page assembler and treated as read-only afterwards.

use crate::models::{FileInfo, IconInfo, Node, NodeMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when a page has no usable title property
pub const UNTITLED: &str = "Untitled";

/// Type tag of the document root (always `"page"`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Page,
}

/// Page-level properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageProperties {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileInfo>,

    /// Every raw page property, verbatim
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub raw_properties: Map<String, Value>,
}

/// Root of a converted page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: DocumentKind,

    pub properties: PageProperties,

    /// Top-level nodes in remote order
    #[serde(default)]
    pub children: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,

    pub processed_at: DateTime<Utc>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.properties.title
    }
}
