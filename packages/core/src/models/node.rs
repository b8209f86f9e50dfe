//! Intermediate Node Data Structures
//!
//! This module defines the renderer-agnostic tree produced by the builder.
//!
//! # Architecture
//!
//! - **Closed kind set**: [`BlockKind`] enumerates every supported block kind
//! - **Typed properties**: [`BlockProperties`] is a tagged union, one variant per
//!   kind, so `type` and `properties` can never disagree
//! - **Owned children**: a [`Node`] exclusively owns its children; `children` is
//!   `None` whenever no child survived transformation (never `Some(vec![])`)
//!
//! # Serialized shape
//!
//! ```json
//! { "id": "b1", "type": "paragraph",
//!   "properties": { "rich_text": [], "color": "blue" },
//!   "children": [ ... ] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use blocktree_core::models::{BlockKind, BlockProperties, Node, TextProperties};
//!
//! let node = Node::new(
//!     "b1",
//!     BlockProperties::Paragraph(TextProperties::default()),
//! );
//! assert_eq!(node.kind(), BlockKind::Paragraph);
//! assert!(node.children.is_none());
//! ```

use crate::models::{FileInfo, IconInfo, RichText};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color value meaning "no explicit color"
pub const DEFAULT_COLOR: &str = "default";

/// Every block kind the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Quote,
    Callout,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Code,
    Equation,
    Image,
    Video,
    Audio,
    File,
    Pdf,
    Bookmark,
    Embed,
    LinkPreview,
    Table,
    TableRow,
    ColumnList,
    Column,
    ChildDatabase,
    ChildPage,
    SyncedBlock,
    Breadcrumb,
    Divider,
    TableOfContents,
}

impl BlockKind {
    pub const ALL: [BlockKind; 30] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Quote,
        BlockKind::Callout,
        BlockKind::BulletedListItem,
        BlockKind::NumberedListItem,
        BlockKind::ToDo,
        BlockKind::Toggle,
        BlockKind::Code,
        BlockKind::Equation,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::Audio,
        BlockKind::File,
        BlockKind::Pdf,
        BlockKind::Bookmark,
        BlockKind::Embed,
        BlockKind::LinkPreview,
        BlockKind::Table,
        BlockKind::TableRow,
        BlockKind::ColumnList,
        BlockKind::Column,
        BlockKind::ChildDatabase,
        BlockKind::ChildPage,
        BlockKind::SyncedBlock,
        BlockKind::Breadcrumb,
        BlockKind::Divider,
        BlockKind::TableOfContents,
    ];

    /// Wire name of the kind, identical to the remote API's type tag
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading_1",
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::Quote => "quote",
            BlockKind::Callout => "callout",
            BlockKind::BulletedListItem => "bulleted_list_item",
            BlockKind::NumberedListItem => "numbered_list_item",
            BlockKind::ToDo => "to_do",
            BlockKind::Toggle => "toggle",
            BlockKind::Code => "code",
            BlockKind::Equation => "equation",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::Audio => "audio",
            BlockKind::File => "file",
            BlockKind::Pdf => "pdf",
            BlockKind::Bookmark => "bookmark",
            BlockKind::Embed => "embed",
            BlockKind::LinkPreview => "link_preview",
            BlockKind::Table => "table",
            BlockKind::TableRow => "table_row",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column => "column",
            BlockKind::ChildDatabase => "child_database",
            BlockKind::ChildPage => "child_page",
            BlockKind::SyncedBlock => "synced_block",
            BlockKind::Breadcrumb => "breadcrumb",
            BlockKind::Divider => "divider",
            BlockKind::TableOfContents => "table_of_contents",
        }
    }

    /// Parse a raw type tag; `None` for kinds the converter does not support
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        BlockKind::ALL.iter().copied().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rich text with an optional block color (paragraph, quote, list items, toggle)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextProperties {
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadingProperties {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub is_toggleable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalloutProperties {
    pub rich_text: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoProperties {
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeProperties {
    pub rich_text: Vec<RichText>,
    pub language: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationProperties {
    pub expression: String,
}

/// Image, video, audio, file and pdf blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaProperties {
    pub file: FileInfo,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

/// Bookmark and embed blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkProperties {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkPreviewProperties {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableProperties {
    pub table_width: u32,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRowProperties {
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildDatabaseProperties {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildPageProperties {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconInfo>,
}

/// Reference from a mirror synced block to its original
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncedBlockProperties {
    /// `None` for the original block, `Some` for a mirror
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_from: Option<SyncedFrom>,
}

/// Properties of kinds that carry no data (column list, divider, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyProperties {}

/// Kind tag plus kind-specific properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "snake_case")]
pub enum BlockProperties {
    Paragraph(TextProperties),
    #[serde(rename = "heading_1")]
    Heading1(HeadingProperties),
    #[serde(rename = "heading_2")]
    Heading2(HeadingProperties),
    #[serde(rename = "heading_3")]
    Heading3(HeadingProperties),
    Quote(TextProperties),
    Callout(CalloutProperties),
    BulletedListItem(TextProperties),
    NumberedListItem(TextProperties),
    ToDo(ToDoProperties),
    Toggle(TextProperties),
    Code(CodeProperties),
    Equation(EquationProperties),
    Image(MediaProperties),
    Video(MediaProperties),
    Audio(MediaProperties),
    File(MediaProperties),
    Pdf(MediaProperties),
    Bookmark(LinkProperties),
    Embed(LinkProperties),
    LinkPreview(LinkPreviewProperties),
    Table(TableProperties),
    TableRow(TableRowProperties),
    ColumnList(EmptyProperties),
    Column(ColumnProperties),
    ChildDatabase(ChildDatabaseProperties),
    ChildPage(ChildPageProperties),
    SyncedBlock(SyncedBlockProperties),
    Breadcrumb(EmptyProperties),
    Divider(EmptyProperties),
    TableOfContents(EmptyProperties),
}

impl BlockProperties {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockProperties::Paragraph(_) => BlockKind::Paragraph,
            BlockProperties::Heading1(_) => BlockKind::Heading1,
            BlockProperties::Heading2(_) => BlockKind::Heading2,
            BlockProperties::Heading3(_) => BlockKind::Heading3,
            BlockProperties::Quote(_) => BlockKind::Quote,
            BlockProperties::Callout(_) => BlockKind::Callout,
            BlockProperties::BulletedListItem(_) => BlockKind::BulletedListItem,
            BlockProperties::NumberedListItem(_) => BlockKind::NumberedListItem,
            BlockProperties::ToDo(_) => BlockKind::ToDo,
            BlockProperties::Toggle(_) => BlockKind::Toggle,
            BlockProperties::Code(_) => BlockKind::Code,
            BlockProperties::Equation(_) => BlockKind::Equation,
            BlockProperties::Image(_) => BlockKind::Image,
            BlockProperties::Video(_) => BlockKind::Video,
            BlockProperties::Audio(_) => BlockKind::Audio,
            BlockProperties::File(_) => BlockKind::File,
            BlockProperties::Pdf(_) => BlockKind::Pdf,
            BlockProperties::Bookmark(_) => BlockKind::Bookmark,
            BlockProperties::Embed(_) => BlockKind::Embed,
            BlockProperties::LinkPreview(_) => BlockKind::LinkPreview,
            BlockProperties::Table(_) => BlockKind::Table,
            BlockProperties::TableRow(_) => BlockKind::TableRow,
            BlockProperties::ColumnList(_) => BlockKind::ColumnList,
            BlockProperties::Column(_) => BlockKind::Column,
            BlockProperties::ChildDatabase(_) => BlockKind::ChildDatabase,
            BlockProperties::ChildPage(_) => BlockKind::ChildPage,
            BlockProperties::SyncedBlock(_) => BlockKind::SyncedBlock,
            BlockProperties::Breadcrumb(_) => BlockKind::Breadcrumb,
            BlockProperties::Divider(_) => BlockKind::Divider,
            BlockProperties::TableOfContents(_) => BlockKind::TableOfContents,
        }
    }

    fn color_slot(&mut self) -> Option<&mut Option<String>> {
        match self {
            BlockProperties::Paragraph(p)
            | BlockProperties::Quote(p)
            | BlockProperties::BulletedListItem(p)
            | BlockProperties::NumberedListItem(p)
            | BlockProperties::Toggle(p) => Some(&mut p.color),
            BlockProperties::Heading1(p)
            | BlockProperties::Heading2(p)
            | BlockProperties::Heading3(p) => Some(&mut p.color),
            BlockProperties::Callout(p) => Some(&mut p.color),
            BlockProperties::ToDo(p) => Some(&mut p.color),
            BlockProperties::Code(p) => Some(&mut p.color),
            _ => None,
        }
    }

    /// Block color, if the kind has one and it is set
    pub fn color(&self) -> Option<&str> {
        match self {
            BlockProperties::Paragraph(p)
            | BlockProperties::Quote(p)
            | BlockProperties::BulletedListItem(p)
            | BlockProperties::NumberedListItem(p)
            | BlockProperties::Toggle(p) => p.color.as_deref(),
            BlockProperties::Heading1(p)
            | BlockProperties::Heading2(p)
            | BlockProperties::Heading3(p) => p.color.as_deref(),
            BlockProperties::Callout(p) => p.color.as_deref(),
            BlockProperties::ToDo(p) => p.color.as_deref(),
            BlockProperties::Code(p) => p.color.as_deref(),
            _ => None,
        }
    }

    /// Set the block color. Returns `false` when the kind has no color property.
    pub fn set_color(&mut self, color: impl Into<String>) -> bool {
        match self.color_slot() {
            Some(slot) => {
                *slot = Some(color.into());
                true
            }
            None => false,
        }
    }

    /// Primary rich text of the block, if the kind has one
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match self {
            BlockProperties::Paragraph(p)
            | BlockProperties::Quote(p)
            | BlockProperties::BulletedListItem(p)
            | BlockProperties::NumberedListItem(p)
            | BlockProperties::Toggle(p) => Some(&p.rich_text),
            BlockProperties::Heading1(p)
            | BlockProperties::Heading2(p)
            | BlockProperties::Heading3(p) => Some(&p.rich_text),
            BlockProperties::Callout(p) => Some(&p.rich_text),
            BlockProperties::ToDo(p) => Some(&p.rich_text),
            BlockProperties::Code(p) => Some(&p.rich_text),
            _ => None,
        }
    }
}

/// Audit record copied from the raw block when auditing is enabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_trash: Option<bool>,
}

/// One node of the intermediate tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Id of the block this node was built from
    pub id: String,

    /// `type` + `properties` on the wire
    #[serde(flatten)]
    pub properties: BlockProperties,

    /// Child nodes in remote order; `None` when there are none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

impl Node {
    pub fn new(id: impl Into<String>, properties: BlockProperties) -> Self {
        Self {
            id: id.into(),
            properties,
            children: None,
            metadata: None,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.properties.kind()
    }

    /// Attach children, keeping the "no empty children" invariant
    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
    }

    /// Builder-style variant of [`Node::set_children`]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.set_children(children);
        self
    }

    /// Children as a slice (empty when absent)
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn color(&self) -> Option<&str> {
        self.properties.color()
    }
}
