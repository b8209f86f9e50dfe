//! Data Models
//!
//! This module contains the data structures used throughout the converter:
//!
//! - `RawBlock` / `RawPage` - read-only views over remote API payloads
//! - `Node` - one node of the intermediate tree, typed by `BlockProperties`
//! - `RichText` - resolved inline spans
//! - `Document` - the page root handed to renderers
//! - `ProcessResult` - nodes plus accumulated errors and warnings of a build

mod document;
mod file;
mod node;
mod process;
mod raw;
mod rich_text;

pub use document::{Document, DocumentKind, PageProperties, UNTITLED};
pub use file::{FileInfo, FileSource, IconInfo};
pub use node::{
    BlockKind, BlockProperties, CalloutProperties, ChildDatabaseProperties, ChildPageProperties,
    CodeProperties, ColumnProperties, EmptyProperties, EquationProperties, HeadingProperties,
    LinkPreviewProperties, LinkProperties, MediaProperties, Node, NodeMetadata, SyncedBlockProperties,
    SyncedFrom, TableProperties, TableRowProperties, TextProperties, ToDoProperties, DEFAULT_COLOR,
};
pub use process::{ProcessError, ProcessMetadata, ProcessResult};
pub use raw::{PartialUser, RawBlock, RawPage};
pub use rich_text::{plain_text, Mention, RichText, TextAnnotations};
