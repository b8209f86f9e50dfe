//! Leaf and Parent Transformers
//!
//! Pure functions mapping one [`RawBlock`] to the typed properties of one
//! [`Node`]. Transformers never perform I/O and never fail on missing optional
//! fields: absent rich text becomes an empty sequence, absent colors stay
//! `None`, an absent to-do checked state is `false`. They only fail when a
//! payload has the wrong shape, which the builder records per block.
//!
//! Which transformer runs for which kind is decided by the dispatch table in
//! [`crate::behaviors`].

mod files;
pub mod media;
pub mod rich_text;
pub mod structure;
pub mod text;

pub(crate) use files::{resolve_file, resolve_icon, RawFileRef, RawIcon};
pub use rich_text::resolve_rich_text;
pub(crate) use rich_text::{resolve_runs, RawRichText};

use crate::behaviors;
use crate::models::{BlockProperties, Node, NodeMetadata, RawBlock};
use crate::services::PageInfoCache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a transformer for a single block
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Malformed {block_type} payload: {reason}")]
    MalformedPayload { block_type: String, reason: String },

    #[error("Malformed rich text: {0}")]
    MalformedRichText(String),

    #[error("No transformer for block type '{0}'")]
    UnexpectedKind(String),
}

impl TransformError {
    pub fn malformed(block: &RawBlock, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            block_type: block.block_type.clone(),
            reason: reason.into(),
        }
    }

    pub fn malformed_rich_text(reason: impl Into<String>) -> Self {
        Self::MalformedRichText(reason.into())
    }

    pub fn unexpected_kind(block_type: impl Into<String>) -> Self {
        Self::UnexpectedKind(block_type.into())
    }
}

/// Shared inputs of every transformer call
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformContext<'a> {
    /// Attach audit metadata to produced nodes
    pub include_audit: bool,

    /// Lookup used to resolve page mention titles and icons
    pub page_cache: Option<&'a PageInfoCache>,
}

impl<'a> TransformContext<'a> {
    pub fn new(include_audit: bool, page_cache: Option<&'a PageInfoCache>) -> Self {
        Self {
            include_audit,
            page_cache,
        }
    }
}

/// Signature shared by all per-kind transformers
pub type TransformFn = fn(&RawBlock, &TransformContext<'_>) -> Result<BlockProperties, TransformError>;

/// Deserialize the block's kind payload; absent or `null` payloads use defaults
pub(crate) fn payload<T>(block: &RawBlock) -> Result<T, TransformError>
where
    T: DeserializeOwned + Default,
{
    match block.payload() {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| TransformError::malformed(block, e.to_string())),
    }
}

/// Audit record for a block, or `None` when auditing is off
pub fn extract_metadata(block: &RawBlock, include_audit: bool) -> Option<NodeMetadata> {
    if !include_audit {
        return None;
    }

    Some(NodeMetadata {
        created_time: block.created_time.clone(),
        last_edited_time: block.last_edited_time.clone(),
        created_by: block.created_by.as_ref().map(|u| u.id.clone()),
        last_edited_by: block.last_edited_by.as_ref().map(|u| u.id.clone()),
        archived: Some(block.archived),
        in_trash: Some(block.in_trash),
    })
}

/// Run the registered transformer for the block's kind
///
/// Returns `Ok(None)` for type tags outside the supported set. No children are
/// fetched or attached here.
pub fn transform_block(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<Option<Node>, TransformError> {
    let Some(behavior) = behaviors::behavior_for_tag(&block.block_type) else {
        return Ok(None);
    };

    let properties = (behavior.transform)(block, ctx)?;
    Ok(Some(Node {
        id: block.id.clone(),
        properties,
        children: None,
        metadata: extract_metadata(block, ctx.include_audit),
    }))
}
