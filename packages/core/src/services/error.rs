//! Conversion Error Types
//!
//! Hard failures of a conversion run. Per-block problems never surface here:
//! the tree builder records them as [`ProcessError`](crate::models::ProcessError)
//! values and keeps going. A `ConvertError` means the run could not start
//! (invalid options, the page itself could not be fetched) or its output could
//! not be encoded.

use thiserror::Error;

/// Conversion run errors
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Options failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The page object could not be fetched
    #[error("Failed to fetch page {page_id}: {source:#}")]
    PageFetch {
        page_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// The top-level blocks of a page or block could not be fetched
    #[error("Failed to fetch children of {block_id}: {source:#}")]
    ChildrenFetch {
        block_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// A single block lookup failed
    #[error("Failed to fetch block {block_id}: {source:#}")]
    BlockFetch {
        block_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Block not returned by the provider
    #[error("Block not found: {block_id}")]
    BlockNotFound { block_id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ConvertError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn page_fetch(page_id: impl Into<String>, source: anyhow::Error) -> Self {
        Self::PageFetch {
            page_id: page_id.into(),
            source,
        }
    }

    pub fn children_fetch(block_id: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ChildrenFetch {
            block_id: block_id.into(),
            source,
        }
    }

    pub fn block_fetch(block_id: impl Into<String>, source: anyhow::Error) -> Self {
        Self::BlockFetch {
            block_id: block_id.into(),
            source,
        }
    }

    pub fn block_not_found(block_id: impl Into<String>) -> Self {
        Self::BlockNotFound {
            block_id: block_id.into(),
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
