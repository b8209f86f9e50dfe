//! BlockProvider Trait - Content API Abstraction
//!
//! The tree builder never talks to the remote content API directly. Everything
//! it needs is behind [`BlockProvider`]: list the children of a block, load a
//! page object, load a single block. Transport, authentication and pagination
//! are the implementation's business; `fetch_children` returns one already
//! concatenated sequence.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: every call is a suspension point of the traversal
//! 2. **Error Handling**: `anyhow::Result`, so implementations can attach
//!    context freely. The builder renders the whole chain into the recorded
//!    `ProcessError` and never propagates it past a subtree.
//! 3. **Rate Limits**: the builder issues one call at a time per branch;
//!    [`fetch_blocks_batched`] caps in-flight calls for multi-id lookups.
//!
//! # Examples
//!
//! ```rust
//! use blocktree_core::provider::{BlockProvider, MemoryProvider};
//! use blocktree_core::models::RawBlock;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut provider = MemoryProvider::new();
//!     provider.add_child("page-1", RawBlock::new("b1", "divider", json!({})));
//!
//!     let children = provider.fetch_children("page-1").await?;
//!     assert_eq!(children.len(), 1);
//!     Ok(())
//! }
//! ```

mod batch;
mod memory;

pub use batch::fetch_blocks_batched;
pub use memory::{MemoryProvider, ProviderDump};

use crate::models::{RawBlock, RawPage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of raw blocks and pages
///
/// Implementations must be `Send + Sync`; the traversal future is `Send` and
/// holds a shared reference to the provider across suspension points.
#[async_trait]
pub trait BlockProvider: Send + Sync {
    /// Ordered children of a block or page (zero or more)
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<RawBlock>>;

    /// Page object for a page id
    async fn fetch_page_info(&self, page_id: &str) -> Result<RawPage>;

    /// A single block by id
    async fn fetch_block(&self, block_id: &str) -> Result<RawBlock>;
}

#[async_trait]
impl<P> BlockProvider for Arc<P>
where
    P: BlockProvider + ?Sized,
{
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<RawBlock>> {
        (**self).fetch_children(block_id).await
    }

    async fn fetch_page_info(&self, page_id: &str) -> Result<RawPage> {
        (**self).fetch_page_info(page_id).await
    }

    async fn fetch_block(&self, block_id: &str) -> Result<RawBlock> {
        (**self).fetch_block(block_id).await
    }
}
