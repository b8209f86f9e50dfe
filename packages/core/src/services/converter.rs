//! Page Converter Service
//!
//! Orchestrates a whole conversion on top of a [`BlockProvider`]:
//!
//! 1. fetch the page object
//! 2. fetch its top-level blocks
//! 3. run the tree builder
//! 4. assemble the [`Document`]
//!
//! Only steps 1 and 2 can fail the run. Everything below the top level is
//! handled by the builder's per-block error isolation and reported in the
//! returned [`PageConversion::metadata`].
//!
//! # Examples
//!
//! ```rust
//! use blocktree_core::config::ConverterConfig;
//! use blocktree_core::models::{RawBlock, RawPage};
//! use blocktree_core::provider::MemoryProvider;
//! use blocktree_core::services::PageConverter;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut provider = MemoryProvider::new();
//!     provider.add_page(RawPage::new("page-1"));
//!     provider.add_child("page-1", RawBlock::new("b1", "divider", json!({})));
//!
//!     let converter = PageConverter::new(Arc::new(provider), ConverterConfig::default())?;
//!     let conversion = converter.convert_page("page-1").await?;
//!
//!     assert_eq!(conversion.document.children.len(), 1);
//!     assert!(conversion.metadata.errors.is_empty());
//!     Ok(())
//! }
//! ```

use crate::config::{BuildOptions, ConverterConfig};
use crate::models::{Document, Node, ProcessMetadata, RawBlock};
use crate::provider::{fetch_blocks_batched, BlockProvider};
use crate::services::page_assembler::{assemble_document, extract_title};
use crate::services::tree_builder::build_tree;
use crate::services::{ConvertError, PageInfo, PageInfoCache};
use crate::transform::{resolve_icon, RawIcon};
use crate::utils::format_id;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

/// A converted page together with the build diagnostics
#[derive(Debug, Clone)]
pub struct PageConversion {
    pub document: Document,
    pub metadata: ProcessMetadata,
}

pub struct PageConverter {
    provider: Arc<dyn BlockProvider>,
    config: ConverterConfig,
    page_cache: PageInfoCache,
    block_cache: RwLock<HashMap<String, Node>>,
}

impl PageConverter {
    /// Create a converter; fails when `config` does not validate
    pub fn new(
        provider: Arc<dyn BlockProvider>,
        config: ConverterConfig,
    ) -> Result<Self, ConvertError> {
        config.validate().map_err(ConvertError::invalid_config)?;

        Ok(Self {
            provider,
            config,
            page_cache: PageInfoCache::new(),
            block_cache: RwLock::new(HashMap::new()),
        })
    }

    /// Share an existing page-info cache (e.g. across converters for one batch)
    pub fn with_page_cache(mut self, cache: PageInfoCache) -> Self {
        self.page_cache = cache;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn page_cache(&self) -> &PageInfoCache {
        &self.page_cache
    }

    /// Build options derived from the config, wired to this converter's page cache
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::from_config(&self.config).with_page_cache(self.page_cache.clone())
    }

    /// Convert a page with the default options
    pub async fn convert_page(&self, page_id: &str) -> Result<PageConversion, ConvertError> {
        self.convert_page_with(page_id, self.build_options()).await
    }

    /// Convert a page with caller-supplied options (callbacks, depth bound)
    #[instrument(skip(self, options))]
    pub async fn convert_page_with(
        &self,
        page_id: &str,
        options: BuildOptions,
    ) -> Result<PageConversion, ConvertError> {
        options.validate().map_err(ConvertError::invalid_config)?;

        let page_id = format_id(page_id);
        tracing::info!("Converting page {}", page_id);

        let page = self
            .provider
            .fetch_page_info(&page_id)
            .await
            .map_err(|e| ConvertError::page_fetch(&page_id, e))?;

        let blocks = self
            .provider
            .fetch_children(&page_id)
            .await
            .map_err(|e| ConvertError::children_fetch(&page_id, e))?;

        let result = build_tree(&blocks, self.provider.as_ref(), &options).await;
        let document = assemble_document(&page, result.nodes, options.include_audit);

        tracing::info!(
            "Converted page {} ({}): {}/{} top-level blocks, {} processed, {} errors, {} warnings in {}ms",
            page_id,
            document.title(),
            document.children.len(),
            result.metadata.total_count,
            result.metadata.processed_count,
            result.metadata.errors.len(),
            result.metadata.warnings.len(),
            result.metadata.elapsed_ms
        );

        Ok(PageConversion {
            document,
            metadata: result.metadata,
        })
    }

    /// Fetch a page's title and icon into the page cache
    ///
    /// Run this for pages referenced by mentions before converting, so the
    /// mentions carry a readable title.
    pub async fn prefetch_page_info(&self, page_id: &str) -> Result<PageInfo, ConvertError> {
        let page_id = format_id(page_id);
        let page = self
            .provider
            .fetch_page_info(&page_id)
            .await
            .map_err(|e| ConvertError::page_fetch(&page_id, e))?;

        let icon = page
            .icon
            .as_ref()
            .and_then(|value| serde_json::from_value::<RawIcon>(value.clone()).ok())
            .and_then(|raw| resolve_icon(Some(&raw)))
            .and_then(|icon| icon.emoji().map(str::to_string));

        let info = PageInfo {
            title: extract_title(&page.properties),
            icon,
        };
        tracing::debug!("Cached page info for {}: {}", page_id, info.title);
        self.page_cache.insert(page_id, info.clone());
        Ok(info)
    }

    /// Build the tree for one block, using the block cache when enabled
    pub async fn get_block(&self, block_id: &str) -> Result<Node, ConvertError> {
        if let Some(node) = self.cached_block(block_id).await {
            tracing::debug!("Cache hit for block: {}", block_id);
            return Ok(node);
        }

        let raw = self
            .provider
            .fetch_block(block_id)
            .await
            .map_err(|e| ConvertError::block_fetch(block_id, e))?;
        self.build_single(block_id, raw).await
    }

    /// Build several blocks, at most `batch_concurrency` fetches in flight
    ///
    /// Ids that fail to fetch or build are logged and left out of the map.
    pub async fn get_blocks(&self, block_ids: &[String]) -> HashMap<String, Node> {
        tracing::info!("Batch fetching {} blocks", block_ids.len());

        let mut results = HashMap::with_capacity(block_ids.len());
        let mut missing = Vec::new();
        for id in block_ids {
            match self.cached_block(id).await {
                Some(node) => {
                    results.insert(id.clone(), node);
                }
                None => missing.push(id.clone()),
            }
        }

        let fetched =
            fetch_blocks_batched(self.provider.as_ref(), &missing, self.config.batch_concurrency)
                .await;

        for (id, raw) in fetched {
            let built = match raw {
                Ok(raw) => self.build_single(&id, raw).await,
                Err(e) => Err(ConvertError::block_fetch(&id, e)),
            };
            match built {
                Ok(node) => {
                    results.insert(id, node);
                }
                Err(e) => tracing::error!("Error fetching block {}: {}", id, e),
            }
        }

        tracing::info!("Fetched {}/{} blocks", results.len(), block_ids.len());
        results
    }

    /// Drop cached blocks and page infos
    pub async fn clear_caches(&self) {
        self.block_cache.write().await.clear();
        self.page_cache.clear();
    }

    async fn cached_block(&self, block_id: &str) -> Option<Node> {
        if !self.config.enable_block_cache {
            return None;
        }
        self.block_cache.read().await.get(block_id).cloned()
    }

    async fn build_single(
        &self,
        block_id: &str,
        raw: RawBlock,
    ) -> Result<Node, ConvertError> {
        let options = self.build_options();
        let result = build_tree(std::slice::from_ref(&raw), self.provider.as_ref(), &options).await;

        let node = result
            .nodes
            .into_iter()
            .next()
            .ok_or_else(|| ConvertError::block_not_found(block_id))?;

        if self.config.enable_block_cache {
            self.block_cache
                .write()
                .await
                .insert(block_id.to_string(), node.clone());
        }
        Ok(node)
    }
}

impl std::fmt::Debug for PageConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageConverter")
            .field("config", &self.config)
            .field("page_cache_entries", &self.page_cache.len())
            .finish()
    }
}
