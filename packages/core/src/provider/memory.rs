//! In-memory provider backed by fixture data or an offline dump
//!
//! Used by tests and by hosts converting previously exported content. Failures
//! can be injected per block id to exercise partial-failure handling, and an
//! artificial latency makes concurrency observable.

use crate::models::{RawBlock, RawPage};
use crate::provider::BlockProvider;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Serialized provider content: page objects plus child lists keyed by parent id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderDump {
    #[serde(default)]
    pub pages: Vec<RawPage>,
    #[serde(default)]
    pub children: HashMap<String, Vec<RawBlock>>,
}

#[derive(Debug, Default)]
pub struct MemoryProvider {
    blocks: HashMap<String, RawBlock>,
    children: HashMap<String, Vec<String>>,
    pages: HashMap<String, RawPage>,
    failing_children: HashSet<String>,
    failing_blocks: HashSet<String>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Tracks one in-flight call for the lifetime of the guard
struct InFlight<'a>(&'a MemoryProvider);

impl<'a> InFlight<'a> {
    fn enter(provider: &'a MemoryProvider) -> Self {
        provider.calls.fetch_add(1, Ordering::SeqCst);
        let now = provider.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        provider.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(provider)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dump(dump: ProviderDump) -> Self {
        let mut provider = Self::new();
        for page in dump.pages {
            provider.add_page(page);
        }
        for (parent_id, blocks) in dump.children {
            provider.add_children(&parent_id, blocks);
        }
        provider
    }

    /// Load a [`ProviderDump`] from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading provider dump {}", path.display()))?;
        let dump: ProviderDump = serde_json::from_str(&raw)
            .with_context(|| format!("parsing provider dump {}", path.display()))?;
        Ok(Self::from_dump(dump))
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Append a child to `parent_id`'s child list
    pub fn add_child(&mut self, parent_id: &str, block: RawBlock) {
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(block.id.clone());
        self.blocks.insert(block.id.clone(), block);
    }

    pub fn add_children(&mut self, parent_id: &str, blocks: impl IntoIterator<Item = RawBlock>) {
        for block in blocks {
            self.add_child(parent_id, block);
        }
    }

    pub fn add_page(&mut self, page: RawPage) {
        self.pages.insert(page.id.clone(), page);
    }

    /// Make `fetch_children(block_id)` fail
    pub fn fail_children_of(&mut self, block_id: impl Into<String>) {
        self.failing_children.insert(block_id.into());
    }

    /// Make `fetch_block(block_id)` fail
    pub fn fail_block(&mut self, block_id: impl Into<String>) {
        self.failing_blocks.insert(block_id.into());
    }

    /// Number of provider calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were in flight at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl BlockProvider for MemoryProvider {
    async fn fetch_children(&self, block_id: &str) -> Result<Vec<RawBlock>> {
        let _guard = InFlight::enter(self);
        self.simulate_latency().await;

        if self.failing_children.contains(block_id) {
            bail!("simulated failure listing children of {}", block_id);
        }

        let ids = match self.children.get(block_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.blocks.get(id).cloned())
            .collect())
    }

    async fn fetch_page_info(&self, page_id: &str) -> Result<RawPage> {
        let _guard = InFlight::enter(self);
        self.simulate_latency().await;

        match self.pages.get(page_id) {
            Some(page) => Ok(page.clone()),
            None => bail!("page {} not found", page_id),
        }
    }

    async fn fetch_block(&self, block_id: &str) -> Result<RawBlock> {
        let _guard = InFlight::enter(self);
        self.simulate_latency().await;

        if self.failing_blocks.contains(block_id) {
            bail!("simulated failure retrieving block {}", block_id);
        }

        match self.blocks.get(block_id) {
            Some(block) => Ok(block.clone()),
            None => bail!("block {} not found", block_id),
        }
    }
}
