//! Configuration for page conversion runs

use crate::models::ProcessError;
use crate::services::{ConvertError, PageInfoCache};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default cap on in-flight provider calls for batched lookups
pub const DEFAULT_BATCH_CONCURRENCY: usize = 5;

/// Serializable converter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Maximum nesting depth to build (`None` = unbounded)
    pub max_depth: Option<usize>,

    /// Attach audit metadata (timestamps, editor ids) to every node
    pub include_audit: bool,

    /// Maximum in-flight provider calls in batched block lookups
    pub batch_concurrency: usize,

    /// Cache single-block lookups across calls on the same converter
    pub enable_block_cache: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            include_audit: false,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            enable_block_cache: false,
        }
    }
}

impl ConverterConfig {
    /// Parse a JSON configuration document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConvertError::invalid_config)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_concurrency == 0 {
            return Err("batch_concurrency must be greater than 0".to_string());
        }

        if self.max_depth == Some(0) {
            return Err("max_depth must be greater than 0 (omit it for unbounded)".to_string());
        }

        Ok(())
    }
}

/// Called with `(current, total)` after each top-level block
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Called for every recorded [`ProcessError`]
pub type ErrorCallback = Arc<dyn Fn(&ProcessError) + Send + Sync>;

/// Options of one tree build
///
/// Callbacks are notifications only; nothing they do changes the traversal.
#[derive(Clone, Default)]
pub struct BuildOptions {
    pub max_depth: Option<usize>,
    pub include_audit: bool,
    pub on_progress: Option<ProgressCallback>,
    pub on_error: Option<ErrorCallback>,
    pub page_cache: Option<PageInfoCache>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            include_audit: config.include_audit,
            ..Self::default()
        }
    }

    /// Same depth rule as [`ConverterConfig::validate`]
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be greater than 0 (omit it for unbounded)".to_string());
        }
        Ok(())
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_audit(mut self, include_audit: bool) -> Self {
        self.include_audit = include_audit;
        self
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn with_error_handler<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProcessError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(callback));
        self
    }

    pub fn with_page_cache(mut self, cache: PageInfoCache) -> Self {
        self.page_cache = Some(cache);
        self
    }
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("max_depth", &self.max_depth)
            .field("include_audit", &self.include_audit)
            .field("on_progress", &self.on_progress.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("page_cache", &self.page_cache.as_ref().map(PageInfoCache::len))
            .finish()
    }
}
