//! Page Info Cache for Mention Resolution
//!
//! Maps page ids to a title and emoji icon so that page mentions inside rich
//! text can carry a readable label. The cache is owned by the caller and handed
//! to the builder through its options; clones share the same underlying map.
//!
//! # Lifecycle
//!
//! Entries are written once per page id and read many times. Nothing is
//! invalidated automatically: the caller decides when to [`clear`] (once per
//! document, or kept warm across a batch of pages that reference each other).
//! Concurrent inserts for the same id are last-writer-wins.
//!
//! [`clear`]: PageInfoCache::clear

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Title and icon of a page, as used by page mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Shared, append-mostly page info lookup
#[derive(Debug, Clone, Default)]
pub struct PageInfoCache {
    entries: Arc<RwLock<HashMap<String, PageInfo>>>,
}

impl PageInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, page_id: impl Into<String>, info: PageInfo) {
        // A poisoned lock only means a writer panicked mid-insert; the map is still usable
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(page_id.into(), info);
    }

    pub fn get(&self, page_id: &str) -> Option<PageInfo> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(page_id).cloned()
    }

    pub fn contains(&self, page_id: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(page_id)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> PageInfo {
        PageInfo {
            title: title.to_string(),
            icon: None,
        }
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = PageInfoCache::new();
        let handle = cache.clone();

        handle.insert("p1", info("Roadmap"));
        assert_eq!(cache.get("p1"), Some(info("Roadmap")));
        assert!(cache.contains("p1"));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(handle.is_empty());
        assert_eq!(handle.get("p1"), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = PageInfoCache::new();
        cache.insert("p1", info("Draft"));
        cache.insert("p1", info("Final"));
        assert_eq!(cache.get("p1").map(|i| i.title), Some("Final".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let cache = PageInfoCache::new();
        let mut handles = Vec::new();

        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.insert(format!("page-{}", i), info("Page"));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 16);
    }
}
