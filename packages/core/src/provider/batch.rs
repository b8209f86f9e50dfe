use crate::models::RawBlock;
use crate::provider::BlockProvider;
use futures::stream::{self, StreamExt};

/// Fetch many blocks with at most `concurrency` calls in flight
///
/// Results come back in the order of `ids`, each paired with its id. A
/// `concurrency` of zero is treated as one.
pub async fn fetch_blocks_batched(
    provider: &dyn BlockProvider,
    ids: &[String],
    concurrency: usize,
) -> Vec<(String, anyhow::Result<RawBlock>)> {
    stream::iter(ids.iter().cloned())
        .map(|id| async move {
            let result = provider.fetch_block(&id).await;
            (id, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_batched_fetch_caps_in_flight_calls() {
        let mut provider = MemoryProvider::new().with_latency(Duration::from_millis(5));
        let ids: Vec<String> = (0..12).map(|i| format!("b{}", i)).collect();
        for id in &ids {
            provider.add_child("page", RawBlock::new(id.clone(), "divider", json!({})));
        }
        provider.fail_block("b3");

        let results = fetch_blocks_batched(&provider, &ids, 5).await;

        let returned: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(returned, expected);
        assert!(results[3].1.is_err());
        assert_eq!(results.iter().filter(|(_, r)| r.is_ok()).count(), 11);
        assert!(provider.peak_in_flight() <= 5);
        assert!(provider.peak_in_flight() >= 2);
    }
}
