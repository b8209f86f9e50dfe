//! Page Converter Integration Tests
//!
//! End-to-end conversion of pages through `PageConverter` on top of the
//! in-memory provider: document assembly, mention resolution through the
//! page-info cache, batch lookups and the block cache.

#[cfg(test)]
mod page_converter_tests {
    use anyhow::Result;
    use blocktree_core::models::{
        BlockKind, IconInfo, Mention, Node, RawBlock, RawPage, RichText, UNTITLED,
    };
    use blocktree_core::provider::MemoryProvider;
    use blocktree_core::{BuildOptions, ConvertError, ConverterConfig, PageConverter};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    const PAGE_ID: &str = "0a1b2c3d-4e5f-6071-8293-a4b5c6d7e8f9";
    const LINKED_PAGE_ID: &str = "1c2f3a4b-5d6e-7f80-9a1b-2c3d4e5f6a7b";

    fn paragraph(id: &str) -> RawBlock {
        RawBlock::new(
            id,
            "paragraph",
            json!({ "rich_text": [{ "type": "text", "plain_text": id }] }),
        )
    }

    fn titled_page(id: &str, title: &str) -> RawPage {
        let mut page = RawPage::new(id);
        page.properties.insert(
            "title".to_string(),
            json!({ "type": "title", "title": [{ "type": "text", "plain_text": title }] }),
        );
        page.icon = Some(json!({ "type": "emoji", "emoji": "📘" }));
        page
    }

    fn converter(provider: MemoryProvider, config: ConverterConfig) -> Result<PageConverter> {
        Ok(PageConverter::new(Arc::new(provider), config)?)
    }

    // ===================================
    // Page Conversion
    // ===================================

    #[tokio::test]
    async fn test_convert_page_assembles_document() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(titled_page(PAGE_ID, "Release Notes"));
        provider.add_children(
            PAGE_ID,
            vec![
                RawBlock::new("q", "quote", json!({ "rich_text": [], "color": "green" }))
                    .with_children(),
                paragraph("p"),
            ],
        );
        provider.add_child("q", paragraph("inside"));

        let converter = converter(provider, ConverterConfig::default())?;
        let conversion = converter.convert_page(&PAGE_ID.replace('-', "")).await?;

        let document = &conversion.document;
        assert_eq!(document.id, PAGE_ID);
        assert_eq!(document.title(), "Release Notes");
        assert_eq!(
            document.properties.icon,
            Some(IconInfo::Emoji {
                emoji: "📘".to_string()
            })
        );
        assert_eq!(document.children.len(), 2);
        assert_eq!(document.children[0].kind(), BlockKind::Quote);
        assert_eq!(document.children[0].children()[0].color(), Some("green"));
        assert!(conversion.metadata.is_clean());
        assert_eq!(conversion.metadata.total_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_untitled_page_and_empty_body() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));

        let conversion = converter(provider, ConverterConfig::default())?
            .convert_page("page-1")
            .await?;

        assert_eq!(conversion.document.title(), UNTITLED);
        assert!(conversion.document.children.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_fatal() -> Result<()> {
        let converter = converter(MemoryProvider::new(), ConverterConfig::default())?;

        let err = converter.convert_page("missing").await.unwrap_err();
        assert!(matches!(err, ConvertError::PageFetch { ref page_id, .. } if page_id == "missing"));
        Ok(())
    }

    #[tokio::test]
    async fn test_top_level_children_failure_is_fatal() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.fail_children_of("page-1");

        let err = converter(provider, ConverterConfig::default())?
            .convert_page("page-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::ChildrenFetch { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_depth_option_from_config() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.add_child("page-1", paragraph("top").with_children());
        provider.add_child("top", paragraph("nested"));

        let config = ConverterConfig::from_json_str(r#"{ "max_depth": 1 }"#)?;
        let conversion = converter(provider, config)?.convert_page("page-1").await?;

        assert!(conversion.document.children[0].children.is_none());
        assert_eq!(conversion.metadata.warnings.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_audit_metadata_on_document_and_nodes() -> Result<()> {
        let mut provider = MemoryProvider::new();
        let mut page = RawPage::new("page-1");
        page.created_time = Some("2024-05-01T10:00:00.000Z".to_string());
        provider.add_page(page);

        let mut block = paragraph("p");
        block.last_edited_time = Some("2024-05-02T10:00:00.000Z".to_string());
        provider.add_child("page-1", block);

        let converter = converter(provider, ConverterConfig::default())?;

        let plain = converter.convert_page("page-1").await?;
        assert!(plain.document.metadata.is_none());
        assert!(plain.document.children[0].metadata.is_none());

        let audited = converter
            .convert_page_with("page-1", converter.build_options().with_audit(true))
            .await?;
        let page_meta = audited.document.metadata.expect("page metadata");
        assert_eq!(page_meta.created_time.as_deref(), Some("2024-05-01T10:00:00.000Z"));
        let node_meta = audited.document.children[0]
            .metadata
            .as_ref()
            .expect("node metadata");
        assert_eq!(node_meta.last_edited_time.as_deref(), Some("2024-05-02T10:00:00.000Z"));
        Ok(())
    }

    // ===================================
    // Mentions and Page Cache
    // ===================================

    #[tokio::test]
    async fn test_prefetched_page_titles_resolve_mentions() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.add_page(titled_page(LINKED_PAGE_ID, "Roadmap"));
        provider.add_child(
            "page-1",
            RawBlock::new(
                "p",
                "paragraph",
                json!({
                    "rich_text": [{
                        "type": "mention",
                        "plain_text": "Roadmap",
                        "mention": { "type": "page", "page": { "id": LINKED_PAGE_ID } }
                    }]
                }),
            ),
        );

        let converter = converter(provider, ConverterConfig::default())?;
        let info = converter
            .prefetch_page_info(&LINKED_PAGE_ID.replace('-', ""))
            .await?;
        assert_eq!(info.title, "Roadmap");
        assert_eq!(info.icon.as_deref(), Some("📘"));

        let conversion = converter.convert_page("page-1").await?;
        let runs = conversion.document.children[0]
            .properties
            .rich_text()
            .expect("paragraph text");
        match &runs[0] {
            RichText::Mention { mention, .. } => assert_eq!(
                mention,
                &Mention::Page {
                    id: LINKED_PAGE_ID.to_string(),
                    title: Some("Roadmap".to_string()),
                    icon: Some("📘".to_string()),
                }
            ),
            other => panic!("Expected mention, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_mention_keeps_id_only() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.add_child(
            "page-1",
            RawBlock::new(
                "p",
                "paragraph",
                json!({
                    "rich_text": [{
                        "type": "mention",
                        "plain_text": "?",
                        "mention": { "type": "page", "page": { "id": "elsewhere" } }
                    }]
                }),
            ),
        );

        let conversion = converter(provider, ConverterConfig::default())?
            .convert_page("page-1")
            .await?;
        let runs = conversion.document.children[0]
            .properties
            .rich_text()
            .expect("paragraph text");
        assert!(matches!(
            &runs[0],
            RichText::Mention { mention: Mention::Page { title: None, .. }, .. }
        ));
        Ok(())
    }

    // ===================================
    // Block Lookups
    // ===================================

    #[tokio::test]
    async fn test_get_block_builds_subtree() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_child("parent", paragraph("b1").with_children());
        provider.add_child("b1", paragraph("b1-child"));

        let converter = converter(provider, ConverterConfig::default())?;
        let node = converter.get_block("b1").await?;

        assert_eq!(node.id, "b1");
        assert_eq!(node.children()[0].id, "b1-child");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_block_failures() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_child("parent", paragraph("broken"));
        provider.fail_block("broken");

        let converter = converter(provider, ConverterConfig::default())?;

        let err = converter.get_block("broken").await.unwrap_err();
        assert!(matches!(err, ConvertError::BlockFetch { ref block_id, .. } if block_id == "broken"));
        assert!(converter.get_block("nowhere").await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_blocks_skips_failures() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_children("parent", (0..6).map(|i| paragraph(&format!("b{}", i))));
        provider.fail_block("b3");

        let converter = converter(provider, ConverterConfig::default())?;
        let ids: Vec<String> = (0..6).map(|i| format!("b{}", i)).collect();
        let found = converter.get_blocks(&ids).await;

        assert_eq!(found.len(), 5);
        assert!(!found.contains_key("b3"));
        assert_eq!(found["b5"].id, "b5");
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_concurrency_is_bounded() -> Result<()> {
        let mut provider = MemoryProvider::new().with_latency(Duration::from_millis(10));
        provider.add_children("parent", (0..12).map(|i| paragraph(&format!("b{}", i))));
        let provider = Arc::new(provider);

        let config = ConverterConfig {
            batch_concurrency: 3,
            ..ConverterConfig::default()
        };
        let converter = PageConverter::new(provider.clone(), config)?;
        let ids: Vec<String> = (0..12).map(|i| format!("b{}", i)).collect();
        let found = converter.get_blocks(&ids).await;

        assert_eq!(found.len(), 12);
        assert!(provider.peak_in_flight() <= 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_block_cache_avoids_refetch() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_child("parent", paragraph("b1"));
        let provider = Arc::new(provider);

        let config = ConverterConfig {
            enable_block_cache: true,
            ..ConverterConfig::default()
        };
        let converter = PageConverter::new(provider.clone(), config)?;

        let first: Node = converter.get_block("b1").await?;
        let calls = provider.call_count();
        let second = converter.get_block("b1").await?;
        assert_eq!(first, second);
        assert_eq!(provider.call_count(), calls);

        converter.clear_caches().await;
        converter.get_block("b1").await?;
        assert!(provider.call_count() > calls);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let config = ConverterConfig {
            batch_concurrency: 0,
            ..ConverterConfig::default()
        };
        let result = PageConverter::new(Arc::new(MemoryProvider::new()), config);
        assert!(matches!(result, Err(ConvertError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_zero_depth_options_rejected() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.add_child("page-1", paragraph("a"));
        let provider = Arc::new(provider);

        let converter = PageConverter::new(provider.clone(), ConverterConfig::default())?;
        let err = converter
            .convert_page_with("page-1", BuildOptions::new().with_max_depth(0))
            .await
            .unwrap_err();

        assert!(matches!(err, ConvertError::InvalidConfig(_)));
        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_options_carry_callbacks() -> Result<()> {
        let mut provider = MemoryProvider::new();
        provider.add_page(RawPage::new("page-1"));
        provider.add_children("page-1", vec![paragraph("a"), paragraph("b")]);

        let converter = converter(provider, ConverterConfig::default())?;
        let seen = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let options = BuildOptions::new().with_progress(move |_, _| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        converter.convert_page_with("page-1", options).await?;
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 2);
        Ok(())
    }
}
