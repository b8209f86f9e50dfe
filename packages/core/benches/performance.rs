//! Performance benchmarks for blocktree core operations
//!
//! Run with: `cargo bench -p blocktree-core`
//!
//! These benchmarks measure critical path performance:
//! - Tree building over a wide and a deep in-memory page
//! - Per-block transformation without any provider round trips
//! - Batched block lookups through `PageConverter::get_blocks`

use blocktree_core::models::RawBlock;
use blocktree_core::provider::MemoryProvider;
use blocktree_core::transform::{transform_block, TransformContext};
use blocktree_core::{build_tree, BuildOptions, ConverterConfig, PageConverter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn paragraph(id: &str) -> RawBlock {
    RawBlock::new(
        id,
        "paragraph",
        json!({
            "rich_text": [
                { "type": "text", "plain_text": "Benchmark paragraph ", "annotations": { "bold": true } },
                { "type": "text", "plain_text": id, "href": "https://example.com" }
            ]
        }),
    )
}

/// Top-level blocks, each with `fanout` paragraph children and a toggle
fn wide_page(top_level: usize, fanout: usize) -> (MemoryProvider, Vec<RawBlock>) {
    let mut provider = MemoryProvider::new();
    let mut blocks = Vec::with_capacity(top_level);

    for i in 0..top_level {
        let parent_id = format!("top-{}", i);
        let parent = if i % 2 == 0 {
            RawBlock::new(&parent_id, "toggle", json!({ "rich_text": [], "color": "blue" }))
        } else {
            paragraph(&parent_id)
        };
        blocks.push(parent.with_children());

        provider.add_children(
            &parent_id,
            (0..fanout).map(|j| paragraph(&format!("{}-{}", parent_id, j))),
        );
    }

    (provider, blocks)
}

/// One chain of nested paragraphs
fn deep_page(depth: usize) -> (MemoryProvider, Vec<RawBlock>) {
    let mut provider = MemoryProvider::new();
    for level in 0..depth {
        provider.add_child(
            &format!("n{}", level),
            paragraph(&format!("n{}", level + 1)).with_children(),
        );
    }
    (provider, vec![paragraph("n0").with_children()])
}

/// Benchmark tree building
///
/// Wide: 100 top-level blocks with 10 children each (1100 nodes).
/// Deep: a 200-level chain.
fn bench_build_tree(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("build_tree");

    let (wide_provider, wide_blocks) = wide_page(100, 10);
    group.bench_function("wide_1100_nodes", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result =
                    build_tree(&wide_blocks, &wide_provider, &BuildOptions::default()).await;
                black_box(result.nodes.len())
            })
        });
    });

    let (deep_provider, deep_blocks) = deep_page(200);
    group.bench_function("deep_200_levels", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result =
                    build_tree(&deep_blocks, &deep_provider, &BuildOptions::default()).await;
                black_box(result.metadata.processed_count)
            })
        });
    });

    group.finish();
}

/// Benchmark the pure transform step
fn bench_transform(c: &mut Criterion) {
    let block = paragraph("bench");
    let ctx = TransformContext::default();

    c.bench_function("transform_paragraph", |b| {
        b.iter(|| black_box(transform_block(black_box(&block), &ctx).unwrap()));
    });
}

/// Benchmark batched block lookups
///
/// The block cache is disabled so every iteration goes through the provider.
fn bench_batch_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut provider = MemoryProvider::new();
    provider.add_children("parent", (0..200).map(|i| paragraph(&format!("b{}", i))));
    let converter = PageConverter::new(Arc::new(provider), ConverterConfig::default()).unwrap();
    let ids: Vec<String> = (0..200).map(|i| format!("b{}", i)).collect();

    c.bench_function("get_blocks_200", |b| {
        b.iter(|| rt.block_on(async { black_box(converter.get_blocks(&ids).await.len()) }));
    });
}

criterion_group!(benches, bench_build_tree, bench_transform, bench_batch_get);
criterion_main!(benches);
