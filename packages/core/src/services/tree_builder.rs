//! Recursive Tree Builder
//!
//! Turns a sequence of raw blocks into intermediate nodes, fetching children
//! from a [`BlockProvider`] as it descends.
//!
//! # Architecture
//!
//! - **Generic walk**: for each block in input order, check the depth bound,
//!   classify the type tag, transform, then fetch and recurse into children for
//!   kinds that carry them.
//! - **Coordinators**: table, column list, synced block, quote and toggle
//!   fetch and interpret their own children. They live in this module and call
//!   the same level-building function as the generic walk, so there is one
//!   traversal with several entry points.
//! - **Accumulator**: processed count, errors and warnings are collected in
//!   one place shared by every level and coordinator. Nothing is thrown past a
//!   block boundary.
//!
//! # Failure Isolation
//!
//! - A failed child fetch keeps the parent node, without children, and records
//!   one `ProcessError` scoped to the parent.
//! - A failed transform drops that one block and records one `ProcessError`.
//! - A block at or past the depth bound is dropped with one warning. Its
//!   subtree is never fetched.
//! - Unsupported kinds, child-only kinds outside their parent, and archived or
//!   trashed blocks are dropped silently.
//!
//! # Depth
//!
//! Top-level blocks are at depth 0. Quote, toggle and synced block children
//! continue at `depth + 1` under the caller's bound; column contents are built
//! without a bound.
//!
//! Siblings are processed one after another, so output order always matches
//! the provider's order.

use crate::behaviors::{self, Eligibility};
use crate::config::BuildOptions;
use crate::models::{
    BlockKind, BlockProperties, Node, ProcessError, ProcessMetadata, ProcessResult, RawBlock,
};
use crate::provider::BlockProvider;
use crate::services::color_inheritance::apply_color_inheritance;
use crate::transform::{transform_block, TransformContext};
use futures::future::BoxFuture;
use std::time::Instant;

/// Build the tree for `blocks`
///
/// Never fails: per-block problems end up in `metadata.errors` and
/// `metadata.warnings` of the returned result. `options` are taken as given;
/// check them with [`BuildOptions::validate`] first, since a depth bound of 0
/// drops every top-level block.
pub async fn build_tree(
    blocks: &[RawBlock],
    provider: &dyn BlockProvider,
    options: &BuildOptions,
) -> ProcessResult {
    let started = Instant::now();
    let traversal = Traversal::new(provider, options);
    let mut acc = Accumulator::default();

    let total = blocks.len();
    let level = Level::root(options.max_depth);
    let mut nodes = Vec::with_capacity(total);

    for (index, block) in blocks.iter().enumerate() {
        if let Some(node) = traversal.build_block(&mut acc, block, level).await {
            nodes.push(node);
        }
        if let Some(on_progress) = &options.on_progress {
            on_progress(index + 1, total);
        }
    }

    ProcessResult {
        nodes,
        metadata: ProcessMetadata {
            processed_count: acc.processed,
            total_count: total,
            errors: acc.errors,
            warnings: acc.warnings,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        },
    }
}

/// Position of a block in the traversal
#[derive(Debug, Clone, Copy)]
struct Level {
    depth: usize,
    max_depth: Option<usize>,
}

impl Level {
    fn root(max_depth: Option<usize>) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn unbounded(depth: usize) -> Self {
        Self {
            depth,
            max_depth: None,
        }
    }

    fn limit_reached(&self) -> Option<usize> {
        self.max_depth.filter(|max| self.depth >= *max)
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    processed: usize,
    errors: Vec<ProcessError>,
    warnings: Vec<String>,
}

struct Traversal<'a> {
    provider: &'a dyn BlockProvider,
    options: &'a BuildOptions,
    ctx: TransformContext<'a>,
}

impl<'a> Traversal<'a> {
    fn new(provider: &'a dyn BlockProvider, options: &'a BuildOptions) -> Self {
        Self {
            provider,
            options,
            ctx: TransformContext::new(options.include_audit, options.page_cache.as_ref()),
        }
    }

    fn record_error(&self, acc: &mut Accumulator, error: ProcessError) {
        tracing::warn!("Block conversion error: {}", error);
        if let Some(on_error) = &self.options.on_error {
            on_error(&error);
        }
        acc.errors.push(error);
    }

    fn record_warning(&self, acc: &mut Accumulator, warning: String) {
        tracing::warn!("{}", warning);
        acc.warnings.push(warning);
    }

    /// Build one level of siblings, in order
    fn build_level<'s>(
        &'s self,
        acc: &'s mut Accumulator,
        blocks: &'s [RawBlock],
        level: Level,
    ) -> BoxFuture<'s, Vec<Node>> {
        Box::pin(async move {
            let mut nodes = Vec::with_capacity(blocks.len());
            for block in blocks {
                if let Some(node) = self.build_block(acc, block, level).await {
                    nodes.push(node);
                }
            }
            nodes
        })
    }

    async fn build_block(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        level: Level,
    ) -> Option<Node> {
        if let Some(max_depth) = level.limit_reached() {
            self.record_warning(
                acc,
                format!(
                    "Maximum depth {} reached for block {} (type: {})",
                    max_depth, block.id, block.block_type
                ),
            );
            return None;
        }

        match behaviors::classify(&block.block_type) {
            Eligibility::Processable => {}
            Eligibility::ChildOnly => {
                tracing::debug!(
                    "Skipping {} block {} outside its parent",
                    block.block_type,
                    block.id
                );
                return None;
            }
            Eligibility::Unsupported => return None,
        }

        if !block.has_required_fields() || block.is_removed() {
            return None;
        }

        let behavior = behaviors::behavior_for_tag(&block.block_type)?;
        let mut node = if behavior.self_handling {
            self.coordinate(acc, block, behavior.kind, level).await?
        } else {
            self.transform(acc, block)?
        };
        acc.processed += 1;

        if behavior.has_managed_children && !behavior.self_handling && block.has_children {
            if let Some(children) = self
                .fetch_children(acc, block, "Error fetching or processing children")
                .await
            {
                let built = self.build_level(acc, &children, level.child()).await;
                node.set_children(built);
            }
        }

        Some(node)
    }

    /// Run the transformer, recording a failure against the block
    fn transform(&self, acc: &mut Accumulator, block: &RawBlock) -> Option<Node> {
        match transform_block(block, &self.ctx) {
            Ok(node) => node,
            Err(err) => {
                self.record_error(
                    acc,
                    ProcessError::for_block(&block.id, &block.block_type, "Error processing block")
                        .with_cause(err),
                );
                None
            }
        }
    }

    /// Transform a row or column picked up by its coordinator
    fn transform_child(&self, acc: &mut Accumulator, block: &RawBlock) -> Option<Node> {
        if !block.has_required_fields() || block.is_removed() {
            return None;
        }
        let node = self.transform(acc, block)?;
        acc.processed += 1;
        Some(node)
    }

    async fn fetch_children(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        message: &str,
    ) -> Option<Vec<RawBlock>> {
        match self.provider.fetch_children(&block.id).await {
            Ok(children) => {
                tracing::debug!(
                    "Fetched {} children of {} block {}",
                    children.len(),
                    block.block_type,
                    block.id
                );
                Some(children)
            }
            Err(err) => {
                self.record_error(
                    acc,
                    ProcessError::for_block(&block.id, &block.block_type, message).with_cause(err),
                );
                None
            }
        }
    }

    async fn coordinate(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        kind: BlockKind,
        level: Level,
    ) -> Option<Node> {
        tracing::debug!(
            "Coordinating children of {} block {} at depth {}",
            kind,
            block.id,
            level.depth
        );

        match kind {
            BlockKind::Table => self.build_table(acc, block).await,
            BlockKind::ColumnList => self.build_column_list(acc, block, level).await,
            BlockKind::SyncedBlock => self.build_synced_block(acc, block, level).await,
            BlockKind::Quote | BlockKind::Toggle => {
                self.build_colored_container(acc, block, level).await
            }
            _ => self.transform(acc, block),
        }
    }

    /// Table plus its rows; anything that is not a row is ignored
    async fn build_table(&self, acc: &mut Accumulator, block: &RawBlock) -> Option<Node> {
        let mut table = self.transform(acc, block)?;
        if !block.has_children {
            return Some(table);
        }

        if let Some(children) = self
            .fetch_children(acc, block, "Error fetching table rows")
            .await
        {
            let rows: Vec<Node> = children
                .iter()
                .filter(|child| child.block_type == BlockKind::TableRow.as_str())
                .filter_map(|row| self.transform_child(acc, row))
                .collect();
            table.set_children(rows);
        }

        Some(table)
    }

    /// Column list plus its columns, each with fully built content
    async fn build_column_list(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        level: Level,
    ) -> Option<Node> {
        let mut list = self.transform(acc, block)?;
        if !block.has_children {
            return Some(list);
        }

        let Some(children) = self
            .fetch_children(acc, block, "Error fetching columns")
            .await
        else {
            return Some(list);
        };

        // column_list -> column -> content
        let content_level = Level::unbounded(level.depth + 2);
        let mut columns = Vec::new();

        for child in children
            .iter()
            .filter(|child| child.block_type == BlockKind::Column.as_str())
        {
            let Some(mut column) = self.transform_child(acc, child) else {
                continue;
            };

            if child.has_children {
                if let Some(content) = self
                    .fetch_children(acc, child, "Error fetching column content")
                    .await
                {
                    let built = self.build_level(acc, &content, content_level).await;
                    column.set_children(built);
                }
            }
            columns.push(column);
        }

        list.set_children(columns);
        Some(list)
    }

    /// Original synced blocks get their children; mirrors stay empty
    async fn build_synced_block(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        level: Level,
    ) -> Option<Node> {
        let mut synced = self.transform(acc, block)?;

        let is_original = matches!(
            &synced.properties,
            BlockProperties::SyncedBlock(properties) if properties.synced_from.is_none()
        );
        if !is_original || !block.has_children {
            return Some(synced);
        }

        if let Some(children) = self
            .fetch_children(acc, block, "Error fetching synced block children")
            .await
        {
            let built = self.build_level(acc, &children, level.child()).await;
            synced.set_children(built);
        }

        Some(synced)
    }

    /// Quote or toggle: children inherit the container's color
    async fn build_colored_container(
        &self,
        acc: &mut Accumulator,
        block: &RawBlock,
        level: Level,
    ) -> Option<Node> {
        let mut container = self.transform(acc, block)?;
        if !block.has_children {
            return Some(container);
        }

        let message = format!("Error fetching {} children", block.block_type);
        if let Some(children) = self.fetch_children(acc, block, &message).await {
            let built = self.build_level(acc, &children, level.child()).await;
            let color = container.color().map(str::to_string);
            container.set_children(apply_color_inheritance(built, color.as_deref()));
        }

        Some(container)
    }
}
