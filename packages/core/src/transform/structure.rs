//! Structural block transformers
//!
//! Tables and rows, column layouts, child pages and databases, synced blocks
//! and the data-less kinds (breadcrumb, divider, table of contents).

use crate::models::{
    BlockProperties, ChildDatabaseProperties, ChildPageProperties, ColumnProperties,
    EmptyProperties, RawBlock, SyncedBlockProperties, SyncedFrom, TableProperties,
    TableRowProperties, UNTITLED,
};
use crate::transform::{
    payload, resolve_icon, resolve_runs, RawIcon, RawRichText, TransformContext, TransformError,
};
use serde::Deserialize;

/// Title given to child databases without one
pub const UNTITLED_DATABASE: &str = "Untitled Database";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TablePayload {
    table_width: u32,
    has_column_header: bool,
    has_row_header: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableRowPayload {
    cells: Vec<Vec<RawRichText>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ColumnPayload {
    width_ratio: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TitlePayload {
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SyncedFromPayload {
    block_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SyncedBlockPayload {
    synced_from: Option<SyncedFromPayload>,
}

fn non_empty_title(title: Option<String>, fallback: &str) -> String {
    title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

pub fn table(block: &RawBlock, _ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: TablePayload = payload(block)?;
    Ok(BlockProperties::Table(TableProperties {
        table_width: data.table_width,
        has_column_header: data.has_column_header,
        has_row_header: data.has_row_header,
    }))
}

pub fn table_row(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: TableRowPayload = payload(block)?;
    Ok(BlockProperties::TableRow(TableRowProperties {
        cells: data
            .cells
            .iter()
            .map(|cell| resolve_runs(cell, ctx.page_cache))
            .collect(),
    }))
}

pub fn column_list(
    _block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    Ok(BlockProperties::ColumnList(EmptyProperties {}))
}

pub fn column(block: &RawBlock, _ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: ColumnPayload = payload(block)?;
    Ok(BlockProperties::Column(ColumnProperties {
        width_ratio: data.width_ratio,
    }))
}

pub fn child_database(
    block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: TitlePayload = payload(block)?;
    Ok(BlockProperties::ChildDatabase(ChildDatabaseProperties {
        title: non_empty_title(data.title, UNTITLED_DATABASE),
    }))
}

/// Child page; the icon lives on the block itself, not in the payload
pub fn child_page(
    block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: TitlePayload = payload(block)?;
    let icon = block
        .field("icon")
        .filter(|value| !value.is_null())
        .map(|value| serde_json::from_value::<RawIcon>(value.clone()))
        .transpose()
        .map_err(|e| TransformError::malformed(block, format!("icon: {}", e)))?;

    Ok(BlockProperties::ChildPage(ChildPageProperties {
        title: non_empty_title(data.title, UNTITLED),
        icon: resolve_icon(icon.as_ref()),
    }))
}

pub fn synced_block(
    block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: SyncedBlockPayload = payload(block)?;
    Ok(BlockProperties::SyncedBlock(SyncedBlockProperties {
        synced_from: data
            .synced_from
            .and_then(|from| from.block_id)
            .map(|block_id| SyncedFrom { block_id }),
    }))
}

pub fn breadcrumb(
    _block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    Ok(BlockProperties::Breadcrumb(EmptyProperties {}))
}

pub fn divider(
    _block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    Ok(BlockProperties::Divider(EmptyProperties {}))
}

pub fn table_of_contents(
    _block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    Ok(BlockProperties::TableOfContents(EmptyProperties {}))
}
