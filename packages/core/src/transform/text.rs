//! Text-bearing block transformers
//!
//! Paragraphs, headings, quotes, callouts, list items, to-dos, toggles, code
//! and block equations.

use crate::models::{
    BlockProperties, CalloutProperties, CodeProperties, EquationProperties, HeadingProperties,
    RawBlock, TextProperties, ToDoProperties,
};
use crate::transform::{
    payload, resolve_icon, resolve_runs, RawIcon, RawRichText, TransformContext, TransformError,
};
use serde::Deserialize;

/// Language assumed for code blocks that do not declare one
pub const DEFAULT_CODE_LANGUAGE: &str = "plain text";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextPayload {
    rich_text: Vec<RawRichText>,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeadingPayload {
    rich_text: Vec<RawRichText>,
    is_toggleable: bool,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CalloutPayload {
    rich_text: Vec<RawRichText>,
    icon: Option<RawIcon>,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToDoPayload {
    rich_text: Vec<RawRichText>,
    checked: bool,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CodePayload {
    rich_text: Vec<RawRichText>,
    language: Option<String>,
    caption: Vec<RawRichText>,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EquationPayload {
    expression: Option<String>,
}

fn text_properties(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<TextProperties, TransformError> {
    let data: TextPayload = payload(block)?;
    Ok(TextProperties {
        rich_text: resolve_runs(&data.rich_text, ctx.page_cache),
        color: data.color,
    })
}

pub fn paragraph(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    text_properties(block, ctx).map(BlockProperties::Paragraph)
}

pub fn quote(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    text_properties(block, ctx).map(BlockProperties::Quote)
}

pub fn toggle(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    text_properties(block, ctx).map(BlockProperties::Toggle)
}

pub fn bulleted_list_item(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    text_properties(block, ctx).map(BlockProperties::BulletedListItem)
}

pub fn numbered_list_item(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    text_properties(block, ctx).map(BlockProperties::NumberedListItem)
}

/// `heading_1`, `heading_2` and `heading_3`
pub fn heading(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: HeadingPayload = payload(block)?;
    let properties = HeadingProperties {
        rich_text: resolve_runs(&data.rich_text, ctx.page_cache),
        is_toggleable: data.is_toggleable,
        color: data.color,
    };

    match block.block_type.as_str() {
        "heading_1" => Ok(BlockProperties::Heading1(properties)),
        "heading_2" => Ok(BlockProperties::Heading2(properties)),
        "heading_3" => Ok(BlockProperties::Heading3(properties)),
        other => Err(TransformError::unexpected_kind(other)),
    }
}

pub fn callout(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: CalloutPayload = payload(block)?;
    Ok(BlockProperties::Callout(CalloutProperties {
        rich_text: resolve_runs(&data.rich_text, ctx.page_cache),
        icon: resolve_icon(data.icon.as_ref()),
        color: data.color,
    }))
}

pub fn to_do(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: ToDoPayload = payload(block)?;
    Ok(BlockProperties::ToDo(ToDoProperties {
        rich_text: resolve_runs(&data.rich_text, ctx.page_cache),
        checked: data.checked,
        color: data.color,
    }))
}

pub fn code(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    let data: CodePayload = payload(block)?;
    Ok(BlockProperties::Code(CodeProperties {
        rich_text: resolve_runs(&data.rich_text, ctx.page_cache),
        language: data
            .language
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| DEFAULT_CODE_LANGUAGE.to_string()),
        caption: resolve_runs(&data.caption, ctx.page_cache),
        color: data.color,
    }))
}

pub fn equation(
    block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: EquationPayload = payload(block)?;
    Ok(BlockProperties::Equation(EquationProperties {
        expression: data.expression.unwrap_or_default(),
    }))
}
