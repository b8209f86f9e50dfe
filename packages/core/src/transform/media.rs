//! Media and link block transformers

use crate::models::{
    BlockProperties, LinkPreviewProperties, LinkProperties, MediaProperties, RawBlock,
};
use crate::transform::{
    payload, resolve_file, resolve_runs, RawFileRef, RawRichText, TransformContext, TransformError,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MediaPayload {
    #[serde(flatten)]
    file: RawFileRef,
    caption: Vec<RawRichText>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinkPayload {
    url: Option<String>,
    caption: Vec<RawRichText>,
}

fn media_properties(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<MediaProperties, TransformError> {
    let data: MediaPayload = payload(block)?;
    Ok(MediaProperties {
        file: resolve_file(Some(&data.file)),
        caption: resolve_runs(&data.caption, ctx.page_cache),
    })
}

pub fn image(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    media_properties(block, ctx).map(BlockProperties::Image)
}

pub fn video(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    media_properties(block, ctx).map(BlockProperties::Video)
}

pub fn audio(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    media_properties(block, ctx).map(BlockProperties::Audio)
}

pub fn file(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    media_properties(block, ctx).map(BlockProperties::File)
}

pub fn pdf(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    media_properties(block, ctx).map(BlockProperties::Pdf)
}

fn link_properties(
    block: &RawBlock,
    ctx: &TransformContext<'_>,
) -> Result<LinkProperties, TransformError> {
    let data: LinkPayload = payload(block)?;
    Ok(LinkProperties {
        url: data.url.unwrap_or_default(),
        caption: resolve_runs(&data.caption, ctx.page_cache),
    })
}

pub fn bookmark(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    link_properties(block, ctx).map(BlockProperties::Bookmark)
}

pub fn embed(block: &RawBlock, ctx: &TransformContext<'_>) -> Result<BlockProperties, TransformError> {
    link_properties(block, ctx).map(BlockProperties::Embed)
}

pub fn link_preview(
    block: &RawBlock,
    _ctx: &TransformContext<'_>,
) -> Result<BlockProperties, TransformError> {
    let data: LinkPayload = payload(block)?;
    Ok(BlockProperties::LinkPreview(LinkPreviewProperties {
        url: data.url.unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileInfo, FileSource, RichText};
    use serde_json::json;

    #[test]
    fn test_image_with_hosted_file_and_caption() {
        let block = RawBlock::new(
            "img",
            "image",
            json!({
                "type": "file",
                "file": { "url": "https://files/cat.png", "expiry_time": "2030-01-01T00:00:00Z" },
                "caption": [{ "type": "text", "plain_text": "A cat" }]
            }),
        );

        match image(&block, &TransformContext::default()).unwrap() {
            BlockProperties::Image(media) => {
                assert_eq!(media.file.source, FileSource::File);
                assert_eq!(media.file.url, "https://files/cat.png");
                assert_eq!(media.caption, vec![RichText::plain("A cat")]);
            }
            other => panic!("Expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_pdf_without_payload_defaults() {
        let mut block = RawBlock::new("pdf", "pdf", json!(null));
        block.properties.clear();

        assert_eq!(
            pdf(&block, &TransformContext::default()).unwrap(),
            BlockProperties::Pdf(MediaProperties {
                file: FileInfo::default(),
                caption: Vec::new(),
            })
        );
    }

    #[test]
    fn test_link_kinds() {
        let block = RawBlock::new("b", "bookmark", json!({ "url": "https://rust-lang.org" }));
        match bookmark(&block, &TransformContext::default()).unwrap() {
            BlockProperties::Bookmark(link) => assert_eq!(link.url, "https://rust-lang.org"),
            other => panic!("Expected bookmark, got {:?}", other),
        }

        let preview = RawBlock::new("l", "link_preview", json!({ "url": "https://github.com" }));
        assert_eq!(
            link_preview(&preview, &TransformContext::default()).unwrap(),
            BlockProperties::LinkPreview(LinkPreviewProperties {
                url: "https://github.com".to_string()
            })
        );
    }
}
