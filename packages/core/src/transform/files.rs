//! File and icon reference resolution

use crate::models::{FileInfo, FileSource, IconInfo};
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct RawHostedFile {
    url: Option<String>,
    expiry_time: Option<String>,
}

/// A file reference as the API nests it (`{"type": "file", "file": {...}}`)
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct RawFileRef {
    #[serde(rename = "type")]
    source: Option<String>,
    file: Option<RawHostedFile>,
    external: Option<RawHostedFile>,
    url: Option<String>,
}

/// An icon reference (`emoji`, `external` or `file`)
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct RawIcon {
    #[serde(rename = "type")]
    icon_type: Option<String>,
    emoji: Option<String>,
    file: Option<RawHostedFile>,
    external: Option<RawHostedFile>,
}

fn hosted_url(hosted: Option<&RawHostedFile>) -> String {
    hosted.and_then(|h| h.url.clone()).unwrap_or_default()
}

/// Normalize a file reference; anything unrecognised becomes an empty external URL
pub(crate) fn resolve_file(raw: Option<&RawFileRef>) -> FileInfo {
    let Some(raw) = raw else {
        return FileInfo::default();
    };

    match raw.source.as_deref() {
        Some("file") => FileInfo {
            source: FileSource::File,
            url: hosted_url(raw.file.as_ref()),
            expiry_time: raw.file.as_ref().and_then(|f| f.expiry_time.clone()),
        },
        Some("external") => FileInfo::external(hosted_url(raw.external.as_ref())),
        _ => FileInfo::external(raw.url.clone().unwrap_or_default()),
    }
}

/// Normalize an icon reference; unknown icon types resolve to `None`
pub(crate) fn resolve_icon(raw: Option<&RawIcon>) -> Option<IconInfo> {
    let raw = raw?;

    match raw.icon_type.as_deref()? {
        "emoji" => Some(IconInfo::Emoji {
            emoji: raw.emoji.clone().unwrap_or_default(),
        }),
        "external" => Some(IconInfo::External {
            url: hosted_url(raw.external.as_ref()),
        }),
        "file" => Some(IconInfo::File {
            url: hosted_url(raw.file.as_ref()),
        }),
        _ => None,
    }
}
