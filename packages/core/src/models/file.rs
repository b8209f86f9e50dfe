//! Normalized file and icon descriptors

use serde::{Deserialize, Serialize};

/// Where a file is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSource {
    /// Uploaded to the content service; URLs expire
    File,
    External,
}

/// File reference attached to media blocks and page covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "type")]
    pub source: FileSource,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

impl FileInfo {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            source: FileSource::External,
            url: url.into(),
            expiry_time: None,
        }
    }
}

impl Default for FileInfo {
    fn default() -> Self {
        Self::external("")
    }
}

/// Page or callout icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IconInfo {
    Emoji { emoji: String },
    External { url: String },
    File { url: String },
}

impl IconInfo {
    /// Emoji glyph, if this is an emoji icon
    pub fn emoji(&self) -> Option<&str> {
        match self {
            IconInfo::Emoji { emoji } => Some(emoji),
            _ => None,
        }
    }
}
