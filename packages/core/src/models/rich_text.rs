//! Inline Rich Text
//!
//! Resolved inline spans. Annotations are a flat set on each run; nesting them
//! into wrapper nodes is left to renderers. Inline code is the exception: a
//! run marked as code becomes an [`RichText::InlineCode`] leaf holding only
//! its text.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Flat annotation set on one text run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnnotations {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,

    /// Never `"default"`; a default color is stored as `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TextAnnotations {
    pub fn is_empty(&self) -> bool {
        !self.bold
            && !self.italic
            && !self.underline
            && !self.strikethrough
            && !self.code
            && self.color.is_none()
    }
}

/// Resolved reference carried by a mention run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mention {
    Page {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    Database {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    User {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
    },
    Date {
        start: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_zone: Option<String>,
    },
    LinkMention {
        href: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link_author: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link_provider: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_url: Option<String>,
    },
}

impl Mention {
    /// Placeholder used when a mention payload is missing or unrecognised
    pub fn unknown_page() -> Self {
        Mention::Page {
            id: "unknown".to_string(),
            title: None,
            icon: None,
        }
    }
}

/// One inline span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    Text {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotations: Option<TextAnnotations>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    InlineCode {
        content: String,
    },
    Equation {
        content: String,
        expression: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotations: Option<TextAnnotations>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    Mention {
        content: String,
        mention: Mention,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        annotations: Option<TextAnnotations>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
}

impl RichText {
    /// Plain text run without annotations
    pub fn plain(content: impl Into<String>) -> Self {
        RichText::Text {
            content: content.into(),
            annotations: None,
            href: None,
        }
    }

    /// The run's visible text
    pub fn content(&self) -> &str {
        match self {
            RichText::Text { content, .. }
            | RichText::InlineCode { content }
            | RichText::Equation { content, .. }
            | RichText::Mention { content, .. } => content,
        }
    }

    pub fn annotations(&self) -> Option<&TextAnnotations> {
        match self {
            RichText::Text { annotations, .. }
            | RichText::Equation { annotations, .. }
            | RichText::Mention { annotations, .. } => annotations.as_ref(),
            RichText::InlineCode { .. } => None,
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            RichText::Text { href, .. }
            | RichText::Equation { href, .. }
            | RichText::Mention { href, .. } => href.as_deref(),
            RichText::InlineCode { .. } => None,
        }
    }
}

/// Concatenate the visible text of a run sequence
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(RichText::content).collect()
}
