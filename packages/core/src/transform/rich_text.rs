//! Rich Text Resolution
//!
//! Turns raw rich-text runs into [`RichText`] spans. Each run is classified as
//! text, equation or mention; unknown run types fall back to text. A text run
//! annotated as code collapses into an inline-code leaf.

use crate::models::{Mention, RichText, TextAnnotations, DEFAULT_COLOR};
use crate::services::PageInfoCache;
use crate::transform::TransformError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAnnotations {
    bold: bool,
    italic: bool,
    underline: bool,
    strikethrough: bool,
    code: bool,
    color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLink {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTextContent {
    content: Option<String>,
    link: Option<RawLink>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEquation {
    expression: Option<String>,
}

/// One raw rich-text run
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawRichText {
    #[serde(rename = "type")]
    run_type: String,
    plain_text: Option<String>,
    href: Option<String>,
    annotations: Option<RawAnnotations>,
    text: Option<RawTextContent>,
    equation: Option<RawEquation>,
    mention: Option<RawMention>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawIdRef {
    id: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDate {
    start: Option<String>,
    end: Option<String>,
    time_zone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLinkMention {
    href: Option<String>,
    title: Option<String>,
    icon_url: Option<String>,
    description: Option<String>,
    link_author: Option<String>,
    link_provider: Option<String>,
    thumbnail_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMention {
    #[serde(rename = "type")]
    mention_type: String,
    page: Option<RawIdRef>,
    database: Option<RawIdRef>,
    user: Option<RawIdRef>,
    date: Option<RawDate>,
    link_mention: Option<RawLinkMention>,
}

/// Flatten raw annotations, dropping unset flags and the default color
pub(crate) fn resolve_annotations(raw: Option<&RawAnnotations>) -> Option<TextAnnotations> {
    let raw = raw?;
    let annotations = TextAnnotations {
        bold: raw.bold,
        italic: raw.italic,
        underline: raw.underline,
        strikethrough: raw.strikethrough,
        code: raw.code,
        color: raw.color.clone().filter(|color| color != DEFAULT_COLOR),
    };

    if annotations.is_empty() {
        None
    } else {
        Some(annotations)
    }
}

fn unknown_id(reference: Option<&RawIdRef>) -> String {
    reference
        .and_then(|r| r.id.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

fn resolve_mention(raw: Option<&RawMention>, cache: Option<&PageInfoCache>) -> Mention {
    let Some(raw) = raw else {
        return Mention::unknown_page();
    };

    match raw.mention_type.as_str() {
        "page" => {
            let id = unknown_id(raw.page.as_ref());
            let cached = cache.and_then(|cache| cache.get(&id));
            Mention::Page {
                title: cached.as_ref().map(|info| info.title.clone()),
                icon: cached.and_then(|info| info.icon),
                id,
            }
        }
        "database" => Mention::Database {
            id: unknown_id(raw.database.as_ref()),
            title: None,
        },
        "user" => {
            let user = raw.user.as_ref();
            Mention::User {
                id: unknown_id(user),
                name: user.and_then(|u| u.name.clone()),
                avatar_url: user.and_then(|u| u.avatar_url.clone()),
            }
        }
        "date" => {
            let date = raw.date.as_ref();
            Mention::Date {
                start: date.and_then(|d| d.start.clone()).unwrap_or_default(),
                end: date.and_then(|d| d.end.clone()),
                time_zone: date.and_then(|d| d.time_zone.clone()),
            }
        }
        "link_mention" => {
            let link = raw.link_mention.as_ref();
            Mention::LinkMention {
                href: link.and_then(|l| l.href.clone()).unwrap_or_default(),
                title: link.and_then(|l| l.title.clone()).unwrap_or_default(),
                icon_url: link.and_then(|l| l.icon_url.clone()),
                description: link.and_then(|l| l.description.clone()),
                link_author: link.and_then(|l| l.link_author.clone()),
                link_provider: link.and_then(|l| l.link_provider.clone()),
                thumbnail_url: link.and_then(|l| l.thumbnail_url.clone()),
            }
        }
        _ => Mention::unknown_page(),
    }
}

fn resolve_run(raw: &RawRichText, cache: Option<&PageInfoCache>) -> RichText {
    let annotations = resolve_annotations(raw.annotations.as_ref());
    let plain = raw.plain_text.clone().unwrap_or_default();

    match raw.run_type.as_str() {
        "equation" => RichText::Equation {
            content: plain,
            expression: raw
                .equation
                .as_ref()
                .and_then(|e| e.expression.clone())
                .unwrap_or_default(),
            annotations,
            href: raw.href.clone(),
        },
        "mention" => RichText::Mention {
            content: plain,
            mention: resolve_mention(raw.mention.as_ref(), cache),
            annotations,
            href: raw.href.clone(),
        },
        run_type => {
            let text = raw.text.as_ref().filter(|_| run_type == "text");
            let content = raw
                .plain_text
                .clone()
                .or_else(|| text.and_then(|t| t.content.clone()))
                .unwrap_or_default();

            if annotations.as_ref().is_some_and(|a| a.code) {
                return RichText::InlineCode { content };
            }

            let href = raw.href.clone().or_else(|| {
                text.and_then(|t| t.link.as_ref())
                    .and_then(|link| link.url.clone())
            });

            RichText::Text {
                content,
                annotations,
                href,
            }
        }
    }
}

/// Resolve already-deserialized runs
pub(crate) fn resolve_runs(runs: &[RawRichText], cache: Option<&PageInfoCache>) -> Vec<RichText> {
    runs.iter().map(|run| resolve_run(run, cache)).collect()
}

/// Resolve a raw rich-text JSON array
///
/// `null` resolves to an empty sequence; anything other than an array of
/// objects is malformed.
pub fn resolve_rich_text(
    value: &Value,
    cache: Option<&PageInfoCache>,
) -> Result<Vec<RichText>, TransformError> {
    if value.is_null() {
        return Ok(Vec::new());
    }

    let runs: Vec<RawRichText> = serde_json::from_value(value.clone())
        .map_err(|e| TransformError::malformed_rich_text(e.to_string()))?;
    Ok(resolve_runs(&runs, cache))
}
