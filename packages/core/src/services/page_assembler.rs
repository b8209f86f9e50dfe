//! Page Assembler
//!
//! Wraps the built top-level nodes into the [`Document`] root: title, icon and
//! cover are extracted from the raw page, every raw property is kept verbatim
//! under `raw_properties`, and `processed_at` is stamped once.

use crate::models::{
    Document, DocumentKind, Node, NodeMetadata, PageProperties, RawPage, UNTITLED,
};
use crate::transform::{resolve_file, resolve_icon, RawFileRef, RawIcon};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Assemble the document root for a page
pub fn assemble_document(page: &RawPage, children: Vec<Node>, include_audit: bool) -> Document {
    Document {
        id: page.id.clone(),
        kind: DocumentKind::Page,
        properties: PageProperties {
            title: extract_title(&page.properties),
            icon: page
                .icon
                .as_ref()
                .and_then(lenient::<RawIcon>)
                .and_then(|icon| resolve_icon(Some(&icon))),
            cover: page
                .cover
                .as_ref()
                .and_then(lenient::<RawFileRef>)
                .map(|cover| resolve_file(Some(&cover))),
            raw_properties: page.properties.clone(),
        },
        children,
        metadata: include_audit.then(|| page_metadata(page)),
        processed_at: Utc::now(),
    }
}

/// Page title: the `title` property, then `Name`, then any title-typed
/// property, then `"Untitled"`
pub fn extract_title(properties: &Map<String, Value>) -> String {
    let from_named = ["title", "Name"]
        .iter()
        .filter_map(|name| properties.get(*name))
        .find_map(title_text);

    from_named
        .or_else(|| {
            properties
                .values()
                .filter(|property| property.get("type").and_then(Value::as_str) == Some("title"))
                .find_map(title_text)
        })
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Joined, trimmed plain text of a title property; `None` when empty
fn title_text(property: &Value) -> Option<String> {
    let runs = property.get("title")?.as_array()?;
    let text: String = runs
        .iter()
        .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
        .collect();
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Unrecognised icon and cover shapes are dropped rather than failing the page
fn lenient<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Ignoring unreadable page icon/cover: {}", e);
            None
        }
    }
}

fn page_metadata(page: &RawPage) -> NodeMetadata {
    NodeMetadata {
        created_time: page.created_time.clone(),
        last_edited_time: page.last_edited_time.clone(),
        created_by: page.created_by.as_ref().map(|u| u.id.clone()),
        last_edited_by: page.last_edited_by.as_ref().map(|u| u.id.clone()),
        archived: Some(page.archived),
        in_trash: Some(page.in_trash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileSource, IconInfo};
    use serde_json::json;

    fn page_with(properties: Value) -> RawPage {
        let mut page = RawPage::new("page-1");
        page.properties = properties.as_object().cloned().unwrap_or_default();
        page
    }

    #[test]
    fn test_title_from_title_property() {
        let page = page_with(json!({
            "title": {
                "type": "title",
                "title": [{ "plain_text": "  Release " }, { "plain_text": "Notes  " }]
            }
        }));
        let doc = assemble_document(&page, Vec::new(), false);
        assert_eq!(doc.title(), "Release Notes");
        assert_eq!(doc.kind, DocumentKind::Page);
        assert!(doc.metadata.is_none());
    }

    #[test]
    fn test_title_falls_back_to_name_then_untitled() {
        let db_page = page_with(json!({
            "title": { "title": [] },
            "Name": { "type": "title", "title": [{ "plain_text": "Task 12" }] }
        }));
        assert_eq!(extract_title(&db_page.properties), "Task 12");

        let custom = page_with(json!({
            "Status": { "type": "select" },
            "Headline": { "type": "title", "title": [{ "plain_text": "Launch" }] }
        }));
        assert_eq!(extract_title(&custom.properties), "Launch");

        assert_eq!(extract_title(&Map::new()), UNTITLED);
    }

    #[test]
    fn test_icon_cover_and_raw_properties() {
        let mut page = page_with(json!({
            "Status": { "type": "select", "select": { "name": "Done" } }
        }));
        page.icon = Some(json!({ "type": "emoji", "emoji": "🚀" }));
        page.cover = Some(json!({ "type": "external", "external": { "url": "https://img/c.jpg" } }));

        let doc = assemble_document(&page, Vec::new(), false);
        assert_eq!(doc.properties.icon.as_ref().and_then(IconInfo::emoji), Some("🚀"));

        let cover = doc.properties.cover.as_ref().unwrap();
        assert_eq!(cover.source, FileSource::External);
        assert_eq!(cover.url, "https://img/c.jpg");
        assert_eq!(
            doc.properties.raw_properties["Status"]["select"]["name"],
            "Done"
        );
        assert_eq!(doc.title(), UNTITLED);
    }

    #[test]
    fn test_page_audit_metadata() {
        let mut page = RawPage::new("page-1");
        page.last_edited_time = Some("2024-06-01T00:00:00.000Z".to_string());

        let doc = assemble_document(&page, Vec::new(), true);
        let metadata = doc.metadata.unwrap();
        assert_eq!(
            metadata.last_edited_time.as_deref(),
            Some("2024-06-01T00:00:00.000Z")
        );
        assert_eq!(metadata.in_trash, Some(false));
    }

    #[test]
    fn test_serialized_shape() {
        let doc = assemble_document(&RawPage::new("page-1"), Vec::new(), false);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "page");
        assert_eq!(value["properties"]["title"], UNTITLED);
        assert!(value["processed_at"].is_string());
    }
}
