//! Block Behavior Table
//!
//! This module is the block classifier. Every supported [`BlockKind`] has one
//! [`KindBehavior`] entry describing:
//!
//! - the transformer producing its properties
//! - whether it carries a block color (and so takes part in color inheritance)
//! - whether it may carry children at all
//! - whether it manages its own children (table, column list, synced block,
//!   quote, toggle)
//! - whether it is only valid beneath a specific parent (table row, column)
//!
//! The table is a `static` array; tag lookups go through a map built once on
//! first use. Adding a kind means adding a `BlockKind` variant and one row here,
//! and `test_table_covers_every_kind` fails until the row exists.
//!
//! # Examples
//!
//! ```rust
//! use blocktree_core::behaviors::{classify, is_self_handling, Eligibility};
//!
//! assert_eq!(classify("paragraph"), Eligibility::Processable);
//! assert_eq!(classify("table_row"), Eligibility::ChildOnly);
//! assert_eq!(classify("ai_block"), Eligibility::Unsupported);
//! assert!(is_self_handling("toggle"));
//! ```

use crate::models::BlockKind;
use crate::transform::{media, structure, text, TransformFn};
use std::collections::HashMap;
use std::sync::LazyLock;

/// How the tree builder may treat a raw type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Known kind; transform it
    Processable,
    /// Known kind that is only valid under its dedicated parent
    ChildOnly,
    /// Unknown kind; dropped without an error
    Unsupported,
}

/// Static description of one block kind
#[derive(Clone, Copy)]
pub struct KindBehavior {
    pub kind: BlockKind,
    pub transform: TransformFn,
    pub supports_color: bool,
    pub has_managed_children: bool,
    pub self_handling: bool,
    pub child_only: bool,
}

impl std::fmt::Debug for KindBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindBehavior")
            .field("kind", &self.kind)
            .field("supports_color", &self.supports_color)
            .field("has_managed_children", &self.has_managed_children)
            .field("self_handling", &self.self_handling)
            .field("child_only", &self.child_only)
            .finish()
    }
}

const fn leaf(kind: BlockKind, transform: TransformFn) -> KindBehavior {
    KindBehavior {
        kind,
        transform,
        supports_color: false,
        has_managed_children: false,
        self_handling: false,
        child_only: false,
    }
}

/// Color-capable kind whose children go through the generic walk
const fn colored_parent(kind: BlockKind, transform: TransformFn) -> KindBehavior {
    KindBehavior {
        supports_color: true,
        has_managed_children: true,
        ..leaf(kind, transform)
    }
}

const fn self_handling(kind: BlockKind, transform: TransformFn) -> KindBehavior {
    KindBehavior {
        self_handling: true,
        ..leaf(kind, transform)
    }
}

const fn child_only(kind: BlockKind, transform: TransformFn) -> KindBehavior {
    KindBehavior {
        child_only: true,
        ..leaf(kind, transform)
    }
}

static BEHAVIORS: [KindBehavior; 30] = [
    colored_parent(BlockKind::Paragraph, text::paragraph),
    colored_parent(BlockKind::Heading1, text::heading),
    colored_parent(BlockKind::Heading2, text::heading),
    colored_parent(BlockKind::Heading3, text::heading),
    KindBehavior {
        supports_color: true,
        has_managed_children: true,
        ..self_handling(BlockKind::Quote, text::quote)
    },
    colored_parent(BlockKind::Callout, text::callout),
    colored_parent(BlockKind::BulletedListItem, text::bulleted_list_item),
    colored_parent(BlockKind::NumberedListItem, text::numbered_list_item),
    colored_parent(BlockKind::ToDo, text::to_do),
    KindBehavior {
        supports_color: true,
        has_managed_children: true,
        ..self_handling(BlockKind::Toggle, text::toggle)
    },
    KindBehavior {
        supports_color: true,
        ..leaf(BlockKind::Code, text::code)
    },
    leaf(BlockKind::Equation, text::equation),
    leaf(BlockKind::Image, media::image),
    leaf(BlockKind::Video, media::video),
    leaf(BlockKind::Audio, media::audio),
    leaf(BlockKind::File, media::file),
    leaf(BlockKind::Pdf, media::pdf),
    leaf(BlockKind::Bookmark, media::bookmark),
    leaf(BlockKind::Embed, media::embed),
    leaf(BlockKind::LinkPreview, media::link_preview),
    self_handling(BlockKind::Table, structure::table),
    child_only(BlockKind::TableRow, structure::table_row),
    self_handling(BlockKind::ColumnList, structure::column_list),
    KindBehavior {
        has_managed_children: true,
        ..child_only(BlockKind::Column, structure::column)
    },
    leaf(BlockKind::ChildDatabase, structure::child_database),
    leaf(BlockKind::ChildPage, structure::child_page),
    KindBehavior {
        has_managed_children: true,
        ..self_handling(BlockKind::SyncedBlock, structure::synced_block)
    },
    leaf(BlockKind::Breadcrumb, structure::breadcrumb),
    leaf(BlockKind::Divider, structure::divider),
    leaf(BlockKind::TableOfContents, structure::table_of_contents),
];

static BY_TAG: LazyLock<HashMap<&'static str, &'static KindBehavior>> = LazyLock::new(|| {
    BEHAVIORS
        .iter()
        .map(|behavior| (behavior.kind.as_str(), behavior))
        .collect()
});

/// All behavior rows, in `BlockKind::ALL` order
pub fn all() -> &'static [KindBehavior] {
    &BEHAVIORS
}

/// Behavior of a known kind
pub fn behavior(kind: BlockKind) -> &'static KindBehavior {
    // Rows are declared in `BlockKind::ALL` order
    &BEHAVIORS[kind as usize]
}

/// Behavior for a raw type tag, `None` when unsupported
pub fn behavior_for_tag(tag: &str) -> Option<&'static KindBehavior> {
    BY_TAG.get(tag).copied()
}

pub fn classify(tag: &str) -> Eligibility {
    match behavior_for_tag(tag) {
        Some(behavior) if behavior.child_only => Eligibility::ChildOnly,
        Some(_) => Eligibility::Processable,
        None => Eligibility::Unsupported,
    }
}

pub fn supports_color(tag: &str) -> bool {
    behavior_for_tag(tag).is_some_and(|b| b.supports_color)
}

/// Whether the kind may carry children at all
pub fn has_managed_children(tag: &str) -> bool {
    behavior_for_tag(tag).is_some_and(|b| b.has_managed_children)
}

/// Whether the kind fetches and interprets its own children
pub fn is_self_handling(tag: &str) -> bool {
    behavior_for_tag(tag).is_some_and(|b| b.self_handling)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_kind() {
        assert_eq!(BEHAVIORS.len(), BlockKind::ALL.len());
        for (index, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(BEHAVIORS[index].kind, *kind, "row {} out of order", index);
            assert_eq!(behavior(*kind).kind, *kind);
            assert_ne!(classify(kind.as_str()), Eligibility::Unsupported);
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(classify("paragraph"), Eligibility::Processable);
        assert_eq!(classify("table"), Eligibility::Processable);
        assert_eq!(classify("table_row"), Eligibility::ChildOnly);
        assert_eq!(classify("column"), Eligibility::ChildOnly);
        assert_eq!(classify("unsupported"), Eligibility::Unsupported);
        assert_eq!(classify(""), Eligibility::Unsupported);
    }

    #[test]
    fn test_self_handling_set() {
        let handled: Vec<&str> = all()
            .iter()
            .filter(|b| b.self_handling)
            .map(|b| b.kind.as_str())
            .collect();
        assert_eq!(
            handled,
            vec!["quote", "toggle", "table", "column_list", "synced_block"]
        );
    }

    #[test]
    fn test_color_support() {
        for tag in [
            "paragraph",
            "heading_1",
            "heading_2",
            "heading_3",
            "quote",
            "callout",
            "bulleted_list_item",
            "numbered_list_item",
            "to_do",
            "toggle",
            "code",
        ] {
            assert!(supports_color(tag), "{} should support color", tag);
        }
        assert!(!supports_color("image"));
        assert!(!supports_color("table"));
        assert!(!supports_color("nonsense"));
    }

    #[test]
    fn test_managed_children() {
        for tag in ["paragraph", "callout", "synced_block", "column", "to_do"] {
            assert!(has_managed_children(tag), "{} should carry children", tag);
        }
        assert!(!has_managed_children("code"));
        assert!(!has_managed_children("child_page"));
        assert!(!has_managed_children("divider"));
        assert!(!has_managed_children("table"));
    }
}
