//! Block and page id helpers
//!
//! The content API accepts ids with or without dashes. These helpers convert
//! between the compact 32-character form and the dashed 8-4-4-4-12 form.

use regex::Regex;
use std::sync::LazyLock;

static COMPACT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-fA-F0-9]{32}$").unwrap_or_else(|e| panic!("invalid id pattern: {}", e))
});

/// Remove every dash
pub fn clean_id(id: &str) -> String {
    id.replace('-', "")
}

/// Dashed 8-4-4-4-12 form; ids that are not 32 characters once cleaned are
/// returned unchanged
pub fn format_id(id: &str) -> String {
    let clean = clean_id(id);
    if clean.len() != 32 || !clean.is_ascii() {
        return id.to_string();
    }

    format!(
        "{}-{}-{}-{}-{}",
        &clean[0..8],
        &clean[8..12],
        &clean[12..16],
        &clean[16..20],
        &clean[20..32]
    )
}

/// Whether `id` is 32 hex digits once dashes are removed
pub fn is_valid_id(id: &str) -> bool {
    COMPACT_ID.is_match(&clean_id(id))
}
