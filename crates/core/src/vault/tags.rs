//! Hashtag extraction from note content.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

// `#` followed by ASCII word characters; anything else ends the tag
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([0-9A-Za-z_]+)").unwrap());

/// Extract the unique, lowercased hashtags found in `content`.
///
/// The result is sorted so output built from it is stable, but callers
/// should treat it as a set.
pub fn extract_tags(content: &str) -> Vec<String> {
    let tags: BTreeSet<String> = TAG_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_lowercase())
        .collect();

    tags.into_iter().collect()
}

/// Normalize a caller-supplied tag filter value for comparison.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}
