//! Entry extraction from rendered newsletter HTML
//!
//! Older newsletters carry no `posts` list in their front matter; their posts
//! only exist as `grid-item` and `featured-post` blocks in the body. Each block
//! is located by its anchor, then the link target, the image source/alt pair
//! and the trailing `post-date` paragraph, treating everything in between as
//! opaque.

use std::sync::OnceLock;

use quick_xml::escape::unescape;
use regex::{Captures, Regex};
use tracing::{trace, warn};

use crate::entry::Entry;

const GRID_ITEM_PATTERN: &str = r#"(?s)<div class="grid-item">.*?<a href="([^"]+)">.*?<img src="([^"]+)" alt="([^"]+)">.*?</a>.*?<h3>.*?</h3>.*?<p class="post-date">([^<]+)</p>.*?</div>"#;

const FEATURED_POST_PATTERN: &str = r#"(?s)<div class="featured-post">.*?<a href="([^"]+)">.*?<img src="([^"]+)" alt="([^"]+)">.*?</a>.*?<h2>.*?</h2>.*?<p class="post-date">([^<]+)</p>"#;

fn compile(pattern: &str, name: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Failed to compile {} pattern: {}", name, e);
            None
        }
    }
}

fn grid_item_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| compile(GRID_ITEM_PATTERN, "grid-item"))
        .as_ref()
}

fn featured_post_regex() -> Option<&'static Regex> {
    static REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    REGEX
        .get_or_init(|| compile(FEATURED_POST_PATTERN, "featured-post"))
        .as_ref()
}

/// Trim a captured value and decode HTML entities
///
/// Values with unknown entities (e.g. `&nbsp;`) are kept as written.
fn clean(raw: &str) -> String {
    let trimmed = raw.trim();
    match unescape(trimmed) {
        Ok(value) => value.into_owned(),
        Err(_) => trimmed.to_string(),
    }
}

fn entry_from_captures(caps: &Captures<'_>) -> Entry {
    let group = |i: usize| caps.get(i).map(|m| clean(m.as_str())).unwrap_or_default();
    Entry::new(group(3), group(1), group(2), group(4))
}

/// Scan a document body for post blocks
///
/// Grid items are appended in document order. Every featured post is inserted
/// at the front, so with several featured blocks the last one in the document
/// comes first.
pub fn extract_pattern(body: &str) -> Vec<Entry> {
    let mut entries = Vec::new();

    if let Some(regex) = grid_item_regex() {
        for caps in regex.captures_iter(body) {
            let entry = entry_from_captures(&caps);
            trace!("Matched grid item: {}", entry.title);
            entries.push(entry);
        }
    }

    if let Some(regex) = featured_post_regex() {
        for caps in regex.captures_iter(body) {
            let entry = entry_from_captures(&caps);
            trace!("Matched featured post: {}", entry.title);
            entries.insert(0, entry);
        }
    }

    entries
}
