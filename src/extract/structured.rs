//! Entry extraction from a `posts` record list in the front matter

use crate::entry::Entry;
use crate::front_matter::{FieldValue, Metadata, Record};

/// Front matter key holding the post records
pub const POSTS_KEY: &str = "posts";

/// Project every record under [`POSTS_KEY`] into an [`Entry`]
///
/// Returns `None` when the metadata has no record list under that key, which
/// tells the caller to fall back to pattern extraction. Record order is kept.
pub fn extract_structured(metadata: &Metadata) -> Option<Vec<Entry>> {
    metadata
        .get_records(POSTS_KEY)
        .map(|records| records.iter().map(entry_from_record).collect())
}

/// Project one record into an entry
///
/// Field mapping: `title`, `url` (or `link`), `image`, `date` (or
/// `timestamp`), `tags`, `description`. Missing fields become empty strings
/// and a missing `tags` field an empty list; a scalar `tags` value is a
/// one-element list.
pub fn entry_from_record(record: &Record) -> Entry {
    let text = |keys: &[&str]| -> String {
        keys.iter()
            .find_map(|key| record.get_str(key))
            .unwrap_or_default()
            .to_string()
    };

    Entry {
        title: text(&["title"]),
        link: text(&["url", "link"]),
        image: text(&["image"]),
        timestamp: text(&["date", "timestamp"]),
        tags: record
            .get("tags")
            .map(FieldValue::to_list)
            .unwrap_or_default(),
        description: text(&["description"]),
        placement: None,
    }
}
