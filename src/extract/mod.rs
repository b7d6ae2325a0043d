//! Post extraction from newsletter source documents
//!
//! Two independent strategies exist and exactly one is used per document:
//!
//! - `structured`: project the `posts` record list of the front matter
//! - `pattern`: scan the body for rendered `grid-item` / `featured-post`
//!   blocks (legacy documents without a `posts` list)
//!
//! [`extract_entries`] picks the strategy. Neither strategy fails; a document
//! without posts yields an empty list.

mod pattern;
mod structured;

use serde::Serialize;
use tracing::debug;

use crate::entry::Entry;
use crate::front_matter::{Metadata, parse_document};

pub use self::pattern::extract_pattern;
pub use self::structured::{POSTS_KEY, entry_from_record, extract_structured};

/// Which extraction strategy produced a set of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Entries came from the front matter `posts` record list
    Structured,
    /// Entries came from scanning rendered HTML blocks
    Pattern,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Structured => f.write_str("structured"),
            Strategy::Pattern => f.write_str("pattern"),
        }
    }
}

/// Result of extracting entries from one document
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Strategy that was selected
    pub strategy: Strategy,
    /// Decoded front matter of the document
    pub metadata: Metadata,
    /// Extracted entries in output order
    pub entries: Vec<Entry>,
}

/// Decode a document and extract its entries
///
/// Uses the structured strategy when the front matter holds a `posts` record
/// list (even an empty one) and the pattern strategy otherwise.
///
/// # Examples
///
/// ```
/// use newsletter_rs::extract::{Strategy, extract_entries};
///
/// let doc = "---\nposts:\n  - title: A\n  - title: B\n---\n";
/// let extraction = extract_entries(doc);
///
/// assert_eq!(extraction.strategy, Strategy::Structured);
/// assert_eq!(extraction.entries.len(), 2);
/// assert_eq!(extraction.entries[1].title, "B");
/// ```
pub fn extract_entries(raw: &str) -> Extraction {
    let document = parse_document(raw);

    let (strategy, entries) = match extract_structured(&document.metadata) {
        Some(entries) => (Strategy::Structured, entries),
        None => (Strategy::Pattern, extract_pattern(document.body)),
    };
    debug!(
        "Extracted {} entries using {} strategy",
        entries.len(),
        strategy
    );

    Extraction {
        strategy,
        metadata: document.metadata,
        entries,
    }
}
