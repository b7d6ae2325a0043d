//! Newsletter entries
//!
//! An [`Entry`] is one post as it moves from extraction through layout
//! planning to rendering.

use serde::{Deserialize, Serialize};

/// Tag that forces an entry into a single placement ahead of everything else
pub const FEATURED_TAG: &str = "featured";

/// Layout slot assigned to an entry by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Prominent slot holding one entry (rendered as a wide section)
    Single,
    /// Slot inside a group of entries shown together (rendered as a grid)
    Batched,
}

impl Placement {
    /// Lowercase name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Single => "single",
            Placement::Batched => "batched",
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One post in a newsletter
///
/// Every text field defaults to an empty string when its source does not
/// provide it. `placement` stays `None` until the layout planner sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Post title
    #[serde(default)]
    pub title: String,
    /// Link target
    #[serde(default)]
    pub link: String,
    /// Image URL or site-relative path
    #[serde(default)]
    pub image: String,
    /// Publication timestamp as written in the source
    #[serde(default)]
    pub timestamp: String,
    /// Entry tags; [`FEATURED_TAG`] marks a featured entry
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short description shown under single placements
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Layout slot, set once by the planner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl Entry {
    /// Create an entry with the four required text fields
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        image: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            image: image.into(),
            timestamp: timestamp.into(),
            ..Default::default()
        }
    }

    /// Replace the tags of this entry
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description of this entry
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if the entry carries the featured tag
    pub fn is_featured(&self) -> bool {
        self.tags.iter().any(|t| t == FEATURED_TAG)
    }
}
