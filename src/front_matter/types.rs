//! Front matter type definitions
//!
//! This module contains the typed representation of a decoded metadata block.

use std::collections::HashMap;

/// Value of a single field inside a record
///
/// Records nest exactly one level deep, so their fields can only hold a
/// scalar or a flat list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain string value (`title: "Weekly"`)
    Scalar(String),
    /// Bracketed list of strings (`tags: [a, b, c]`)
    ScalarList(Vec<String>),
}

impl FieldValue {
    /// Get the value as a string slice if it is a scalar
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(s) => Some(s),
            FieldValue::ScalarList(_) => None,
        }
    }

    /// Get the value as a slice of strings if it is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::ScalarList(items) => Some(items),
        }
    }

    /// Coerce the value into a list
    ///
    /// A non-empty scalar becomes a one-element list, an empty scalar an
    /// empty list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Scalar(s) if s.is_empty() => Vec::new(),
            FieldValue::Scalar(s) => vec![s.clone()],
            FieldValue::ScalarList(items) => items.clone(),
        }
    }
}

/// One item of a record list, e.g. a single post in `posts:`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(key.into(), value)
    }

    /// Builder-style variant of [`Record::insert`] for scalar fields
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), FieldValue::Scalar(value.into()));
        self
    }

    /// Builder-style variant of [`Record::insert`] for list fields
    #[must_use]
    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.insert(key.into(), FieldValue::ScalarList(values));
        self
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a scalar field by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_scalar)
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Value stored under a top-level metadata key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// Plain string value
    Scalar(String),
    /// Flat list of strings
    ScalarList(Vec<String>),
    /// List of nested records (`posts:` followed by `- ` items)
    RecordList(Vec<Record>),
}

impl From<FieldValue> for MetadataValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Scalar(s) => MetadataValue::Scalar(s),
            FieldValue::ScalarList(items) => MetadataValue::ScalarList(items),
        }
    }
}

/// Decoded metadata block of a newsletter document
///
/// Keys are unique; insertion order is not preserved.
///
/// # Examples
///
/// ```
/// use newsletter_rs::front_matter::{MetadataValue, parse_front_matter};
///
/// let doc = "---\ntitle: \"Weekly\"\ntags: [a, b, c]\n---\nbody";
/// let metadata = parse_front_matter(doc);
///
/// assert_eq!(metadata.get_str("title"), Some("Weekly"));
/// assert_eq!(
///     metadata.get("tags"),
///     Some(&MetadataValue::ScalarList(vec!["a".into(), "b".into(), "c".into()]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: HashMap<String, MetadataValue>,
}

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level field, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) -> Option<MetadataValue> {
        self.fields.insert(key.into(), value)
    }

    /// Get a field by key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.fields.get(key)
    }

    /// Get a scalar field by key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(MetadataValue::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    /// Get a scalar list field by key
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        match self.fields.get(key) {
            Some(MetadataValue::ScalarList(items)) => Some(items),
            _ => None,
        }
    }

    /// Get a record list field by key
    pub fn get_records(&self, key: &str) -> Option<&[Record]> {
        match self.fields.get(key) {
            Some(MetadataValue::RecordList(records)) => Some(records),
            _ => None,
        }
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were decoded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(key, value)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A newsletter source document split into metadata and body
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Decoded metadata block (empty if absent or malformed)
    pub metadata: Metadata,
    /// Text following the closing marker, or the whole input without a block
    pub body: &'a str,
}
