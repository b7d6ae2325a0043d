//! Front matter decoding
//!
//! Isolates the `---` delimited block at the top of a document and decodes it
//! line by line with a small state machine. Decoding is best effort: lines it
//! does not understand are skipped and never abort the decode.

use tracing::{debug, trace};

use super::types::{Document, FieldValue, Metadata, MetadataValue, Record};

/// Line that opens and closes the metadata block
pub const MARKER: &str = "---";

fn is_marker(line: &str) -> bool {
    line.trim_end() == MARKER
}

/// Split a document into its metadata block and body
///
/// The first line must be the marker; the block runs up to the next marker
/// line. Returns `(None, document)` when either marker is missing. A leading
/// UTF-8 byte order mark is ignored.
pub fn split_document(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = text.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_marker(first) => {
            let start = first.len();
            let mut offset = start;
            for line in lines {
                if is_marker(line) {
                    return (Some(&text[start..offset]), &text[offset + line.len()..]);
                }
                offset += line.len();
            }
            (None, text)
        }
        _ => (None, text),
    }
}

/// Remove one matching pair of surrounding `"` or `'` quotes
pub fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse the inside of a bracketed list (`a, "b", 'c'`)
///
/// Elements are trimmed and de-quoted; empty elements are dropped.
pub fn parse_inline_list(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(|s| unquote(s.trim()))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Decode a raw field value
///
/// `[a, b]` becomes a [`FieldValue::ScalarList`]; anything else is trimmed,
/// de-quoted and returned as a [`FieldValue::Scalar`].
pub fn decode_value(raw: &str) -> FieldValue {
    let value = raw.trim();
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return FieldValue::ScalarList(parse_inline_list(inner));
    }
    FieldValue::Scalar(unquote(value).to_string())
}

/// Split `key: value` at the first colon followed by whitespace or end of line
///
/// Colons inside values such as URLs (`https://...`) are not separators.
pub(crate) fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_end();
    let bytes = trimmed.as_bytes();
    let pos = bytes.iter().enumerate().position(|(i, &b)| {
        b == b':' && matches!(bytes.get(i + 1), None | Some(b' ') | Some(b'\t'))
    })?;

    let key = unquote(trimmed[..pos].trim());
    if key.is_empty() {
        return None;
    }
    Some((key, &trimmed[pos + 1..]))
}

/// Syntactic class of one line inside the metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Empty or whitespace-only
    Blank,
    /// `- ...`; holds the text after the marker
    ListItem(&'a str),
    /// Indented `key: value`, a field of the current record
    NestedField(&'a str, &'a str),
    /// Unindented `key: value`
    Field(&'a str, &'a str),
    /// Anything without a separator
    Other,
}

pub(crate) fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed == "-" {
        return Line::ListItem("");
    }
    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Line::ListItem(rest);
    }

    let indented = line.starts_with(' ') || line.starts_with('\t');
    match split_key_value(line) {
        Some((key, value)) if indented => Line::NestedField(key, value),
        Some((key, value)) => Line::Field(key, value),
        None => Line::Other,
    }
}

/// Items collected under a pending container key
#[derive(Debug, Default)]
struct ListItems {
    records: Vec<Record>,
    scalars: Vec<String>,
}

impl ListItems {
    /// Turn scalar items seen so far into empty records
    ///
    /// Called when the first record item shows up, so every `- ` line keeps
    /// its place in the list.
    fn promote_scalars(&mut self) {
        if self.records.is_empty() && !self.scalars.is_empty() {
            debug!(
                "Mixed list: {} scalar item(s) become empty records",
                self.scalars.len()
            );
            self.records.extend(self.scalars.drain(..).map(|_| Record::new()));
        }
    }

    /// Only bare scalar items give a scalar list; an empty container is an
    /// empty record list.
    fn into_value(self) -> MetadataValue {
        if self.records.is_empty() && !self.scalars.is_empty() {
            MetadataValue::ScalarList(self.scalars)
        } else {
            MetadataValue::RecordList(self.records)
        }
    }
}

#[derive(Debug, Default)]
enum DecoderState {
    /// No container key pending
    #[default]
    Idle,
    /// A `key:` line was seen; no record is open
    AccumulatingList { key: String, items: ListItems },
    /// A `- ` item is open and receives indented fields
    AccumulatingRecord {
        key: String,
        items: ListItems,
        current: Record,
    },
}

/// Line-driven metadata block decoder
#[derive(Debug, Default)]
pub(crate) struct FrontMatterDecoder {
    metadata: Metadata,
    state: DecoderState,
}

impl FrontMatterDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn feed(&mut self, line: &str) {
        match classify(line) {
            Line::Blank => {}
            Line::ListItem(rest) => self.start_item(rest),
            Line::NestedField(key, value) => match &mut self.state {
                DecoderState::AccumulatingRecord { current, .. } => {
                    current.insert(key, decode_value(value));
                }
                _ => trace!("Ignoring nested field '{}' outside of a list item", key),
            },
            Line::Field(key, value) => {
                self.commit_list();
                if value.trim().is_empty() {
                    self.state = DecoderState::AccumulatingList {
                        key: key.to_string(),
                        items: ListItems::default(),
                    };
                } else {
                    self.metadata.insert(key, decode_value(value).into());
                }
            }
            Line::Other => trace!("Ignoring front matter line without separator: {:?}", line),
        }
    }

    fn start_item(&mut self, rest: &str) {
        let (key, mut items) = match std::mem::take(&mut self.state) {
            DecoderState::Idle => {
                trace!("Ignoring list item without a container key");
                return;
            }
            DecoderState::AccumulatingList { key, items } => (key, items),
            DecoderState::AccumulatingRecord {
                key,
                mut items,
                current,
            } => {
                items.records.push(current);
                (key, items)
            }
        };

        let rest = rest.trim();
        let quoted = unquote(rest).len() != rest.len();
        let seed = if quoted { None } else { split_key_value(rest) };

        if seed.is_some() || rest.is_empty() {
            items.promote_scalars();
            let mut current = Record::new();
            if let Some((field, value)) = seed {
                current.insert(field, decode_value(value));
            }
            self.state = DecoderState::AccumulatingRecord {
                key,
                items,
                current,
            };
        } else if !items.records.is_empty() {
            debug!(
                "Scalar item {:?} in record list '{}' opens an empty record",
                rest, key
            );
            self.state = DecoderState::AccumulatingRecord {
                key,
                items,
                current: Record::new(),
            };
        } else {
            items.scalars.push(unquote(rest).to_string());
            self.state = DecoderState::AccumulatingList { key, items };
        }
    }

    fn commit_list(&mut self) {
        let (key, items) = match std::mem::take(&mut self.state) {
            DecoderState::Idle => return,
            DecoderState::AccumulatingList { key, items } => (key, items),
            DecoderState::AccumulatingRecord {
                key,
                mut items,
                current,
            } => {
                items.records.push(current);
                (key, items)
            }
        };
        trace!(
            "Committing list '{}' ({} records, {} scalars)",
            key,
            items.records.len(),
            items.scalars.len()
        );
        self.metadata.insert(key, items.into_value());
    }

    pub(crate) fn finish(mut self) -> Metadata {
        self.commit_list();
        self.metadata
    }
}

/// Decode the text between the two markers
pub fn decode_block(block: &str) -> Metadata {
    let mut decoder = FrontMatterDecoder::new();
    for line in block.lines() {
        decoder.feed(line);
    }
    decoder.finish()
}

/// Decode the metadata block of a document
///
/// Returns empty [`Metadata`] when the document has no metadata block.
/// Never fails.
///
/// # Examples
///
/// ```
/// use newsletter_rs::front_matter::parse_front_matter;
///
/// let doc = "---\nposts:\n  - title: First\n    url: https://example.com/1\n---\n";
/// let metadata = parse_front_matter(doc);
///
/// let posts = metadata.get_records("posts").unwrap();
/// assert_eq!(posts.len(), 1);
/// assert_eq!(posts[0].get_str("url"), Some("https://example.com/1"));
/// ```
pub fn parse_front_matter(raw: &str) -> Metadata {
    parse_document(raw).metadata
}

/// Split and decode a document
pub fn parse_document(raw: &str) -> Document<'_> {
    let (block, body) = split_document(raw);
    let metadata = match block {
        Some(block) => decode_block(block),
        None => {
            debug!("Document has no front matter block");
            Metadata::new()
        }
    };
    Document { metadata, body }
}
