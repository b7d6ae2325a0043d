//! Front matter encoding
//!
//! Writes [`Metadata`] back into a `---` delimited block using only the subset
//! of syntax the decoder understands, so that decoding the output yields the
//! same metadata. List elements must not contain commas.

use std::fmt::Write;

use super::parsing::MARKER;
use super::types::{FieldValue, Metadata, MetadataValue, Record};

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace(['\r', '\n'], " "))
}

fn quote_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
    format!("[{}]", quoted.join(", "))
}

fn write_field(out: &mut String, key: &str, value: &FieldValue) {
    let _ = match value {
        FieldValue::Scalar(s) => writeln!(out, "{}: {}", key, quote(s)),
        FieldValue::ScalarList(items) => writeln!(out, "{}: {}", key, quote_list(items)),
    };
}

fn write_record(out: &mut String, record: &Record) {
    let mut fields: Vec<(&str, &FieldValue)> = record.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    if fields.is_empty() {
        out.push_str("  -\n");
        return;
    }
    for (i, (key, value)) in fields.into_iter().enumerate() {
        out.push_str(if i == 0 { "  - " } else { "    " });
        write_field(out, key, value);
    }
}

impl Metadata {
    /// Encode this metadata as a front matter block, markers included
    ///
    /// Keys are written in sorted order. Scalars are always double-quoted and
    /// newlines inside values are folded to spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use newsletter_rs::front_matter::{Metadata, MetadataValue, Record, parse_front_matter};
    ///
    /// let mut metadata = Metadata::new();
    /// metadata.insert("title", MetadataValue::Scalar("Weekly".into()));
    /// metadata.insert(
    ///     "posts",
    ///     MetadataValue::RecordList(vec![Record::new().with("title", "First")]),
    /// );
    ///
    /// let block = metadata.to_front_matter();
    /// assert!(block.starts_with("---\nposts:\n  - title: \"First\"\n"));
    /// assert_eq!(parse_front_matter(&block), metadata);
    /// ```
    pub fn to_front_matter(&self) -> String {
        let mut entries: Vec<(&str, &MetadataValue)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        out.push_str(MARKER);
        out.push('\n');

        for (key, value) in entries {
            match value {
                MetadataValue::Scalar(s) => {
                    let _ = writeln!(out, "{}: {}", key, quote(s));
                }
                MetadataValue::ScalarList(items) => {
                    let _ = writeln!(out, "{}: {}", key, quote_list(items));
                }
                MetadataValue::RecordList(records) => {
                    let _ = writeln!(out, "{}:", key);
                    for record in records {
                        write_record(&mut out, record);
                    }
                }
            }
        }

        out.push_str(MARKER);
        out.push('\n');
        out
    }
}
