//! Newsletter front matter
//!
//! A newsletter source document starts with a metadata block delimited by two
//! `---` lines. Only a small subset of the usual front matter syntax is
//! understood:
//!
//! - scalar fields (`title: "Weekly"`)
//! - bracketed lists of scalars (`tags: [a, b, c]`)
//! - one level of record lists (`posts:` followed by `- key: value` items with
//!   indented continuation fields)
//!
//! This module is organized into:
//! - `types`: Metadata, MetadataValue, Record and FieldValue
//! - `parsing`: block isolation and the line-driven decoder
//! - `writer`: encoding metadata back into a block

mod parsing;
mod types;
mod writer;

pub use self::parsing::{
    MARKER, decode_block, decode_value, parse_document, parse_front_matter, parse_inline_list,
    split_document, unquote,
};
pub use self::types::{Document, FieldValue, Metadata, MetadataValue, Record};
