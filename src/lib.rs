#![doc = include_str!("../README.md")]

/// Newsletter and GitHub client configuration
pub mod config;
/// JSON datasets built from newsletter directories and GitHub items
pub mod dataset;
mod entry;
mod error;
/// Post extraction strategies
pub mod extract;
/// Front matter decoding and encoding
pub mod front_matter;
/// GitHub issues source
pub mod github;
mod layout;
/// Newsletter document rendering
pub mod render;

pub use config::{GithubConfig, NewsletterConfig, NewsletterKind};
pub use dataset::{
    Dataset, DatasetRecord, FileReport, GithubDataset, GithubSelection, build_dataset,
    collect_github_records, read_dataset, write_dataset,
};
pub use entry::{Entry, FEATURED_TAG, Placement};
pub use error::{NewsletterError, Result};
pub use extract::{Extraction, Strategy, extract_entries};
pub use front_matter::{
    Document, FieldValue, Metadata, MetadataValue, Record, parse_document, parse_front_matter,
};
pub use github::{GithubClient, IssueQuery, IssueSort, IssueState, LinkStyle, RemoteItem};
pub use layout::{DEFAULT_BATCH_SIZE, LayoutPlan, LayoutStats, plan_layout};
pub use render::{RenderOptions, Section, render_newsletter, write_newsletter};
