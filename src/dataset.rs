//! Newsletter datasets
//!
//! A dataset is a JSON array of flat post records. Records come either from a
//! directory of newsletter documents ([`build_dataset`]) or from GitHub issues
//! ([`collect_github_records`]). Every field is optional: consumers must not
//! assume any field is present.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::{NewsletterError, Result};
use crate::extract::{Strategy, extract_entries};
use crate::github::{RemoteItem, image_or_default};

/// Extension of newsletter source documents
pub const DOCUMENT_EXTENSION: &str = "md";

/// `newsletter_type` used when a document has no `type` field
pub const UNKNOWN_TYPE: &str = "unknown";

/// One flat post record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Source document path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Post title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Post link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Image URL or path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Publication date as written in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Entry tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// `type` of the newsletter the post was found in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter_type: Option<String>,
    /// `issue` or `pull_request` for GitHub records
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Issue state for GitHub records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Author login for GitHub records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// `owner/name` for GitHub records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl DatasetRecord {
    /// Build a record from an extracted entry
    ///
    /// Tags are only recorded when the entry has any.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: Some(entry.title.clone()),
            url: Some(entry.link.clone()),
            image: Some(entry.image.clone()),
            date: Some(entry.timestamp.clone()),
            tags: (!entry.tags.is_empty()).then(|| entry.tags.clone()),
            ..Default::default()
        }
    }

    /// Turn the record back into an entry, defaulting missing fields
    pub fn to_entry(&self) -> Entry {
        Entry::new(
            self.title.clone().unwrap_or_default(),
            self.url.clone().unwrap_or_default(),
            self.image.clone().unwrap_or_default(),
            self.date.clone().unwrap_or_default(),
        )
        .with_tags(self.tags.clone().unwrap_or_default())
    }
}

/// Extraction summary for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Document path
    pub path: PathBuf,
    /// Strategy used for the document
    pub strategy: Strategy,
    /// Number of entries found
    pub entries: usize,
}

/// Records built from a directory plus per-file statistics
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Records in output order (newest document first)
    pub records: Vec<DatasetRecord>,
    /// One report per processed document
    pub files: Vec<FileReport>,
}

impl Dataset {
    /// Number of entries found before any limit was applied
    pub fn entries_found(&self) -> usize {
        self.files.iter().map(|f| f.entries).sum()
    }
}

/// List newsletter documents in a directory, newest first
///
/// Only regular `*.md` files directly inside `dir` are returned, sorted by
/// file name in descending lexical order (date-prefixed names sort newest
/// first).
///
/// # Errors
///
/// Returns [`NewsletterError::NotFound`] if `dir` is not a directory.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(NewsletterError::NotFound(format!(
            "newsletter directory {}",
            dir.display()
        )));
    }

    let mut paths = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| b.cmp(a));

    debug!("Discovered {} documents in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Extract the records of a single document
pub fn parse_newsletter_file(path: &Path) -> Result<(Vec<DatasetRecord>, FileReport)> {
    let content = fs::read_to_string(path)?;
    let extraction = extract_entries(&content);
    let newsletter_type = extraction
        .metadata
        .get_str("type")
        .unwrap_or(UNKNOWN_TYPE)
        .to_string();
    let file = path.display().to_string();

    let records: Vec<DatasetRecord> = extraction
        .entries
        .iter()
        .map(|entry| DatasetRecord {
            file: Some(file.clone()),
            newsletter_type: Some(newsletter_type.clone()),
            ..DatasetRecord::from_entry(entry)
        })
        .collect();

    let report = FileReport {
        path: path.to_path_buf(),
        strategy: extraction.strategy,
        entries: records.len(),
    };
    Ok((records, report))
}

/// Build a dataset from every newsletter document in a directory
///
/// Documents are processed newest first; `limit` caps the total number of
/// records kept. A limit of zero means no limit.
pub fn build_dataset(dir: &Path, limit: Option<usize>) -> Result<Dataset> {
    let mut dataset = Dataset::default();

    for path in discover_documents(dir)? {
        let (records, report) = parse_newsletter_file(&path)?;
        info!(
            file = %path.display(),
            entries = report.entries,
            strategy = %report.strategy,
            "parsed newsletter"
        );
        dataset.records.extend(records);
        dataset.files.push(report);
    }

    if let Some(limit) = limit.filter(|&limit| limit > 0) {
        dataset.records.truncate(limit);
    }
    Ok(dataset)
}

/// Write records as a pretty-printed JSON array
///
/// Parent directories are created as needed.
pub fn write_dataset(path: &Path, records: &[DatasetRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), records = records.len(), "wrote dataset");
    Ok(())
}

/// Read a dataset written by [`write_dataset`] (or any compatible tool)
pub fn read_dataset(path: &Path) -> Result<Vec<DatasetRecord>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Which GitHub items go into a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GithubSelection {
    /// Keep plain issues
    pub include_issues: bool,
    /// Keep pull requests
    pub include_pulls: bool,
    /// Maximum number of records
    pub limit: usize,
}

impl Default for GithubSelection {
    fn default() -> Self {
        Self {
            include_issues: true,
            include_pulls: true,
            limit: 6,
        }
    }
}

/// Records built from GitHub items plus issue/PR counts
#[derive(Debug, Clone, Default)]
pub struct GithubDataset {
    /// Records, newest first
    pub records: Vec<DatasetRecord>,
    /// Number of issue records
    pub issues: usize,
    /// Number of pull request records
    pub pulls: usize,
}

/// Filter GitHub items and turn them into dataset records
///
/// Items are taken in the given order until `selection.limit` records are
/// collected, then sorted by creation date, newest first.
pub fn collect_github_records(
    items: &[RemoteItem],
    repository: &str,
    selection: &GithubSelection,
) -> GithubDataset {
    let mut records = Vec::new();

    for item in items {
        if records.len() >= selection.limit {
            break;
        }
        if item.is_pull_request && !selection.include_pulls {
            continue;
        }
        if !item.is_pull_request && !selection.include_issues {
            continue;
        }

        records.push(DatasetRecord {
            title: Some(item.title.clone()),
            url: Some(item.url.clone()),
            image: Some(image_or_default(&item.body)),
            date: Some(item.created_at.clone()),
            kind: Some(item.kind().to_string()),
            state: Some(item.state.clone()),
            author: Some(item.author.clone()),
            repository: Some(repository.to_string()),
            ..Default::default()
        });
    }

    // ISO 8601 timestamps sort chronologically as strings
    records.sort_by(|a, b| b.date.cmp(&a.date));

    let pulls = records
        .iter()
        .filter(|r| r.kind.as_deref() == Some("pull_request"))
        .count();
    GithubDataset {
        issues: records.len() - pulls,
        pulls,
        records,
    }
}
