//! Newsletter document rendering
//!
//! Turns a [`LayoutPlan`] into a newsletter source document: a front matter
//! block (including a `posts` record list) followed by HTML sections. Single
//! placements become wide sections; runs of batched placements are grouped
//! `batch_size` at a time into grid sections. Grouping here is presentation
//! only and never changes placements.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use quick_xml::escape::escape;
use tracing::info;

use crate::config::{NewsletterConfig, NewsletterKind};
use crate::entry::{Entry, Placement};
use crate::error::Result;
use crate::extract::POSTS_KEY;
use crate::front_matter::{Metadata, MetadataValue, Record};
use crate::layout::LayoutPlan;

/// Values written into the front matter and header of a newsletter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Newsletter flavor (controls link tracking parameters)
    pub kind: NewsletterKind,
    /// Newsletter title
    pub title: String,
    /// Issue date
    pub date: String,
}

impl RenderOptions {
    /// Create options with an explicit date
    pub fn new(kind: NewsletterKind, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            date: date.into(),
        }
    }

    /// Derive options from a configuration, using today's date if unset
    pub fn from_config(config: &NewsletterConfig) -> Self {
        let date = config
            .date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
        Self::new(config.kind, config.title.clone(), date)
    }
}

/// One visual block of a rendered newsletter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    /// A wide section holding one single placement
    Wide(&'a Entry),
    /// A grid section holding up to `batch_size` batched placements
    Grid(&'a [Entry]),
}

/// Group planned entries into sections
///
/// Consecutive batched entries are split into grids of at most
/// `plan.batch_size()` entries. Entries without a placement are treated as
/// batched.
pub fn sections(plan: &LayoutPlan) -> Vec<Section<'_>> {
    let entries = plan.entries();
    let batch_size = plan.batch_size().max(1);
    let mut sections = Vec::new();
    let mut run_start = 0;

    for (i, entry) in entries.iter().enumerate() {
        if entry.placement == Some(Placement::Single) {
            sections.extend(entries[run_start..i].chunks(batch_size).map(Section::Grid));
            sections.push(Section::Wide(entry));
            run_start = i + 1;
        }
    }
    sections.extend(entries[run_start..].chunks(batch_size).map(Section::Grid));

    sections
}

fn front_matter(plan: &LayoutPlan, options: &RenderOptions) -> String {
    let posts = plan
        .entries()
        .iter()
        .map(|entry| {
            let mut record = Record::new()
                .with("title", entry.title.as_str())
                .with("url", entry.link.as_str())
                .with("image", entry.image.as_str())
                .with("date", entry.timestamp.as_str());
            if !entry.tags.is_empty() {
                record = record.with_list("tags", entry.tags.iter().map(String::as_str));
            }
            if !entry.description.is_empty() {
                record = record.with("description", entry.description.as_str());
            }
            record
        })
        .collect();

    let mut metadata = Metadata::new();
    metadata.insert("layout", MetadataValue::Scalar("newsletter".to_string()));
    metadata.insert("title", MetadataValue::Scalar(options.title.clone()));
    metadata.insert("date", MetadataValue::Scalar(options.date.clone()));
    metadata.insert("type", MetadataValue::Scalar(options.kind.to_string()));
    metadata.insert(POSTS_KEY, MetadataValue::RecordList(posts));
    metadata.to_front_matter()
}

fn href(entry: &Entry, kind: NewsletterKind) -> String {
    escape(format!("{}{}", entry.link, kind.tracking_params()).as_str()).into_owned()
}

/// Render a wide section for one entry
pub fn render_wide_section(entry: &Entry, kind: NewsletterKind) -> String {
    let href = href(entry, kind);
    let title = escape(entry.title.as_str());
    let mut html = String::new();

    html.push_str("<div class=\"wide-section\">\n");
    html.push_str("    <div class=\"featured-post\">\n");
    let _ = writeln!(html, "        <a href=\"{}\">", href);
    let _ = writeln!(
        html,
        "            <img src=\"{}\" alt=\"{}\">",
        escape(entry.image.as_str()),
        title
    );
    html.push_str("        </a>\n");
    html.push_str("        <div class=\"post-content\">\n");
    let _ = writeln!(html, "            <h2><a href=\"{}\">{}</a></h2>", href, title);
    let _ = writeln!(
        html,
        "            <p class=\"post-date\">{}</p>",
        escape(entry.timestamp.as_str())
    );
    if !entry.description.is_empty() {
        let _ = writeln!(
            html,
            "            <p class=\"post-description\">{}</p>",
            escape(entry.description.as_str())
        );
    }
    html.push_str("        </div>\n");
    html.push_str("    </div>\n");
    html.push_str("</div>\n");
    html
}

/// Render a grid section for a group of entries
pub fn render_grid_section(entries: &[Entry], kind: NewsletterKind) -> String {
    let mut html = String::from("<div class=\"grid-section\">\n");

    for entry in entries {
        let href = href(entry, kind);
        let title = escape(entry.title.as_str());
        html.push_str("    <div class=\"grid-item\">\n");
        let _ = writeln!(html, "        <a href=\"{}\">", href);
        let _ = writeln!(
            html,
            "            <img src=\"{}\" alt=\"{}\">",
            escape(entry.image.as_str()),
            title
        );
        html.push_str("        </a>\n");
        let _ = writeln!(html, "        <h3><a href=\"{}\">{}</a></h3>", href, title);
        let _ = writeln!(
            html,
            "        <p class=\"post-date\">{}</p>",
            escape(entry.timestamp.as_str())
        );
        html.push_str("    </div>\n");
    }

    html.push_str("</div>\n");
    html
}

/// Render a complete newsletter document
///
/// # Examples
///
/// ```
/// use newsletter_rs::{Entry, NewsletterKind, RenderOptions, plan_layout, render_newsletter};
///
/// let entries = vec![
///     Entry::new("First", "https://example.com/1", "/img/1.png", "2024-10-01"),
///     Entry::new("Second", "https://example.com/2", "/img/2.png", "2024-10-02"),
/// ];
/// let plan = plan_layout(entries, 4).unwrap();
/// let options = RenderOptions::new(NewsletterKind::Blog, "Weekly", "2024-10-07");
///
/// let doc = render_newsletter(&plan, &options);
/// assert!(doc.starts_with("---\n"));
/// assert!(doc.contains("<div class=\"wide-section\">"));
/// assert!(doc.contains("<div class=\"grid-section\">"));
/// ```
pub fn render_newsletter(plan: &LayoutPlan, options: &RenderOptions) -> String {
    let mut doc = front_matter(plan, options);
    doc.push('\n');

    if plan.is_empty() {
        doc.push_str("<p>No posts available.</p>\n");
        return doc;
    }

    let title = escape(options.title.as_str());
    doc.push_str("<div class=\"newsletter-header\">\n");
    let _ = writeln!(doc, "    <h1>{}</h1>", title);
    let _ = writeln!(
        doc,
        "    <p class=\"newsletter-date\">{}</p>",
        escape(options.date.as_str())
    );
    doc.push_str("</div>\n\n");

    for section in sections(plan) {
        match section {
            Section::Wide(entry) => doc.push_str(&render_wide_section(entry, options.kind)),
            Section::Grid(entries) => doc.push_str(&render_grid_section(entries, options.kind)),
        }
        doc.push('\n');
    }

    doc
}

/// Write a rendered newsletter, creating parent directories as needed
pub fn write_newsletter(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "wrote newsletter");
    Ok(())
}
