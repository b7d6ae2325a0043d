//! GitHub issues and pull requests as newsletter posts
//!
//! Fetches the issue list of a repository through the GitHub REST API and
//! turns each issue or pull request into a [`RemoteItem`]. The issues endpoint
//! returns pull requests as well; they are told apart by the presence of a
//! `pull_request` object.
//!
//! Failed requests are reported as errors and never retried.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GithubConfig;
use crate::entry::Entry;
use crate::error::{NewsletterError, Result};

/// Image used when an issue body contains no image reference
pub const DEFAULT_IMAGE: &str = "/assets/images/default-newsletter.png";

/// Number of body characters kept as an entry description
pub const DESCRIPTION_CHARS: usize = 200;

/// GitHub caps `per_page` at this value
pub const MAX_PER_PAGE: usize = 100;

const MARKDOWN_IMAGE_PATTERN: &str = r"!\[.*?\]\((.*?)\)";
const HTML_IMAGE_PATTERN: &str = r#"<img[^>]+src=["']([^"']+)["']"#;

fn image_regexes() -> Option<&'static (Regex, Regex)> {
    static REGEXES: OnceLock<Option<(Regex, Regex)>> = OnceLock::new();
    REGEXES
        .get_or_init(
            || match (Regex::new(MARKDOWN_IMAGE_PATTERN), Regex::new(HTML_IMAGE_PATTERN)) {
                (Ok(markdown), Ok(html)) => Some((markdown, html)),
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Failed to compile image pattern: {}", e);
                    None
                }
            },
        )
        .as_ref()
}

/// Find the first image referenced in a Markdown/HTML body
///
/// Markdown images (`![alt](url)`) take precedence over HTML `<img src>`
/// tags. An optional Markdown image title (`![a](url "title")`) is dropped.
///
/// # Examples
///
/// ```
/// use newsletter_rs::github::extract_first_image;
///
/// let body = "Intro\n<img src=\"https://example.com/b.png\">\n![shot](https://example.com/a.png)";
/// assert_eq!(extract_first_image(body).as_deref(), Some("https://example.com/a.png"));
/// assert_eq!(extract_first_image("no images"), None);
/// ```
pub fn extract_first_image(body: &str) -> Option<String> {
    let (markdown, html) = image_regexes()?;

    let from_markdown = markdown
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().split_whitespace().next());
    let found = match from_markdown {
        Some(url) => Some(url),
        None => html
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str()),
    };

    found.filter(|url| !url.is_empty()).map(str::to_string)
}

/// First image of a body, or [`DEFAULT_IMAGE`]
pub fn image_or_default(body: &str) -> String {
    extract_first_image(body).unwrap_or_else(|| DEFAULT_IMAGE.to_string())
}

/// Split an `owner/name` repository slug
pub fn parse_repo_slug(slug: &str) -> Result<(String, String)> {
    match slug.split('/').collect::<Vec<_>>().as_slice() {
        [owner, name] if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(NewsletterError::InvalidArgument(format!(
            "repository must be in format 'owner/name', got '{}'",
            slug
        ))),
    }
}

/// Public web URL of a repository
pub fn repo_url(owner: &str, repo: &str) -> String {
    format!("https://github.com/{}/{}", owner, repo)
}

/// Issue state filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueState {
    /// Open issues only
    Open,
    /// Closed issues only
    Closed,
    /// Open and closed issues
    #[default]
    All,
}

impl IssueState {
    fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

/// Issue sort key (always descending)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueSort {
    /// Creation time
    Created,
    /// Last update time
    #[default]
    Updated,
}

impl IssueSort {
    fn as_str(&self) -> &'static str {
        match self {
            IssueSort::Created => "created",
            IssueSort::Updated => "updated",
        }
    }
}

/// Parameters of one issue list request
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// State filter
    pub state: IssueState,
    /// Sort key
    pub sort: IssueSort,
    /// Only items updated at or after this ISO 8601 timestamp
    pub since: Option<String>,
    /// Maximum number of items returned
    pub limit: usize,
}

impl IssueQuery {
    /// Query all issues of a repository, most recently updated first
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            state: IssueState::default(),
            sort: IssueSort::default(),
            since: None,
            limit: 10,
        }
    }

    /// Set the state filter
    pub fn state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }

    /// Set the sort key
    pub fn sort(mut self, sort: IssueSort) -> Self {
        self.sort = sort;
        self
    }

    /// Only return items updated since the given timestamp
    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Set the maximum number of items
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.limit.clamp(1, MAX_PER_PAGE).to_string()),
            ("state", self.state.as_str().to_string()),
            ("sort", self.sort.as_str().to_string()),
            ("direction", "desc".to_string()),
        ];
        if let Some(since) = &self.since {
            params.push(("since", since.clone()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiIssue {
    number: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    html_url: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
    #[serde(default)]
    labels: Vec<ApiLabel>,
}

/// An issue or pull request fetched from GitHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Issue or pull request number
    pub number: u64,
    /// Title
    pub title: String,
    /// Web URL (`html_url`)
    pub url: String,
    /// Markdown/HTML body (empty when absent)
    pub body: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// `open` or `closed`
    pub state: String,
    /// Login of the author
    pub author: String,
    /// True for pull requests
    pub is_pull_request: bool,
    /// Label names
    pub labels: Vec<String>,
}

impl From<ApiIssue> for RemoteItem {
    fn from(issue: ApiIssue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            url: issue.html_url,
            body: issue.body.unwrap_or_default(),
            created_at: issue.created_at,
            state: issue.state,
            author: issue.user.map(|u| u.login).unwrap_or_default(),
            is_pull_request: issue.pull_request.is_some(),
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
        }
    }
}

/// How entry links point at an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStyle {
    /// Use the item's own web URL
    Public,
    /// Link to `{repo_url}/issues/{number}`
    Internal(String),
}

impl RemoteItem {
    /// `pull_request` or `issue`
    pub fn kind(&self) -> &'static str {
        if self.is_pull_request {
            "pull_request"
        } else {
            "issue"
        }
    }

    /// Turn this item into a newsletter entry
    ///
    /// Labels become tags, so a `featured` label promotes the entry. The
    /// description is the first [`DESCRIPTION_CHARS`] characters of the body.
    pub fn to_entry(&self, links: &LinkStyle) -> Entry {
        let link = match links {
            LinkStyle::Public => self.url.clone(),
            LinkStyle::Internal(repo_url) => format!("{}/issues/{}", repo_url, self.number),
        };
        let title = if self.title.is_empty() {
            "No Title".to_string()
        } else {
            self.title.clone()
        };

        Entry::new(title, link, image_or_default(&self.body), &self.created_at)
            .with_tags(self.labels.iter().cloned())
            .with_description(self.body.chars().take(DESCRIPTION_CHARS).collect::<String>())
    }
}

/// Thin GitHub REST client for the issues endpoint
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`NewsletterError::InvalidArgument`] if the token cannot be
    /// sent as a header, or [`NewsletterError::Request`] if the HTTP client
    /// cannot be built.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
                NewsletterError::InvalidArgument("GitHub token contains invalid characters".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("No GitHub token configured, requests are subject to the anonymous rate limit");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch issues and pull requests of a repository
    ///
    /// Returns at most `query.limit` items in API order.
    ///
    /// # Errors
    ///
    /// - [`NewsletterError::RateLimited`] on HTTP 403 or 429
    /// - [`NewsletterError::Http`] on any other non-success status
    /// - [`NewsletterError::Request`] on transport or decoding failures
    pub async fn fetch_issues(&self, query: &IssueQuery) -> Result<Vec<RemoteItem>> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base, query.owner, query.repo
        );
        debug!(
            "Fetching issues from {}/{} (state {}, sort {}, limit {})",
            query.owner,
            query.repo,
            query.state.as_str(),
            query.sort.as_str(),
            query.limit
        );

        let response = self.client.get(&url).query(&query.params()).send().await?;
        let status = response.status();

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            warn!(
                "GitHub API returned {} for {}/{}; rate limit may be exhausted",
                status, query.owner, query.repo
            );
            return Err(NewsletterError::RateLimited {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsletterError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let issues: Vec<ApiIssue> = response.json().await?;
        let items: Vec<RemoteItem> = issues
            .into_iter()
            .take(query.limit)
            .map(RemoteItem::from)
            .collect();
        debug!("Fetched {} items from {}/{}", items.len(), query.owner, query.repo);

        Ok(items)
    }
}
