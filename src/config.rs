//! Newsletter configuration

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::NewsletterError;
use crate::layout::DEFAULT_BATCH_SIZE;

/// Default GitHub REST API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User agent sent with every GitHub request
pub const DEFAULT_USER_AGENT: &str = "Newsletter-Dataset-Generator";

/// Environment variable holding a GitHub personal access token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// GitHub API client configuration
///
/// # Example
///
/// ```
/// use newsletter_rs::GithubConfig;
///
/// // Anonymous access (low rate limit)
/// let config = GithubConfig::default();
/// assert!(config.token.is_none());
///
/// // Authenticated access
/// let config = GithubConfig::with_token("ghp_example");
/// assert_eq!(config.token.as_deref(), Some("ghp_example"));
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL (e.g., "https://api.github.com")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Personal access token sent as `Authorization: token ...`
    #[serde(default)]
    pub token: Option<String>,

    /// User-Agent header value (required by the GitHub API)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
            user_agent: default_user_agent(),
            timeout: default_timeout(),
        }
    }
}

impl GithubConfig {
    /// Create a configuration that authenticates with the given token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Create a configuration reading the token from `GITHUB_TOKEN`
    ///
    /// An unset or empty variable means anonymous access.
    pub fn from_env() -> Self {
        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
        Self {
            token,
            ..Default::default()
        }
    }

    /// Point the client at a different API endpoint (GitHub Enterprise, tests)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Flavor of newsletter being generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterKind {
    /// Blog digest; may link to internal issue pages
    #[default]
    Blog,
    /// Mosaic digest; links carry Matomo campaign parameters
    Mosaic,
}

impl NewsletterKind {
    /// Name written to the `type` front matter field
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsletterKind::Blog => "blog",
            NewsletterKind::Mosaic => "mosaic",
        }
    }

    /// Query string appended to every link, if any
    pub fn tracking_params(&self) -> &'static str {
        match self {
            NewsletterKind::Blog => "",
            NewsletterKind::Mosaic => "?mtm_campaign=newsletter&mtm_source=mosaic",
        }
    }
}

impl std::fmt::Display for NewsletterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsletterKind {
    type Err = NewsletterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blog" => Ok(NewsletterKind::Blog),
            "mosaic" => Ok(NewsletterKind::Mosaic),
            other => Err(NewsletterError::InvalidArgument(format!(
                "unknown newsletter type '{}' (expected blog or mosaic)",
                other
            ))),
        }
    }
}

/// Settings for turning a list of entries into a newsletter document
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterConfig {
    /// Newsletter flavor
    #[serde(default)]
    pub kind: NewsletterKind,
    /// Title shown in the front matter and page header
    pub title: String,
    /// Issue date (`YYYY-MM-DD`); today when `None`
    #[serde(default)]
    pub date: Option<String>,
    /// Entries per batched group
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            kind: NewsletterKind::default(),
            title: "Newsletter".to_string(),
            date: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl NewsletterConfig {
    /// Create a configuration for the given flavor and title
    pub fn new(kind: NewsletterKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            ..Default::default()
        }
    }
}
