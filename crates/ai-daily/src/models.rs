//! Collected item types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article pulled from an RSS feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Article title.
    pub title: String,
    /// Link to the original article.
    pub link: String,
    /// Publication time. `None` when the feed date is missing or unparsable.
    pub pub_date: Option<DateTime<Utc>>,
    /// Plain-text content snippet (HTML stripped).
    pub content: String,
    /// Feed title, or the feed URL when the feed has no title.
    pub source: String,
    /// LLM summary, attached by the summarizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A GitHub repository from a trending listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoItem {
    /// Full name in `owner/repo` form.
    pub name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Repository URL.
    pub url: String,
    /// Stars gained in the trending period (or total stars for search results).
    pub stars: u64,
    /// Primary language.
    pub language: Option<String>,
    /// Creation time; the trending page does not expose it.
    pub created_at: Option<DateTime<Utc>>,
    /// Repository topics.
    #[serde(default)]
    pub topics: Vec<String>,
    /// LLM analysis, attached by the summarizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl RepoItem {
    /// Create a repo item with the fields every source provides.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>, stars: u64) -> Self {
        Self {
            name: name.into(),
            description: None,
            url: url.into(),
            stars,
            language: None,
            created_at: None,
            topics: Vec::new(),
            analysis: None,
        }
    }
}

/// Everything one run collects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedData {
    pub news: Vec<NewsItem>,
    pub ai_projects: Vec<RepoItem>,
    pub dev_tools: Vec<RepoItem>,
}
