//! Data collection from RSS feeds and GitHub trending.
//!
//! Every source is isolated: a failing feed or trending fetch is logged and
//! contributes nothing, it never aborts the collection.

pub mod feeds;
pub mod search;
pub mod trending;

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::config::{SourcesConfig, TrendingSource};
use crate::error::Result;
use crate::models::{CollectedData, NewsItem, RepoItem};

pub use search::GitHubSearch;
pub use trending::TrendingParser;

/// Default github.com base for trending pages.
pub const GITHUB_BASE_URL: &str = "https://github.com";

/// Per-request HTTP timeout.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with feed and trending requests.
const USER_AGENT: &str = concat!("ai-daily/", env!("CARGO_PKG_VERSION"));

/// Repositories per search request in search mode.
const SEARCH_PAGE_SIZE: u8 = 25;

/// Trending repositories split by category.
#[derive(Debug, Clone, Default)]
pub struct TrendingRepos {
    pub ai_projects: Vec<RepoItem>,
    pub dev_tools: Vec<RepoItem>,
}

/// Fetches news and trending repositories.
pub struct Collector {
    client: Client,
    github_base: String,
    github_token: Option<String>,
}

impl Collector {
    /// Create a collector with a shared HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            github_base: GITHUB_BASE_URL.to_string(),
            github_token: None,
        })
    }

    /// Override the github.com base (used against mock servers).
    #[must_use]
    pub fn with_github_base_url(mut self, base: impl Into<String>) -> Self {
        self.github_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Token for the GitHub search source.
    #[must_use]
    pub fn with_github_token(mut self, token: Option<String>) -> Self {
        self.github_token = token;
        self
    }

    /// Fetch feeds one after another and return the newest items.
    ///
    /// Each feed contributes at most 5 items from the last 24 hours; the
    /// merged list is sorted newest first and capped at 12.
    pub async fn fetch_rss_feeds(&self, feed_urls: &[String]) -> Vec<NewsItem> {
        let now = Utc::now();
        let mut all_items = Vec::new();

        for feed_url in feed_urls {
            tracing::info!(feed = %feed_url, "Fetching RSS");

            let items = match self.fetch_feed(feed_url, now).await {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(feed = %feed_url, error = %e, "Failed to fetch feed");
                    continue;
                }
            };

            tracing::debug!(feed = %feed_url, kept = items.len(), "Parsed feed");
            all_items.extend(items);
        }

        feeds::merge_latest(all_items)
    }

    async fn fetch_feed(&self, feed_url: &str, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
        let body = self
            .client
            .get(feed_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        feeds::parse_feed(&body, feed_url, now)
    }

    /// Fetch today's trending repositories for a language (empty = all).
    pub async fn fetch_github_trending_daily(&self, language: &str) -> Vec<RepoItem> {
        let label = if language.is_empty() {
            "all languages"
        } else {
            language
        };
        tracing::info!(language = label, "Fetching GitHub trending");

        match self.fetch_trending_page(language).await {
            Ok(html) => TrendingParser::parse(&html),
            Err(e) => {
                tracing::warn!(language = label, error = %e, "Failed to fetch GitHub trending");
                Vec::new()
            }
        }
    }

    async fn fetch_trending_page(&self, language: &str) -> Result<String> {
        let url = if language.is_empty() {
            format!("{}/trending", self.github_base)
        } else {
            format!("{}/trending/{language}", self.github_base)
        };

        let html = self
            .client
            .get(url)
            .query(&[("since", "daily")])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(html)
    }

    /// Run a GitHub repository search, most starred first.
    pub async fn fetch_github_search(&self, query: &str, count: u8) -> Vec<RepoItem> {
        match self.search_repositories(query, count).await {
            Ok(repos) => repos,
            Err(e) => {
                tracing::warn!(query, error = %e, "Failed to search GitHub");
                Vec::new()
            }
        }
    }

    async fn search_repositories(&self, query: &str, count: u8) -> Result<Vec<RepoItem>> {
        GitHubSearch::new(self.github_token.as_deref())?
            .search(query, count)
            .await
    }

    /// Fetch both trending pools concurrently and split them into categories.
    ///
    /// Python entries matching an AI keyword become AI projects; the first
    /// JavaScript entries become dev tools. Both are capped at 5.
    pub async fn fetch_all_trending(&self, source: TrendingSource) -> TrendingRepos {
        let (ai_pool, dev_pool) = match source {
            TrendingSource::Daily => {
                tracing::info!("Fetching today's GitHub trending");
                tokio::join!(
                    self.fetch_github_trending_daily(trending::AI_POOL_LANGUAGE),
                    self.fetch_github_trending_daily(trending::DEV_TOOLS_LANGUAGE),
                )
            }
            TrendingSource::Search => {
                tracing::info!("Searching GitHub for recent popular repositories");
                let now = Utc::now();
                let ai_query = search::recent_language_query(trending::AI_POOL_LANGUAGE, now);
                let dev_query = search::recent_language_query(trending::DEV_TOOLS_LANGUAGE, now);
                tokio::join!(
                    self.fetch_github_search(&ai_query, SEARCH_PAGE_SIZE),
                    self.fetch_github_search(&dev_query, SEARCH_PAGE_SIZE),
                )
            }
        };

        let repos = TrendingRepos {
            ai_projects: trending::filter_ai_projects(ai_pool),
            dev_tools: trending::select_dev_tools(dev_pool),
        };

        tracing::info!(
            ai_projects = repos.ai_projects.len(),
            dev_tools = repos.dev_tools.len(),
            "Fetched trending projects"
        );

        repos
    }

    /// Run RSS and trending collection concurrently.
    pub async fn collect_all_data(&self, sources: &SourcesConfig) -> CollectedData {
        tracing::info!(feeds = sources.rss_feeds.len(), "Starting data collection");

        let (news, repos) = tokio::join!(
            self.fetch_rss_feeds(&sources.rss_feeds),
            self.fetch_all_trending(sources.trending_source),
        );

        tracing::info!(
            news = news.len(),
            ai_projects = repos.ai_projects.len(),
            dev_tools = repos.dev_tools.len(),
            "Data collection complete"
        );

        CollectedData {
            news,
            ai_projects: repos.ai_projects,
            dev_tools: repos.dev_tools,
        }
    }
}
