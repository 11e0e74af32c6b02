//! GitHub REST search as an alternate trending source.

use chrono::{DateTime, Duration, Utc};
use octocrab::models::Repository;
use octocrab::Octocrab;

use crate::error::Result;
use crate::models::RepoItem;

/// Only repositories created within this window are searched.
const SEARCH_WINDOW_DAYS: i64 = 7;

/// Searches repositories via the GitHub API.
pub struct GitHubSearch {
    client: Octocrab,
}

impl GitHubSearch {
    /// Create a search client, authenticated when a token is given.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let client = match token {
            Some(token) => Octocrab::builder()
                .personal_token(token.to_string())
                .build()?,
            None => Octocrab::builder().build()?,
        };
        Ok(Self { client })
    }

    /// Run a repository search sorted by stars, descending.
    pub async fn search(&self, query: &str, count: u8) -> Result<Vec<RepoItem>> {
        tracing::info!(query, count, "GitHub search query");

        let page = self
            .client
            .search()
            .repositories(query)
            .sort("stars")
            .order("desc")
            .per_page(count)
            .send()
            .await?;

        Ok(page.items.into_iter().map(repo_item).collect())
    }
}

/// Query for recently created repositories in a language.
pub fn recent_language_query(language: &str, now: DateTime<Utc>) -> String {
    let since = (now - Duration::days(SEARCH_WINDOW_DAYS)).format("%Y-%m-%d");
    format!("language:{language} created:>{since}")
}

fn repo_item(repo: Repository) -> RepoItem {
    let name = repo.full_name.clone().unwrap_or_else(|| repo.name.clone());
    let url = repo
        .html_url
        .as_ref()
        .map_or_else(|| format!("https://github.com/{name}"), ToString::to_string);

    let mut item = RepoItem::new(name, url, u64::from(repo.stargazers_count.unwrap_or(0)));
    item.description = repo.description.filter(|d| !d.is_empty());
    item.language = repo
        .language
        .as_ref()
        .and_then(|l| l.as_str())
        .map(String::from);
    item.created_at = repo.created_at;
    item.topics = repo.topics.unwrap_or_default();
    item
}
