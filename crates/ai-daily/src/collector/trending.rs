//! GitHub trending page parsing and AI project filtering.

use scraper::{ElementRef, Html, Selector};

use crate::models::RepoItem;

/// Keywords that mark a repository as AI/ML related.
pub const AI_KEYWORDS: &[&str] = &[
    "machine learning",
    "deep learning",
    "ai",
    "llm",
    "nlp",
    "transformer",
    "tensorflow",
    "pytorch",
    "hugging",
];

/// Max repositories per trending category.
pub const MAX_TRENDING_PER_CATEGORY: usize = 5;

/// Language whose trending list supplies AI/ML candidates.
pub const AI_POOL_LANGUAGE: &str = "python";

/// Language whose trending list supplies dev tools.
pub const DEV_TOOLS_LANGUAGE: &str = "javascript";

/// Parser for github.com/trending HTML.
pub struct TrendingParser;

impl TrendingParser {
    /// Parse repository rows from a trending page.
    ///
    /// Rows without a repository link are skipped. Missing "stars today"
    /// counts become 0.
    pub fn parse(html: &str) -> Vec<RepoItem> {
        let document = Html::parse_document(html);

        let row_selector = Selector::parse("article.Box-row").expect("Invalid row selector");
        let link_selector = Selector::parse("h2 a").expect("Invalid link selector");
        let desc_selector = Selector::parse("p").expect("Invalid description selector");
        let lang_selector = Selector::parse("[itemprop='programmingLanguage']")
            .expect("Invalid language selector");
        let stars_today_selector =
            Selector::parse("span.float-sm-right").expect("Invalid stars selector");

        let mut repos = Vec::new();

        for row in document.select(&row_selector) {
            let Some(name) = row
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(parse_repo_path)
            else {
                tracing::debug!("Trending row missing repository link, skipping");
                continue;
            };

            let mut repo = RepoItem::new(
                name.clone(),
                format!("https://github.com/{name}"),
                row.select(&stars_today_selector)
                    .next()
                    .and_then(|el| parse_star_count(&element_text(el)))
                    .unwrap_or(0),
            );
            repo.description = row
                .select(&desc_selector)
                .next()
                .map(element_text)
                .filter(|d| !d.is_empty());
            repo.language = row
                .select(&lang_selector)
                .next()
                .map(element_text)
                .filter(|l| !l.is_empty());

            repos.push(repo);
        }

        if repos.is_empty() {
            tracing::warn!("No repositories found in trending page; markup may have changed");
        }

        repos
    }
}

/// Keep AI/ML repositories, first [`MAX_TRENDING_PER_CATEGORY`] in order.
pub fn filter_ai_projects(repos: Vec<RepoItem>) -> Vec<RepoItem> {
    repos
        .into_iter()
        .filter(is_ai_related)
        .take(MAX_TRENDING_PER_CATEGORY)
        .collect()
}

/// First [`MAX_TRENDING_PER_CATEGORY`] repositories, unfiltered.
pub fn select_dev_tools(repos: Vec<RepoItem>) -> Vec<RepoItem> {
    repos.into_iter().take(MAX_TRENDING_PER_CATEGORY).collect()
}

/// Case-insensitive substring match of any AI keyword against the
/// description or full name.
pub fn is_ai_related(repo: &RepoItem) -> bool {
    let desc = repo.description.as_deref().unwrap_or_default().to_lowercase();
    let name = repo.name.to_lowercase();
    AI_KEYWORDS
        .iter()
        .any(|keyword| desc.contains(keyword) || name.contains(keyword))
}

/// `/owner/repo` -> `owner/repo`.
fn parse_repo_path(href: &str) -> Option<String> {
    let parts: Vec<&str> = href
        .trim()
        .trim_matches('/')
        .split('/')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [owner, repo] => Some(format!("{owner}/{repo}")),
        _ => None,
    }
}

/// First number in text like "1,234 stars today".
fn parse_star_count(text: &str) -> Option<u64> {
    text.split_whitespace()
        .find_map(|token| token.replace(',', "").parse().ok())
}

/// Element text with whitespace runs collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
