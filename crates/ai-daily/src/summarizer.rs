//! LLM enrichment of collected items.
//!
//! Each list is processed strictly one item at a time with a fixed pause
//! between calls, to stay under provider rate limits. The three lists run
//! concurrently with each other. A failed call never fails the run: the item
//! gets a summary built from its own fields instead.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::{AnthropicProvider, CompletionRequest, LlmProvider};
use crate::config::LlmConfig;
use crate::error::Result;
use crate::models::{CollectedData, NewsItem, RepoItem};
use crate::text::take_chars;

/// Pause between successive LLM calls within one list.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Response budget for a news summary.
pub const NEWS_MAX_TOKENS: u32 = 500;

/// Response budget for a repository analysis.
pub const REPO_MAX_TOKENS: u32 = 600;

/// Article content sent to the model.
const PROMPT_CONTENT_CHARS: usize = 2000;

/// Article content used in the local fallback.
const FALLBACK_CONTENT_CHARS: usize = 300;

/// Topics included in a repository prompt.
const PROMPT_TOPICS: usize = 5;

/// Enriches news and repositories with LLM summaries.
pub struct Summarizer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    pacing: Duration,
}

impl Summarizer {
    /// Create a summarizer over any provider.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            pacing: DEFAULT_PACING,
        }
    }

    /// Create a summarizer backed by the Anthropic API.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(AnthropicProvider::from_config(config)?),
            config.model.clone(),
        ))
    }

    /// Override the pause between calls.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Whether an API credential is available.
    pub fn is_enabled(&self) -> bool {
        self.provider.is_configured()
    }

    /// Summarize one article. Falls back to a local summary on failure.
    pub async fn summarize_news(&self, mut article: NewsItem) -> NewsItem {
        let prompt = news_prompt(&article);
        let summary = match self.complete(prompt, NEWS_MAX_TOKENS).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(title = %article.title, error = %e, "Failed to summarize news");
                fallback_news_summary(&article)
            }
        };
        article.summary = Some(summary);
        article
    }

    /// Analyze one repository. Falls back to a local analysis on failure.
    pub async fn summarize_repo(&self, mut repo: RepoItem) -> RepoItem {
        let prompt = repo_prompt(&repo);
        let analysis = match self.complete(prompt, REPO_MAX_TOKENS).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(repo = %repo.name, error = %e, "Failed to analyze repository");
                fallback_repo_analysis(&repo)
            }
        };
        repo.analysis = Some(analysis);
        repo
    }

    /// Summarize articles sequentially. No-op without a key or items.
    pub async fn summarize_all_news(&self, news: Vec<NewsItem>) -> Vec<NewsItem> {
        if !self.is_enabled() || news.is_empty() {
            tracing::info!("No API key or no news to summarize");
            return news;
        }

        tracing::info!(count = news.len(), "Summarizing news items");
        let summarized = self.paced(news, |a| self.summarize_news(a)).await;
        tracing::info!("All news summarized");
        summarized
    }

    /// Analyze repositories sequentially. No-op without a key or items.
    pub async fn analyze_all_repos(&self, repos: Vec<RepoItem>) -> Vec<RepoItem> {
        if !self.is_enabled() || repos.is_empty() {
            tracing::info!("No API key or no repos to analyze");
            return repos;
        }

        tracing::info!(count = repos.len(), "Analyzing repositories");
        let analyzed = self.paced(repos, |r| self.summarize_repo(r)).await;
        tracing::info!("All repositories analyzed");
        analyzed
    }

    /// Enrich all three lists concurrently. Without a key the data passes
    /// through untouched.
    pub async fn summarize_all(&self, data: CollectedData) -> CollectedData {
        if !self.is_enabled() {
            tracing::warn!("No Anthropic API key provided, skipping summarization");
            return data;
        }

        tracing::info!(provider = self.provider.name(), model = %self.model, "Starting AI summarization");

        let CollectedData {
            news,
            ai_projects,
            dev_tools,
        } = data;

        let (news, ai_projects, dev_tools) = tokio::join!(
            self.summarize_all_news(news),
            self.analyze_all_repos(ai_projects),
            self.analyze_all_repos(dev_tools),
        );

        CollectedData {
            news,
            ai_projects,
            dev_tools,
        }
    }

    /// Run `step` over items one at a time, pausing between calls.
    async fn paced<T, F, Fut>(&self, items: Vec<T>, mut step: F) -> Vec<T>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = T>,
    {
        let mut done = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
            done.push(step(item).await);
        }
        done
    }

    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String> {
        let completion = self
            .provider
            .complete(CompletionRequest {
                model: &self.model,
                prompt: &prompt,
                max_tokens,
            })
            .await?;

        tracing::debug!(
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "Completion received"
        );

        Ok(completion.text)
    }
}

/// Prompt for a news summary.
pub fn news_prompt(article: &NewsItem) -> String {
    let source = non_empty(&article.source).unwrap_or("未知");
    let content = non_empty(&article.content)
        .map(|c| take_chars(c, PROMPT_CONTENT_CHARS))
        .unwrap_or_else(|| "无内容".to_string());

    format!(
        "请用中文总结以下 AI 新闻，要求：
1. 用 50-100 字概括核心内容
2. 提取 3-5 个关键要点（用列表形式）
3. 保持专业但易懂的语气

标题：{title}
来源：{source}
链接：{link}
内容：{content}",
        title = article.title,
        link = article.link,
    )
}

/// Prompt for a repository analysis.
pub fn repo_prompt(repo: &RepoItem) -> String {
    let topics = if repo.topics.is_empty() {
        "无".to_string()
    } else {
        repo.topics
            .iter()
            .take(PROMPT_TOPICS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "请用中文分析以下 GitHub 项目，要求：
1. 用 50-100 字概括这个项目的核心价值
2. 识别主要技术栈（编程语言、框架等）
3. 提炼 3-5 个创新点或亮点
4. 用一句话总结为什么值得关注

项目名称：{name}
描述：{description}
语言：{language}
Star 数：{stars}
链接：{url}
标签：{topics}",
        name = repo.name,
        description = repo.description.as_deref().unwrap_or("无描述"),
        language = repo.language.as_deref().unwrap_or("未知"),
        stars = repo.stars,
        url = repo.url,
    )
}

/// Summary built from the article alone, used when the LLM call fails.
pub fn fallback_news_summary(article: &NewsItem) -> String {
    let snippet = non_empty(&article.content)
        .map(|c| take_chars(c, FALLBACK_CONTENT_CHARS))
        .unwrap_or_else(|| "暂无详细内容".to_string());

    format!(
        "**📰 新闻摘要**\n\n{}\n\n{snippet}...\n\n🔗 [阅读原文]({})",
        article.title, article.link
    )
}

/// Analysis built from the repository alone, used when the LLM call fails.
pub fn fallback_repo_analysis(repo: &RepoItem) -> String {
    format!(
        "**{}**\n\n技术栈：{}\nStar 数：{}",
        repo.description.as_deref().unwrap_or("无描述"),
        repo.language.as_deref().unwrap_or("未知"),
        repo.stars
    )
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
