//! Markdown report rendering.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::{report_date, report_time};
use crate::models::{CollectedData, NewsItem, RepoItem};
use crate::text::{format_thousands, take_chars};

/// Heading of the AI/ML repository block.
pub const AI_CATEGORY: &str = "🤖 AI/ML 项目";

/// Heading of the dev-tools repository block.
pub const DEV_TOOLS_CATEGORY: &str = "💻 开发工具";

/// Placeholder when no news was collected.
pub const NO_NEWS: &str = "暂无新闻\n";

/// Content shown for an article without a summary.
const SNIPPET_CHARS: usize = 300;

/// First displayed rank of a non-AI block; the two blocks share one 1..10 list.
const SECOND_BLOCK_FIRST_RANK: usize = 6;

static NEWLINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("Invalid newline regex"));

/// Render the news section.
pub fn format_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return NO_NEWS.to_string();
    }

    let mut md = String::from("## 📰 今日头条\n\n");

    for (index, item) in news.iter().enumerate() {
        let _ = write!(md, "### {}. {}\n\n", index + 1, item.title);
        let _ = write!(md, "🔗 原文链接：{}\n\n", item.link);

        if let Some(summary) = &item.summary {
            let _ = write!(md, "{summary}\n\n");
        } else if !item.content.is_empty() {
            let snippet = take_chars(&item.content, SNIPPET_CHARS);
            let snippet = NEWLINE_RUNS.replace_all(&snippet, " ");
            let _ = write!(md, "**摘要**：\n\n{snippet}...\n\n");
        }

        md.push_str("---\n\n");
    }

    md
}

/// Render one repository block.
///
/// Categories containing `AI` rank from 1, all others from 6, so an AI
/// block followed by a dev-tools block reads as one 1..10 list.
pub fn format_repos(category: &str, repos: &[RepoItem]) -> String {
    if repos.is_empty() {
        return format!("### {category}\n\n暂无项目\n\n");
    }

    let first_rank = if category.contains("AI") {
        1
    } else {
        SECOND_BLOCK_FIRST_RANK
    };

    let mut md = format!("### {category}\n\n");

    for (index, repo) in repos.iter().enumerate() {
        let rank = first_rank + index;

        let _ = write!(md, "#### **{rank}. {}**\n\n", repo.name);
        let _ = write!(md, "🔥 今日 +{} stars", format_thousands(repo.stars));
        if let Some(language) = &repo.language {
            let _ = write!(md, " | 🐙 {language}");
        }
        md.push_str("\n\n");

        if let Some(analysis) = &repo.analysis {
            let _ = write!(md, "{analysis}\n\n");
        } else if let Some(description) = &repo.description {
            let _ = write!(md, "**简介**：{description}\n\n");
        }

        let _ = write!(md, "🔗 [查看项目]({})\n\n---\n\n", repo.url);
    }

    md
}

/// Render the full report. Output depends only on `data` and `generated_at`.
pub fn format_report(data: &CollectedData, generated_at: DateTime<Utc>) -> String {
    let date = report_date(generated_at);
    let time = report_time(generated_at);

    let mut md = format!("# 🤖 AI 每日热点 - {date}\n\n");
    let _ = write!(md, "> 自动生成于 {date} {time}\n\n");
    md.push_str("---\n\n");

    md.push_str(&format_news(&data.news));

    md.push_str("---\n\n## 🚀 GitHub 今日热门榜\n\n");
    md.push_str("> 今日新增 stars 最多的项目\n\n");

    md.push_str(&format_repos(AI_CATEGORY, &data.ai_projects));
    md.push_str(&format_repos(DEV_TOOLS_CATEGORY, &data.dev_tools));

    md.push_str("---\n\n");
    md.push_str("## 📊 今日统计\n\n");
    let _ = writeln!(md, "- 📰 AI 新闻：{} 条", data.news.len());
    let _ = writeln!(md, "- 🤖 AI 项目：{} 个", data.ai_projects.len());
    let _ = writeln!(md, "- 💻 开发工具：{} 个", data.dev_tools.len());
    md.push_str("\n---\n\n");
    md.push_str(
        "💡 由 AI 自动生成 | 来源：[GitHub](https://github.com) • [AI News](https://openai.com/blog)\n",
    );

    md
}
