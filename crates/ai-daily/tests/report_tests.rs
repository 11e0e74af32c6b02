//! Report rendering properties.

use ai_daily::report::{format_news, format_report, format_repos, markdown_to_html, DEV_TOOLS_CATEGORY};
use ai_daily::{CollectedData, NewsItem, RepoItem};
use chrono::{DateTime, Utc};

fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-16T01:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn sample_data() -> CollectedData {
    let summarized = NewsItem {
        title: "Model release".to_string(),
        link: "https://example.com/release".to_string(),
        pub_date: Some(fixed_now()),
        content: "raw".to_string(),
        source: "Blog".to_string(),
        summary: Some("核心内容".to_string()),
    };
    let plain = NewsItem {
        title: "Funding round".to_string(),
        link: "https://example.com/funding".to_string(),
        pub_date: None,
        content: "Line\nbreak".to_string(),
        source: "News".to_string(),
        summary: None,
    };

    let mut ai = RepoItem::new("acme/llm", "https://github.com/acme/llm", 1500);
    ai.language = Some("Python".to_string());
    ai.analysis = Some("分析".to_string());

    let tool = RepoItem::new("js/bundler", "https://github.com/js/bundler", 42);

    CollectedData {
        news: vec![summarized, plain],
        ai_projects: vec![ai],
        dev_tools: vec![tool],
    }
}

#[test]
fn test_report_is_deterministic() {
    let data = sample_data();
    assert_eq!(format_report(&data, fixed_now()), format_report(&data, fixed_now()));
}

#[test]
fn test_report_layout() {
    let md = format_report(&sample_data(), fixed_now());

    assert!(md.starts_with("# 🤖 AI 每日热点 - 2026-10-16\n\n> 自动生成于 2026-10-16 09:30\n\n---\n\n## 📰 今日头条\n\n"));
    assert!(md.contains("### 1. Model release\n\n🔗 原文链接：https://example.com/release\n\n核心内容\n\n---\n\n"));
    assert!(md.contains("### 2. Funding round\n\n🔗 原文链接：https://example.com/funding\n\n**摘要**：\n\nLine break...\n\n---\n\n"));
    assert!(md.contains("---\n\n## 🚀 GitHub 今日热门榜\n\n> 今日新增 stars 最多的项目\n\n### 🤖 AI/ML 项目\n\n"));
    assert!(md.contains("#### **1. acme/llm**\n\n🔥 今日 +1,500 stars | 🐙 Python\n\n分析\n\n"));
    assert!(md.contains("### 💻 开发工具\n\n#### **6. js/bundler**\n\n🔥 今日 +42 stars\n\n🔗 [查看项目](https://github.com/js/bundler)\n\n---\n\n"));
    assert!(md.contains("## 📊 今日统计\n\n- 📰 AI 新闻：2 条\n- 🤖 AI 项目：1 个\n- 💻 开发工具：1 个\n\n---\n\n"));
    assert!(md.ends_with(
        "💡 由 AI 自动生成 | 来源：[GitHub](https://github.com) • [AI News](https://openai.com/blog)\n"
    ));
}

#[test]
fn test_empty_report_placeholders() {
    let md = format_report(&CollectedData::default(), fixed_now());

    assert!(md.contains("---\n\n暂无新闻\n---\n\n## 🚀 GitHub 今日热门榜"));
    assert!(md.contains("### 🤖 AI/ML 项目\n\n暂无项目\n\n### 💻 开发工具\n\n暂无项目\n\n"));
    assert!(md.contains("- 📰 AI 新闻：0 条"));
}

#[test]
fn test_single_news_block() {
    let item = NewsItem {
        title: "X".to_string(),
        link: "http://a".to_string(),
        pub_date: Some(fixed_now()),
        content: String::new(),
        source: "S".to_string(),
        summary: None,
    };
    let md = format_news(&[item]);

    assert!(md.contains("### 1. X"));
    assert!(md.contains("🔗 原文链接：http://a"));
    assert!(md.ends_with("---\n\n"));
}

#[test]
fn test_non_ai_category_ranks_from_six() {
    let repos: Vec<_> = (0..5)
        .map(|i| RepoItem::new(format!("o/r{i}"), format!("https://github.com/o/r{i}"), 0))
        .collect();
    let md = format_repos(DEV_TOOLS_CATEGORY, &repos);

    for rank in 6..=10 {
        assert!(md.contains(&format!("#### **{rank}. ")));
    }
    assert!(!md.contains("#### **1. "));
}

#[test]
fn test_report_to_html() {
    let html = markdown_to_html(&format_report(&sample_data(), fixed_now()));

    assert!(html.contains("<h1>🤖 AI 每日热点 - 2026-10-16</h1>"));
    assert!(html.contains("<h2>📰 今日头条</h2>"));
    assert!(html.contains("<h4><strong>1. acme/llm</strong></h4>"));
    assert!(html.contains("<hr>"));
    assert!(!html.contains("---"));
}
