//! Collector tests against a local mock server.

use ai_daily::config::{SourcesConfig, TrendingSource};
use ai_daily::Collector;
use chrono::{Duration, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rss_feed(title: &str, items: &[(&str, i64)]) -> String {
    let now = Utc::now();
    let items: String = items
        .iter()
        .map(|(item_title, hours_ago)| {
            format!(
                "<item><title>{item_title}</title><link>https://example.com/{item_title}</link>\
                 <description>&lt;p&gt;About {item_title}&lt;/p&gt;</description>\
                 <pubDate>{}</pubDate></item>",
                (now - Duration::hours(*hours_ago)).to_rfc2822()
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>{title}</title><link>https://example.com</link>
<description>feed</description>{items}</channel></rss>"#
    )
}

fn trending_row(name: &str, description: &str, stars_today: &str) -> String {
    format!(
        r#"<article class="Box-row">
  <h2 class="h3 lh-condensed"><a href="/{name}">{name}</a></h2>
  <p class="col-9">{description}</p>
  <div class="f6"><span itemprop="programmingLanguage">Python</span>
  <span class="d-inline-block float-sm-right">{stars_today} stars today</span></div>
</article>"#
    )
}

fn trending_page(rows: &[String]) -> String {
    format!("<html><body><div class=\"Box\">{}</div></body></html>", rows.join("\n"))
}

#[tokio::test]
async fn test_fetch_rss_feeds_isolates_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/good.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(rss_feed("Good Feed", &[("fresh", 1), ("older", 3), ("stale", 30)])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/garbage.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not a feed"))
        .mount(&server)
        .await;

    let feeds = vec![
        format!("{}/broken.xml", server.uri()),
        format!("{}/garbage.xml", server.uri()),
        format!("{}/good.xml", server.uri()),
    ];

    let collector = Collector::new().unwrap();
    let news = collector.fetch_rss_feeds(&feeds).await;

    assert_eq!(news.len(), 2);
    assert_eq!(news[0].title, "fresh");
    assert_eq!(news[1].title, "older");
    assert_eq!(news[0].source, "Good Feed");
    assert_eq!(news[0].content, "About fresh");
    assert_eq!(news[0].link, "https://example.com/fresh");
    assert!(news.iter().all(|n| n.summary.is_none()));
}

#[tokio::test]
async fn test_fetch_rss_feeds_merges_and_caps() {
    let server = MockServer::start().await;

    for feed in ["a", "b", "c"] {
        let items: Vec<(String, i64)> = (1..=6).map(|h| (format!("{feed}{h}"), h)).collect();
        let items: Vec<(&str, i64)> = items.iter().map(|(t, h)| (t.as_str(), *h)).collect();
        Mock::given(method("GET"))
            .and(path(format!("/{feed}.xml")))
            .respond_with(ResponseTemplate::new(200).set_body_string(rss_feed(feed, &items)))
            .mount(&server)
            .await;
    }

    let feeds: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|f| format!("{}/{f}.xml", server.uri()))
        .collect();

    let news = Collector::new().unwrap().fetch_rss_feeds(&feeds).await;

    // 5 per feed, 15 total, capped at 12
    assert_eq!(news.len(), 12);
    assert!(news.iter().all(|n| !n.title.ends_with('6')));
    assert!(news
        .windows(2)
        .all(|w| w[0].pub_date >= w[1].pub_date));
}

#[tokio::test]
async fn test_fetch_all_trending_splits_categories() {
    let server = MockServer::start().await;

    let python_rows = vec![
        trending_row("acme/llm-kit", "Build LLM apps", "2,345"),
        trending_row("acme/webserver", "A fast web server", "900"),
        trending_row("ml/torchy", "PyTorch utilities", "120"),
    ];
    Mock::given(method("GET"))
        .and(path("/trending/python"))
        .and(query_param("since", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trending_page(&python_rows)))
        .mount(&server)
        .await;

    let js_rows: Vec<String> = (0..7)
        .map(|i| trending_row(&format!("js/tool{i}"), "Bundler", "10"))
        .collect();
    Mock::given(method("GET"))
        .and(path("/trending/javascript"))
        .and(query_param("since", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trending_page(&js_rows)))
        .mount(&server)
        .await;

    let collector = Collector::new()
        .unwrap()
        .with_github_base_url(server.uri());
    let repos = collector.fetch_all_trending(TrendingSource::Daily).await;

    let ai_names: Vec<_> = repos.ai_projects.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(ai_names, vec!["acme/llm-kit", "ml/torchy"]);
    assert_eq!(repos.ai_projects[0].stars, 2345);
    assert_eq!(repos.ai_projects[0].url, "https://github.com/acme/llm-kit");

    assert_eq!(repos.dev_tools.len(), 5);
    assert_eq!(repos.dev_tools[0].name, "js/tool0");
    assert_eq!(repos.dev_tools[4].name, "js/tool4");
}

#[tokio::test]
async fn test_trending_failure_yields_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let collector = Collector::new()
        .unwrap()
        .with_github_base_url(server.uri());

    assert!(collector.fetch_github_trending_daily("python").await.is_empty());

    let repos = collector.fetch_all_trending(TrendingSource::Daily).await;
    assert!(repos.ai_projects.is_empty());
    assert!(repos.dev_tools.is_empty());
}

#[tokio::test]
async fn test_collect_all_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_feed("Feed", &[("news", 2)])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending/python"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trending_page(&[trending_row(
            "hf/transformers",
            "Transformer models",
            "500",
        )])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending/javascript"))
        .respond_with(ResponseTemplate::new(200).set_body_string(trending_page(&[])))
        .mount(&server)
        .await;

    let sources = SourcesConfig {
        rss_feeds: vec![format!("{}/feed.xml", server.uri())],
        trending_source: TrendingSource::Daily,
    };

    let data = Collector::new()
        .unwrap()
        .with_github_base_url(server.uri())
        .collect_all_data(&sources)
        .await;

    assert_eq!(data.news.len(), 1);
    assert_eq!(data.ai_projects.len(), 1);
    assert_eq!(data.ai_projects[0].name, "hf/transformers");
    assert!(data.dev_tools.is_empty());
}
