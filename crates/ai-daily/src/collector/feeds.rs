//! RSS and Atom feed collection.

use atom_syndication::{Entry, Feed};
use chrono::{DateTime, Duration, Utc};
use rss::{Channel, Item};
use scraper::Html;

use crate::error::Result;
use crate::models::NewsItem;

/// Max items kept from a single feed.
pub const MAX_ITEMS_PER_FEED: usize = 5;

/// Max news items in a report.
pub const MAX_NEWS_ITEMS: usize = 12;

/// Only items published within this window are kept.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Parse one feed body and keep its recent items.
///
/// RSS is tried first, then Atom. Items dated at or before `now - 24h`, or
/// without a readable date, are dropped. At most [`MAX_ITEMS_PER_FEED`] items
/// are kept, in feed order.
pub fn parse_feed(body: &[u8], feed_url: &str, now: DateTime<Utc>) -> Result<Vec<NewsItem>> {
    let entries = match Channel::read_from(body) {
        Ok(channel) => rss_items(&channel, feed_url),
        Err(rss_err) => match Feed::read_from(body) {
            Ok(feed) => atom_items(&feed, feed_url),
            Err(atom_err) => {
                tracing::debug!(feed = feed_url, error = %atom_err, "Not an Atom feed either");
                return Err(rss_err.into());
            }
        },
    };

    let cutoff = now - Duration::hours(RECENT_WINDOW_HOURS);

    Ok(entries
        .into_iter()
        .filter(|item| item.pub_date.is_some_and(|date| date > cutoff))
        .take(MAX_ITEMS_PER_FEED)
        .collect())
}

/// Merge per-feed results: newest first, capped at [`MAX_NEWS_ITEMS`].
///
/// Items without a date sort after every dated item.
pub fn merge_latest(mut items: Vec<NewsItem>) -> Vec<NewsItem> {
    items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    items.truncate(MAX_NEWS_ITEMS);
    items
}

/// Parse an RSS date (RFC 2822), accepting RFC 3339 as some feeds emit it.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Strip markup from feed content, leaving the text nodes.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn source_name(title: &str, feed_url: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        feed_url.to_string()
    } else {
        title.to_string()
    }
}

fn rss_items(channel: &Channel, feed_url: &str) -> Vec<NewsItem> {
    let source = source_name(channel.title(), feed_url);
    channel
        .items()
        .iter()
        .map(|item| rss_item(item, &source))
        .collect()
}

fn rss_item(item: &Item, source: &str) -> NewsItem {
    let content = item
        .content()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| item.description())
        .map(strip_html)
        .unwrap_or_default();

    NewsItem {
        title: item.title().unwrap_or_default().trim().to_string(),
        link: item.link().unwrap_or_default().trim().to_string(),
        pub_date: item.pub_date().and_then(parse_pub_date),
        content,
        source: source.to_string(),
        summary: None,
    }
}

fn atom_items(feed: &Feed, feed_url: &str) -> Vec<NewsItem> {
    let source = source_name(&feed.title().value, feed_url);
    feed.entries()
        .iter()
        .map(|entry| atom_item(entry, &source))
        .collect()
}

/// Atom entries date by `published`, falling back to the mandatory `updated`.
fn atom_item(entry: &Entry, source: &str) -> NewsItem {
    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().trim().to_string())
        .unwrap_or_default();

    let content = entry
        .content()
        .and_then(|c| c.value())
        .filter(|c| !c.trim().is_empty())
        .or_else(|| entry.summary().map(|s| s.value.as_str()))
        .map(strip_html)
        .unwrap_or_default();

    let published = entry.published().unwrap_or_else(|| entry.updated());

    NewsItem {
        title: entry.title().value.trim().to_string(),
        link,
        pub_date: Some(published.with_timezone(&Utc)),
        content,
        source: source.to_string(),
        summary: None,
    }
}
