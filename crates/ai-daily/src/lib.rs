//! Daily AI digest: collects AI news from RSS feeds and trending GitHub
//! repositories, enriches them with LLM summaries, and delivers a Markdown
//! report by email and into a notes vault.
//!
//! This crate provides:
//! - RSS and GitHub trending collection (with GitHub search as an alternate source)
//! - Per-item LLM summaries with local fallbacks
//! - Markdown and HTML report rendering
//! - SMTP delivery and vault file output

pub mod ai;
pub mod collector;
pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod summarizer;
pub mod text;

// Re-export main types
pub use collector::Collector;
pub use config::{AppConfig, EmailConfig, LlmConfig, SourcesConfig, TrendingSource};
pub use error::{Error, Result};
pub use models::{CollectedData, NewsItem, RepoItem};
pub use pipeline::{run_daily, DeliveryReport, EmailOutcome, Pipeline, Report, RunOptions, RunResult};
pub use summarizer::Summarizer;
