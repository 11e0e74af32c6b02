//! Daily pipeline - orchestrates the collect-summarize-format-deliver flow.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::collector::Collector;
use crate::config::AppConfig;
use crate::delivery::{save_to_vault, send_email};
use crate::error::{Error, Result};
use crate::models::CollectedData;
use crate::report::{format_report, markdown_to_html, report_date};
use crate::summarizer::Summarizer;

/// Outcome of the email step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailOutcome {
    /// Delivered to the SMTP server.
    Sent,
    /// Not attempted: disabled or not configured.
    Skipped,
    /// Attempted and failed.
    Failed,
}

/// What happened to the report after it was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub email: EmailOutcome,
    pub vault_saved: bool,
}

/// Summary of one run, printed as JSON with `--json`.
///
/// Successful runs carry the three counts, failed runs carry the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_projects_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_tools_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Delivery details; logged, not part of the JSON summary.
    #[serde(skip)]
    pub delivery: Option<DeliveryReport>,
}

impl RunResult {
    /// A successful run over `data`.
    pub fn succeeded(data: &CollectedData, delivery: DeliveryReport) -> Self {
        Self {
            success: true,
            news_count: Some(data.news.len()),
            ai_projects_count: Some(data.ai_projects.len()),
            dev_tools_count: Some(data.dev_tools.len()),
            error: None,
            delivery: Some(delivery),
        }
    }

    /// A run that stopped on a fatal error.
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

/// A rendered report.
#[derive(Debug, Clone)]
pub struct Report {
    pub data: CollectedData,
    /// Report date (`YYYY-MM-DD`, UTC+8).
    pub date: String,
    pub markdown: String,
    pub html: String,
}

/// Options the binary passes to a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Replaces the configured vault directory.
    pub vault_path: Option<PathBuf>,
    /// Attempt email delivery when configured.
    pub send_email: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            vault_path: None,
            send_email: true,
        }
    }
}

/// Daily report pipeline.
pub struct Pipeline {
    config: AppConfig,
    collector: Collector,
    summarizer: Summarizer,
    email_enabled: bool,
    summaries_enabled: bool,
}

impl Pipeline {
    /// Create a pipeline from prepared components.
    pub fn new(config: AppConfig, collector: Collector, summarizer: Summarizer) -> Self {
        Self {
            config,
            collector,
            summarizer,
            email_enabled: true,
            summaries_enabled: true,
        }
    }

    /// Create a pipeline with the default HTTP collector and Anthropic summarizer.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let collector = Collector::new()?.with_github_token(config.github_token.clone());
        let summarizer = Summarizer::from_config(&config.llm)?;
        Ok(Self::new(config, collector, summarizer))
    }

    /// Enable or disable the email step.
    #[must_use]
    pub fn with_email(mut self, enabled: bool) -> Self {
        self.email_enabled = enabled;
        self
    }

    /// Enable or disable LLM enrichment.
    #[must_use]
    pub fn with_summaries(mut self, enabled: bool) -> Self {
        self.summaries_enabled = enabled;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Collect, enrich and render a report.
    pub async fn build_report(&self, generated_at: DateTime<Utc>) -> Report {
        let data = self.collector.collect_all_data(&self.config.sources).await;

        let data = if self.summaries_enabled {
            self.summarizer.summarize_all(data).await
        } else {
            tracing::info!("Summarization disabled");
            data
        };

        let markdown = format_report(&data, generated_at);
        let html = markdown_to_html(&markdown);
        tracing::info!(bytes = markdown.len(), "Report generated");

        Report {
            data,
            date: report_date(generated_at),
            markdown,
            html,
        }
    }

    /// Email the report when configured, then always write it to the vault.
    /// The two steps succeed or fail independently.
    pub async fn deliver(&self, report: &Report) -> DeliveryReport {
        let email = if !self.email_enabled {
            tracing::info!("Email disabled, skipping email sending");
            EmailOutcome::Skipped
        } else if !self.config.email.is_configured() {
            tracing::warn!("Email not configured, skipping email sending");
            EmailOutcome::Skipped
        } else if send_email(&self.config.email, &report.markdown, &report.html, &report.date).await
        {
            EmailOutcome::Sent
        } else {
            EmailOutcome::Failed
        };

        let vault_saved = save_to_vault(&self.config.vault_path, &report.markdown, &report.date);

        DeliveryReport { email, vault_saved }
    }

    /// Run the full flow once.
    pub async fn run(&self) -> RunResult {
        tracing::info!(vault = %self.config.vault_path.display(), "Starting AI daily run");

        let report = self.build_report(Utc::now()).await;
        let delivery = self.deliver(&report).await;

        tracing::info!(
            email = ?delivery.email,
            vault_saved = delivery.vault_saved,
            "Run complete"
        );

        RunResult::succeeded(&report.data, delivery)
    }
}

/// Load configuration and run once. Configuration and setup errors end the
/// run with `success: false`.
pub async fn run_daily(sources_path: &Path, options: RunOptions) -> RunResult {
    let pipeline = match prepare(sources_path, options) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!(error = %e, "{}", prepare_failure(&e));
            return RunResult::failed(e);
        }
    };

    pipeline.run().await
}

fn prepare(sources_path: &Path, options: RunOptions) -> Result<Pipeline> {
    let mut config = AppConfig::load(sources_path)?;
    if let Some(vault_path) = options.vault_path {
        config.vault_path = vault_path;
    }
    Ok(Pipeline::from_config(config)?.with_email(options.send_email))
}

fn prepare_failure(error: &Error) -> &'static str {
    match error {
        Error::ConfigRead { .. } | Error::ConfigParse { .. } | Error::ConfigValue { .. } => {
            "Failed to load configuration"
        }
        _ => "Failed to prepare pipeline",
    }
}
