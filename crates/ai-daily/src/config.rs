//! Run configuration.
//!
//! Two inputs are merged into a single [`AppConfig`] once at startup:
//! the JSON sources file (feed list, trending source) and the process
//! environment (API keys, SMTP settings, vault path). Components receive
//! the pieces they need explicitly and never read the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default SMTP host.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default LLM model used for summaries.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

/// Vault directory used when `VAULT_PATH` is unset.
pub const DEFAULT_VAULT_PATH: &str = "vault/草稿箱";

/// Default location of the sources file.
pub const DEFAULT_SOURCES_PATH: &str = "config/sources.json";

/// Which listing supplies trending repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingSource {
    /// github.com/trending, daily window.
    #[default]
    Daily,
    /// GitHub REST search sorted by stars.
    Search,
}

/// Contents of the sources file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesConfig {
    /// RSS feed URLs, fetched in order.
    #[serde(default)]
    pub rss_feeds: Vec<String>,
    /// Trending source selection.
    #[serde(default)]
    pub trending_source: TrendingSource,
}

impl SourcesConfig {
    /// Load the sources file. Missing or malformed files are fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            feeds = config.rss_feeds.len(),
            trending = ?config.trending_source,
            "Loaded sources config"
        );
        Ok(config)
    }
}

/// LLM settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Anthropic API key; summarization is skipped when absent.
    pub api_key: Option<String>,
    /// Alternate API base URL (proxy).
    pub base_url: Option<String>,
    /// Model name.
    pub model: String,
}

/// SMTP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port. 465 selects implicit TLS.
    pub port: u16,
    /// SMTP username, also used as the sender address.
    pub user: Option<String>,
    /// SMTP password (app password for Gmail).
    pub password: Option<String>,
    /// Recipient address.
    pub to: Option<String>,
}

impl EmailConfig {
    /// Email is only attempted when credentials and a recipient are all set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.user, &self.password, &self.to]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }

    /// Whether the port calls for implicit TLS instead of STARTTLS.
    #[must_use]
    pub fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

/// Full configuration for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    pub llm: LlmConfig,
    /// GitHub token, used by the search source only.
    pub github_token: Option<String>,
    pub email: EmailConfig,
    /// Directory that receives the report file.
    pub vault_path: PathBuf,
}

impl AppConfig {
    /// Build configuration from the sources file and the process environment.
    ///
    /// # Environment Variables
    /// - `ANTHROPIC_API_KEY`, `ANTHROPIC_BASE_URL`, `ANTHROPIC_MODEL`
    /// - `GITHUB_TOKEN`
    /// - `EMAIL_HOST` (default: smtp.gmail.com), `EMAIL_PORT` (default: 587)
    /// - `EMAIL_USER`, `EMAIL_PASSWORD`, `EMAIL_TO`
    /// - `VAULT_PATH` (default: vault/草稿箱)
    pub fn load(sources_path: &Path) -> Result<Self> {
        let sources = SourcesConfig::load(sources_path)?;
        Ok(Self::from_lookup(sources, |key| std::env::var(key).ok()))
    }

    /// Build configuration with a custom variable lookup.
    pub fn from_lookup<F>(sources: SourcesConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("EMAIL_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);

        Self {
            sources,
            llm: LlmConfig {
                api_key: var("ANTHROPIC_API_KEY"),
                base_url: var("ANTHROPIC_BASE_URL"),
                model: var("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            },
            github_token: var("GITHUB_TOKEN"),
            email: EmailConfig {
                host: var("EMAIL_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port,
                user: var("EMAIL_USER"),
                password: var("EMAIL_PASSWORD"),
                to: var("EMAIL_TO"),
            },
            vault_path: var("VAULT_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_VAULT_PATH), PathBuf::from),
        }
    }
}
