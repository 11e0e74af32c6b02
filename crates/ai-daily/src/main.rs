//! AI daily CLI - collect, summarize and deliver the daily AI digest.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_daily::config::DEFAULT_SOURCES_PATH;
use ai_daily::delivery::send_test_email;
use ai_daily::{run_daily, AppConfig, EmailOutcome, Pipeline, RunOptions, RunResult, SourcesConfig};

/// AI daily - daily digest of AI news and trending GitHub projects.
#[derive(Parser)]
#[command(name = "ai-daily")]
#[command(about = "Daily AI news and GitHub trending digest")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect, summarize, email and save today's report
    Run {
        /// Sources file (RSS feeds, trending source)
        #[arg(long, default_value = DEFAULT_SOURCES_PATH)]
        config: PathBuf,

        /// Vault directory (overrides VAULT_PATH)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Skip email delivery
        #[arg(long)]
        no_email: bool,

        /// Print the run result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the report without delivering it
    Preview {
        /// Sources file (RSS feeds, trending source)
        #[arg(long, default_value = DEFAULT_SOURCES_PATH)]
        config: PathBuf,

        /// Render HTML instead of Markdown
        #[arg(long)]
        html: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip LLM summaries
        #[arg(long)]
        no_ai: bool,
    },

    /// Send a test email to check SMTP settings
    TestEmail,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG takes precedence
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("ai_daily=debug,info")
        } else {
            EnvFilter::new("ai_daily=info,warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            config,
            vault,
            no_email,
            json,
        } => {
            let options = RunOptions {
                vault_path: vault,
                send_email: !no_email,
            };
            run(&config, options, json).await
        }
        Commands::Preview {
            config,
            html,
            output,
            no_ai,
        } => run_preview(&config, html, output.as_deref(), no_ai).await,
        Commands::TestEmail => run_test_email().await,
    }
}

async fn run(config: &Path, options: RunOptions, json: bool) -> Result<()> {
    println!("🚀 AI Daily News Generator\n");

    let result = run_daily(config, options).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    if !result.success {
        anyhow::bail!(result.error.unwrap_or_else(|| "Run failed".to_string()));
    }

    Ok(())
}

fn print_summary(result: &RunResult) {
    if !result.success {
        eprintln!("\n❌ Error: {}", result.error.as_deref().unwrap_or("unknown"));
        return;
    }

    println!("\n📊 Run Summary");
    println!("   News: {}", result.news_count.unwrap_or_default());
    println!("   AI projects: {}", result.ai_projects_count.unwrap_or_default());
    println!("   Dev tools: {}", result.dev_tools_count.unwrap_or_default());

    if let Some(delivery) = &result.delivery {
        match delivery.email {
            EmailOutcome::Sent => println!("✓ Email sent successfully"),
            EmailOutcome::Failed => println!("✗ Email sending failed"),
            EmailOutcome::Skipped => println!("⚠️ Email skipped"),
        }
        if delivery.vault_saved {
            println!("✓ Saved to vault");
        } else {
            println!("✗ Vault save failed");
        }
    }

    println!("\n✅ All done!");
}

async fn run_preview(config: &Path, html: bool, output: Option<&Path>, no_ai: bool) -> Result<()> {
    let app_config = AppConfig::load(config)
        .with_context(|| format!("Failed to load configuration from {}", config.display()))?;

    let pipeline = Pipeline::from_config(app_config)?
        .with_email(false)
        .with_summaries(!no_ai);

    let report = pipeline.build_report(Utc::now()).await;
    let content = if html { report.html } else { report.markdown };

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write preview to {}", path.display()))?;
            println!("✓ Preview written to {}", path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}

async fn run_test_email() -> Result<()> {
    let config = AppConfig::from_lookup(SourcesConfig::default(), |key| std::env::var(key).ok());

    if !config.email.is_configured() {
        anyhow::bail!("Email not configured: set EMAIL_USER, EMAIL_PASSWORD and EMAIL_TO");
    }

    println!("📧 Sending test email to {}", config.email.to.as_deref().unwrap_or_default());

    if !send_test_email(&config.email).await {
        anyhow::bail!("Test email failed");
    }

    println!("✅ Test email sent");
    Ok(())
}
