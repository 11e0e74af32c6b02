//! Report rendering: Markdown for the vault and email plain part, HTML for
//! the email body.
//!
//! Dates are rendered in China Standard Time (UTC+8) regardless of the host
//! timezone, so the report date, email subject and vault filename agree.

pub mod html;
pub mod markdown;

use chrono::{DateTime, FixedOffset, Utc};

pub use html::markdown_to_html;
pub use markdown::{format_news, format_report, format_repos, AI_CATEGORY, DEV_TOOLS_CATEGORY};

/// Offset of the report timezone from UTC.
pub const REPORT_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// `generated_at` in the report timezone.
pub fn report_local_time(generated_at: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(REPORT_UTC_OFFSET_SECS).expect("Invalid report offset");
    generated_at.with_timezone(&offset)
}

/// `YYYY-MM-DD` in the report timezone.
pub fn report_date(generated_at: DateTime<Utc>) -> String {
    report_local_time(generated_at).format("%Y-%m-%d").to_string()
}

/// `HH:MM` in the report timezone.
pub fn report_time(generated_at: DateTime<Utc>) -> String {
    report_local_time(generated_at).format("%H:%M").to_string()
}
