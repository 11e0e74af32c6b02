//! Minimal Markdown to HTML conversion for the email body.
//!
//! A fixed sequence of regex rewrites tuned to the report's own Markdown.
//! It is lossy: every `---` becomes a rule, and any line starting with the
//! link emoji becomes an anchor whose target is the rest of the line.

use std::sync::LazyLock;

use regex::Regex;

static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("Invalid regex"));
static H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("Invalid regex"));
static H3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").expect("Invalid regex"));
static H4: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#### (.*)$").expect("Invalid regex"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid regex"));
static LINK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)🔗 (.*)$").expect("Invalid regex"));
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid regex"));

const STYLE: &str = r"    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
      line-height: 1.6;
      color: #333;
      max-width: 800px;
      margin: 0 auto;
      padding: 20px;
    }
    h1 { color: #2563eb; border-bottom: 2px solid #e5e7eb; padding-bottom: 10px; }
    h2 { color: #1e40af; margin-top: 30px; }
    h3 { color: #1e3a8a; }
    h4 { color: #1e3a8a; }
    a { color: #2563eb; text-decoration: none; }
    a:hover { text-decoration: underline; }
    hr { border: none; border-top: 1px solid #e5e7eb; margin: 20px 0; }
    code { background: #f3f4f6; padding: 2px 6px; border-radius: 3px; font-size: 0.9em; }";

/// Convert report Markdown into a styled HTML document.
pub fn markdown_to_html(markdown: &str) -> String {
    let body = H1.replace_all(markdown, "<h1>${1}</h1>");
    let body = H2.replace_all(&body, "<h2>${1}</h2>");
    let body = H3.replace_all(&body, "<h3>${1}</h3>");
    let body = H4.replace_all(&body, "<h4>${1}</h4>");

    let body = BOLD.replace_all(&body, "<strong>${1}</strong>");

    let body = LINK_LINE.replace_all(&body, r#"<a href="${1}">${1}</a>"#);
    let body = MD_LINK.replace_all(&body, r#"<a href="${2}">${1}</a>"#);

    let body = body
        .replace("---", "<hr>")
        .replace("\n\n", "</p><p>")
        .replace('\n', "<br>");

    format!(
        "\n<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n  <style>\n{STYLE}\n  </style>\n</head>\n<body>\n  <div>{body}</div>\n</body>\n</html>\n  "
    )
}
