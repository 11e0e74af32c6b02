//! Report delivery over SMTP.

use std::time::Duration;

use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::error::{Error, Result};

/// Connect, command and send timeout.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

const TEST_SUBJECT: &str = "🤖 AI 每日热点 - 测试邮件";

const TEST_TEXT: &str = "AI 每日热点 - 测试邮件

✅ 邮件配置正常！

如果你看到这封邮件，说明 SMTP 配置正确。
";

const TEST_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }
    h1 { color: #2563eb; }
    .success { color: #16a34a; font-weight: bold; }
  </style>
</head>
<body>
  <h1>🤖 AI 每日热点</h1>
  <p class="success">✅ 邮件配置正常！</p>
  <p>如果你看到这封邮件，说明 SMTP 配置正确。</p>
</body>
</html>
"#;

/// Subject line for the report sent on `date` (`YYYY-MM-DD`).
pub fn report_subject(date: &str) -> String {
    format!("🤖 AI 每日热点 - {date}")
}

/// Sends reports through an authenticated SMTP relay.
pub struct EmailSender {
    config: EmailConfig,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    /// Validate addresses up front. Fails when user, password or recipient
    /// is missing.
    pub fn new(config: EmailConfig) -> Result<Self> {
        let from = parse_mailbox("EMAIL_USER", config.user.as_deref())?;
        let to = parse_mailbox("EMAIL_TO", config.to.as_deref())?;
        if config.password.as_deref().is_none_or(str::is_empty) {
            return Err(Error::ConfigValue {
                key: "EMAIL_PASSWORD".to_string(),
                reason: "not set".to_string(),
            });
        }

        Ok(Self { config, from, to })
    }

    /// Verify the connection, then send a multipart message with a plain
    /// and an HTML alternative.
    pub async fn send(&self, subject: &str, text_body: &str, html_body: &str) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| Error::Email(format!("Failed to build email message: {e}")))?;

        let mailer = self.transport()?;

        tracing::info!(host = %self.config.host, port = self.config.port, "Verifying SMTP connection");
        let connected = mailer
            .test_connection()
            .await
            .map_err(|e| Error::Email(e.to_string()))?;
        if !connected {
            return Err(Error::Email("SMTP server did not accept the connection".to_string()));
        }

        let response = mailer
            .send(email)
            .await
            .map_err(|e| Error::Email(e.to_string()))?;

        tracing::info!(
            to = %self.to,
            subject,
            code = %response.code(),
            "Email sent successfully"
        );

        Ok(())
    }

    /// Send a small fixed message to check the SMTP settings.
    pub async fn send_test(&self) -> Result<()> {
        self.send(TEST_SUBJECT, TEST_TEXT, TEST_HTML).await
    }

    /// Implicit TLS on 465; elsewhere STARTTLS when the server offers it,
    /// plain otherwise.
    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let host = self.config.host.as_str();
        let builder = if self.config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host).map_err(transport_error)?
        } else {
            let tls = TlsParameters::new(host.to_string()).map_err(transport_error)?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .tls(Tls::Opportunistic(tls))
        };

        let creds = Credentials::new(
            self.config.user.clone().unwrap_or_default(),
            self.config.password.clone().unwrap_or_default(),
        );

        Ok(builder
            .port(self.config.port)
            .credentials(creds)
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

fn transport_error(e: lettre::transport::smtp::Error) -> Error {
    Error::Email(format!("Failed to create SMTP transport: {e}"))
}

/// Email the report. Returns `false` and logs a hint on any failure.
pub async fn send_email(config: &EmailConfig, markdown: &str, html: &str, date: &str) -> bool {
    tracing::info!(
        from = config.user.as_deref().unwrap_or_default(),
        to = config.to.as_deref().unwrap_or_default(),
        host = %config.host,
        port = config.port,
        "Preparing email"
    );

    let result = match EmailSender::new(config.clone()) {
        Ok(sender) => sender.send(&report_subject(date), markdown, html).await,
        Err(e) => Err(e),
    };

    report_outcome(result)
}

/// Send the fixed test message. Returns `false` and logs a hint on failure.
pub async fn send_test_email(config: &EmailConfig) -> bool {
    let result = match EmailSender::new(config.clone()) {
        Ok(sender) => sender.send_test().await,
        Err(e) => Err(e),
    };

    report_outcome(result)
}

fn report_outcome(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            let message = e.to_string();
            tracing::error!(error = %message, "Failed to send email");
            if let Some(hint) = failure_hint(&message) {
                tracing::error!(hint, "Email troubleshooting");
            }
            false
        }
    }
}

/// Classify an SMTP failure message into a troubleshooting hint.
pub fn failure_hint(message: &str) -> Option<&'static str> {
    let message = message.to_lowercase();

    if message.contains("invalid login")
        || message.contains("authentication")
        || message.contains("535")
    {
        Some("Username or password rejected; Gmail requires an app password, not the account password")
    } else if message.contains("timeout") || message.contains("timed out") {
        Some("Connection timed out; check the network or a firewall blocking the SMTP port")
    } else if message.contains("certificate") {
        Some("TLS certificate problem with the SMTP server")
    } else {
        None
    }
}

fn parse_mailbox(key: &str, value: Option<&str>) -> Result<Mailbox> {
    let value = value.filter(|v| !v.is_empty()).ok_or_else(|| Error::ConfigValue {
        key: key.to_string(),
        reason: "not set".to_string(),
    })?;

    value.parse().map_err(|e| Error::ConfigValue {
        key: key.to_string(),
        reason: format!("invalid address: {e}"),
    })
}
