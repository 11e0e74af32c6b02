//! Vault and email delivery tests.

use std::sync::{Arc, Mutex};

use ai_daily::delivery::{report_filename, save_to_vault, send_email};
use ai_daily::EmailConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Minimal SMTP server without STARTTLS. Records each message's DATA.
async fn plain_smtp_server() -> (u16, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let messages = Arc::new(Mutex::new(Vec::new()));

    let received = messages.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_smtp(stream, received.clone()));
        }
    });

    (port, messages)
}

async fn serve_smtp(stream: TcpStream, messages: Arc<Mutex<Vec<String>>>) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    let _ = write.write_all(b"220 localhost ESMTP\r\n").await;

    while let Ok(Some(line)) = lines.next_line().await {
        let command = line.to_ascii_uppercase();
        let reply: &[u8] = if command.starts_with("EHLO") || command.starts_with("HELO") {
            b"250-localhost\r\n250 AUTH PLAIN LOGIN\r\n"
        } else if command.starts_with("AUTH") {
            b"235 2.7.0 Authentication successful\r\n"
        } else if command == "DATA" {
            let _ = write.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await;
            let mut body = String::new();
            while let Ok(Some(data)) = lines.next_line().await {
                if data == "." {
                    break;
                }
                body.push_str(&data);
                body.push('\n');
            }
            messages.lock().unwrap().push(body);
            b"250 2.0.0 Queued\r\n"
        } else if command.starts_with("QUIT") {
            let _ = write.write_all(b"221 Bye\r\n").await;
            break;
        } else {
            b"250 OK\r\n"
        };
        let _ = write.write_all(reply).await;
    }
}

#[test]
fn test_save_to_vault_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let vault = dir.path().join("notes").join("草稿箱");

    assert!(save_to_vault(&vault, "# 报告", "2026-10-16"));

    let written = std::fs::read_to_string(vault.join("AI日报-2026-10-16.md")).unwrap();
    assert_eq!(written, "# 报告");
}

#[test]
fn test_save_to_vault_overwrites() {
    let dir = tempfile::tempdir().unwrap();

    assert!(save_to_vault(dir.path(), "old", "2026-10-16"));
    assert!(save_to_vault(dir.path(), "new", "2026-10-16"));

    let path = dir.path().join(report_filename("2026-10-16"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
}

#[tokio::test]
async fn test_send_email_unreachable_server_returns_false() {
    // Reserve a port, then free it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = EmailConfig {
        host: "127.0.0.1".to_string(),
        port,
        user: Some("bot@example.com".to_string()),
        password: Some("secret".to_string()),
        to: Some("me@example.com".to_string()),
    };

    assert!(!send_email(&config, "# md", "<p>html</p>", "2026-10-16").await);
}

#[tokio::test]
async fn test_send_email_incomplete_config_returns_false() {
    let config = EmailConfig {
        host: "127.0.0.1".to_string(),
        port: 587,
        user: None,
        password: None,
        to: None,
    };

    assert!(!send_email(&config, "# md", "<p>html</p>", "2026-10-16").await);
}

#[tokio::test]
async fn test_send_email_without_starttls_offer_sends_plain() {
    let (port, messages) = plain_smtp_server().await;

    let config = EmailConfig {
        host: "127.0.0.1".to_string(),
        port,
        user: Some("bot@example.com".to_string()),
        password: Some("secret".to_string()),
        to: Some("me@example.com".to_string()),
    };

    assert!(send_email(&config, "# md", "<p>html</p>", "2026-10-16").await);

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("To: me@example.com"));
    assert!(messages[0].contains("multipart/alternative"));
}
