// src/notify/webhook.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{error, info};
use url::Url;

use super::Notifier;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("webhook responded with status {0}")]
    Rejected(StatusCode),

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts down alerts to a chat-style webhook as `{"content": "..."}`.
pub struct WebhookNotifier {
    client: Client,
    webhook: Option<Url>,
}

impl WebhookNotifier {
    pub fn new(client: Client, webhook: Option<Url>) -> Self {
        Self { client, webhook }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook.is_some()
    }

    async fn send(&self, webhook: &Url, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(webhook.as_str())
            .json(&WebhookPayload { content: message })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected(status))
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, service_name: &str, service_url: &str, service_type: &str) {
        let Some(webhook) = &self.webhook else {
            info!("Webhook not provided, skipping notification for {}", service_name);
            return;
        };

        let message = down_message(service_name, service_url, service_type, Utc::now());
        match self.send(webhook, &message).await {
            Ok(()) => info!("Webhook notification sent for {}", service_name),
            Err(e) => error!(
                "Failed to send webhook notification for {}: {}",
                service_name, e
            ),
        }
    }
}

pub fn down_message(
    service_name: &str,
    service_url: &str,
    service_type: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "Service **{}** (Type: {}) at {} is currently **down**. Time: {}",
        service_name,
        service_type,
        service_url,
        at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_down_message_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();

        let message = down_message("Acme API", "https://api.acme.example", "service", at);

        assert_eq!(
            message,
            "Service **Acme API** (Type: service) at https://api.acme.example is currently **down**. Time: 2024-05-01 12:30:05 UTC"
        );
    }

    #[tokio::test]
    async fn test_posts_content_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Regex(
                r#"^\{"content":"Service \*\*Acme API\*\* \(Type: service\) at https://api\.acme\.example is currently \*\*down\*\*\. Time: .+ UTC"\}$"#.to_string(),
            ))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let webhook = Url::parse(&format!("{}/hook", server.url())).unwrap();
        let notifier = WebhookNotifier::new(Client::new(), Some(webhook));

        notifier
            .notify("Acme API", "https://api.acme.example", "service")
            .await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_webhook_is_not_fatal() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/hook")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let webhook = Url::parse(&format!("{}/hook", server.url())).unwrap();
        let notifier = WebhookNotifier::new(Client::new(), Some(webhook.clone()));

        let err = notifier.send(&webhook, "down").await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected(s) if s == StatusCode::INTERNAL_SERVER_ERROR));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_without_webhook_logs_and_skips() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let notifier = WebhookNotifier::new(Client::new(), None);
        assert!(!notifier.is_configured());

        notifier
            .notify("Acme Site", "https://acme.example", "website")
            .await;

        let output = logs.contents();
        assert!(output.contains("Webhook not provided"), "logs: {}", output);
        assert!(output.contains("Acme Site"));
        assert_eq!(output.lines().count(), 1);
    }
}
