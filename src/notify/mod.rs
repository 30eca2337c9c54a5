// src/notify/mod.rs
mod webhook;

pub use webhook::{down_message, NotifyError, WebhookNotifier};

use async_trait::async_trait;

/// Receives a call for every endpoint a run finds down.
///
/// Implementations handle their own failures: a notification that cannot be
/// delivered is logged, never returned to the checker.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, service_name: &str, service_url: &str, service_type: &str);
}
