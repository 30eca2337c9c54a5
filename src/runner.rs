// src/runner.rs
use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{self, ConfigError, Settings};
use crate::health::{HttpProbe, RunSummary, StatusChecker};
use crate::history::HistoryStore;
use crate::notify::{Notifier, WebhookNotifier};

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(RunSummary),
    CatalogMissing(PathBuf),
}

/// One full pass: load catalog and history, check everything, write history.
pub async fn run(settings: &Settings) -> Result<RunOutcome> {
    let catalog = match config::load_catalog(&settings.services).await {
        Ok(catalog) => catalog,
        Err(ConfigError::Missing(path)) => {
            warn!("{} not found, nothing to check", path.display());
            return Ok(RunOutcome::CatalogMissing(path));
        }
        Err(e) => return Err(e.into()),
    };
    info!(
        "Loaded {} apps from {}",
        catalog.apps.len(),
        settings.services.display()
    );

    let mut history = HistoryStore::load(&settings.status).await?;

    let client = Client::builder()
        .timeout(settings.timeout())
        .build()
        .context("Failed to create HTTP client")?;

    let notifier = WebhookNotifier::new(client.clone(), settings.webhook.clone());
    if !notifier.is_configured() {
        info!("No webhook configured, down endpoints will only be logged");
    }
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);

    let checker = StatusChecker::new(HttpProbe::new(client), notifier);
    let summary = checker.run(&catalog, &mut history).await;

    history
        .save(&settings.status)
        .await
        .context("Failed to save status history")?;
    info!("Status check completed and saved: {}", summary);

    Ok(RunOutcome::Completed(summary))
}
