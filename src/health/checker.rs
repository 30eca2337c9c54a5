// src/health/checker.rs
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::probe::{HttpProbe, ProbeOutcome};
use crate::config::{Catalog, EndpointRef};
use crate::history::{trim_to_recent, HistoryStore, StatusEntry, HISTORY_LIMIT};
use crate::notify::Notifier;

/// Walks the catalog one endpoint at a time, recording every probe result.
pub struct StatusChecker {
    probe: HttpProbe,
    notifier: Arc<dyn Notifier>,
    history_limit: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub apps: usize,
    pub up: usize,
    pub down: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn checked(&self) -> usize {
        self.up + self.down
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} apps, {} endpoints checked: {} up, {} down, {} skipped",
            self.apps,
            self.checked(),
            self.up,
            self.down,
            self.skipped
        )
    }
}

impl StatusChecker {
    pub fn new(probe: HttpProbe, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            probe,
            notifier,
            history_limit: HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Checks every app in catalog order, trimming each app's history once
    /// its own endpoints are done.
    pub async fn run(&self, catalog: &Catalog, history: &mut HistoryStore) -> RunSummary {
        let mut summary = RunSummary::default();

        for app in &catalog.apps {
            info!("Checking services for app: {}", app.name);
            summary.apps += 1;

            let entries = history.entries_mut(&app.name);
            for endpoint in app.endpoints() {
                match self.check_and_record(endpoint, entries).await {
                    Some(outcome) if outcome.is_active() => summary.up += 1,
                    Some(_) => summary.down += 1,
                    None => summary.skipped += 1,
                }
            }

            trim_to_recent(entries, self.history_limit);
            debug!("{} now holds {} status entries", app.name, entries.len());
        }

        summary
    }

    /// Probes one endpoint and appends the result to `history`.
    ///
    /// Returns `None` without touching `history` when the endpoint has no
    /// url. A down endpoint is reported to the notifier before returning.
    pub async fn check_and_record(
        &self,
        endpoint: &EndpointRef,
        history: &mut Vec<StatusEntry>,
    ) -> Option<ProbeOutcome> {
        if !endpoint.is_checkable() {
            warn!("URL for service '{}' is missing", endpoint.name);
            return None;
        }

        let outcome = self.probe.probe(&endpoint.url).await;
        let is_active = outcome.is_active();
        history.push(StatusEntry::record(endpoint, is_active, Utc::now()));

        if is_active {
            debug!("{} ({}) is {}", endpoint.name, endpoint.url, outcome);
        } else {
            warn!("{} ({}) is {}", endpoint.name, endpoint.url, outcome);
            self.notifier
                .notify(&endpoint.name, &endpoint.url, &endpoint.kind)
                .await;
        }

        Some(outcome)
    }
}
