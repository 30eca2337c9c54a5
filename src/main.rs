// src/main.rs
use anyhow::Result;
use tracing::{error, info};

use uptime_status::config::Settings;
use uptime_status::runner::{self, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_status=info".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    let settings = Settings::from_args();
    info!(
        "Checking services from {} into {}",
        settings.services.display(),
        settings.status.display()
    );

    match runner::run(&settings).await {
        Ok(RunOutcome::Completed(_)) | Ok(RunOutcome::CatalogMissing(_)) => Ok(()),
        Err(e) => {
            error!("Status check aborted: {:#}", e);
            Err(e)
        }
    }
}
