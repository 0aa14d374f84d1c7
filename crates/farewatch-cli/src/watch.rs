//! The `watch` command: run the fare check on a cron schedule.

use std::sync::Arc;

use farewatch_core::AppConfig;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Registers the recurring fare check and blocks until interrupted.
///
/// The scheduler handle must stay alive for the lifetime of the process;
/// dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns an error if the scheduler cannot be initialised, the cron
/// expression from config is invalid, or the scheduler fails to start.
pub(crate) async fn run(config: AppConfig) -> anyhow::Result<()> {
    let config = Arc::new(config);
    let scheduler = JobScheduler::new().await?;

    let job_config = Arc::clone(&config);
    let job = Job::new_async(config.watch_cron.as_str(), move |_uuid, _lock| {
        let config = Arc::clone(&job_config);
        Box::pin(async move {
            tracing::info!("scheduler: starting fare check");
            run_check(&config).await;
            tracing::info!("scheduler: fare check complete");
        })
    })?;
    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(cron = %config.watch_cron, "watching fares; press ctrl-c to stop");
    shutdown_signal().await;
    Ok(())
}

/// Drives one scheduled check. Clients are rebuilt per run so a transient
/// construction failure in one run does not wedge the scheduler.
async fn run_check(config: &AppConfig) {
    let clients = match crate::run::build_clients(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "scheduler: failed to build clients");
            return;
        }
    };

    match crate::run::check_deals(config, &clients, None, false).await {
        Ok(totals) => tracing::info!(
            checked = totals.checked,
            deals = totals.deals,
            no_deals = totals.no_deals,
            unavailable = totals.unavailable,
            skipped = totals.skipped,
            failed = totals.failed,
            "scheduler: check run complete"
        ),
        Err(e) => tracing::error!(error = %e, "scheduler: check run failed"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
