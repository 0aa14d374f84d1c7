mod run;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "farewatch")]
#[command(about = "Flight fare tracker: watches destinations and alerts on cheap fares")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve missing IATA codes for destination rows and write them back
    SyncCodes,
    /// Search fares for every destination once and send alerts on deals
    Check {
        /// Restrict the check to a single destination (by city name)
        #[arg(long)]
        city: Option<String>,

        /// Log alerts instead of delivering them
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the fare check on the configured cron schedule until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = farewatch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::SyncCodes => {
            let clients = run::build_clients(&config)?;
            let totals = run::sync_codes(&config, &clients).await?;
            tracing::info!(
                resolved = totals.resolved,
                already = totals.already,
                unresolved = totals.unresolved,
                failed = totals.failed,
                "sync-codes run complete"
            );
        }
        Commands::Check { city, dry_run } => {
            let clients = run::build_clients(&config)?;
            let totals = run::check_deals(&config, &clients, city.as_deref(), dry_run).await?;
            tracing::info!(
                checked = totals.checked,
                deals = totals.deals,
                no_deals = totals.no_deals,
                unavailable = totals.unavailable,
                skipped = totals.skipped,
                failed = totals.failed,
                "check run complete"
            );
        }
        Commands::Watch => watch::run(config).await?,
    }

    Ok(())
}
