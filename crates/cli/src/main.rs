//! `costbridge` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`            — start the API server.
//! - `migrate`          — run pending database migrations.
//! - `sync-job-costs`   — run the job-cost pipeline once and exit.
//! - `sync-job-history` — run the job-history pipeline once and exit.
//!
//! The two `sync-*` commands exist so schedulers can drive the pipelines
//! directly instead of going through the HTTP trigger endpoints.

mod config;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use sync::{job_cost_pipeline, job_history_pipeline, HttpSource, PipelineConfig, SyncContext};

#[derive(Parser)]
#[command(
    name = "costbridge",
    about = "Ledger synchronization bridge and read API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        /// Bind address; overrides BIND_ADDR from the environment.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run pending database migrations.
    Migrate,
    /// Run the job-cost sync pipeline once and exit.
    SyncJobCosts,
    /// Run the job-history sync pipeline once and exit.
    SyncJobHistory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    match cli.command {
        Command::Serve { bind } => {
            let ctx = sync_context(&config).await?;
            let state = api::AppState::new(ctx.pool, ctx.source);

            let bind = bind.unwrap_or(config.bind_addr);
            info!("Starting API server on {bind}");
            api::serve(&bind, state).await.context("server failed")?;
        }
        Command::Migrate => {
            let pool = db::pool::create_pool(&config.database_url, 2)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool)
                .await
                .context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::SyncJobCosts => {
            let ctx = sync_context(&config).await?;
            job_cost_pipeline(PipelineConfig::default()).run(&ctx).await?;
        }
        Command::SyncJobHistory => {
            let ctx = sync_context(&config).await?;
            job_history_pipeline(PipelineConfig::default()).run(&ctx).await?;
        }
    }

    Ok(())
}

/// Connect, migrate, and wire up the upstream source.
async fn sync_context(config: &Config) -> anyhow::Result<SyncContext> {
    let pool = db::pool::create_pool(&config.database_url, config.max_db_connections)
        .await
        .context("failed to connect to database")?;
    db::pool::run_migrations(&pool)
        .await
        .context("migration failed")?;

    let source = HttpSource::new(&config.upstream_base_url, config.upstream_api_token.clone())?;
    Ok(SyncContext::new(pool, Arc::new(source)))
}
