mod api;
mod config;
mod db;
mod error;
mod ingest;
mod models;
mod prompt;
mod queries;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::HeadHunter;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hh_collector=info")),
        )
        .init();

    let config = Config::parse();
    let api = HeadHunter::new(&config.api_base_url)?;

    let mut roster = config::default_roster();
    if !config.skip_confirm {
        prompt::edit_roster(&api, &mut roster).await?;
    }

    tracing::info!("Recreating database '{}'", config.database_name);
    db::recreate_database(&config.database_url, &config.database_name).await?;

    let pool = db::create_pool(&config.target_database_url()).await?;
    db::create_table(&pool, &config.table_name).await?;
    tracing::info!("Table '{}' created", config.table_name);

    let summary = ingest::ingest(
        &api,
        &pool,
        &config.table_name,
        &roster,
        config.max_vacancies,
    )
    .await?;
    tracing::info!(
        "Ingestion finished: {} rows from {} employers ({} failed)",
        summary.rows_inserted,
        summary.employers_ok,
        summary.employers_failed
    );

    prompt::query_loop(&pool, &config.table_name).await?;

    Ok(())
}
