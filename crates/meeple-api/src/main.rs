//! Binary entrypoint for the review API server.

use meeple_api::config::Config;
use meeple_api::server::Server;
use meeple_core::observability::{LogFormat, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(if config.debug {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    });

    let pool = meeple_store::db::connect(&config.database_url).await?;
    if config.seed_on_start {
        meeple_store::seed::seed(&pool).await?;
        tracing::info!("fixture dataset loaded");
    }

    tracing::info!(port = config.port, "starting server");
    Server::new(config, pool).serve().await?;
    Ok(())
}
