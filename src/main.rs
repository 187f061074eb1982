use anyhow::Result;
use invoice_tracker::config::ServerConfig;
use invoice_tracker::server::ServerBuilder;
use invoice_tracker::storage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoice_tracker=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let store = storage::connect(&config.store).await?;
    tracing::info!(backend = store.backend(), "Invoice store ready");

    ServerBuilder::new()
        .with_shared_store(store)
        .serve(config.bind_addr())
        .await
}
