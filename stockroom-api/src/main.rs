use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use stockroom_api::{app, AppState};
use stockroom_catalog::{ConcurrentFetcher, SimulatedDetailSource};
use stockroom_core::{EventPublisher, ProductStorage};
use stockroom_store::app_config::{Config, EventBackend, StorageBackend};
use stockroom_store::{DbClient, LogPublisher, MemoryStorage, MockDatabaseStorage, PgProductStorage};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockroom_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Stockroom API on port {}", config.server.port);

    let storage = build_storage(&config).await?;
    let events = build_publisher(&config)?;
    let detail_source = Arc::new(SimulatedDetailSource::new(config.fetch.latency));
    let fetcher = ConcurrentFetcher::from_limit(config.fetch.concurrency_limit);

    let app_state = AppState::new(storage, events, detail_source)
        .with_topic(config.kafka.topic.clone())
        .with_fetcher(fetcher);

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn build_storage(config: &Config) -> anyhow::Result<Arc<dyn ProductStorage>> {
    let storage: Arc<dyn ProductStorage> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::Mock => Arc::new(MockDatabaseStorage::new(config.storage.latency)),
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database.url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;
            Arc::new(PgProductStorage::new(db.pool))
        }
    };

    tracing::info!(backend = ?config.storage.backend, "Storage ready");
    Ok(storage)
}

fn build_publisher(config: &Config) -> anyhow::Result<Arc<dyn EventPublisher>> {
    match config.events.backend {
        EventBackend::Log => Ok(Arc::new(LogPublisher)),
        #[cfg(feature = "kafka")]
        EventBackend::Kafka => {
            let producer = stockroom_store::EventProducer::new(&config.kafka.brokers)
                .context("Failed to create Kafka producer")?;
            Ok(Arc::new(producer))
        }
        #[cfg(not(feature = "kafka"))]
        EventBackend::Kafka => {
            anyhow::bail!("events.backend = \"kafka\" needs the `kafka` feature")
        }
    }
}
