use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use ibank::config::{AppConfig, StoreBackend};
use ibank::logging::{init_logging, LoggingConfig};
use ibank::store::{InvestmentStore, MemoryInvestmentStore, PgInvestmentStore};
use ibank::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let store: Arc<dyn InvestmentStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("DATABASE_URL must be set when STORE_BACKEND is postgres")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;

            if config.run_migrations {
                tracing::info!("Applying database migrations");
                sqlx::migrate!("./migrations").run(&pool).await?;
            }

            tracing::info!("Using Postgres record store");
            Arc::new(PgInvestmentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on restart");
            Arc::new(MemoryInvestmentStore::new())
        }
    };

    let app = create_app(AppState::new(store));

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("IBank backend running at http://{}/", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
