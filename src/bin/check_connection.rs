//! Verifies that the configured database is reachable and that the
//! `investments` table has the expected shape.

use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

use ibank::config::AppConfig;
use ibank::db::investment_queries;
use ibank::logging::{init_logging, LoggingConfig};
use ibank::models::Investment;

const EXPECTED_COLUMNS: [(&str, &str); 7] = [
    ("id", "UUID (generated)"),
    ("name", "TEXT"),
    ("type", "TEXT"),
    ("amount", "NUMERIC"),
    ("investment_date", "DATE"),
    ("created_at", "TIMESTAMPTZ (generated)"),
    ("updated_at", "TIMESTAMPTZ (generated)"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;
    let database_url = config
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL is not set")?;

    info!("Testing database connection...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .map_err(|e| {
            error!("Connection failed: {}", e);
            e
        })?;

    let sample = investment_queries::sample(&pool).await.map_err(|e| {
        error!("Query on investments failed: {}", e);
        e
    })?;
    info!("Connection succeeded");

    for (column, kind) in EXPECTED_COLUMNS {
        info!("  {:<16} {}", column, kind);
    }

    match sample {
        Some(row) => {
            let investment = Investment::try_from(row)?;
            info!("Sample row:\n{}", serde_json::to_string_pretty(&investment)?);
        }
        None => warn!("The investments table is empty; create an investment to test further"),
    }

    Ok(())
}
