use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::db::investment_queries::{self, InvestmentRow};
use crate::errors::StoreError;
use crate::models::{Investment, InvestmentInput};
use crate::store::{InvestmentStore, StoreOutcome};

#[derive(Clone)]
pub struct PgInvestmentStore {
    pool: PgPool,
}

impl PgInvestmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn convert_optional(row: Option<InvestmentRow>) -> Result<Option<Investment>, StoreError> {
    row.map(Investment::try_from).transpose()
}

fn log_failure<T>(operation: &str, outcome: StoreOutcome<T>) -> StoreOutcome<T> {
    if let StoreOutcome::Failed(e) = &outcome {
        error!("investments.{} failed: {}", operation, e);
    }
    outcome
}

#[async_trait]
impl InvestmentStore for PgInvestmentStore {
    async fn list(&self) -> Result<Vec<Investment>, StoreError> {
        let rows = investment_queries::fetch_all(&self.pool).await?;
        rows.into_iter().map(Investment::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> StoreOutcome<Investment> {
        let result = investment_queries::fetch_one(&self.pool, id)
            .await
            .map_err(StoreError::from)
            .and_then(convert_optional);
        log_failure("get", StoreOutcome::from_optional(result))
    }

    async fn create(&self, input: InvestmentInput) -> Result<Investment, StoreError> {
        let row = investment_queries::insert(&self.pool, input).await.map_err(|e| {
            error!("investments.create failed: {}", e);
            e
        })?;
        Investment::try_from(row)
    }

    async fn update(&self, id: Uuid, input: InvestmentInput) -> StoreOutcome<Investment> {
        let result = investment_queries::update(&self.pool, id, input)
            .await
            .and_then(convert_optional);
        log_failure("update", StoreOutcome::from_optional(result))
    }

    async fn remove(&self, id: Uuid) -> StoreOutcome<Investment> {
        let result = investment_queries::delete(&self.pool, id)
            .await
            .map_err(StoreError::from)
            .and_then(convert_optional);
        log_failure("remove", StoreOutcome::from_optional(result))
    }

    async fn list_types(&self) -> Result<Vec<String>, StoreError> {
        Ok(investment_queries::fetch_types(&self.pool).await?)
    }
}
