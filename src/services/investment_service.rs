use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Investment, TypeCount};
use crate::services::validation::validate_investment;
use crate::store::{InvestmentStore, StoreOutcome};

fn found(outcome: StoreOutcome<Investment>) -> Result<Investment, AppError> {
    match outcome {
        StoreOutcome::Found(investment) => Ok(investment),
        StoreOutcome::NotFound => Err(AppError::investment_not_found()),
        StoreOutcome::Failed(e) => Err(AppError::Store(e)),
    }
}

// Path ids that are not UUIDs cannot name any row.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::investment_not_found())
}

pub async fn fetch_all(store: &dyn InvestmentStore) -> Result<Vec<Investment>, AppError> {
    Ok(store.list().await?)
}

pub async fn fetch_one(store: &dyn InvestmentStore, id: &str) -> Result<Investment, AppError> {
    let id = parse_id(id)?;
    found(store.get(id).await)
}

pub async fn create(store: &dyn InvestmentStore, body: &Value) -> Result<Investment, AppError> {
    let input = validate_investment(body)?;
    Ok(store.create(input).await?)
}

pub async fn update(
    store: &dyn InvestmentStore,
    id: &str,
    body: &Value,
) -> Result<Investment, AppError> {
    let input = validate_investment(body)?;
    let id = parse_id(id)?;
    found(store.update(id, input).await)
}

pub async fn delete(store: &dyn InvestmentStore, id: &str) -> Result<Investment, AppError> {
    let id = parse_id(id)?;
    found(store.remove(id).await)
}

pub async fn type_distribution(store: &dyn InvestmentStore) -> Result<Vec<TypeCount>, AppError> {
    Ok(store.type_distribution().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryInvestmentStore;
    use serde_json::json;

    fn payload(amount: Value) -> Value {
        json!({
            "name": "Tesouro",
            "type": "Renda Fixa",
            "amount": amount,
            "investment_date": "2024-01-15"
        })
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_store() {
        let store = MemoryInvestmentStore::new();
        store.set_failure(Some("store should not be called"));

        let err = create(&store, &payload(json!(-5))).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert_eq!(errors[0].param, "amount"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_amount_persists_nothing() {
        let store = MemoryInvestmentStore::new();
        assert!(create(&store, &payload(json!(0))).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryInvestmentStore::new();
        let err = delete(&store, &Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = delete(&store, "not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_message() {
        let store = MemoryInvestmentStore::new();
        store.set_failure(Some("relation \"investments\" does not exist"));

        match fetch_all(&store).await.unwrap_err() {
            AppError::Store(e) => assert_eq!(e.message, "relation \"investments\" does not exist"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
