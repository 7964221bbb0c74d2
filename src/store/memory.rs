use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Investment, InvestmentInput};
use crate::store::{InvestmentStore, StoreOutcome};

#[derive(Default)]
struct Inner {
    // Insertion order.
    rows: Vec<Investment>,
    last_timestamp: Option<DateTime<Utc>>,
    failure: Option<String>,
}

impl Inner {
    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::new(message.clone())),
            None => Ok(()),
        }
    }

    /// Strictly increasing so that creation order is never ambiguous.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

/// Process-local record store with the same semantics as the Postgres one.
#[derive(Default)]
pub struct MemoryInvestmentStore {
    inner: Mutex<Inner>,
}

impl MemoryInvestmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.lock().failure = message.map(str::to_string);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        StoreError::new(format!("date/time field value out of range: \"{}\"", value))
    })
}

#[async_trait]
impl InvestmentStore for MemoryInvestmentStore {
    async fn list(&self) -> Result<Vec<Investment>, StoreError> {
        let inner = self.inner.lock();
        inner.check()?;
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> StoreOutcome<Investment> {
        let inner = self.inner.lock();
        let result = inner
            .check()
            .map(|_| inner.rows.iter().find(|r| r.id == id).cloned());
        StoreOutcome::from_optional(result)
    }

    async fn create(&self, input: InvestmentInput) -> Result<Investment, StoreError> {
        let mut inner = self.inner.lock();
        inner.check()?;
        let investment_date = parse_date(&input.investment_date)?;
        let now = inner.next_timestamp();
        let investment = Investment {
            id: Uuid::new_v4(),
            name: input.name,
            investment_type: input.investment_type,
            amount: input.amount,
            investment_date,
            created_at: now,
            updated_at: now,
        };
        inner.rows.push(investment.clone());
        Ok(investment)
    }

    async fn update(&self, id: Uuid, input: InvestmentInput) -> StoreOutcome<Investment> {
        let mut inner = self.inner.lock();
        if let Err(e) = inner.check() {
            return StoreOutcome::Failed(e);
        }
        let investment_date = match parse_date(&input.investment_date) {
            Ok(date) => date,
            Err(e) => return StoreOutcome::Failed(e),
        };
        let Some(index) = inner.rows.iter().position(|r| r.id == id) else {
            return StoreOutcome::NotFound;
        };
        let now = inner.next_timestamp();
        let row = &mut inner.rows[index];
        row.name = input.name;
        row.investment_type = input.investment_type;
        row.amount = input.amount;
        row.investment_date = investment_date;
        row.updated_at = now;
        StoreOutcome::Found(row.clone())
    }

    async fn remove(&self, id: Uuid) -> StoreOutcome<Investment> {
        let mut inner = self.inner.lock();
        if let Err(e) = inner.check() {
            return StoreOutcome::Failed(e);
        }
        match inner.rows.iter().position(|r| r.id == id) {
            Some(index) => StoreOutcome::Found(inner.rows.remove(index)),
            None => StoreOutcome::NotFound,
        }
    }

    async fn list_types(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.lock();
        inner.check()?;
        Ok(inner
            .rows
            .iter()
            .map(|r| r.investment_type.label().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InvestmentType, TypeCount};

    fn input(name: &str, investment_type: InvestmentType, amount: f64) -> InvestmentInput {
        InvestmentInput {
            name: name.to_string(),
            investment_type,
            amount,
            investment_date: "2024-01-15".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let store = MemoryInvestmentStore::new();
        let created = store
            .create(input("Tesouro", InvestmentType::FixedIncome, 100.5))
            .await
            .unwrap();

        match store.get(created.id).await {
            StoreOutcome::Found(found) => assert_eq!(found, created),
            other => panic!("expected row, got {:?}", other),
        }
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryInvestmentStore::new();
        let first = store.create(input("a", InvestmentType::Stocks, 1.0)).await.unwrap();
        let second = store.create(input("b", InvestmentType::Stocks, 2.0)).await.unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_and_remove_missing_rows() {
        let store = MemoryInvestmentStore::new();
        let id = Uuid::new_v4();

        assert_eq!(
            store.update(id, input("x", InvestmentType::Other, 1.0)).await,
            StoreOutcome::NotFound
        );
        assert_eq!(store.remove(id).await, StoreOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let store = MemoryInvestmentStore::new();
        let created = store.create(input("a", InvestmentType::Funds, 1.0)).await.unwrap();

        let updated = match store.update(created.id, input("b", InvestmentType::Other, 9.0)).await {
            StoreOutcome::Found(row) => row,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(updated.name, "b");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_impossible_date_is_a_store_error() {
        let store = MemoryInvestmentStore::new();
        let mut bad = input("a", InvestmentType::Funds, 1.0);
        bad.investment_date = "2024-02-30".to_string();

        assert!(store.create(bad).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_distribution_counts() {
        let store = MemoryInvestmentStore::new();
        for t in [
            InvestmentType::Stocks,
            InvestmentType::Funds,
            InvestmentType::Stocks,
            InvestmentType::Stocks,
            InvestmentType::Other,
        ] {
            store.create(input("x", t, 1.0)).await.unwrap();
        }

        let distribution = store.type_distribution().await.unwrap();
        assert_eq!(
            distribution,
            vec![
                TypeCount { investment_type: "Ações".into(), count: 3 },
                TypeCount { investment_type: "Fundos".into(), count: 1 },
                TypeCount { investment_type: "Outros".into(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryInvestmentStore::new();
        store.set_failure(Some("connection refused"));

        assert_eq!(store.list().await.unwrap_err().message, "connection refused");
        assert!(matches!(store.get(Uuid::new_v4()).await, StoreOutcome::Failed(_)));

        store.set_failure(None);
        assert!(store.list().await.unwrap().is_empty());
    }
}
