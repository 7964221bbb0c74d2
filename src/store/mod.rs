pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Investment, InvestmentInput, TypeCount};

pub use memory::MemoryInvestmentStore;
pub use postgres::PgInvestmentStore;

/// Result of an operation that targets a single row by id.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome<T> {
    Found(T),
    NotFound,
    Failed(StoreError),
}

impl<T> StoreOutcome<T> {
    pub fn from_optional(result: Result<Option<T>, StoreError>) -> Self {
        match result {
            Ok(Some(value)) => StoreOutcome::Found(value),
            Ok(None) => StoreOutcome::NotFound,
            Err(e) => StoreOutcome::Failed(e),
        }
    }
}

/// Persistence adapter over the investments table.
#[async_trait]
pub trait InvestmentStore: Send + Sync {
    /// All rows, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Investment>, StoreError>;

    async fn get(&self, id: Uuid) -> StoreOutcome<Investment>;

    async fn create(&self, input: InvestmentInput) -> Result<Investment, StoreError>;

    async fn update(&self, id: Uuid, input: InvestmentInput) -> StoreOutcome<Investment>;

    /// Deletes the row and hands it back.
    async fn remove(&self, id: Uuid) -> StoreOutcome<Investment>;

    /// The `type` column of every row, in insertion order.
    async fn list_types(&self) -> Result<Vec<String>, StoreError>;

    async fn type_distribution(&self) -> Result<Vec<TypeCount>, StoreError> {
        let types = self.list_types().await?;
        Ok(tally_types(types))
    }
}

/// Counts occurrences of each type, keeping the order in which types were first seen.
pub fn tally_types<I>(types: I) -> Vec<TypeCount>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<TypeCount> = Vec::new();
    for investment_type in types {
        match counts.iter_mut().find(|c| c.investment_type == investment_type) {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount { investment_type, count: 1 }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_keeps_discovery_order() {
        let types = ["A", "B", "A", "A", "C"].map(String::from);
        let counts = tally_types(types);

        let order: Vec<&str> = counts.iter().map(|c| c.investment_type.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C"]);
        assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), 5);
        assert_eq!(counts[0].count, 3);
    }

    #[test]
    fn test_tally_empty() {
        assert!(tally_types(Vec::new()).is_empty());
    }

    #[test]
    fn test_outcome_from_optional() {
        assert_eq!(StoreOutcome::from_optional(Ok(Some(1))), StoreOutcome::Found(1));
        assert_eq!(StoreOutcome::<i32>::from_optional(Ok(None)), StoreOutcome::NotFound);
        let failed = StoreOutcome::<i32>::from_optional(Err(StoreError::new("boom")));
        assert_eq!(failed, StoreOutcome::Failed(StoreError::new("boom")));
    }
}
