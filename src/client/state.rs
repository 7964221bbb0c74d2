use tracing::error;
use uuid::Uuid;

use crate::client::api::{ClientError, InvestmentApi};
use crate::client::notify::{Notification, NotificationVariant, Notifier};
use crate::models::{Investment, InvestmentInput, InvestmentType};

/// In-memory view of the user's investments, kept in step with the API.
///
/// The collection is loaded once and afterwards patched locally after each
/// successful mutation instead of being refetched. Changes made by other
/// clients only show up on the next `load`.
pub struct InvestmentsState<A, N> {
    api: A,
    notifier: N,
    investments: Vec<Investment>,
    loading: bool,
}

impl<A: InvestmentApi, N: Notifier> InvestmentsState<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            investments: Vec::new(),
            loading: true,
        }
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial fetch of the full list. Failures are reported, not returned.
    pub async fn load(&mut self) {
        match self.api.get_all().await {
            Ok(investments) => self.investments = investments,
            Err(e) => {
                error!("Error loading investments: {}", e);
                self.notifier
                    .notify(Notification::error("Failed to load investments from the API."));
            }
        }
        self.loading = false;
    }

    pub async fn add(&mut self, data: InvestmentInput) -> Result<Investment, ClientError> {
        match self.api.create(&data).await {
            Ok(created) => {
                self.investments.push(created.clone());
                self.notifier
                    .notify(Notification::success("Investment created successfully."));
                Ok(created)
            }
            Err(e) => {
                error!("Error adding investment: {}", e);
                self.notifier.notify(Notification::error("Failed to create investment."));
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, id: Uuid, data: InvestmentInput) -> Result<Investment, ClientError> {
        match self.api.update(id, &data).await {
            Ok(updated) => {
                for investment in self.investments.iter_mut().filter(|i| i.id == id) {
                    *investment = updated.clone();
                }
                self.notifier
                    .notify(Notification::success("Investment updated successfully."));
                Ok(updated)
            }
            Err(e) => {
                error!("Error updating investment {}: {}", id, e);
                self.notifier.notify(Notification::error("Failed to update investment."));
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        match self.api.delete(id).await {
            Ok(()) => {
                self.investments.retain(|i| i.id != id);
                self.notifier.notify(Notification {
                    title: "Success!".to_string(),
                    description: "Investment deleted successfully.".to_string(),
                    variant: NotificationVariant::Destructive,
                });
                Ok(())
            }
            Err(e) => {
                error!("Error deleting investment {}: {}", id, e);
                self.notifier.notify(Notification::error("Failed to delete investment."));
                Err(e)
            }
        }
    }

    /// Summed amount per type, in the order types first appear.
    pub fn amount_by_type(&self) -> Vec<(InvestmentType, f64)> {
        let mut totals: Vec<(InvestmentType, f64)> = Vec::new();
        for investment in &self.investments {
            match totals.iter_mut().find(|(t, _)| *t == investment.investment_type) {
                Some((_, sum)) => *sum += investment.amount,
                None => totals.push((investment.investment_type, investment.amount)),
            }
        }
        totals
    }

    pub fn total_invested(&self) -> f64 {
        self.investments.iter().map(|i| i.amount).sum()
    }
}
