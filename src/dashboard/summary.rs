use crate::dashboard::format::{format_brl, format_date_br};
use crate::models::Investment;

/// Figures shown in the stats cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_invested: String,
    pub count: usize,
    pub count_label: String,
    pub latest_name: Option<String>,
    pub latest_date: String,
}

impl DashboardSummary {
    pub fn new(investments: &[Investment]) -> Self {
        let total: f64 = investments.iter().map(|i| i.amount).sum();
        let count = investments.len();
        let latest = investments.iter().max_by_key(|i| i.created_at);

        Self {
            total_invested: format_brl(total),
            count,
            count_label: format!("In {} investment{}", count, if count == 1 { "" } else { "s" }),
            latest_name: latest.map(|i| i.name.clone()),
            latest_date: latest
                .map(|i| format_date_br(i.investment_date))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}
