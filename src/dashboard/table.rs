use uuid::Uuid;

use crate::dashboard::format::{format_brl, format_date_br};
use crate::models::Investment;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: Uuid,
    pub name: String,
    pub type_label: &'static str,
    pub amount: String,
    pub investment_date: String,
}

/// Investment list with a two-step delete: a row is first marked, then confirmed or cancelled.
#[derive(Debug, Clone, Default)]
pub struct InvestmentTable {
    rows: Vec<TableRow>,
    total: f64,
    pending_delete: Option<Uuid>,
}

impl InvestmentTable {
    pub fn new(investments: &[Investment]) -> Self {
        let rows = investments
            .iter()
            .map(|i| TableRow {
                id: i.id,
                name: i.name.clone(),
                type_label: i.investment_type.label(),
                amount: format_brl(i.amount),
                investment_date: format_date_br(i.investment_date),
            })
            .collect();
        Self {
            rows,
            total: investments.iter().map(|i| i.amount).sum(),
            pending_delete: None,
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_label(&self) -> String {
        format!("Total: {}", format_brl(self.total))
    }

    pub fn request_delete(&mut self, id: Uuid) -> bool {
        if self.rows.iter().any(|r| r.id == id) {
            self.pending_delete = Some(id);
            true
        } else {
            false
        }
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// Returns the id the caller should now delete.
    pub fn confirm_delete(&mut self) -> Option<Uuid> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
