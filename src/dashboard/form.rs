use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Investment, InvestmentInput, InvestmentType};

/// Create/edit form state. Fields hold what the user typed; the server
/// remains the authority on validity.
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentForm {
    pub name: String,
    pub investment_type: InvestmentType,
    pub amount: String,
    pub investment_date: String,
    editing: bool,
    errors: BTreeMap<&'static str, &'static str>,
}

impl InvestmentForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            investment_type: InvestmentType::Stocks,
            amount: String::new(),
            investment_date: today.format("%Y-%m-%d").to_string(),
            editing: false,
            errors: BTreeMap::new(),
        }
    }

    /// Prefilled form for the edit dialog.
    pub fn from_investment(investment: &Investment) -> Self {
        Self {
            name: investment.name.clone(),
            investment_type: investment.investment_type,
            amount: investment.amount.to_string(),
            investment_date: investment.investment_date.format("%Y-%m-%d").to_string(),
            editing: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn errors(&self) -> &BTreeMap<&'static str, &'static str> {
        &self.errors
    }

    /// Keeps only the digits typed and reads them as cents: `"1234"` becomes `"12.34"`.
    pub fn set_amount_input(&mut self, raw: &str) {
        self.amount = format_cents_input(raw);
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear();

        if self.name.trim().is_empty() {
            self.errors.insert("name", "Name is required");
        }

        let amount = self.amount.trim();
        if amount.is_empty() {
            self.errors.insert("amount", "Amount is required");
        } else if !amount.parse::<f64>().is_ok_and(|v| v.is_finite() && v > 0.0) {
            self.errors.insert("amount", "Amount must be a positive number");
        }

        if self.investment_date.trim().is_empty() {
            self.errors.insert("investment_date", "Date is required");
        }

        self.errors.is_empty()
    }

    /// Validates and returns the payload to send. A create form is cleared
    /// for the next entry; an edit form keeps its values.
    pub fn submit(&mut self, today: NaiveDate) -> Option<InvestmentInput> {
        if !self.validate() {
            return None;
        }
        let amount = self.amount.trim().parse::<f64>().ok()?;
        let payload = InvestmentInput {
            name: self.name.clone(),
            investment_type: self.investment_type,
            amount,
            investment_date: self.investment_date.clone(),
        };
        if !self.editing {
            *self = InvestmentForm::new(today);
        }
        Some(payload)
    }
}

fn format_cents_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let digits = digits.trim_start_matches('0');
    let padded = format!("{:0>3}", digits);
    let (whole, cents) = padded.split_at(padded.len() - 2);
    format!("{}.{}", whole, cents)
}
