use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{FieldError, InvestmentInput, InvestmentType};

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Shape only; "2024-13-99" is accepted here and left to the store.
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern"))
}

/// Missing, null, empty string, `false` and zero all count as "not provided".
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn required_text(
    body: &Value,
    param: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = body.get(param);
    if is_falsy(value) {
        errors.push(FieldError::body(param, format!("{} is required", param), value.cloned()));
        return None;
    }
    let Some(text) = value.and_then(Value::as_str) else {
        errors.push(FieldError::body(param, format!("{} must be text", param), value.cloned()));
        return None;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::body(param, format!("{} cannot be empty", param), value.cloned()));
        return None;
    }
    Some(trimmed.to_string())
}

/// Upper bound of the `NUMERIC(14, 2)` amount column.
const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Checks the shortest decimal form of the amount, the same text the
/// Postgres store sends as `NUMERIC`, so both stores keep identical values.
fn has_at_most_two_decimals(amount: f64) -> bool {
    let text = amount.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.len() <= 2,
        None => true,
    }
}

fn positive_amount(body: &Value, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = body.get("amount");
    if is_falsy(value) {
        errors.push(FieldError::body("amount", "amount is required", value.cloned()));
        return None;
    }
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let message = match parsed {
        Some(amount) if !amount.is_finite() || amount <= 0.0 => "amount must be > 0",
        None => "amount must be > 0",
        Some(amount) if amount >= MAX_AMOUNT => "amount must be less than 1000000000000",
        Some(amount) if !has_at_most_two_decimals(amount) => "amount must have at most 2 decimal places",
        Some(amount) => return Some(amount),
    };
    errors.push(FieldError::body("amount", message, value.cloned()));
    None
}

fn date_text(body: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = body.get("investment_date");
    if is_falsy(value) {
        errors.push(FieldError::body("investment_date", "investment_date is required", value.cloned()));
        return None;
    }
    match value.and_then(Value::as_str) {
        Some(date) if date_pattern().is_match(date) => Some(date.to_string()),
        _ => {
            errors.push(FieldError::body(
                "investment_date",
                "investment_date must be YYYY-MM-DD",
                value.cloned(),
            ));
            None
        }
    }
}

fn investment_type(body: &Value, errors: &mut Vec<FieldError>) -> Option<InvestmentType> {
    let label = required_text(body, "type", errors)?;
    match InvestmentType::from_label(&label) {
        Some(t) => Some(t),
        None => {
            let allowed: Vec<&str> = InvestmentType::ALL.iter().map(|t| t.label()).collect();
            errors.push(FieldError::body(
                "type",
                format!("type must be one of: {}", allowed.join(", ")),
                body.get("type").cloned(),
            ));
            None
        }
    }
}

/// Checks a create/update payload, reporting at most one error per field.
pub fn validate_investment(body: &Value) -> Result<InvestmentInput, AppError> {
    let mut errors = Vec::new();

    let name = required_text(body, "name", &mut errors);
    let investment_type = investment_type(body, &mut errors);
    let amount = positive_amount(body, &mut errors);
    let investment_date = date_text(body, &mut errors);

    match (name, investment_type, amount, investment_date) {
        (Some(name), Some(investment_type), Some(amount), Some(investment_date)) if errors.is_empty() => {
            Ok(InvestmentInput {
                name,
                investment_type,
                amount,
                investment_date,
            })
        }
        _ => Err(AppError::Validation(errors)),
    }
}
