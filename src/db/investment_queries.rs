use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Investment, InvestmentInput, InvestmentType};

const COLUMNS: &str = r#"id, name, "type", amount, investment_date, created_at, updated_at"#;

// Raw shape of a row in `investments`.
#[derive(Debug, FromRow)]
pub struct InvestmentRow {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "type")]
    pub investment_type: String,
    pub amount: BigDecimal,
    pub investment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InvestmentRow> for Investment {
    type Error = StoreError;

    fn try_from(row: InvestmentRow) -> Result<Self, Self::Error> {
        let investment_type = InvestmentType::from_label(&row.investment_type).ok_or_else(|| {
            StoreError::new(format!(
                "investment {} has unknown type '{}'",
                row.id, row.investment_type
            ))
        })?;
        let amount = from_numeric(&row.amount).ok_or_else(|| {
            StoreError::new(format!("investment {} has an unrepresentable amount", row.id))
        })?;
        Ok(Investment {
            id: row.id,
            name: row.name,
            investment_type,
            amount,
            investment_date: row.investment_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// Goes through the decimal text: `ToPrimitive::to_f64` scales by a power of
// ten and can land one ulp away (35 cents reads back as 0.35000000000000003).
fn from_numeric(amount: &BigDecimal) -> Option<f64> {
    amount.to_string().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn to_numeric(amount: f64) -> Result<BigDecimal, StoreError> {
    BigDecimal::from_str(&amount.to_string())
        .map_err(|e| StoreError::new(format!("invalid amount {}: {}", amount, e)))
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<InvestmentRow>, sqlx::Error> {
    let sql = format!("SELECT {} FROM investments ORDER BY created_at DESC", COLUMNS);
    sqlx::query_as::<_, InvestmentRow>(&sql)
        .fetch_all(pool)
        .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<InvestmentRow>, sqlx::Error> {
    let sql = format!("SELECT {} FROM investments WHERE id = $1", COLUMNS);
    sqlx::query_as::<_, InvestmentRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &PgPool, input: InvestmentInput) -> Result<InvestmentRow, StoreError> {
    let amount = to_numeric(input.amount)?;
    let sql = format!(
        r#"INSERT INTO investments (name, "type", amount, investment_date)
           VALUES ($1, $2, $3, $4::date)
           RETURNING {}"#,
        COLUMNS
    );
    let row = sqlx::query_as::<_, InvestmentRow>(&sql)
        .bind(input.name)
        .bind(input.investment_type.label())
        .bind(amount)
        .bind(input.investment_date)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: InvestmentInput,
) -> Result<Option<InvestmentRow>, StoreError> {
    let amount = to_numeric(input.amount)?;
    let sql = format!(
        r#"UPDATE investments
           SET name = $1, "type" = $2, amount = $3, investment_date = $4::date, updated_at = now()
           WHERE id = $5
           RETURNING {}"#,
        COLUMNS
    );
    let row = sqlx::query_as::<_, InvestmentRow>(&sql)
        .bind(input.name)
        .bind(input.investment_type.label())
        .bind(amount)
        .bind(input.investment_date)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<InvestmentRow>, sqlx::Error> {
    let sql = format!("DELETE FROM investments WHERE id = $1 RETURNING {}", COLUMNS);
    sqlx::query_as::<_, InvestmentRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(r#"SELECT "type" FROM investments ORDER BY created_at ASC"#)
        .fetch_all(pool)
        .await
}

/// Fetches at most one row; used to check connectivity and table shape.
pub async fn sample(pool: &PgPool) -> Result<Option<InvestmentRow>, sqlx::Error> {
    let sql = format!("SELECT {} FROM investments LIMIT 1", COLUMNS);
    sqlx::query_as::<_, InvestmentRow>(&sql)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cent_amounts_convert_exactly() {
        for amount in [0.01, 0.29, 0.35, 0.41, 100.5, 1234.56, 999_999_999_999.99] {
            let numeric = to_numeric(amount).unwrap();
            assert_eq!(from_numeric(&numeric), Some(amount));
        }
    }

    #[test]
    fn test_column_scale_reads_back_as_plain_number() {
        // NUMERIC(14, 2) hands back trailing zeros.
        let numeric = BigDecimal::from_str("100.50").unwrap();
        assert_eq!(from_numeric(&numeric), Some(100.5));

        let numeric = BigDecimal::from_str("0.35").unwrap();
        assert_eq!(from_numeric(&numeric), Some(0.35));
    }
}
