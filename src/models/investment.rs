use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// One user-recorded financial allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub amount: f64,
    pub investment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four client-settable fields, after validation.
///
/// `investment_date` stays textual: only its shape has been checked, the
/// store decides whether it is a real calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub amount: f64,
    pub investment_date: String,
}

/// Closed set of investment categories offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvestmentType {
    Stocks,
    FixedIncome,
    Funds,
    Cryptocurrencies,
    RealEstate,
    Commodities,
    Other,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 7] = [
        InvestmentType::Stocks,
        InvestmentType::FixedIncome,
        InvestmentType::Funds,
        InvestmentType::Cryptocurrencies,
        InvestmentType::RealEstate,
        InvestmentType::Commodities,
        InvestmentType::Other,
    ];

    /// Label used on the wire and in the database.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentType::Stocks => "Ações",
            InvestmentType::FixedIncome => "Renda Fixa",
            InvestmentType::Funds => "Fundos",
            InvestmentType::Cryptocurrencies => "Criptomoedas",
            InvestmentType::RealEstate => "Imóveis",
            InvestmentType::Commodities => "Commodities",
            InvestmentType::Other => "Outros",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            InvestmentType::Stocks => "Stocks",
            InvestmentType::FixedIncome => "Fixed Income",
            InvestmentType::Funds => "Funds",
            InvestmentType::Cryptocurrencies => "Cryptocurrencies",
            InvestmentType::RealEstate => "Real Estate",
            InvestmentType::Commodities => "Commodities",
            InvestmentType::Other => "Other",
        }
    }

    /// Accepts either the wire label or the English name. Both match
    /// case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| {
            t.label().to_lowercase() == value || t.english_name().to_lowercase() == value
        })
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InvestmentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for InvestmentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        InvestmentType::from_label(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown investment type '{}'", raw)))
    }
}

/// One entry of the type distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub investment_type: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_accepts_labels_and_english_names() {
        assert_eq!(InvestmentType::from_label("Renda Fixa"), Some(InvestmentType::FixedIncome));
        assert_eq!(InvestmentType::from_label("fixed income"), Some(InvestmentType::FixedIncome));
        assert_eq!(InvestmentType::from_label(" Ações "), Some(InvestmentType::Stocks));
        assert_eq!(InvestmentType::from_label("Bonds"), None);
    }

    #[test]
    fn test_type_matching_ignores_case_for_labels_too() {
        assert_eq!(InvestmentType::from_label("renda fixa"), Some(InvestmentType::FixedIncome));
        assert_eq!(InvestmentType::from_label("AÇÕES"), Some(InvestmentType::Stocks));
        assert_eq!(InvestmentType::from_label("imóveis"), Some(InvestmentType::RealEstate));
        assert_eq!(InvestmentType::from_label("REAL ESTATE"), Some(InvestmentType::RealEstate));
    }

    #[test]
    fn test_type_serializes_as_wire_label() {
        let json = serde_json::to_string(&InvestmentType::RealEstate).unwrap();
        assert_eq!(json, "\"Imóveis\"");

        let parsed: InvestmentType = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(parsed, InvestmentType::Other);
    }

    #[test]
    fn test_investment_uses_type_key() {
        let investment = Investment {
            id: Uuid::new_v4(),
            name: "Tesouro".into(),
            investment_type: InvestmentType::FixedIncome,
            amount: 100.5,
            investment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&investment).unwrap();
        assert_eq!(value["type"], "Renda Fixa");
        assert_eq!(value["investment_date"], "2024-01-15");
        assert_eq!(value["amount"], 100.5);
    }
}
