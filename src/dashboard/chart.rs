use crate::models::InvestmentType;

/// One pie slice of the distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub name: &'static str,
    pub value: f64,
    /// Share of the total with one decimal, e.g. `"33.3"`.
    pub percentage: String,
    pub color: &'static str,
}

pub fn slice_color(investment_type: InvestmentType) -> &'static str {
    match investment_type {
        InvestmentType::Stocks => "#3B82F6",
        InvestmentType::FixedIncome => "#10B981",
        InvestmentType::Funds => "#8B5CF6",
        InvestmentType::Cryptocurrencies => "#F59E0B",
        InvestmentType::RealEstate => "#EAB308",
        InvestmentType::Commodities => "#EF4444",
        InvestmentType::Other => "#6B7280",
    }
}

pub fn chart_slices(amounts: &[(InvestmentType, f64)], total: f64) -> Vec<ChartSlice> {
    amounts
        .iter()
        .map(|&(investment_type, value)| {
            let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            ChartSlice {
                name: investment_type.label(),
                value,
                percentage: format!("{:.1}", share),
                color: slice_color(investment_type),
            }
        })
        .collect()
}
