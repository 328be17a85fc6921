use serde::{Deserialize, Serialize};

/// Summed expense amount for one category within the report interval.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Aggregate report for one calendar month.
///
/// `pending_udhar` is a point-in-time snapshot over current udhar state,
/// not scoped to the requested month.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonthlySummary {
    pub total_expense: f64,
    pub total_income: f64,
    pub net_savings: f64,
    /// Categories with at least one expense entry in the interval,
    /// largest total first.
    pub category_breakdown: Vec<CategoryTotal>,
    /// Sum of outstanding balances over pending and partial udhar.
    pub pending_udhar: f64,
}
