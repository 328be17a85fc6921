use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// Whether a ledger entry is money going out or coming in.
///
/// Stored as the lowercase tokens "expense" / "income".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "expense" => Some(TransactionType::Expense),
            "income" => Some(TransactionType::Income),
            _ => None,
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let token = value.as_str()?;
        TransactionType::parse(token).ok_or_else(|| {
            FromSqlError::Other(format!("unknown transaction type: {token:?}").into())
        })
    }
}

/// A single logged expense or income entry.
///
/// Immutable once created apart from deletion; `created_at` is set at
/// insert time and never modified.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// Calendar date as "YYYY-MM-DD".
    pub date: String,
    pub transaction_type: TransactionType,
    /// RFC 3339 UTC timestamp of creation.
    pub created_at: String,
}

/// Input for creating a ledger entry.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseDto {
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
    pub transaction_type: TransactionType,
}

/// Optional filters for listing entries. The date range is inclusive on
/// both ends; category matches exactly.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
}
