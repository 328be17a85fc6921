use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// Repayment state of an udhar record.
///
/// Stored as the lowercase tokens "pending" / "partial" / "cleared".
/// Never set directly by callers: always derived from the amounts via
/// [`UdharStatus::derive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UdharStatus {
    Pending,
    Partial,
    Cleared,
}

impl UdharStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UdharStatus::Pending => "pending",
            UdharStatus::Partial => "partial",
            UdharStatus::Cleared => "cleared",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "pending" => Some(UdharStatus::Pending),
            "partial" => Some(UdharStatus::Partial),
            "cleared" => Some(UdharStatus::Cleared),
            _ => None,
        }
    }

    /// Status as a pure function of the amounts.
    ///
    /// paid >= amount => Cleared, 0 < paid < amount => Partial,
    /// paid == 0 => Pending. Saturates at Cleared on overpayment.
    pub fn derive(amount: f64, amount_paid: f64) -> Self {
        if amount_paid >= amount {
            UdharStatus::Cleared
        } else if amount_paid > 0.0 {
            UdharStatus::Partial
        } else {
            UdharStatus::Pending
        }
    }
}

impl ToSql for UdharStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for UdharStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let token = value.as_str()?;
        UdharStatus::parse(token)
            .ok_or_else(|| FromSqlError::Other(format!("unknown udhar status: {token:?}").into()))
    }
}

/// Money lent to a person, tracked until repaid.
///
/// `amount` is fixed at creation; `amount_paid` and `status` evolve only
/// through payment application.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Udhar {
    pub id: i64,
    pub person_name: String,
    pub amount: f64,
    pub description: Option<String>,
    /// Calendar date the money was handed over, "YYYY-MM-DD".
    pub date_given: String,
    pub due_date: Option<String>,
    pub status: UdharStatus,
    pub amount_paid: f64,
    pub created_at: String,
}

impl Udhar {
    /// Outstanding balance. May be negative after an overpayment.
    pub fn remaining(&self) -> f64 {
        self.amount - self.amount_paid
    }
}

/// Input for recording a new udhar. Status and amount_paid are not
/// accepted from the caller; every record starts pending with nothing
/// paid.
#[derive(Debug, Deserialize)]
pub struct CreateUdharDto {
    pub person_name: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date_given: String,
    pub due_date: Option<String>,
}

/// One repayment event against an udhar record. Append-only: written
/// exclusively by payment application and removed only when the parent
/// record is deleted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UdharPayment {
    pub id: i64,
    pub udhar_id: i64,
    pub amount: f64,
    pub payment_date: String,
}
