//! Ledger store for a personal expense and udhar tracker.
//!
//! Owns all persistent state: manually logged expense/income entries,
//! udhar (informal lending) records with their repayment history, and
//! monthly aggregation over both. A view layer constructs DTOs, calls
//! [`LedgerStore`] methods, and renders the results; no other component
//! holds state.

pub mod features;
pub mod shared;

use rusqlite::Connection;
use std::path::Path;

pub use features::expenses::{CreateExpenseDto, Expense, ExpenseFilter, TransactionType};
pub use features::reports::{CategoryTotal, MonthlySummary};
pub use features::udhar::{CreateUdharDto, Udhar, UdharPayment, UdharStatus};
pub use shared::database::default_database_path;
pub use shared::errors::{AppError, AppResult};

use features::{expenses, reports, udhar};

/// The ledger store: a single SQLite-backed connection plus every
/// mutation and derivation rule of the ledger.
///
/// All operations are blocking and complete before returning. The store
/// assumes one logical writer; the dual-write operations
/// ([`apply_payment`](Self::apply_payment) and
/// [`delete_udhar`](Self::delete_udhar)) run in their own transactions so
/// a crash or concurrent reader never observes half of them.
///
/// `status` and `amount_paid` on udhar records have no public mutator;
/// they change only through [`apply_payment`](Self::apply_payment).
pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) the store at an explicit file location and
    /// ensure the schema exists. Safe to call on every startup.
    pub fn open<P: AsRef<Path>>(database_path: P) -> AppResult<Self> {
        let conn = shared::database::open_database(database_path.as_ref())?;
        Ok(Self { conn })
    }

    /// In-memory store, mainly for tests and throwaway sessions.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = shared::database::open_in_memory()?;
        Ok(Self { conn })
    }

    // Expense operations

    /// Log an expense or income entry, returning its assigned id.
    pub fn add_expense(&self, dto: CreateExpenseDto) -> AppResult<i64> {
        expenses::repository::create(&self.conn, dto)
    }

    /// List entries matching the filter, newest first.
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> AppResult<Vec<Expense>> {
        expenses::repository::find_all(&self.conn, filter)
    }

    /// Delete an entry; a nonexistent id is a no-op.
    pub fn delete_expense(&self, id: i64) -> AppResult<()> {
        expenses::repository::delete(&self.conn, id)
    }

    /// Distinct categories in use, alphabetical.
    pub fn list_categories(&self) -> AppResult<Vec<String>> {
        expenses::repository::categories(&self.conn)
    }

    // Udhar operations

    /// Record money lent to a person, returning the assigned id. The
    /// record always starts pending with nothing paid.
    pub fn add_udhar(&self, dto: CreateUdharDto) -> AppResult<i64> {
        udhar::repository::create(&self.conn, dto)
    }

    /// Fetch one udhar record.
    pub fn get_udhar(&self, id: i64) -> AppResult<Udhar> {
        udhar::repository::find_by_id(&self.conn, id)
    }

    /// List udhar records, optionally restricted to one status, newest
    /// date_given first.
    pub fn list_udhar(&self, status: Option<UdharStatus>) -> AppResult<Vec<Udhar>> {
        udhar::repository::find_all(&self.conn, status)
    }

    /// Apply a repayment: bumps `amount_paid`, re-derives the status,
    /// and appends one history row, atomically. Fails with `NotFound`
    /// (and no mutation) for an unknown id. `payment_date` defaults to
    /// today.
    pub fn apply_payment(
        &mut self,
        udhar_id: i64,
        amount: f64,
        payment_date: Option<&str>,
    ) -> AppResult<Udhar> {
        udhar::repository::apply_payment(&mut self.conn, udhar_id, amount, payment_date)
    }

    /// Repayment history for one udhar record, oldest first.
    pub fn list_payments(&self, udhar_id: i64) -> AppResult<Vec<UdharPayment>> {
        udhar::repository::payments(&self.conn, udhar_id)
    }

    /// Delete an udhar record together with its payment history; a
    /// nonexistent id is a no-op.
    pub fn delete_udhar(&mut self, id: i64) -> AppResult<()> {
        udhar::repository::delete(&mut self.conn, id)
    }

    // Reporting

    /// Aggregate report for one calendar month.
    pub fn monthly_summary(&self, year: i32, month: u32) -> AppResult<MonthlySummary> {
        reports::repository::monthly_summary(&self.conn, year, month)
    }
}
