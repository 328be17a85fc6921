use crate::features::reports::models::{CategoryTotal, MonthlySummary};
use crate::shared::errors::{AppError, AppResult};
use rusqlite::{params, Connection};

/// Half-open date interval covering one calendar month:
/// [first of month, first of next month). Rolls the year at December.
fn month_bounds(year: i32, month: u32) -> AppResult<(String, String)> {
    if !(1..=12).contains(&month) {
        return Err(AppError::validation(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }
    let start = format!("{year}-{month:02}-01");
    let end = if month == 12 {
        format!("{}-01-01", year + 1)
    } else {
        format!("{year}-{:02}-01", month + 1)
    };
    Ok((start, end))
}

/// Build the monthly report: expense and income totals, net savings,
/// per-category expense breakdown, and the current outstanding udhar
/// balance.
pub fn monthly_summary(conn: &Connection, year: i32, month: u32) -> AppResult<MonthlySummary> {
    let (start, end) = month_bounds(year, month)?;

    let total_expense: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM expenses
         WHERE transaction_type = 'expense' AND date >= ?1 AND date < ?2",
        params![start, end],
        |row| row.get(0),
    )?;

    let total_income: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM expenses
         WHERE transaction_type = 'income' AND date >= ?1 AND date < ?2",
        params![start, end],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) FROM expenses
         WHERE transaction_type = 'expense' AND date >= ?1 AND date < ?2
         GROUP BY category
         ORDER BY SUM(amount) DESC",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok(CategoryTotal {
            category: row.get(0)?,
            total: row.get(1)?,
        })
    })?;
    let category_breakdown = rows.collect::<Result<Vec<_>, _>>()?;

    // snapshot of current state, deliberately not month-scoped
    let pending_udhar: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount - amount_paid), 0) FROM udhar
         WHERE status IN ('pending', 'partial')",
        [],
        |row| row.get(0),
    )?;

    Ok(MonthlySummary {
        total_expense,
        total_income,
        net_savings: total_income - total_expense,
        category_breakdown,
        pending_udhar,
    })
}
