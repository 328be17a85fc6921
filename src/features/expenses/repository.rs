use crate::features::expenses::models::{CreateExpenseDto, Expense, ExpenseFilter};
use crate::shared::errors::AppResult;
use crate::shared::utils::validation::{
    require_iso_date, require_non_empty, require_positive_amount,
};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        transaction_type: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Create a ledger entry and return its assigned id.
///
/// Validates at the boundary: positive amount, non-empty category,
/// well-formed date. `created_at` is stamped here, never by the caller.
pub fn create(conn: &Connection, dto: CreateExpenseDto) -> AppResult<i64> {
    require_positive_amount(dto.amount, "amount")?;
    let category = require_non_empty(&dto.category, "category")?;
    require_iso_date(&dto.date, "date")?;

    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO expenses (amount, category, description, date, transaction_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            dto.amount,
            category,
            dto.description,
            dto.date,
            dto.transaction_type,
            created_at
        ],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("logged {} entry id={id}", dto.transaction_type.as_str());
    Ok(id)
}

/// List entries matching the filter, newest first.
///
/// The date range is inclusive on both ends and compared lexically, which
/// is exact for the stored "YYYY-MM-DD" form. Ties on date fall back to
/// id descending so the most recently inserted row comes first.
pub fn find_all(conn: &Connection, filter: &ExpenseFilter) -> AppResult<Vec<Expense>> {
    if let Some(start) = &filter.start_date {
        require_iso_date(start, "start_date")?;
    }
    if let Some(end) = &filter.end_date {
        require_iso_date(end, "end_date")?;
    }

    let mut query = String::from(
        "SELECT id, amount, category, description, date, transaction_type, created_at
         FROM expenses WHERE 1=1",
    );
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(start) = &filter.start_date {
        query.push_str(" AND date >= ?");
        params.push(Box::new(start.clone()));
    }
    if let Some(end) = &filter.end_date {
        query.push_str(" AND date <= ?");
        params.push(Box::new(end.clone()));
    }
    if let Some(category) = &filter.category {
        query.push_str(" AND category = ?");
        params.push(Box::new(category.clone()));
    }

    query.push_str(" ORDER BY date DESC, id DESC");

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let rows = stmt.query_map(param_refs.as_slice(), expense_from_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Delete an entry. A nonexistent id is a silent no-op.
pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
    if affected == 0 {
        log::debug!("delete_expense: id={id} not present, nothing to do");
    }
    Ok(())
}

/// Distinct categories among stored entries, alphabetical.
pub fn categories(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT category FROM expenses ORDER BY category")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
