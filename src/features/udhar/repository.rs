use crate::features::udhar::models::{CreateUdharDto, Udhar, UdharPayment, UdharStatus};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::format::current_date;
use crate::shared::utils::validation::{
    require_iso_date, require_non_empty, require_positive_amount,
};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn udhar_from_row(row: &Row<'_>) -> rusqlite::Result<Udhar> {
    Ok(Udhar {
        id: row.get(0)?,
        person_name: row.get(1)?,
        amount: row.get(2)?,
        description: row.get(3)?,
        date_given: row.get(4)?,
        due_date: row.get(5)?,
        status: row.get(6)?,
        amount_paid: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const UDHAR_COLUMNS: &str =
    "id, person_name, amount, description, date_given, due_date, status, amount_paid, created_at";

/// Record a new udhar and return its assigned id.
///
/// Status and amount_paid are forced to pending / 0 here regardless of
/// anything the caller constructed; they only ever change through
/// [`apply_payment`].
pub fn create(conn: &Connection, dto: CreateUdharDto) -> AppResult<i64> {
    let person_name = require_non_empty(&dto.person_name, "person_name")?;
    require_positive_amount(dto.amount, "amount")?;
    require_iso_date(&dto.date_given, "date_given")?;
    if let Some(due) = &dto.due_date {
        require_iso_date(due, "due_date")?;
    }

    let created_at = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO udhar (person_name, amount, description, date_given, due_date, status, amount_paid, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![
            person_name,
            dto.amount,
            dto.description,
            dto.date_given,
            dto.due_date,
            UdharStatus::Pending,
            created_at
        ],
    )?;

    let id = conn.last_insert_rowid();
    log::debug!("recorded udhar id={id} for {person_name}");
    Ok(id)
}

/// Fetch one udhar record.
pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Udhar> {
    conn.query_row(
        &format!("SELECT {UDHAR_COLUMNS} FROM udhar WHERE id = ?1"),
        params![id],
        udhar_from_row,
    )
    .optional()?
    .ok_or_else(|| AppError::not_found("udhar record"))
}

/// List udhar records, optionally restricted to one status, newest
/// date_given first.
pub fn find_all(conn: &Connection, status: Option<UdharStatus>) -> AppResult<Vec<Udhar>> {
    let records = match status {
        Some(status) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {UDHAR_COLUMNS} FROM udhar WHERE status = ?1 ORDER BY date_given DESC"
            ))?;
            let rows = stmt.query_map(params![status], udhar_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {UDHAR_COLUMNS} FROM udhar ORDER BY date_given DESC"
            ))?;
            let rows = stmt.query_map([], udhar_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(records)
}

/// Apply a repayment to an udhar record.
///
/// Adds the increment to `amount_paid`, re-derives the status, and
/// appends one history row, all inside a single transaction so no
/// observer can see the record updated without its history entry. The
/// payment date defaults to today.
///
/// A nonexistent id fails with `NotFound` and leaves everything
/// untouched. Overpayment beyond the total is accepted; the status
/// saturates at cleared.
///
/// # Returns
/// The updated record.
pub fn apply_payment(
    conn: &mut Connection,
    udhar_id: i64,
    payment_amount: f64,
    payment_date: Option<&str>,
) -> AppResult<Udhar> {
    require_positive_amount(payment_amount, "payment_amount")?;
    if let Some(date) = payment_date {
        require_iso_date(date, "payment_date")?;
    }
    let payment_date = payment_date
        .map(str::to_string)
        .unwrap_or_else(current_date);

    let tx = conn.transaction()?;

    let amounts = tx
        .query_row(
            "SELECT amount, amount_paid FROM udhar WHERE id = ?1",
            params![udhar_id],
            |row| Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?)),
        )
        .optional()?;

    let Some((total_amount, current_paid)) = amounts else {
        // rolls back on drop; nothing was written
        return Err(AppError::not_found("udhar record"));
    };

    let new_paid = current_paid + payment_amount;
    let new_status = UdharStatus::derive(total_amount, new_paid);

    tx.execute(
        "UPDATE udhar SET amount_paid = ?1, status = ?2 WHERE id = ?3",
        params![new_paid, new_status, udhar_id],
    )?;
    tx.execute(
        "INSERT INTO udhar_payments (udhar_id, amount, payment_date) VALUES (?1, ?2, ?3)",
        params![udhar_id, payment_amount, payment_date],
    )?;

    tx.commit()?;

    log::debug!(
        "payment of {payment_amount} applied to udhar id={udhar_id}, now {}",
        new_status.as_str()
    );

    find_by_id(conn, udhar_id)
}

/// Repayment history for one udhar record, oldest first.
pub fn payments(conn: &Connection, udhar_id: i64) -> AppResult<Vec<UdharPayment>> {
    let mut stmt = conn.prepare(
        "SELECT id, udhar_id, amount, payment_date FROM udhar_payments
         WHERE udhar_id = ?1 ORDER BY payment_date, id",
    )?;
    let rows = stmt.query_map(params![udhar_id], |row| {
        Ok(UdharPayment {
            id: row.get(0)?,
            udhar_id: row.get(1)?,
            amount: row.get(2)?,
            payment_date: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Delete an udhar record and its whole payment history in one
/// transaction. History rows go first so they never dangle. A
/// nonexistent id is a silent no-op.
pub fn delete(conn: &mut Connection, id: i64) -> AppResult<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM udhar_payments WHERE udhar_id = ?1",
        params![id],
    )?;
    let affected = tx.execute("DELETE FROM udhar WHERE id = ?1", params![id])?;
    tx.commit()?;

    if affected == 0 {
        log::debug!("delete_udhar: id={id} not present, nothing to do");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::open_in_memory;

    fn dto(person: &str, amount: f64) -> CreateUdharDto {
        CreateUdharDto {
            person_name: person.to_string(),
            amount,
            description: None,
            date_given: "2024-01-10".to_string(),
            due_date: None,
        }
    }

    #[test]
    fn test_create_forces_pending_and_zero_paid() {
        let conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        let record = find_by_id(&conn, id).unwrap();
        assert_eq!(record.status, UdharStatus::Pending);
        assert_eq!(record.amount_paid, 0.0);
        assert_eq!(record.remaining(), 1000.0);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let conn = open_in_memory().unwrap();
        assert!(create(&conn, dto("", 1000.0)).is_err());
        assert!(create(&conn, dto("Ravi", -10.0)).is_err());

        let mut bad_date = dto("Ravi", 100.0);
        bad_date.date_given = "10 Jan".to_string();
        assert!(create(&conn, bad_date).is_err());

        let mut bad_due = dto("Ravi", 100.0);
        bad_due.due_date = Some("soon".to_string());
        assert!(create(&conn, bad_due).is_err());
    }

    #[test]
    fn test_partial_then_clearing_payment() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        let after_first = apply_payment(&mut conn, id, 400.0, None).unwrap();
        assert_eq!(after_first.amount_paid, 400.0);
        assert_eq!(after_first.status, UdharStatus::Partial);

        let after_second = apply_payment(&mut conn, id, 600.0, None).unwrap();
        assert_eq!(after_second.amount_paid, 1000.0);
        assert_eq!(after_second.status, UdharStatus::Cleared);

        let history = payments(&conn, id).unwrap();
        assert_eq!(history.len(), 2);
        let total: f64 = history.iter().map(|p| p.amount).sum();
        assert_eq!(total, 1000.0);
    }

    #[test]
    fn test_overpayment_saturates_at_cleared() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Meera", 500.0)).unwrap();

        let record = apply_payment(&mut conn, id, 800.0, None).unwrap();
        assert_eq!(record.amount_paid, 800.0);
        assert_eq!(record.status, UdharStatus::Cleared);
        assert!(record.remaining() < 0.0);
    }

    #[test]
    fn test_payment_on_missing_id_changes_nothing() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        let err = apply_payment(&mut conn, id + 100, 50.0, None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let record = find_by_id(&conn, id).unwrap();
        assert_eq!(record.amount_paid, 0.0);
        assert_eq!(record.status, UdharStatus::Pending);

        let orphan_rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM udhar_payments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphan_rows, 0);
    }

    #[test]
    fn test_payment_uses_explicit_date() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        apply_payment(&mut conn, id, 100.0, Some("2024-02-15")).unwrap();

        let history = payments(&conn, id).unwrap();
        assert_eq!(history[0].payment_date, "2024-02-15");
    }

    #[test]
    fn test_payment_rejects_bad_input() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        assert!(apply_payment(&mut conn, id, 0.0, None).is_err());
        assert!(apply_payment(&mut conn, id, 100.0, Some("15-02-2024")).is_err());
        assert!(payments(&conn, id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_cascades_to_history() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();
        apply_payment(&mut conn, id, 250.0, None).unwrap();
        apply_payment(&mut conn, id, 250.0, None).unwrap();

        delete(&mut conn, id).unwrap();

        assert!(matches!(
            find_by_id(&conn, id).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(payments(&conn, id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut conn = open_in_memory().unwrap();
        let id = create(&conn, dto("Ravi", 1000.0)).unwrap();

        delete(&mut conn, id + 5).unwrap();

        assert_eq!(find_all(&conn, None).unwrap().len(), 1);
    }

    #[test]
    fn test_find_all_filters_by_status_and_orders_by_date_given() {
        let mut conn = open_in_memory().unwrap();

        let mut early = dto("Asha", 300.0);
        early.date_given = "2024-01-01".to_string();
        let early_id = create(&conn, early).unwrap();

        let mut late = dto("Ravi", 500.0);
        late.date_given = "2024-03-01".to_string();
        let late_id = create(&conn, late).unwrap();

        apply_payment(&mut conn, early_id, 100.0, None).unwrap();

        let all = find_all(&conn, None).unwrap();
        let ids: Vec<i64> = all.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![late_id, early_id]);

        let partial = find_all(&conn, Some(UdharStatus::Partial)).unwrap();
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].id, early_id);

        let cleared = find_all(&conn, Some(UdharStatus::Cleared)).unwrap();
        assert!(cleared.is_empty());
    }
}
