use crate::shared::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Open (or create) the ledger database at an explicit location and
/// ensure the schema exists.
///
/// The storage location is always injected by the caller; the store never
/// guesses a path from ambient application state.
///
/// # Arguments
/// * `database_path` - full path of the SQLite file
///
/// # Returns
/// An open connection with the schema in place, or an error.
pub fn open_database(database_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::configuration(format!(
                    "failed to create data directory {}: {e}",
                    parent.display()
                ))
            })?;
            log::info!("created data directory: {}", parent.display());
        }
    }

    let conn = Connection::open(database_path)?;
    create_tables(&conn)?;

    log::info!("ledger database ready: {}", database_path.display());

    Ok(conn)
}

/// Open an in-memory database with the schema in place. Test fixture
/// and throwaway-session helper.
pub fn open_in_memory() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Database file path inside a caller-supplied data directory.
///
/// Debug builds get their own file so development data never mixes with
/// real records.
pub fn default_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(database_filename())
}

fn database_filename() -> &'static str {
    if cfg!(debug_assertions) {
        "dev_udhar_expense.db"
    } else {
        "udhar_expense.db"
    }
}

/// Create the ledger tables and indexes.
///
/// Idempotent: every statement is `IF NOT EXISTS`, so this runs safely on
/// every startup without touching existing data.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expenses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            description TEXT,
            date TEXT NOT NULL,
            transaction_type TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS udhar (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_name TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT,
            date_given TEXT NOT NULL,
            due_date TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            amount_paid REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS udhar_payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            udhar_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            payment_date TEXT NOT NULL,
            FOREIGN KEY (udhar_id) REFERENCES udhar(id)
        )",
        [],
    )?;

    create_indexes(conn)?;

    Ok(())
}

/// Indexes for the hot query paths: date-range and category filters on
/// expenses, status filter on udhar, history lookup on payments.
fn create_indexes(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_udhar_status ON udhar(status)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_udhar_payments_udhar_id ON udhar_payments(udhar_id)",
        [],
    )?;
    Ok(())
}
