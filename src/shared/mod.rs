/// Cross-feature infrastructure: error type, database connection and
/// schema management, small shared helpers.
pub mod database;
pub mod errors;
pub mod utils;
