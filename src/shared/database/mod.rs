pub mod connection;

pub use connection::{create_tables, default_database_path, open_database, open_in_memory};
