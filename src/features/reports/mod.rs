/// Month-over-month reporting.
pub mod models;
pub mod repository;

pub use models::{CategoryTotal, MonthlySummary};
