/// Expense/income logging.
///
/// Covers manual entry CRUD, filtered listing, and the distinct-category
/// query that feeds the category picker.
pub mod models;
pub mod repository;

pub use models::{CreateExpenseDto, Expense, ExpenseFilter, TransactionType};
