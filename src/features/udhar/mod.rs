/// Udhar (informal lending) tracking.
///
/// Records money lent to people, applies repayments with full history,
/// and derives the pending/partial/cleared status from the amounts.
pub mod models;
pub mod repository;

pub use models::{CreateUdharDto, Udhar, UdharPayment, UdharStatus};
