/// Feature modules.
///
/// Each feature is a self-contained unit holding its models and
/// database operations.
pub mod expenses;
pub mod reports;
pub mod udhar;
