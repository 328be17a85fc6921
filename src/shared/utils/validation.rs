use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Reject non-positive monetary amounts.
pub(crate) fn require_positive_amount(amount: f64, field: &str) -> AppResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation(format!("{field} must be positive")));
    }
    Ok(())
}

/// Reject labels that are empty after trimming. Returns the trimmed value.
pub(crate) fn require_non_empty<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// Reject date strings that are not valid ISO calendar dates.
///
/// Dates are stored as "YYYY-MM-DD" text and compared lexically, so a
/// malformed value would silently fall outside every range filter.
pub(crate) fn require_iso_date(value: &str, field: &str) -> AppResult<()> {
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{field} must be a YYYY-MM-DD date: {value:?}")))?;
    // chrono accepts unpadded fields; only the canonical padded form
    // compares correctly as text
    if parsed.format("%Y-%m-%d").to_string() != value {
        return Err(AppError::validation(format!(
            "{field} must be a zero-padded YYYY-MM-DD date: {value:?}"
        )));
    }
    Ok(())
}
