use chrono::{Datelike, Local};

/// Format an amount in rupees, e.g. `₹1250.00`.
pub fn format_currency(amount: f64) -> String {
    format!("\u{20B9}{amount:.2}")
}

/// Compact rupee form for narrow displays: lakhs above 1,00,000,
/// thousands above 1,000, whole rupees below.
pub fn format_currency_compact(amount: f64) -> String {
    if amount >= 100_000.0 {
        format!("\u{20B9}{:.1}L", amount / 100_000.0)
    } else if amount >= 1_000.0 {
        format!("\u{20B9}{:.1}K", amount / 1_000.0)
    } else {
        format!("\u{20B9}{amount:.0}")
    }
}

/// Today's date in the stored "YYYY-MM-DD" form (local calendar).
pub fn current_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Current month as "YYYY-MM" (local calendar).
pub fn current_month() -> String {
    Local::now().date_naive().format("%Y-%m").to_string()
}

/// The last twelve months as "YYYY-MM" tokens, newest first. Used by
/// report consumers to populate a month selector.
pub fn month_options() -> Vec<String> {
    let today = Local::now().date_naive();
    let mut months = Vec::with_capacity(12);
    let mut year = today.year();
    let mut month = today.month();
    for _ in 0..12 {
        months.push(format!("{year}-{month:02}"));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months
}

/// Common category labels offered as suggestions when logging entries.
pub const CATEGORY_SUGGESTIONS: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Health",
    "Education",
    "Rent",
    "Groceries",
    "Personal",
    "Gifts",
    "Investment",
    "Salary",
    "Freelance",
    "Other",
];
