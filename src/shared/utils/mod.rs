pub mod format;
pub mod validation;

pub use format::{
    current_date, current_month, format_currency, format_currency_compact, month_options,
    CATEGORY_SUGGESTIONS,
};
