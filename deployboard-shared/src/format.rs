/// Display formatting for amounts and dates
///
/// Amounts are stored as integer cents. They are converted to dollars for edit
/// forms, back to cents on write, and rendered as US-dollar strings in list
/// views and summary cards.
///
/// # Example
///
/// ```
/// use deployboard_shared::format::{cents_to_dollars, dollars_to_cents, format_currency};
///
/// assert_eq!(format_currency(123456), "$1,234.56");
/// assert_eq!(cents_to_dollars(12345), 123.45);
/// assert_eq!(dollars_to_cents(123.45), 12345);
/// ```

use chrono::NaiveDate;

/// Converts a stored cent amount to dollars
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Converts a dollar amount from a form to cents, rounding to the nearest cent
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Formats a cent amount as US dollars, e.g. `$1,234.56` or `-$0.50`
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction:02}")
}

/// Formats a date the way list views show it, e.g. `Dec 6, 2022`
pub fn format_date_to_local(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
