use chrono::{Datelike, Local, NaiveDate};

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

const BENGALI_MONTHS: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

/// Render a non-negative number with Bengali digits.
pub fn to_bengali_digits(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => BENGALI_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Format a calendar date as `<day> <month> <year>` with Bengali digits and
/// Bengali month names.
pub fn format_bengali_date(date: NaiveDate) -> String {
    let day = to_bengali_digits(date.day());
    let month = BENGALI_MONTHS[date.month0() as usize];
    let year = to_bengali_digits(date.year().unsigned_abs());
    format!("{day} {month} {year}")
}

/// The display date for the current local day.
///
/// Derived fresh on every render; never persisted.
pub fn display_date_today() -> String {
    format_bengali_date(Local::now().date_naive())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/date.rs"]
mod tests;
