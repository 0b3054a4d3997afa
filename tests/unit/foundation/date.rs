use super::*;

#[test]
fn digits_map_to_bengali() {
    assert_eq!(to_bengali_digits(0), "০");
    assert_eq!(to_bengali_digits(2024), "২০২৪");
    assert_eq!(to_bengali_digits(1234567890), "১২৩৪৫৬৭৮৯০");
}

#[test]
fn date_formats_day_month_year() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(format_bengali_date(date), "৫ জানুয়ারি ২০২৪");
}

#[test]
fn december_uses_last_month_name() {
    let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    assert_eq!(format_bengali_date(date), "৩১ ডিসেম্বর ২০২৩");
}

#[test]
fn today_is_non_empty_and_bengali() {
    let today = display_date_today();
    assert!(!today.is_empty());
    // Every digit must already be a Bengali digit.
    assert!(!today.chars().any(|c| c.is_ascii_digit()));
}
