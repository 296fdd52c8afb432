use chrono::NaiveDate;

use bizhub_api::words::{NAIRA, amount_in_words, cardinal, date_in_words};

#[test]
fn cardinal_small_numbers() {
    assert_eq!(cardinal(0), "zero");
    assert_eq!(cardinal(7), "seven");
    assert_eq!(cardinal(15), "fifteen");
    assert_eq!(cardinal(40), "forty");
    assert_eq!(cardinal(42), "forty-two");
}

#[test]
fn cardinal_hundreds_and_scales() {
    assert_eq!(cardinal(123), "one hundred twenty-three");
    assert_eq!(cardinal(1_000), "one thousand");
    assert_eq!(cardinal(1_234), "one thousand two hundred thirty-four");
    assert_eq!(cardinal(2_000_000), "two million");
    assert_eq!(
        cardinal(1_000_501),
        "one million five hundred one"
    );
}

#[test]
fn amount_words_render_major_and_minor() {
    assert_eq!(
        amount_in_words("1,234.56", &NAIRA),
        "One Thousand Two Hundred Thirty-Four Naira Fifty-Six Kobo"
    );
}

#[test]
fn amount_words_skip_zero_minor() {
    assert_eq!(amount_in_words("200", &NAIRA), "Two Hundred Naira");
}

#[test]
fn amount_words_never_append_only() {
    let words = amount_in_words("5,000.25", &NAIRA);
    assert!(!words.contains("Only"), "unexpected suffix in {words:?}");
    assert!(words.ends_with("Kobo"));
}

#[test]
fn amount_words_use_the_minor_unit_name() {
    let words = amount_in_words("10.05", &NAIRA);
    assert!(words.contains("Kobo"));
    assert!(!words.contains("Paise"));
}

#[test]
fn amount_words_degrade_to_zero() {
    assert_eq!(amount_in_words("", &NAIRA), "Zero Naira");
    assert_eq!(amount_in_words("abc", &NAIRA), "Zero Naira");
}

#[test]
fn date_words_use_ordinal_day() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    assert_eq!(date_in_words(date), "3rd June, 2024");

    let date = NaiveDate::from_ymd_opt(1995, 12, 21).unwrap();
    assert_eq!(date_in_words(date), "21st December, 1995");

    let date = NaiveDate::from_ymd_opt(2001, 1, 11).unwrap();
    assert_eq!(date_in_words(date), "11th January, 2001");

    let date = NaiveDate::from_ymd_opt(2010, 2, 22).unwrap();
    assert_eq!(date_in_words(date), "22nd February, 2010");
}
