//! English words renderings: cardinal numbers, currency amounts and dates.
//! Used by the document form engine to fill the `*_in_words` template fields.

use chrono::{Datelike, NaiveDate};

use crate::format::filter_non_numbers;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 4] = [
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Lowercase English cardinal, e.g. `1234` -> "one thousand two hundred
/// thirty-four".
pub fn cardinal(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = n;
    for (scale, name) in SCALES {
        if rest >= scale {
            let count = rest / scale;
            rest %= scale;
            parts.push(format!("{} {}", cardinal(count), name));
        }
    }
    if rest > 0 {
        parts.push(under_thousand(rest as usize));
    }
    parts.join(" ")
}

fn under_thousand(n: usize) -> String {
    let mut parts: Vec<String> = Vec::new();
    let hundreds = n / 100;
    let rem = n % 100;
    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds]));
    }
    if rem > 0 {
        if rem < 20 {
            parts.push(ONES[rem].to_string());
        } else {
            let tens = rem / 10;
            let ones = rem % 10;
            if ones > 0 {
                parts.push(format!("{}-{}", TENS[tens], ONES[ones]));
            } else {
                parts.push(TENS[tens].to_string());
            }
        }
    }
    parts.join(" ")
}

/// Major/minor unit naming for currency words.
#[derive(Debug, Clone)]
pub struct CurrencyWords {
    pub major_singular: &'static str,
    pub major_plural: &'static str,
    pub minor_singular: &'static str,
    pub minor_plural: &'static str,
}

/// The house default. The minor unit is named "Kobo", never the converter
/// library's "Paise", and no trailing "Only" is appended.
pub const NAIRA: CurrencyWords = CurrencyWords {
    major_singular: "Naira",
    major_plural: "Naira",
    minor_singular: "Kobo",
    minor_plural: "Kobo",
};

/// Render a typed-in amount ("1,234.56") as Title Case currency words:
/// "One Thousand Two Hundred Thirty-Four Naira Fifty-Six Kobo".
/// Unparseable input yields the zero rendering.
pub fn amount_in_words(raw: &str, currency: &CurrencyWords) -> String {
    let numeric = filter_non_numbers(raw);
    let (int_part, frac_part) = match numeric.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (numeric.as_str(), ""),
    };

    let major: u64 = int_part.parse().unwrap_or(0);
    let minor = parse_minor(frac_part);

    let major_word = if major == 1 {
        currency.major_singular
    } else {
        currency.major_plural
    };
    let mut out = format!("{} {}", title_case(&cardinal(major)), major_word);

    if minor > 0 {
        let minor_word = if minor == 1 {
            currency.minor_singular
        } else {
            currency.minor_plural
        };
        out.push(' ');
        out.push_str(&title_case(&cardinal(minor)));
        out.push(' ');
        out.push_str(minor_word);
    }

    out
}

// Two-digit minor units: "5" means fifty, "567" truncates to 56.
fn parse_minor(frac: &str) -> u64 {
    let mut digits: String = frac.chars().take(2).collect();
    if digits.is_empty() {
        return 0;
    }
    while digits.len() < 2 {
        digits.push('0');
    }
    digits.parse().unwrap_or(0)
}

/// "21st June, 2024", the dates-in-words rendering used in affidavits.
pub fn date_in_words(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{}{} {}, {}",
        day,
        ordinal_suffix(day),
        date.format("%B"),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

fn title_case(words: &str) -> String {
    let mut out = String::with_capacity(words.len());
    let mut at_start = true;
    for c in words.chars() {
        if at_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_start = c == ' ' || c == '-';
    }
    out
}
