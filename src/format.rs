//! Pure string transforms applied to form fields before rendering or
//! persistence. Invalid input degrades to an empty or best-effort result;
//! nothing here returns an error.

/// Uppercase the first character of every space-separated word, leaving the
/// rest of each word unchanged. Repeated spaces are preserved, so the word
/// count never changes, and the transform is idempotent.
pub fn capitalize_every_word(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip everything except ASCII digits and the first decimal point. A
/// second decimal point is dropped, not an error.
pub fn filter_non_numbers(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '.' && !seen_point {
            seen_point = true;
            out.push(c);
        }
    }
    out
}

/// Normalize a typed-in amount: digits and one decimal point only, the
/// fractional part truncated (not rounded) to two digits, and the integer
/// part grouped with commas every three digits. Called on blur/submit so the
/// caret never jumps mid-keystroke.
pub fn format_amount(raw: &str) -> String {
    let numeric = filter_non_numbers(raw);
    if numeric.is_empty() {
        return String::new();
    }

    let (int_part, frac_part) = match numeric.split_once('.') {
        Some((int, frac)) => (int, Some(&frac[..frac.len().min(2)])),
        None => (numeric.as_str(), None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
