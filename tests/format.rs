use bizhub_api::format::{capitalize_every_word, filter_non_numbers, format_amount};

#[test]
fn capitalize_handles_empty_input() {
    assert_eq!(capitalize_every_word(""), "");
}

#[test]
fn capitalize_uppercases_each_word() {
    assert_eq!(capitalize_every_word("jos south"), "Jos South");
    assert_eq!(capitalize_every_word("plateau"), "Plateau");
}

#[test]
fn capitalize_preserves_word_count() {
    // Repeated spaces are not collapsed.
    let input = "jos  south";
    let output = capitalize_every_word(input);
    assert_eq!(output, "Jos  South");
    assert_eq!(
        input.split(' ').count(),
        output.split(' ').count(),
    );
}

#[test]
fn capitalize_is_idempotent() {
    let once = capitalize_every_word("church of christ in nations");
    let twice = capitalize_every_word(&once);
    assert_eq!(once, twice);
}

#[test]
fn capitalize_leaves_rest_of_word_alone() {
    assert_eq!(capitalize_every_word("McDonald avenue"), "McDonald Avenue");
}

#[test]
fn filter_keeps_digits_and_first_point() {
    assert_eq!(filter_non_numbers("12a3,4.56"), "1234.56");
    assert_eq!(filter_non_numbers("1.2.3"), "1.23");
    assert_eq!(filter_non_numbers("abc"), "");
}

#[test]
fn format_amount_filters_truncates_and_groups() {
    assert_eq!(format_amount("12a3,4.567"), "1,234.56");
}

#[test]
fn format_amount_truncates_without_rounding() {
    assert_eq!(format_amount("0.999"), "0.99");
}

#[test]
fn format_amount_groups_large_integers() {
    assert_eq!(format_amount("1234567"), "1,234,567");
    assert_eq!(format_amount("100"), "100");
    assert_eq!(format_amount("1000"), "1,000");
}

#[test]
fn format_amount_degrades_to_empty() {
    assert_eq!(format_amount(""), "");
    assert_eq!(format_amount("no digits here"), "");
}
