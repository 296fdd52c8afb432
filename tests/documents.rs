use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use bizhub_api::documents::{self, DocumentKind, render::render};
use bizhub_api::error::TemplateError;

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn change_of_name_submission() -> BTreeMap<String, String> {
    fields(&[
        ("authority", "nimc"),
        ("wrongName", "john doe"),
        ("correctName", "jonathan doe"),
        ("gender", "male"),
        ("religion", "christianity"),
        ("nationality", "nigerian"),
        ("state", "plateau"),
        ("lga", "jos south"),
    ])
}

fn build_template(body_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", FileOptions::default())
        .unwrap();
    writer
        .write_all(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><Types/>")
        .unwrap();
    writer
        .start_file("word/document.xml", FileOptions::default())
        .unwrap();
    writer.write_all(body_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn document_xml(archive_bytes: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes)).unwrap();
    let mut entry = archive.by_name("word/document.xml").unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

#[test]
fn validation_reports_every_missing_required_field() {
    let issues = documents::validate(DocumentKind::ChangeOfName, &fields(&[]))
        .expect_err("empty submission must fail");
    assert!(issues.iter().any(|i| i.field == "wrongName"));
    assert!(issues.iter().any(|i| i.field == "correctName"));
    assert!(issues.iter().any(|i| i.field == "authority"));
    // The optional output file name is not an issue.
    assert!(!issues.iter().any(|i| i.field == "outputFileName"));
}

#[test]
fn partially_typed_date_fails_validation_without_panicking() {
    let mut submission = change_of_name_submission();
    submission.insert("dateOfAffidavit".into(), "21/0".into());
    let issues = documents::validate(DocumentKind::ChangeOfName, &submission)
        .expect_err("partial date must fail");
    assert!(issues.iter().any(|i| i.field == "dateOfAffidavit"));
}

#[test]
fn normalization_cases_identity_and_descriptive_fields() {
    let normalized = documents::normalize(DocumentKind::ChangeOfName, &change_of_name_submission());
    assert_eq!(normalized["wrongName"], "JOHN DOE");
    assert_eq!(normalized["correctName"], "JONATHAN DOE");
    assert_eq!(normalized["gender"], "Male");
    assert_eq!(normalized["lga"], "Jos South");
    assert_eq!(normalized["authority"], "NIMC");
}

#[test]
fn date_fields_gain_a_words_rendering_once_complete() {
    let mut submission = change_of_name_submission();
    submission.insert("dateOfAffidavit".into(), "21/6/2024".into());
    let normalized = documents::normalize(DocumentKind::ChangeOfName, &submission);
    assert_eq!(normalized["dateOfAffidavitInWords"], "21st June, 2024");
}

#[test]
fn wrong_transfer_gains_amount_in_words() {
    let submission = fields(&[("amount", "1234.56")]);
    let normalized = documents::normalize(DocumentKind::WrongTransfer, &submission);
    assert_eq!(normalized["amount"], "1,234.56");
    assert_eq!(
        normalized["amountInWords"],
        "One Thousand Two Hundred Thirty-Four Naira Fifty-Six Kobo"
    );
}

#[test]
fn guardianship_gains_age_in_words() {
    let submission = fields(&[("minorsAge", "12")]);
    let normalized = documents::normalize(DocumentKind::Guardianship, &submission);
    assert_eq!(normalized["minorsAgeInWords"], "twelve");
}

#[test]
fn output_file_name_falls_back_to_the_kind_default() {
    let normalized = documents::normalize(DocumentKind::ChangeOfName, &change_of_name_submission());
    assert_eq!(
        documents::output_file_name(DocumentKind::ChangeOfName, &normalized),
        "Affidavit"
    );

    let normalized =
        documents::normalize(DocumentKind::CorrectionOfNameAndDob, &change_of_name_submission());
    assert_eq!(
        documents::output_file_name(DocumentKind::CorrectionOfNameAndDob, &normalized),
        "Correction of Name and DOB - JONATHAN DOE"
    );
}

#[test]
fn render_substitutes_normalized_values_end_to_end() {
    let template = build_template(
        "<w:document><w:t>I, {wrongName}, now {correctName}, gender {gender}</w:t></w:document>",
    );
    let normalized = documents::normalize(DocumentKind::ChangeOfName, &change_of_name_submission());

    let output = render(&template, &normalized).expect("render");
    let text = document_xml(&output);
    assert!(text.contains("JOHN DOE"));
    assert!(text.contains("JONATHAN DOE"));
    assert!(text.contains("gender Male"));
    assert!(!text.contains('{'));
}

#[test]
fn render_escapes_xml_in_values() {
    let template = build_template("<w:t>{wrongName}</w:t>");
    let data = fields(&[("wrongName", "A & B <LTD>")]);
    let output = render(&template, &data).expect("render");
    let text = document_xml(&output);
    assert!(text.contains("A &amp; B &lt;LTD&gt;"));
}

#[test]
fn unresolved_placeholder_aborts_the_render() {
    let template = build_template("<w:t>{wrongName} sworn before {commissioner}</w:t>");
    let data = fields(&[("wrongName", "JOHN DOE")]);
    match render(&template, &data) {
        Err(TemplateError::UnresolvedPlaceholder(name)) => assert_eq!(name, "commissioner"),
        other => panic!("expected unresolved placeholder, got {other:?}"),
    }
}

#[test]
fn garbage_bytes_are_an_invalid_archive() {
    let data = fields(&[("wrongName", "JOHN DOE")]);
    match render(b"this is not a zip file", &data) {
        Err(TemplateError::InvalidArchive) => {}
        other => panic!("expected invalid archive, got {other:?}"),
    }
}

#[test]
fn empty_upload_is_a_missing_template() {
    match render(&[], &BTreeMap::new()) {
        Err(TemplateError::Missing) => {}
        other => panic!("expected missing template, got {other:?}"),
    }
}

#[test]
fn non_xml_entries_are_copied_through() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", FileOptions::default())
        .unwrap();
    writer.write_all(b"<w:t>{name}</w:t>").unwrap();
    writer
        .start_file("word/media/image1.png", FileOptions::default())
        .unwrap();
    writer.write_all(&[0x89, 0x50, 0x4e, 0x47]).unwrap();
    let template = writer.finish().unwrap().into_inner();

    let output = render(&template, &fields(&[("name", "JOHN")])).expect("render");
    let mut archive = ZipArchive::new(Cursor::new(output.as_slice())).unwrap();
    let mut entry = archive.by_name("word/media/image1.png").unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    assert_eq!(bytes, vec![0x89, 0x50, 0x4e, 0x47]);
}
