//! Fills a DOCX template: the archive is re-written entry by entry, with
//! `{placeholder}` tokens in the XML parts under `word/` replaced by the
//! supplied values. Anything else is copied through untouched.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::TemplateError;

/// Render a template against a flat field map. Strict placeholder policy: a
/// `{token}` that survives substitution aborts the render; no partial file
/// is ever produced.
pub fn render(
    template: &[u8],
    data: &BTreeMap<String, String>,
) -> Result<Vec<u8>, TemplateError> {
    if template.is_empty() {
        return Err(TemplateError::Missing);
    }

    let mut archive = ZipArchive::new(Cursor::new(template))
        .map_err(|_| TemplateError::InvalidArchive)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|_| TemplateError::InvalidArchive)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut contents)
            .map_err(|_| TemplateError::InvalidArchive)?;

        let output = if name.starts_with("word/") && name.ends_with(".xml") {
            let text =
                String::from_utf8(contents).map_err(|_| TemplateError::InvalidArchive)?;
            substitute(&text, data)?.into_bytes()
        } else {
            contents
        };

        writer
            .start_file(name, FileOptions::default())
            .map_err(|_| TemplateError::InvalidArchive)?;
        writer
            .write_all(&output)
            .map_err(|_| TemplateError::InvalidArchive)?;
    }

    let cursor = writer.finish().map_err(|_| TemplateError::InvalidArchive)?;
    Ok(cursor.into_inner())
}

fn substitute(
    text: &str,
    data: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = text.to_string();
    for (key, value) in data {
        let token = format!("{{{key}}}");
        if out.contains(&token) {
            out = out.replace(&token, &xml_escape(value));
        }
    }

    if let Some(unresolved) = find_unresolved(&out) {
        return Err(TemplateError::UnresolvedPlaceholder(unresolved));
    }

    Ok(out)
}

// A placeholder token is an identifier: letter or underscore, then
// alphanumerics/underscores. Anything else between braces is document text.
fn find_unresolved(text: &str) -> Option<String> {
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        if let Some(end) = after.find('}') {
            let token = &after[..end];
            if is_placeholder_token(token) {
                return Some(token.to_string());
            }
        }
        rest = after;
    }
    None
}

fn is_placeholder_token(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
