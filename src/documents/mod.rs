//! Document form models: one parameterized engine driven by a per-kind field
//! table instead of a hand-written form per affidavit type. A submission is
//! validated against the table, normalized (casing, amounts), enriched with
//! the derived `*InWords` fields, and only then handed to the renderer.

pub mod render;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::FieldIssue;
use crate::format::{capitalize_every_word, format_amount};
use crate::words::{self, NAIRA};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Free text.
    Any,
    /// Strict dd/mm/yyyy. Partial input never reaches the words conversion.
    Date,
    /// Digits only (account and phone numbers, ages).
    Digits,
    /// A money amount; anything the amount filter leaves behind.
    Amount,
}

impl FieldRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRule::Any => "text",
            FieldRule::Date => "date",
            FieldRule::Digits => "digits",
            FieldRule::Amount => "amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    /// Identity fields: full legal names, authorities.
    Upper,
    /// Descriptive fields: state, LGA, religion, nationality, gender.
    Title,
    /// Structured fields left as typed: dates, account numbers, file names.
    Raw,
    /// Thousands-grouped money amount.
    Amount,
}

impl FieldTransform {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTransform::Upper => "uppercase",
            FieldTransform::Title => "title-case",
            FieldTransform::Raw => "raw",
            FieldTransform::Amount => "amount",
        }
    }
}

/// One row of a document kind's field table. `name` doubles as the template
/// placeholder name.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: Option<&'static str>,
    pub rule: FieldRule,
    pub transform: FieldTransform,
}

const fn req(
    name: &'static str,
    message: &'static str,
    rule: FieldRule,
    transform: FieldTransform,
) -> FieldSpec {
    FieldSpec {
        name,
        required: Some(message),
        rule,
        transform,
    }
}

const fn opt(name: &'static str, rule: FieldRule, transform: FieldTransform) -> FieldSpec {
    FieldSpec {
        name,
        required: None,
        rule,
        transform,
    }
}

use FieldRule::{Amount, Any, Date, Digits};
use FieldTransform::{Amount as GroupedAmount, Raw, Title, Upper};

const CHANGE_OF_NAME: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the change", Any, Upper),
    req("correctName", "Enter the correct name of the person", Any, Upper),
    req("wrongName", "Enter the wrong name of the person", Any, Upper),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
    opt("dateOfAffidavit", Date, Raw),
];

const CHANGE_OF_DATE_OF_BIRTH: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the change", Any, Upper),
    req("name", "Enter the full name of the person", Any, Upper),
    req("wrongDob", "Enter the wrong date of birth", Date, Raw),
    req("correctDob", "Enter the correct date of birth", Date, Raw),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
    opt("dateOfAffidavit", Date, Raw),
];

const CORRECTION_OF_NAME_AND_DOB: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the correction", Any, Upper),
    req("wrongName", "Enter the wrong name of the person", Any, Upper),
    req("correctName", "Enter the correct name of the person", Any, Upper),
    req("wrongDob", "Enter the wrong date of birth", Date, Raw),
    req("correctDob", "Enter the correct date of birth", Date, Raw),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const REARRANGEMENT_OF_NAME: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the change", Any, Upper),
    req("firstName", "Enter the first name", Any, Upper),
    opt("middleName", Any, Upper),
    req("surname", "Enter the surname", Any, Upper),
    req("wrongNameArrangement", "Enter the wrong arrangement", Any, Upper),
    req("correctNameArrangement", "Enter the correct arrangement", Any, Upper),
    req("document", "Name the affected document", Any, Title),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const REMOVAL_OF_NAME: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the change", Any, Upper),
    req("fullName", "Enter the current full name", Any, Upper),
    req("firstName", "Enter the first name", Any, Upper),
    opt("otherName", Any, Upper),
    req("surname", "Enter the surname", Any, Upper),
    req("nameToRemove", "Enter the name to remove", Any, Upper),
    req("correctName", "Enter the resulting correct name", Any, Upper),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const CHANGE_OF_STATE_OF_ORIGIN: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to inform of the change", Any, Upper),
    req("name", "Enter the full name of the person", Any, Upper),
    req("wrongStateOfOrigin", "Enter the wrong state of origin", Any, Title),
    req("correctStateOfOrigin", "Enter the correct state of origin", Any, Title),
    req("correctLGA", "Enter the correct local government area", Any, Title),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const CHANGE_OF_REGISTRATION_ON_SIM: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("name", "Enter the current full name", Any, Upper),
    req("previousName", "Enter the previously registered name", Any, Upper),
    req("phone", "Enter the phone number", Digits, Raw),
    req("simNetwork", "Enter the SIM network", Any, Title),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const GUARDIANSHIP: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("authority", "The authority to present this to", Any, Upper),
    req("guardiansName", "Enter the guardian's name", Any, Upper),
    req("minorsName", "Enter the minor's name", Any, Upper),
    req("minorsAge", "Enter the minor's age", Digits, Raw),
    req("minorsGender", "Select the minor's gender", Any, Title),
    req("relationshipToMinor", "State the relationship to the minor", Any, Title),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const DOMICILE: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("fullName", "Enter the full name", Any, Upper),
    req("spouseName", "Enter the spouse's name", Any, Upper),
    req("domicile", "Enter the domicile", Any, Title),
    req("relationshipToSpouse", "State the relationship", Any, Title),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

const WRONG_TRANSFER: &[FieldSpec] = &[
    opt("outputFileName", Any, Raw),
    req("amount", "Enter the amount transferred", Amount, GroupedAmount),
    req("dateOfTransaction", "Enter the transaction date", Date, Raw),
    opt("dateOfOrder", Date, Raw),
    req("transactionMethod", "Select the transaction method", Any, Title),
    req("sender", "Enter the sender's name", Any, Upper),
    req("sendersBank", "Enter the sender's bank", Any, Title),
    req("sendersAccountNo", "Enter the sender's account number", Digits, Raw),
    req("recipient", "Enter the recipient's name", Any, Upper),
    req("recipientsBank", "Enter the recipient's bank", Any, Title),
    req("recipientsAccountNo", "Enter the recipient's account number", Digits, Raw),
    req("intendedRecipient", "Enter the intended recipient's name", Any, Upper),
    req("intendedRecipientsBank", "Enter the intended recipient's bank", Any, Title),
    req(
        "intendedRecipientsAccountNo",
        "Enter the intended recipient's account number",
        Digits,
        Raw,
    ),
    opt("transactionId", Any, Raw),
    opt("tellerId", Any, Raw),
    req("gender", "Select a gender", Any, Title),
    req("religion", "Enter a religion", Any, Title),
    req("nationality", "Enter the nationality", Any, Title),
    req("state", "Enter the state", Any, Title),
    req("lga", "Enter the local government area", Any, Title),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    ChangeOfName,
    ChangeOfDateOfBirth,
    CorrectionOfNameAndDob,
    RearrangementOfName,
    RemovalOfName,
    ChangeOfStateOfOrigin,
    ChangeOfRegistrationOnSim,
    Guardianship,
    Domicile,
    WrongTransfer,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 10] = [
        DocumentKind::ChangeOfName,
        DocumentKind::ChangeOfDateOfBirth,
        DocumentKind::CorrectionOfNameAndDob,
        DocumentKind::RearrangementOfName,
        DocumentKind::RemovalOfName,
        DocumentKind::ChangeOfStateOfOrigin,
        DocumentKind::ChangeOfRegistrationOnSim,
        DocumentKind::Guardianship,
        DocumentKind::Domicile,
        DocumentKind::WrongTransfer,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::ChangeOfName => "change-of-name",
            DocumentKind::ChangeOfDateOfBirth => "change-of-date-of-birth",
            DocumentKind::CorrectionOfNameAndDob => "correction-of-name-and-dob",
            DocumentKind::RearrangementOfName => "rearrangement-of-name",
            DocumentKind::RemovalOfName => "removal-of-name",
            DocumentKind::ChangeOfStateOfOrigin => "change-of-state-of-origin",
            DocumentKind::ChangeOfRegistrationOnSim => "change-of-registration-on-sim",
            DocumentKind::Guardianship => "guardianship",
            DocumentKind::Domicile => "domicile",
            DocumentKind::WrongTransfer => "wrong-transfer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::ChangeOfName => "Change of Name",
            DocumentKind::ChangeOfDateOfBirth => "Change of Date of Birth",
            DocumentKind::CorrectionOfNameAndDob => "Correction of Name and DOB",
            DocumentKind::RearrangementOfName => "Rearrangement of Name",
            DocumentKind::RemovalOfName => "Removal of Name",
            DocumentKind::ChangeOfStateOfOrigin => "Change of State of Origin",
            DocumentKind::ChangeOfRegistrationOnSim => "Change of Registration on SIM",
            DocumentKind::Guardianship => "Guardianship",
            DocumentKind::Domicile => "Affidavit as to Domicile",
            DocumentKind::WrongTransfer => "Wrong Transfer",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            DocumentKind::ChangeOfName => CHANGE_OF_NAME,
            DocumentKind::ChangeOfDateOfBirth => CHANGE_OF_DATE_OF_BIRTH,
            DocumentKind::CorrectionOfNameAndDob => CORRECTION_OF_NAME_AND_DOB,
            DocumentKind::RearrangementOfName => REARRANGEMENT_OF_NAME,
            DocumentKind::RemovalOfName => REMOVAL_OF_NAME,
            DocumentKind::ChangeOfStateOfOrigin => CHANGE_OF_STATE_OF_ORIGIN,
            DocumentKind::ChangeOfRegistrationOnSim => CHANGE_OF_REGISTRATION_ON_SIM,
            DocumentKind::Guardianship => GUARDIANSHIP,
            DocumentKind::Domicile => DOMICILE,
            DocumentKind::WrongTransfer => WRONG_TRANSFER,
        }
    }

    /// The download name used when the form leaves `outputFileName` blank.
    pub fn default_output_file_name(&self, normalized: &BTreeMap<String, String>) -> String {
        match self {
            DocumentKind::Domicile => "Affidavit as to Domicile".to_string(),
            DocumentKind::WrongTransfer => "Wrong Transfer Affidavit".to_string(),
            DocumentKind::CorrectionOfNameAndDob => {
                let name = normalized.get("correctName").cloned().unwrap_or_default();
                format!("Correction of Name and DOB - {name}")
            }
            _ => "Affidavit".to_string(),
        }
    }
}

/// dd/mm/yyyy with one- or two-digit day and month and a four-digit year,
/// the same shape the date-of-birth inputs enforce.
pub fn parse_dmy(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year_str = parts.next()?;
    if parts.next().is_some() || year_str.len() != 4 {
        return None;
    }
    let year: i32 = year_str.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Per-field validation. Every failing field is reported; nothing invalid
/// proceeds to normalization or rendering.
pub fn validate(kind: DocumentKind, fields: &BTreeMap<String, String>) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();
    for spec in kind.fields() {
        let value = fields.get(spec.name).map(|v| v.trim()).unwrap_or("");
        if value.is_empty() {
            if let Some(message) = spec.required {
                issues.push(FieldIssue::new(spec.name, message));
            }
            continue;
        }
        let ok = match spec.rule {
            FieldRule::Any => true,
            FieldRule::Date => parse_dmy(value).is_some(),
            FieldRule::Digits => value.chars().all(|c| c.is_ascii_digit()),
            FieldRule::Amount => !crate::format::filter_non_numbers(value).is_empty(),
        };
        if !ok {
            issues.push(FieldIssue::new(
                spec.name,
                match spec.rule {
                    FieldRule::Date => "Use the dd/mm/yyyy format",
                    FieldRule::Digits => "Digits only",
                    FieldRule::Amount => "Enter a valid amount",
                    FieldRule::Any => "Invalid value",
                },
            ));
        }
    }
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// Apply the per-field transforms and inject the derived `*InWords` values.
/// Unknown keys pass through trimmed, so a template can carry extra
/// placeholders the table does not know about.
pub fn normalize(kind: DocumentKind, fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for (key, value) in fields {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let spec = kind.fields().iter().find(|spec| spec.name == key);
        let rendered = match spec.map(|s| s.transform) {
            Some(FieldTransform::Upper) => trimmed.to_uppercase(),
            Some(FieldTransform::Title) => capitalize_every_word(trimmed),
            Some(FieldTransform::Amount) => format_amount(trimmed),
            Some(FieldTransform::Raw) | None => trimmed.to_string(),
        };
        out.insert(key.clone(), rendered);

        // Words conversion only fires once the date fully matches the
        // pattern; a half-typed value stays out of the map.
        if spec.map(|s| s.rule) == Some(FieldRule::Date) {
            if let Some(date) = parse_dmy(trimmed) {
                out.insert(format!("{key}InWords"), words::date_in_words(date));
            }
        }
    }

    match kind {
        DocumentKind::WrongTransfer => {
            if let Some(amount) = out.get("amount").cloned() {
                out.insert("amountInWords".to_string(), words::amount_in_words(&amount, &NAIRA));
            }
        }
        DocumentKind::Guardianship => {
            if let Some(age) = out.get("minorsAge") {
                if let Ok(age) = age.parse::<u64>() {
                    out.insert("minorsAgeInWords".to_string(), words::cardinal(age));
                }
            }
        }
        _ => {}
    }

    out
}

/// The user-editable download name, falling back to the per-kind default.
/// Path separators and quotes are stripped so the name is safe in a
/// Content-Disposition header.
pub fn output_file_name(kind: DocumentKind, normalized: &BTreeMap<String, String>) -> String {
    let name = normalized
        .get("outputFileName")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| kind.default_output_file_name(normalized));
    name.chars()
        .filter(|c| !matches!(c, '/' | '\\' | '"' | '\u{0}'..='\u{1f}'))
        .collect()
}
