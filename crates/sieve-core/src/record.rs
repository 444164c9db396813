use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::CanonicalField;
use crate::ingest::Rejection;

/// Column order used by every export of a record.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "first_name",
    "last_name",
    "mobile",
    "landline",
    "address",
    "email",
    "date_of_birth",
    "last_seen_date",
    "source_file",
];

/// A candidate value that failed validation, kept for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRejection {
    pub field: CanonicalField,
    pub value: String,
    pub reason: Rejection,
}

/// One contact assembled from a single source document.
///
/// Everything except the duplicate flag is fixed once the assembler returns
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) id: Uuid,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) mobile: String,
    pub(crate) landline: String,
    pub(crate) address: String,
    pub(crate) email: String,
    pub(crate) date_of_birth: String,
    pub(crate) last_seen_date: String,
    pub(crate) source_file: String,
    pub(crate) is_valid: bool,
    pub(crate) is_duplicate: bool,
    pub(crate) completeness_score: u32,
    pub(crate) confidence_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) rejections: Vec<FieldRejection>,
}

impl Record {
    pub(crate) fn empty(source_file: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name: String::new(),
            last_name: String::new(),
            mobile: String::new(),
            landline: String::new(),
            address: String::new(),
            email: String::new(),
            date_of_birth: String::new(),
            last_seen_date: String::new(),
            source_file: source_file.to_string(),
            is_valid: false,
            is_duplicate: false,
            completeness_score: 0,
            confidence_score: 0.0,
            rejections: Vec::new(),
        }
    }

    /// Computes the derived score and validity. Called once by the assembler.
    ///
    /// A record is valid when every required field is present and no field
    /// that had candidates was left empty because all of them were rejected.
    pub(crate) fn finalize(mut self, required_fields: &[CanonicalField]) -> Self {
        self.completeness_score = self.content().iter().filter(|v| !v.is_empty()).count() as u32;
        let rejected_field = self.rejections.iter().any(|r| !self.has(r.field));
        self.is_valid = !rejected_field && required_fields.iter().all(|&field| self.has(field));
        self
    }

    pub(crate) fn mark_duplicate(&mut self) {
        self.is_duplicate = true;
    }

    fn content(&self) -> [&str; 8] {
        [
            &self.first_name,
            &self.last_name,
            &self.mobile,
            &self.landline,
            &self.address,
            &self.email,
            &self.date_of_birth,
            &self.last_seen_date,
        ]
    }

    /// Whether the canonical field ended up with an accepted value.
    #[must_use]
    pub fn has(&self, field: CanonicalField) -> bool {
        let value = match field {
            CanonicalField::Name => &self.first_name,
            CanonicalField::Mobile => &self.mobile,
            CanonicalField::Landline => &self.landline,
            CanonicalField::Address => &self.address,
            CanonicalField::Email => &self.email,
            CanonicalField::DateOfBirth => &self.date_of_birth,
            CanonicalField::LastSeenDate => &self.last_seen_date,
        };
        !value.is_empty()
    }

    /// Values in [`EXPORT_COLUMNS`] order.
    #[must_use]
    pub fn export_row(&self) -> [&str; 9] {
        let [first, last, mobile, landline, address, email, dob, last_seen] = self.content();
        [
            first,
            last,
            mobile,
            landline,
            address,
            email,
            dob,
            last_seen,
            &self.source_file,
        ]
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn landline(&self) -> &str {
        &self.landline
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn last_seen_date(&self) -> &str {
        &self.last_seen_date
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub const fn is_duplicate(&self) -> bool {
        self.is_duplicate
    }

    pub const fn completeness_score(&self) -> u32 {
        self.completeness_score
    }

    pub const fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn rejections(&self) -> &[FieldRejection] {
        &self.rejections
    }
}
