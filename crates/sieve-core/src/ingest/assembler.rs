use super::mapper::CanonicalFieldSet;
use super::validate::{Accepted, FieldValidators};
use crate::config::PipelineConfig;
use crate::field::CanonicalField;
use crate::record::{FieldRejection, Record};
use crate::Result;

/// Builds records from mapped fields. For each field the first candidate
/// accepted by its validator wins; a field with no accepted candidate stays
/// empty.
pub struct RecordAssembler {
    validators: FieldValidators,
    required_fields: Vec<CanonicalField>,
}

impl RecordAssembler {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            validators: FieldValidators::from_config(config)?,
            required_fields: config.required_fields.clone(),
        })
    }

    #[must_use]
    pub const fn validators(&self) -> &FieldValidators {
        &self.validators
    }

    #[must_use]
    pub fn assemble(&self, fields: &CanonicalFieldSet, source_file: &str) -> Record {
        let mut record = Record::empty(source_file);
        let mut confidences = Vec::new();

        for field in CanonicalField::ALL {
            for candidate in fields.candidates(field) {
                match self.validators.validate(field, &candidate.value) {
                    Ok(accepted) => {
                        apply(&mut record, field, accepted);
                        confidences.push(candidate.confidence);
                        break;
                    }
                    Err(reason) => {
                        tracing::debug!(
                            source_file,
                            field = %field,
                            value = %candidate.value,
                            "Rejected candidate: {}",
                            reason
                        );
                        record.rejections.push(FieldRejection {
                            field,
                            value: candidate.value.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        if !confidences.is_empty() {
            record.confidence_score = confidences.iter().sum::<f64>() / confidences.len() as f64;
        }

        record.finalize(&self.required_fields)
    }
}

fn apply(record: &mut Record, field: CanonicalField, accepted: Accepted) {
    match (field, accepted) {
        (_, Accepted::Name(name)) => {
            record.first_name = name.first;
            record.last_name = name.last;
        }
        (CanonicalField::Mobile, Accepted::Value(v)) => record.mobile = v,
        (CanonicalField::Landline, Accepted::Value(v)) => record.landline = v,
        (CanonicalField::Address, Accepted::Value(v)) => record.address = v,
        (CanonicalField::Email, Accepted::Value(v)) => record.email = v,
        (CanonicalField::DateOfBirth, Accepted::Value(v)) => record.date_of_birth = v,
        (CanonicalField::LastSeenDate, Accepted::Value(v)) => record.last_seen_date = v,
        (CanonicalField::Name, Accepted::Value(_)) => {}
    }
}
