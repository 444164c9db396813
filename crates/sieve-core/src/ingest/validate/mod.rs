mod address;
mod date;
mod email;
mod name;
mod phone;

pub use address::AddressValidator;
pub use date::validate_date;
pub use email::validate_email;
pub use name::{NameValidator, PersonName};
pub use phone::{digits_only, validate_phone, PHONE_DIGITS};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{NameParsingMode, PipelineConfig};
use crate::field::CanonicalField;
use crate::Result;

/// Why a candidate value was not accepted. Rejections are ordinary values:
/// the field is left empty and the reason kept for review.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    #[error("value is empty")]
    EmptyValue,
    #[error("name contains a digit")]
    NameContainsDigit,
    #[error("name contains address word '{word}'")]
    NameContainsAddressWord { word: String },
    #[error("name has {found} part(s), not allowed under {mode}")]
    NamePartCount { found: usize, mode: NameParsingMode },
    #[error("first name '{first}' is shorter than 2 characters")]
    FirstNameTooShort { first: String },
    #[error("phone has {digits} digit(s), expected {expected}", expected = PHONE_DIGITS)]
    PhoneLength { digits: usize },
    #[error("address is {length} characters, minimum is {minimum}")]
    AddressTooShort { length: usize, minimum: usize },
    #[error("no digit in the first {window} characters of the address")]
    AddressMissingStreetNumber { window: usize },
    #[error("malformed email: {reason}")]
    EmailMalformed { reason: String },
    #[error("date contains no digit")]
    DateMissingDigit,
}

/// A value that passed its field validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Accepted {
    Name(PersonName),
    Value(String),
}

impl std::fmt::Display for Accepted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "first_name={} last_name={}", name.first, name.last),
            Self::Value(value) => f.write_str(value),
        }
    }
}

/// The five field validators, configured once per pipeline.
pub struct FieldValidators {
    name: NameValidator,
    address: AddressValidator,
}

impl FieldValidators {
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            name: NameValidator::new(config.name_parsing_mode, &config.address_blacklist)?,
            address: AddressValidator::new(config.address_min_length, config.address_digit_window),
        })
    }

    #[must_use]
    pub const fn name(&self) -> &NameValidator {
        &self.name
    }

    #[must_use]
    pub const fn address(&self) -> &AddressValidator {
        &self.address
    }

    pub fn validate(&self, field: CanonicalField, raw: &str) -> std::result::Result<Accepted, Rejection> {
        match field {
            CanonicalField::Name => self.name.validate(raw).map(Accepted::Name),
            CanonicalField::Mobile | CanonicalField::Landline => {
                validate_phone(raw).map(Accepted::Value)
            }
            CanonicalField::Address => self.address.validate(raw).map(Accepted::Value),
            CanonicalField::Email => validate_email(raw).map(Accepted::Value),
            CanonicalField::DateOfBirth | CanonicalField::LastSeenDate => {
                validate_date(raw).map(Accepted::Value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_field() {
        let validators = FieldValidators::from_config(&PipelineConfig::default()).unwrap();

        assert_eq!(
            validators.validate(CanonicalField::Landline, "(07) 4056 1234"),
            Ok(Accepted::Value("0740561234".into()))
        );
        assert!(matches!(
            validators.validate(CanonicalField::Name, "John Smith"),
            Ok(Accepted::Name(_))
        ));
        assert_eq!(
            validators.validate(CanonicalField::Email, "nobody"),
            Err(Rejection::EmailMalformed {
                reason: "must contain exactly one '@'".into()
            })
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::PhoneLength { digits: 5 }.to_string(),
            "phone has 5 digit(s), expected 10"
        );
        assert_eq!(
            Rejection::NamePartCount {
                found: 3,
                mode: NameParsingMode::StrictTwoPart
            }
            .to_string(),
            "name has 3 part(s), not allowed under strict_two_part"
        );
    }
}
