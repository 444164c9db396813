use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::Rejection;
use crate::config::NameParsingMode;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

pub struct NameValidator {
    mode: NameParsingMode,
    blacklist: Option<Regex>,
}

impl NameValidator {
    /// Blacklisted words only match as whole words, so "st" never rejects
    /// "Cristian".
    pub fn new(mode: NameParsingMode, blacklist: &[String]) -> Result<Self> {
        let words: Vec<String> = blacklist
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(regex::escape)
            .collect();

        let blacklist = if words.is_empty() {
            None
        } else {
            let pattern = format!(r"\b(?:{})\b", words.join("|"));
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::InvalidConfig(format!("address blacklist: {e}")))?;
            Some(regex)
        };

        Ok(Self { mode, blacklist })
    }

    #[must_use]
    pub const fn mode(&self) -> NameParsingMode {
        self.mode
    }

    pub fn validate(&self, raw: &str) -> std::result::Result<PersonName, Rejection> {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        if parts.is_empty() {
            return Err(Rejection::EmptyValue);
        }

        if parts.iter().any(|p| p.chars().any(char::is_numeric)) {
            return Err(Rejection::NameContainsDigit);
        }

        if let Some(found) = self.blacklist.as_ref().and_then(|re| re.find(raw)) {
            return Err(Rejection::NameContainsAddressWord {
                word: found.as_str().to_lowercase(),
            });
        }

        let allowed = match self.mode {
            NameParsingMode::StrictTwoPart => parts.len() == 2,
            NameParsingMode::LenientMultiPart => parts.len() >= 2,
        };
        if !allowed {
            return Err(Rejection::NamePartCount {
                found: parts.len(),
                mode: self.mode,
            });
        }

        let first = parts[0].to_string();
        if first.chars().count() < 2 {
            return Err(Rejection::FirstNameTooShort { first });
        }

        Ok(PersonName {
            first,
            last: parts[1..].join(" "),
        })
    }
}
