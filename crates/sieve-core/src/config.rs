use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::field::CanonicalField;
use crate::{Error, Result};

/// How a name fragment is split into first and last name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameParsingMode {
    /// Exactly two whitespace separated parts.
    #[default]
    StrictTwoPart,
    /// Two or more parts; everything after the first becomes the last name.
    LenientMultiPart,
}

impl NameParsingMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StrictTwoPart => "strict_two_part",
            Self::LenientMultiPart => "lenient_multi_part",
        }
    }
}

impl std::fmt::Display for NameParsingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NameParsingMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "strict_two_part" | "strict" => Ok(Self::StrictTwoPart),
            "lenient_multi_part" | "lenient" => Ok(Self::LenientMultiPart),
            _ => Err(Error::InvalidNameMode(s.to_string())),
        }
    }
}

/// A single entry of the label classification table. Rules are evaluated in
/// declaration order and the first rule with a matching keyword wins, so the
/// same canonical field may appear more than once at different priorities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub field: CanonicalField,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new<I, S>(field: CanonicalField, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            CanonicalField::LastSeenDate,
            ["last_seen", "last seen", "lastseen"],
        ),
        KeywordRule::new(CanonicalField::DateOfBirth, ["birth", "dob"]),
        KeywordRule::new(CanonicalField::Email, ["email", "e-mail"]),
        KeywordRule::new(CanonicalField::Mobile, ["mobile", "cell"]),
        KeywordRule::new(
            CanonicalField::Landline,
            ["landline", "home_phone", "work_phone", "fixed"],
        ),
        KeywordRule::new(CanonicalField::Mobile, ["phone"]),
        KeywordRule::new(CanonicalField::Address, ["address"]),
        KeywordRule::new(CanonicalField::Name, ["name"]),
    ]
}

fn default_address_blacklist() -> Vec<String> {
    [
        "street", "avenue", "road", "drive", "lane", "court", "place", "way", "crescent", "close",
        "terrace", "parade", "boulevard", "gordonvale", "qld", "nsw", "vic", "wa", "sa", "tas",
        "nt", "act", "munno", "para",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Options consumed by the normalization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub name_parsing_mode: NameParsingMode,
    /// Number of leading characters of an address that must contain a digit.
    pub address_digit_window: usize,
    pub address_min_length: usize,
    pub required_fields: Vec<CanonicalField>,
    pub group_size: usize,
    pub entity_type_keywords: Vec<KeywordRule>,
    /// Whole words that disqualify a name fragment.
    pub address_blacklist: Vec<String>,
    /// Fragments reporting a lower confidence are dropped during mapping.
    pub min_confidence: f64,
    /// Keep invalid records in the raw output set.
    pub include_invalid_in_raw: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name_parsing_mode: NameParsingMode::default(),
            address_digit_window: 5,
            address_min_length: 10,
            required_fields: vec![CanonicalField::Mobile, CanonicalField::Address],
            group_size: 25,
            entity_type_keywords: default_keyword_rules(),
            address_blacklist: default_address_blacklist(),
            min_confidence: 0.0,
            include_invalid_in_raw: true,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_name_parsing_mode(mut self, mode: NameParsingMode) -> Self {
        self.name_parsing_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_address_digit_window(mut self, window: usize) -> Self {
        self.address_digit_window = window;
        self
    }

    #[must_use]
    pub fn with_required_fields(mut self, fields: Vec<CanonicalField>) -> Self {
        self.required_fields = fields;
        self
    }

    #[must_use]
    pub const fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.group_size == 0 {
            return Err(Error::InvalidConfig("group_size must be at least 1".into()));
        }
        if self.address_digit_window == 0 {
            return Err(Error::InvalidConfig(
                "address_digit_window must be at least 1".into(),
            ));
        }
        if !self.min_confidence.is_finite() {
            return Err(Error::InvalidConfig("min_confidence must be finite".into()));
        }
        if self.entity_type_keywords.is_empty() {
            return Err(Error::InvalidConfig(
                "entity_type_keywords must contain at least one rule".into(),
            ));
        }
        for rule in &self.entity_type_keywords {
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(Error::InvalidConfig(format!(
                    "keyword rule for {} has no keywords",
                    rule.field
                )));
            }
        }
        Ok(())
    }
}

/// Options for the extraction driver that feeds the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub max_workers: usize,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_workers: 3,
            timeout_secs: 120,
            max_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(Error::InvalidConfig("max_workers must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeout_secs must be at least 1".into()));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineConfig,
    pub driver: DriverConfig,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.driver.validate()
    }
}
