use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::extractor::RawFragment;
use super::sanitizer::sanitize;
use crate::config::{KeywordRule, PipelineConfig};
use crate::field::CanonicalField;

/// A sanitized value waiting for its field validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: String,
    pub confidence: f64,
}

impl Candidate {
    #[must_use]
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }
}

/// Candidate values per canonical field, in fragment order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalFieldSet {
    fields: BTreeMap<CanonicalField, Vec<Candidate>>,
}

impl CanonicalFieldSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.push(field, Candidate::new(value, 1.0));
        self
    }

    pub fn push(&mut self, field: CanonicalField, candidate: Candidate) {
        self.fields.entry(field).or_default().push(candidate);
    }

    #[must_use]
    pub fn candidates(&self, field: CanonicalField) -> &[Candidate] {
        self.fields
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(Vec::is_empty)
    }

    pub fn candidate_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }
}

struct CompiledRule {
    field: CanonicalField,
    keywords: Vec<String>,
}

/// Routes raw fragments to canonical fields by case-insensitive substring
/// matching of their type label against a priority-ordered rule table.
pub struct EntityMapper {
    rules: Vec<CompiledRule>,
    min_confidence: f64,
}

impl EntityMapper {
    #[must_use]
    pub fn new(rules: &[KeywordRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| CompiledRule {
                field: rule.field,
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();

        Self {
            rules,
            min_confidence: 0.0,
        }
    }

    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.entity_type_keywords).with_min_confidence(config.min_confidence)
    }

    #[must_use]
    pub const fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// First rule, in declaration order, with a keyword contained in the label.
    #[must_use]
    pub fn classify(&self, type_label: &str) -> Option<CanonicalField> {
        let label = type_label.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| label.contains(k.as_str())))
            .map(|rule| rule.field)
    }

    /// Sanitizes and classifies fragments. Malformed fragments are dropped
    /// with a warning, unmatched labels silently.
    #[must_use]
    pub fn map(&self, fragments: &[RawFragment]) -> CanonicalFieldSet {
        let mut set = CanonicalFieldSet::new();

        for fragment in fragments {
            let Some(raw_value) = fragment.value.as_deref() else {
                tracing::warn!(label = %fragment.type_label, "Dropping fragment without a value");
                continue;
            };
            if fragment.type_label.trim().is_empty() {
                tracing::warn!("Dropping fragment without a type label");
                continue;
            }
            if !fragment.confidence.is_finite() {
                tracing::warn!(label = %fragment.type_label, "Dropping fragment with invalid confidence");
                continue;
            }
            if fragment.confidence < self.min_confidence {
                tracing::debug!(
                    label = %fragment.type_label,
                    confidence = fragment.confidence,
                    "Dropping low confidence fragment"
                );
                continue;
            }

            let Some(field) = self.classify(&fragment.type_label) else {
                tracing::debug!(label = %fragment.type_label, "Unmatched type label");
                continue;
            };

            let value = sanitize(raw_value);
            if value.is_empty() {
                tracing::debug!(label = %fragment.type_label, "Fragment empty after sanitizing");
                continue;
            }

            set.push(field, Candidate::new(value, fragment.confidence));
        }

        set
    }
}

impl Default for EntityMapper {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}
