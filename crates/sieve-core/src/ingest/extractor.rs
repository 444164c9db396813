use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::DriverConfig;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction failed: {0}")]
    Failed(String),
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),
    #[error("Rate limited")]
    RateLimited,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed extraction output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ExtractionError {
    /// Transient failures worth another attempt.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::RateLimited)
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

const fn default_confidence() -> f64 {
    1.0
}

/// One entity span reported by the document extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    #[serde(alias = "type")]
    pub type_label: String,
    #[serde(default, alias = "mention_text", alias = "mentionText")]
    pub value: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl RawFragment {
    #[must_use]
    pub fn new(type_label: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            type_label: type_label.into(),
            value: Some(value.into()),
            confidence,
        }
    }
}

/// All fragments extracted from a single source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentExtraction {
    pub source_file: String,
    #[serde(default, alias = "entities")]
    pub fragments: Vec<RawFragment>,
}

impl DocumentExtraction {
    #[must_use]
    pub fn new(source_file: impl Into<String>, fragments: Vec<RawFragment>) -> Self {
        Self {
            source_file: source_file.into(),
            fragments,
        }
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: RawFragment) -> Self {
        self.fragments.push(fragment);
        self
    }
}

/// Result of extracting one document. Failed documents are reported but
/// never assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    Extracted(DocumentExtraction),
    Failed { source_file: String, reason: String },
}

impl DocumentOutcome {
    #[must_use]
    pub fn failed(source_file: impl Into<String>, error: &ExtractionError) -> Self {
        Self::Failed {
            source_file: source_file.into(),
            reason: error.to_string(),
        }
    }

    #[must_use]
    pub fn source_file(&self) -> &str {
        match self {
            Self::Extracted(doc) => &doc.source_file,
            Self::Failed { source_file, .. } => source_file,
        }
    }
}

#[async_trait::async_trait]
pub trait ExtractionSource: Send + Sync {
    async fn extract(&self, input: &str) -> ExtractionResult<DocumentExtraction>;
}

#[derive(Deserialize)]
struct RecordedExtraction {
    #[serde(default)]
    source_file: Option<String>,
    #[serde(default, alias = "entities")]
    fragments: Vec<serde_json::Value>,
}

/// Keeps the well-formed fragments of a recorded document. A fragment that
/// does not decode is dropped with a warning; its siblings are unaffected.
fn decode_fragments(source_file: &str, values: Vec<serde_json::Value>) -> Vec<RawFragment> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<RawFragment>(value) {
            Ok(fragment) => Some(fragment),
            Err(e) => {
                tracing::warn!(source_file, index, "Dropping malformed fragment: {}", e);
                None
            }
        })
        .collect()
}

/// Replays extraction output previously saved as JSON, one file per document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSource;

#[async_trait::async_trait]
impl ExtractionSource for JsonFileSource {
    async fn extract(&self, input: &str) -> ExtractionResult<DocumentExtraction> {
        let path = Path::new(input);
        let content = tokio::fs::read_to_string(path).await?;
        let recorded: RecordedExtraction = serde_json::from_str(&content)?;

        let source_file = recorded.source_file.unwrap_or_else(|| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map_or_else(|| input.to_string(), String::from)
        });

        let fragments = decode_fragments(&source_file, recorded.fragments);
        Ok(DocumentExtraction::new(source_file, fragments))
    }
}

async fn extract_with_retry<S>(
    source: &S,
    input: &str,
    config: &DriverConfig,
) -> ExtractionResult<DocumentExtraction>
where
    S: ExtractionSource + ?Sized,
{
    let timeout = Duration::from_secs(config.timeout_secs);
    let mut attempt = 1;

    loop {
        let result = match tokio::time::timeout(timeout, source.extract(input)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::Timeout(config.timeout_secs)),
        };

        match result {
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(input, attempt, "Extraction attempt failed, retrying: {}", e);
                tokio::time::sleep(Duration::from_millis(config.retry_delay_ms)).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Extracts every input with at most `max_workers` extractions in flight.
/// Outcomes come back in input order; a failing document is reported as
/// [`DocumentOutcome::Failed`] without affecting the others.
pub async fn collect_batch<S>(
    source: Arc<S>,
    inputs: &[String],
    config: &DriverConfig,
) -> Vec<DocumentOutcome>
where
    S: ExtractionSource + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.max_workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, input) in inputs.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();

        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(permit) => {
                    let result = extract_with_retry(source.as_ref(), &input, &config).await;
                    drop(permit);
                    result
                }
                Err(_) => Err(ExtractionError::Failed("worker pool closed".into())),
            };
            (index, input, result)
        });
    }

    let mut slots: Vec<Option<DocumentOutcome>> = inputs.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, _, Ok(extraction))) => {
                slots[index] = Some(DocumentOutcome::Extracted(extraction));
            }
            Ok((index, input, Err(e))) => {
                tracing::warn!(input = %input, "Extraction failed: {}", e);
                slots[index] = Some(DocumentOutcome::failed(input, &e));
            }
            Err(e) => {
                tracing::error!("Extraction task aborted: {}", e);
            }
        }
    }

    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, input)| {
            slot.unwrap_or_else(|| DocumentOutcome::Failed {
                source_file: input.clone(),
                reason: "extraction task aborted".into(),
            })
        })
        .collect()
}
