use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use super::assembler::RecordAssembler;
use super::dedup::{deduplicate, DuplicateGroup};
use super::extractor::{DocumentExtraction, DocumentOutcome};
use super::grouper::group;
use super::mapper::EntityMapper;
use crate::config::PipelineConfig;
use crate::record::Record;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    pub documents_processed: usize,
    pub documents_empty: usize,
    pub documents_failed: usize,
    pub records_raw: usize,
    pub records_valid: usize,
    pub records_filtered: usize,
    pub duplicates: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl BatchStats {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            documents_processed: 0,
            documents_empty: 0,
            documents_failed: 0,
            records_raw: 0,
            records_valid: 0,
            records_filtered: 0,
            duplicates: 0,
            started_at,
            finished_at: started_at,
            duration_ms: 0,
        }
    }

    pub const fn total_documents(&self) -> usize {
        self.documents_processed + self.documents_failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub source_file: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// A record was assembled from the document.
    Success,
    /// Extraction worked but no usable fragment survived mapping.
    NoData,
    Error,
}

/// Per-document line of the processing summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub source_file: String,
    pub status: DocumentStatus,
    pub records_raw: usize,
    pub records_filtered: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything handed to export and review for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub raw_groups: Vec<Vec<Record>>,
    pub filtered_groups: Vec<Vec<Record>>,
    pub duplicates: Vec<DuplicateGroup>,
    pub duplicate_report: BTreeMap<String, Vec<String>>,
    pub failed_documents: Vec<FailedDocument>,
    pub documents: Vec<DocumentSummary>,
    pub stats: BatchStats,
}

impl BatchOutput {
    pub fn raw_records(&self) -> impl Iterator<Item = &Record> {
        self.raw_groups.iter().flatten()
    }

    pub fn filtered_records(&self) -> impl Iterator<Item = &Record> {
        self.filtered_groups.iter().flatten()
    }
}

/// Sanitize, map, validate and assemble per document, then deduplicate and
/// group over the whole batch. Purely synchronous.
pub struct ContactPipeline {
    config: PipelineConfig,
    mapper: EntityMapper,
    assembler: RecordAssembler,
}

impl ContactPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let mapper = EntityMapper::from_config(&config);
        let assembler = RecordAssembler::from_config(&config)?;

        Ok(Self {
            config,
            mapper,
            assembler,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub const fn mapper(&self) -> &EntityMapper {
        &self.mapper
    }

    #[must_use]
    pub const fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// `None` when the document has no usable fragments.
    #[must_use]
    pub fn process_document(&self, document: &DocumentExtraction) -> Option<Record> {
        let fields = self.mapper.map(&document.fragments);
        if fields.is_empty() {
            tracing::info!(source_file = %document.source_file, "No usable fragments");
            return None;
        }
        Some(self.assembler.assemble(&fields, &document.source_file))
    }

    pub fn process_batch<I>(&self, outcomes: I) -> BatchOutput
    where
        I: IntoIterator<Item = DocumentOutcome>,
    {
        let started = std::time::Instant::now();
        let mut stats = BatchStats::new(Utc::now());
        let mut records = Vec::new();
        let mut failed_documents = Vec::new();
        let mut documents = Vec::new();
        let mut record_ids = Vec::new();

        for outcome in outcomes {
            match outcome {
                DocumentOutcome::Extracted(document) => {
                    stats.documents_processed += 1;
                    let status = match self.process_document(&document) {
                        Some(record) => {
                            record_ids.push(Some(record.id()));
                            records.push(record);
                            DocumentStatus::Success
                        }
                        None => {
                            record_ids.push(None);
                            stats.documents_empty += 1;
                            DocumentStatus::NoData
                        }
                    };
                    documents.push(DocumentSummary {
                        source_file: document.source_file,
                        status,
                        records_raw: 0,
                        records_filtered: 0,
                        error: None,
                    });
                }
                DocumentOutcome::Failed {
                    source_file,
                    reason,
                } => {
                    stats.documents_failed += 1;
                    record_ids.push(None);
                    documents.push(DocumentSummary {
                        source_file: source_file.clone(),
                        status: DocumentStatus::Error,
                        records_raw: 0,
                        records_filtered: 0,
                        error: Some(reason.clone()),
                    });
                    failed_documents.push(FailedDocument {
                        source_file,
                        reason,
                    });
                }
            }
        }

        let valid: Vec<Record> = records.iter().filter(|r| r.is_valid()).cloned().collect();
        let deduplication = deduplicate(&valid);

        let duplicate_ids = deduplication.duplicate_ids();
        for record in &mut records {
            if duplicate_ids.contains(&record.id()) {
                record.mark_duplicate();
            }
        }

        let raw: Vec<Record> = if self.config.include_invalid_in_raw {
            records
        } else {
            records.into_iter().filter(Record::is_valid).collect()
        };

        let raw_ids: HashSet<Uuid> = raw.iter().map(Record::id).collect();
        let filtered_ids: HashSet<Uuid> = deduplication.filtered.iter().map(Record::id).collect();
        for (summary, id) in documents.iter_mut().zip(&record_ids) {
            if let Some(id) = id {
                summary.records_raw = usize::from(raw_ids.contains(id));
                summary.records_filtered = usize::from(filtered_ids.contains(id));
            }
        }

        stats.records_raw = raw.len();
        stats.records_valid = valid.len();
        stats.records_filtered = deduplication.filtered.len();
        stats.duplicates = deduplication.duplicate_count();
        stats.finished_at = Utc::now();
        stats.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            documents = stats.documents_processed,
            failed = stats.documents_failed,
            raw = stats.records_raw,
            valid = stats.records_valid,
            filtered = stats.records_filtered,
            duplicates = stats.duplicates,
            "Batch processed"
        );

        let group_size = self.config.group_size;
        BatchOutput {
            raw_groups: group(&raw, group_size),
            filtered_groups: group(&deduplication.filtered, group_size),
            duplicate_report: deduplication.report(),
            duplicates: deduplication.groups,
            failed_documents,
            documents,
            stats,
        }
    }
}
