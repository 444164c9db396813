#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod field;
pub mod ingest;
pub mod record;

pub use config::{DriverConfig, KeywordRule, NameParsingMode, PipelineConfig, Settings};
pub use error::{Error, Result};
pub use field::CanonicalField;
pub use ingest::{
    collect_batch, BatchOutput, BatchStats, ContactPipeline, DocumentExtraction, DocumentOutcome,
    DocumentStatus, DocumentSummary, DuplicateGroup, ExtractionError, ExtractionSource,
    FailedDocument, JsonFileSource, RawFragment, Rejection,
};
pub use record::{FieldRejection, Record, EXPORT_COLUMNS};
