mod assembler;
mod dedup;
mod extractor;
mod grouper;
mod mapper;
mod pipeline;
mod sanitizer;
mod validate;

pub use assembler::RecordAssembler;
pub use dedup::{
    deduplicate, group_by_mobile, select_survivor, Deduplication, DuplicateGroup, ExcludedRecord,
};
pub use extractor::{
    collect_batch, DocumentExtraction, DocumentOutcome, ExtractionError, ExtractionResult,
    ExtractionSource, JsonFileSource, RawFragment,
};
pub use grouper::group;
pub use mapper::{Candidate, CanonicalFieldSet, EntityMapper};
pub use pipeline::{
    BatchOutput, BatchStats, ContactPipeline, DocumentStatus, DocumentSummary, FailedDocument,
};
pub use sanitizer::sanitize;
pub use validate::{
    digits_only, validate_date, validate_email, validate_phone, Accepted, AddressValidator,
    FieldValidators, NameValidator, PersonName, Rejection, PHONE_DIGITS,
};
