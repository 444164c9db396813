use std::collections::HashSet;

use sieve_core::ingest::{group, AddressValidator, CanonicalFieldSet, RecordAssembler};
use sieve_core::{
    CanonicalField, ContactPipeline, DocumentExtraction, DocumentOutcome, NameParsingMode,
    PipelineConfig, RawFragment, Record,
};

const DEMPSEY: &str = "295 Dempsey Street, GORDONVALE QLD 4865";

fn john_smith(mobile: &str) -> DocumentExtraction {
    DocumentExtraction::new(
        "john_smith.pdf",
        vec![
            RawFragment::new("full_name", "John Smith", 0.95),
            RawFragment::new("mobile_number", mobile, 0.9),
            RawFragment::new("property_address", DEMPSEY, 0.85),
        ],
    )
}

fn pipeline(config: PipelineConfig) -> ContactPipeline {
    ContactPipeline::new(config).unwrap()
}

#[test]
fn scenario_clean_record() {
    let record = pipeline(PipelineConfig::default())
        .process_document(&john_smith("(049) 917-1023"))
        .unwrap();

    assert_eq!(record.first_name(), "John");
    assert_eq!(record.last_name(), "Smith");
    assert_eq!(record.mobile(), "0499171023");
    assert_eq!(record.address(), DEMPSEY);
    assert!(record.is_valid());
}

#[test]
fn scenario_short_mobile_is_rejected() {
    let record = pipeline(PipelineConfig::default())
        .process_document(&john_smith("12345"))
        .unwrap();

    assert_eq!(record.mobile(), "");
    assert!(!record.is_valid());

    let relaxed = PipelineConfig::default().with_required_fields(vec![CanonicalField::Address]);
    let record = pipeline(relaxed.clone())
        .process_document(&john_smith("12345"))
        .unwrap();
    assert!(!record.is_valid());

    let without_mobile = DocumentExtraction::new(
        "no_mobile.pdf",
        vec![
            RawFragment::new("full_name", "John Smith", 0.95),
            RawFragment::new("property_address", DEMPSEY, 0.85),
        ],
    );
    let record = pipeline(relaxed)
        .process_document(&without_mobile)
        .unwrap();
    assert!(record.is_valid());
}

#[test]
fn scenario_name_containing_address_substring() {
    let doc = DocumentExtraction::new(
        "cristian.pdf",
        vec![RawFragment::new("full_name", "Cristian Martinez", 0.9)],
    );

    let record = pipeline(PipelineConfig::default())
        .process_document(&doc)
        .unwrap();

    assert_eq!(record.first_name(), "Cristian");
    assert_eq!(record.last_name(), "Martinez");
}

#[test]
fn scenario_more_complete_duplicate_survives() {
    let sparse = DocumentExtraction::new(
        "sparse.pdf",
        vec![
            RawFragment::new("full_name", "John Smith", 0.9),
            RawFragment::new("mobile", "0499171023", 0.9),
            RawFragment::new("address", DEMPSEY, 0.9),
            RawFragment::new("email", "john@example.com", 0.9),
        ],
    );
    let rich = DocumentExtraction::new(
        "rich.pdf",
        vec![
            RawFragment::new("full_name", "John Smith", 0.9),
            RawFragment::new("mobile", "0499 171 023", 0.9),
            RawFragment::new("address", DEMPSEY, 0.9),
            RawFragment::new("email", "john@example.com", 0.9),
            RawFragment::new("home_phone", "07 4056 1234", 0.9),
            RawFragment::new("dob", "03/07/1985", 0.9),
        ],
    );

    let output = pipeline(PipelineConfig::default()).process_batch(vec![
        DocumentOutcome::Extracted(sparse),
        DocumentOutcome::Extracted(rich),
    ]);

    let raw: Vec<&Record> = output.raw_records().collect();
    assert_eq!(raw[0].completeness_score(), 5);
    assert_eq!(raw[1].completeness_score(), 7);

    let filtered: Vec<&Record> = output.filtered_records().collect();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].source_file(), "rich.pdf");
    assert_eq!(
        output.duplicate_report.get("0499171023"),
        Some(&vec!["sparse.pdf".to_string()])
    );
}

#[test]
fn scenario_fifty_seven_records_make_three_groups() {
    let outcomes: Vec<DocumentOutcome> = (0..57)
        .map(|i| {
            DocumentOutcome::Extracted(DocumentExtraction::new(
                format!("doc_{i:02}.pdf"),
                vec![
                    RawFragment::new("full_name", "John Smith", 0.9),
                    RawFragment::new("mobile", format!("04000000{i:02}"), 0.9),
                    RawFragment::new("address", DEMPSEY, 0.9),
                ],
            ))
        })
        .collect();

    let output = pipeline(PipelineConfig::default()).process_batch(outcomes);

    let sizes: Vec<usize> = output.filtered_groups.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![25, 25, 7]);
    let raw_sizes: Vec<usize> = output.raw_groups.iter().map(Vec::len).collect();
    assert_eq!(raw_sizes, vec![25, 25, 7]);
}

#[test]
fn scenario_address_without_street_number() {
    for window in [3, 5] {
        let config = PipelineConfig::default().with_address_digit_window(window);
        let assembler = RecordAssembler::from_config(&config).unwrap();
        let fields = CanonicalFieldSet::new().with(CanonicalField::Address, "Munno Para Road");

        let record = assembler.assemble(&fields, "munno.pdf");

        assert_eq!(record.address(), "");
    }
}

#[test]
fn property_filtered_mobiles_are_unique() {
    let outcomes: Vec<DocumentOutcome> = (0..40)
        .map(|i| {
            let mut fragments = vec![
                RawFragment::new("full_name", "Mary Jane", 0.9),
                RawFragment::new("mobile", format!("041100000{}", i % 6), 0.9),
                RawFragment::new("address", format!("{} Lake Street, Cairns", i + 1), 0.9),
            ];
            if i % 3 == 0 {
                fragments.push(RawFragment::new("email", format!("m{i}@example.com"), 0.9));
            }
            DocumentOutcome::Extracted(DocumentExtraction::new(format!("{i}.pdf"), fragments))
        })
        .collect();

    let output = pipeline(PipelineConfig::default()).process_batch(outcomes);

    let mut seen = HashSet::new();
    for record in output.filtered_records() {
        assert!(record.is_valid());
        assert!(seen.insert(record.mobile().to_string()));
    }
    assert_eq!(seen.len(), 6);
}

#[test]
fn property_accepted_addresses_meet_policy() {
    let validator = AddressValidator::new(10, 5);
    for raw in [
        DEMPSEY,
        "Munno Para Road",
        "12 Rd",
        "Lot 7 Bruce Highway",
        "PO Box 1234, Cairns",
    ] {
        if let Ok(address) = validator.validate(raw) {
            assert!(address.chars().count() >= 10);
            assert!(address.chars().take(5).any(|c| c.is_ascii_digit()));
        }
    }
}

#[test]
fn property_grouping_is_lossless() {
    let items: Vec<u32> = (0..83).collect();
    for size in [1, 7, 25, 83, 100] {
        let groups = group(&items, size);
        assert_eq!(groups.len(), items.len().div_ceil(size));
        assert_eq!(groups.concat(), items);
    }
}

#[test]
fn lenient_mode_keeps_middle_names() {
    let doc = DocumentExtraction::new(
        "mjw.pdf",
        vec![RawFragment::new("full_name", "Mary Jane Watson 🕷", 0.9)],
    );

    let strict = pipeline(PipelineConfig::default())
        .process_document(&doc)
        .unwrap();
    assert_eq!(strict.first_name(), "");

    let lenient = pipeline(
        PipelineConfig::default().with_name_parsing_mode(NameParsingMode::LenientMultiPart),
    )
    .process_document(&doc)
    .unwrap();
    assert_eq!(lenient.first_name(), "Mary");
    assert_eq!(lenient.last_name(), "Jane Watson");
}

#[test]
fn failed_documents_do_not_stop_the_batch() {
    let output = pipeline(PipelineConfig::default()).process_batch(vec![
        DocumentOutcome::Failed {
            source_file: "timeout.pdf".into(),
            reason: "Extraction timed out after 120s".into(),
        },
        DocumentOutcome::Extracted(john_smith("0499171023")),
    ]);

    assert_eq!(output.failed_documents.len(), 1);
    assert_eq!(output.filtered_records().count(), 1);
}
