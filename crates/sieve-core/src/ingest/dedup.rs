use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

use super::validate::digits_only;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    pub id: Uuid,
    pub source_file: String,
    pub completeness_score: u32,
}

/// Records that share a mobile number and the one kept from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub mobile: String,
    pub survivor_id: Uuid,
    pub survivor_source: String,
    pub excluded: Vec<ExcludedRecord>,
}

impl DuplicateGroup {
    pub fn record_count(&self) -> usize {
        self.excluded.len() + 1
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deduplication {
    pub filtered: Vec<Record>,
    pub groups: Vec<DuplicateGroup>,
}

impl Deduplication {
    /// Mobile number to the source files of the records that were dropped.
    #[must_use]
    pub fn report(&self) -> BTreeMap<String, Vec<String>> {
        self.groups
            .iter()
            .map(|g| {
                let sources = g.excluded.iter().map(|e| e.source_file.clone()).collect();
                (g.mobile.clone(), sources)
            })
            .collect()
    }

    #[must_use]
    pub fn duplicate_ids(&self) -> HashSet<Uuid> {
        self.groups
            .iter()
            .flat_map(|g| g.excluded.iter().map(|e| e.id))
            .collect()
    }

    pub fn duplicate_count(&self) -> usize {
        self.groups.iter().map(|g| g.excluded.len()).sum()
    }
}

/// Indices of records sharing a normalized mobile, in first-seen order.
/// Records without a mobile are never grouped.
#[must_use]
pub fn group_by_mobile(records: &[Record]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let mobile = digits_only(record.mobile());
        if mobile.is_empty() {
            continue;
        }

        if let Some(&slot) = positions.get(&mobile) {
            groups[slot].1.push(index);
        } else {
            positions.insert(mobile.clone(), groups.len());
            groups.push((mobile, vec![index]));
        }
    }

    groups
}

/// Highest completeness wins; among equals the earliest record is kept.
#[must_use]
pub fn select_survivor(records: &[Record], members: &[usize]) -> Option<usize> {
    members.iter().copied().reduce(|best, candidate| {
        if records[candidate].completeness_score() > records[best].completeness_score() {
            candidate
        } else {
            best
        }
    })
}

/// Keeps one record per mobile number. Records with an empty mobile pass
/// through untouched. The filtered set preserves input order.
#[must_use]
pub fn deduplicate(records: &[Record]) -> Deduplication {
    let mut dropped = vec![false; records.len()];
    let mut groups = Vec::new();

    for (mobile, members) in group_by_mobile(records) {
        if members.len() < 2 {
            continue;
        }
        let Some(survivor) = select_survivor(records, &members) else {
            continue;
        };

        let excluded: Vec<ExcludedRecord> = members
            .iter()
            .copied()
            .filter(|&i| i != survivor)
            .map(|i| {
                dropped[i] = true;
                ExcludedRecord {
                    id: records[i].id(),
                    source_file: records[i].source_file().to_string(),
                    completeness_score: records[i].completeness_score(),
                }
            })
            .collect();

        tracing::debug!(
            mobile = %mobile,
            survivor = %records[survivor].source_file(),
            excluded = excluded.len(),
            "Collapsed duplicate mobile"
        );

        groups.push(DuplicateGroup {
            mobile,
            survivor_id: records[survivor].id(),
            survivor_source: records[survivor].source_file().to_string(),
            excluded,
        });
    }

    let filtered = records
        .iter()
        .zip(&dropped)
        .filter(|(_, is_dropped)| !**is_dropped)
        .map(|(record, _)| record.clone())
        .collect();

    Deduplication { filtered, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::CanonicalField;

    fn record(source: &str, mobile: &str, extra_fields: u32) -> Record {
        let mut record = Record::empty(source);
        record.mobile = mobile.into();
        let slots = [
            &mut record.first_name,
            &mut record.last_name,
            &mut record.address,
            &mut record.email,
            &mut record.landline,
            &mut record.date_of_birth,
            &mut record.last_seen_date,
        ];
        for slot in slots.into_iter().take(extra_fields as usize) {
            *slot = "x".into();
        }
        record.finalize(&[CanonicalField::Mobile])
    }

    #[test]
    fn test_most_complete_survives() {
        let records = vec![
            record("a.pdf", "0499171023", 4),
            record("b.pdf", "0499171023", 6),
        ];
        assert_eq!(records[0].completeness_score(), 5);
        assert_eq!(records[1].completeness_score(), 7);

        let result = deduplicate(&records);

        assert_eq!(result.filtered.len(), 1);
        assert_eq!(result.filtered[0].source_file(), "b.pdf");
        assert_eq!(
            result.report().get("0499171023"),
            Some(&vec!["a.pdf".to_string()])
        );
        assert_eq!(result.duplicate_count(), 1);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let records = vec![
            record("a.pdf", "0499171023", 2),
            record("b.pdf", "0499171023", 2),
            record("c.pdf", "0499171023", 2),
        ];

        let result = deduplicate(&records);

        assert_eq!(result.filtered.len(), 1);
        assert_eq!(result.filtered[0].source_file(), "a.pdf");
        assert_eq!(result.groups[0].record_count(), 3);
    }

    #[test]
    fn test_empty_mobile_never_grouped() {
        let records = vec![record("a.pdf", "", 3), record("b.pdf", "", 3)];

        let result = deduplicate(&records);

        assert_eq!(result.filtered.len(), 2);
        assert!(result.groups.is_empty());
    }

    #[test]
    fn test_selection_is_order_independent() {
        let mut records = vec![
            record("a.pdf", "0499171023", 1),
            record("b.pdf", "0499171023", 5),
            record("c.pdf", "0499171023", 3),
        ];
        let forward = deduplicate(&records);
        records.reverse();
        let backward = deduplicate(&records);

        assert_eq!(forward.filtered[0].source_file(), "b.pdf");
        assert_eq!(backward.filtered[0].source_file(), "b.pdf");
    }

    #[test]
    fn test_filtered_keeps_input_order() {
        let records = vec![
            record("a.pdf", "0400000001", 1),
            record("b.pdf", "", 1),
            record("c.pdf", "0400000001", 3),
            record("d.pdf", "0400000002", 1),
        ];

        let result = deduplicate(&records);
        let sources: Vec<&str> = result.filtered.iter().map(Record::source_file).collect();

        assert_eq!(sources, vec!["b.pdf", "c.pdf", "d.pdf"]);
        assert!(result.duplicate_ids().contains(&records[0].id()));
    }

    #[test]
    fn test_no_shared_mobiles_after_dedup() {
        let records: Vec<Record> = (0..20)
            .map(|i| record(&format!("{i}.pdf"), &format!("04000000{:02}", i % 7), i % 4))
            .collect();

        let result = deduplicate(&records);
        let mut seen = HashSet::new();

        for r in &result.filtered {
            assert!(seen.insert(r.mobile().to_string()));
        }
        assert_eq!(result.filtered.len(), 7);
        assert_eq!(result.duplicate_count(), 13);
    }
}
