//! Reverse index: code string to the characters it produces.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::record::EncodingRecord;

/// Code key ordered by length in characters, then by code point order.
///
/// Distinct codes never compare equal, so the ordering is total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeKey(pub String);

impl Ord for CodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .chars()
            .count()
            .cmp(&other.0.chars().count())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for CodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One reverse-index row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseEntry {
    pub code: String,
    /// Characters in source order; repeats are kept.
    pub candidates: Vec<String>,
}

/// Accumulates short codes into a sorted reverse index.
#[derive(Debug, Default, Clone)]
pub struct ReverseIndex {
    map: BTreeMap<CodeKey, Vec<String>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the record's character under its stripped short code.
    /// Records without a short code contribute nothing.
    pub fn insert(&mut self, record: &EncodingRecord, marker: &str) {
        let code = record.short_code_stripped(marker);
        if code.is_empty() {
            return;
        }
        self.map
            .entry(CodeKey(code))
            .or_default()
            .push(record.character.clone());
    }

    pub fn extend<'a, I>(&mut self, records: I, marker: &str)
    where
        I: IntoIterator<Item = &'a EncodingRecord>,
    {
        for r in records {
            self.insert(r, marker);
        }
    }

    /// Entries in (length, code) order.
    pub fn into_entries(self) -> Vec<ReverseEntry> {
        self.map
            .into_iter()
            .map(|(k, candidates)| ReverseEntry {
                code: k.0,
                candidates,
            })
            .collect()
    }
}

/// Build the sorted reverse index for `records`.
pub fn build_reverse_index(records: &[EncodingRecord], marker: &str) -> Vec<ReverseEntry> {
    let mut index = ReverseIndex::new();
    index.extend(records, marker);
    index.into_entries()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(c: &str, short: &str) -> EncodingRecord {
        EncodingRecord::new(c, format!("{short}x"), "1", short, "1")
    }

    #[test]
    fn shorter_codes_first_then_lexicographic() {
        let records = vec![rec("一", "bc"), rec("二", "a"), rec("三", "ab"), rec("四", "z")];
        let codes: Vec<String> = build_reverse_index(&records, "_")
            .into_iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(codes, vec!["a", "z", "ab", "bc"]);
    }

    #[test]
    fn candidates_keep_source_order_and_repeats() {
        let records = vec![rec("甲", "ab"), rec("乙", "ab"), rec("甲", "ab")];
        let index = build_reverse_index(&records, "_");
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].candidates, vec!["甲", "乙", "甲"]);
    }

    #[test]
    fn empty_and_marker_only_short_codes_are_skipped() {
        let records = vec![rec("甲", ""), rec("乙", "_"), rec("丙", "a_")];
        let index = build_reverse_index(&records, "_");
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].code, "a");
        assert_eq!(index[0].candidates, vec!["丙"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(CodeKey("é".into()) < CodeKey("ab".into()));
    }
}
