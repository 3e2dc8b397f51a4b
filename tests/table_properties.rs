use codetable::{
    build_box_listing, build_reverse_index, DecompositionRecord, EncodingRecord, FallbackFormat,
    MergePhase, MergePipeline, BOUNDARY_MARKER,
};
use proptest::prelude::*;
use quickcheck::quickcheck;

fn record_strategy() -> impl Strategy<Value = EncodingRecord> {
    (
        prop::sample::select(vec!["字", "甲", "乙", "丙", "丁"]),
        "[a-d_]{1,4}",
        "[a-d_]{0,3}",
    )
        .prop_map(|(c, full, short)| EncodingRecord::new(c, full, "1", short, "1"))
}

proptest! {
    #[test]
    fn reverse_keys_are_strictly_ordered(records in prop::collection::vec(record_strategy(), 0..40)) {
        let index = build_reverse_index(&records, BOUNDARY_MARKER);
        for pair in index.windows(2) {
            let (a, b) = (&pair[0].code, &pair[1].code);
            let (la, lb) = (a.chars().count(), b.chars().count());
            prop_assert!(la < lb || (la == lb && a < b), "{a:?} !< {b:?}");
        }
    }

    #[test]
    fn every_short_code_is_indexed(records in prop::collection::vec(record_strategy(), 0..40)) {
        let index = build_reverse_index(&records, BOUNDARY_MARKER);
        for r in &records {
            let short = r.short_code_stripped(BOUNDARY_MARKER);
            if short.is_empty() {
                continue;
            }
            let entry = index.iter().find(|e| e.code == short);
            prop_assert!(entry.is_some_and(|e| e.candidates.contains(&r.character)));
        }
        let total: usize = index.iter().map(|e| e.candidates.len()).sum();
        let expected = records
            .iter()
            .filter(|r| !r.short_code_stripped(BOUNDARY_MARKER).is_empty())
            .count();
        prop_assert_eq!(total, expected);
    }

    #[test]
    fn full_phase_never_repeats_short_pair(records in prop::collection::vec(record_strategy(), 0..40)) {
        let merged = MergePipeline::default().merge(&records, None);
        let full: Vec<_> = merged.iter().filter(|e| e.phase == MergePhase::Full).collect();
        let expected = records
            .iter()
            .filter(|r| {
                let f = r.full_code_stripped(BOUNDARY_MARKER);
                !f.is_empty() && f != r.short_code_stripped(BOUNDARY_MARKER)
            })
            .count();
        prop_assert_eq!(full.len(), expected);
        for (e, r) in full.iter().zip(records.iter().filter(|r| {
            let f = r.full_code_stripped(BOUNDARY_MARKER);
            !f.is_empty() && f != r.short_code_stripped(BOUNDARY_MARKER)
        })) {
            prop_assert_ne!(&e.code, &r.short_code_stripped(BOUNDARY_MARKER));
        }
    }

    #[test]
    fn box_listing_is_a_projection(records in prop::collection::vec(record_strategy(), 0..40)) {
        let listing = build_box_listing(&records, BOUNDARY_MARKER);
        prop_assert_eq!(listing.len(), records.len());
        for (e, r) in listing.iter().zip(&records) {
            prop_assert_eq!(&e.character, &r.character);
            prop_assert_eq!(e.code.chars().count(), r.short_code.chars().count());
        }
    }
}

quickcheck! {
    fn fallback_codes_are_wrapped(seqs: Vec<String>) -> bool {
        let format = FallbackFormat::default();
        let decomp: Vec<DecompositionRecord> =
            seqs.iter().map(|s| DecompositionRecord::new("字", s.clone())).collect();
        let records = vec![EncodingRecord::new("字", "quq", "1", "qu", "1")];
        let merged = MergePipeline::default().merge(&records, Some(decomp.as_slice()));
        merged.iter().all(|e| match e.phase {
            MergePhase::Decomposition => format.is_fallback(&e.code),
            _ => !format.is_fallback(&e.code),
        })
    }
}

quickcheck! {
    fn phases_are_monotonic(codes: Vec<(String, String)>) -> bool {
        let records: Vec<EncodingRecord> = codes
            .iter()
            .map(|(full, short)| EncodingRecord::new("甲", full.clone(), "", short.clone(), ""))
            .collect();
        let decomp = vec![DecompositionRecord::new("甲", "田十")];
        let merged = MergePipeline::default().merge(&records, Some(decomp.as_slice()));
        merged.windows(2).all(|w| w[0].phase <= w[1].phase)
    }
}

#[test]
fn single_record_feeds_every_table() {
    let records = vec![EncodingRecord::new("字", "quq", "1", "qu", "1")];
    let decomp = vec![DecompositionRecord::new("字", "木一")];

    let listing = build_box_listing(&records, BOUNDARY_MARKER);
    assert_eq!((listing[0].character.as_str(), listing[0].code.as_str()), ("字", "qu"));

    let index = build_reverse_index(&records, BOUNDARY_MARKER);
    assert_eq!(index[0].code, "qu");
    assert_eq!(index[0].candidates, vec!["字"]);

    let merged = MergePipeline::default().merge(&records, Some(decomp.as_slice()));
    let pairs: Vec<(&str, &str)> = merged
        .iter()
        .map(|e| (e.code.as_str(), e.character.as_str()))
        .collect();
    assert_eq!(pairs, vec![("qu", "字"), ("quq", "字"), ("拆分［木一］", "字")]);
}

#[test]
fn shared_short_code_keeps_source_order() {
    let records = vec![
        EncodingRecord::new("甲", "abx", "1", "ab", "1"),
        EncodingRecord::new("乙", "aby", "1", "ab", "1"),
    ];
    let index = build_reverse_index(&records, BOUNDARY_MARKER);
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].candidates, vec!["甲", "乙"]);
}
