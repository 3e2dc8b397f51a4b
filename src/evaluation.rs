//! Listing consumed by evaluation harnesses: every full code, then the
//! short code when one is assigned, per record in input order.
//!
//! Codes are written raw. The boundary marker is a keystroke slot the
//! harness scores, so it is kept.

use crate::record::EncodingRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationEntry {
    pub character: String,
    pub code: String,
}

pub fn build_evaluation_listing(records: &[EncodingRecord]) -> Vec<EvaluationEntry> {
    let mut out = Vec::with_capacity(records.len() * 2);
    for r in records {
        out.push(EvaluationEntry {
            character: r.character.clone(),
            code: r.full_code.clone(),
        });
        if !r.short_code.is_empty() {
            out.push(EvaluationEntry {
                character: r.character.clone(),
                code: r.short_code.clone(),
            });
        }
    }
    out
}
