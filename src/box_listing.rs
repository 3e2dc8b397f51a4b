//! Per-character box listing: one (character, short code) row per record.

use crate::record::{present_code, EncodingRecord};

/// The box listing shows every unfilled slot as a space, so a code keeps
/// one column per keystroke slot.
pub const BOX_MARKER_REPLACEMENT: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxEntry {
    pub character: String,
    pub code: String,
}

/// Project every record, in input order, including those with no short code.
pub fn build_box_listing(records: &[EncodingRecord], marker: &str) -> Vec<BoxEntry> {
    records
        .iter()
        .map(|r| BoxEntry {
            character: r.character.clone(),
            code: present_code(&r.short_code, marker, BOX_MARKER_REPLACEMENT),
        })
        .collect()
}
