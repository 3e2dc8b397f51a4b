//! Canonical in-memory records and the boundary-marker presentation helper.
//!
//! Records keep their codes exactly as read. The marker token is only
//! removed (or replaced) at the point a code is written into a derived
//! table, through [`present_code`].

use serde::{Deserialize, Serialize};

/// Token marking an unfilled keystroke slot inside a code field.
pub const BOUNDARY_MARKER: &str = "_";

/// One row of the base encoding table.
///
/// The same character may appear in several records when more than one
/// coding is allowed for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingRecord {
    pub character: String,
    /// Raw full code, marker intact.
    pub full_code: String,
    /// Opaque rank marker for the full code.
    pub full_rank: String,
    /// Raw short code, marker intact. Empty when none is assigned.
    pub short_code: String,
    /// Opaque rank marker for the short code.
    pub short_rank: String,
}

impl EncodingRecord {
    pub fn new(
        character: impl Into<String>,
        full_code: impl Into<String>,
        full_rank: impl Into<String>,
        short_code: impl Into<String>,
        short_rank: impl Into<String>,
    ) -> Self {
        Self {
            character: character.into(),
            full_code: full_code.into(),
            full_rank: full_rank.into(),
            short_code: short_code.into(),
            short_rank: short_rank.into(),
        }
    }

    /// Full code with every marker removed.
    pub fn full_code_stripped(&self, marker: &str) -> String {
        present_code(&self.full_code, marker, "")
    }

    /// Short code with every marker removed.
    pub fn short_code_stripped(&self, marker: &str) -> String {
        present_code(&self.short_code, marker, "")
    }
}

/// One row of the decomposition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionRecord {
    pub character: String,
    /// Ordered component tokens, kept as a single string.
    pub sequence: String,
}

impl DecompositionRecord {
    pub fn new(character: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            sequence: sequence.into(),
        }
    }
}

/// Replace every occurrence of `marker` in `code` with `replacement`.
///
/// An empty marker leaves the code untouched.
pub fn present_code(code: &str, marker: &str, replacement: &str) -> String {
    if marker.is_empty() {
        return code.to_string();
    }
    code.replace(marker, replacement)
}
