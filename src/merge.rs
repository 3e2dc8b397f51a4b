//! Priority-merged lookup table.
//!
//! Entries are appended in three phases and never reordered afterwards:
//! short codes, then full codes that differ from the short code, then
//! decomposition fallbacks. A consumer doing first-match lookup therefore
//! sees short codes before full codes before fallbacks. Code collisions
//! across phases are kept as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{DecompositionRecord, EncodingRecord};

/// Phase an entry was emitted by, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePhase {
    Short,
    Full,
    Decomposition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub code: String,
    pub character: String,
    pub phase: MergePhase,
}

/// Which phases a pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phases {
    pub short: bool,
    pub full: bool,
    pub decomposition: bool,
}

impl Default for Phases {
    fn default() -> Self {
        Self {
            short: true,
            full: true,
            decomposition: true,
        }
    }
}

/// Wrapper that turns a decomposition sequence into a fallback code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackFormat {
    pub tag: String,
    pub open: String,
    pub close: String,
}

impl Default for FallbackFormat {
    fn default() -> Self {
        Self {
            tag: "拆分".to_string(),
            open: "［".to_string(),
            close: "］".to_string(),
        }
    }
}

impl FallbackFormat {
    pub fn format(&self, sequence: &str) -> String {
        let mut code =
            String::with_capacity(self.tag.len() + self.open.len() + sequence.len() + self.close.len());
        code.push_str(&self.tag);
        code.push_str(&self.open);
        code.push_str(sequence);
        code.push_str(&self.close);
        code
    }

    /// Whether `code` carries this wrapper.
    pub fn is_fallback(&self, code: &str) -> bool {
        code.strip_prefix(self.tag.as_str())
            .and_then(|rest| rest.strip_prefix(self.open.as_str()))
            .is_some_and(|rest| rest.ends_with(self.close.as_str()))
    }
}

/// Configurable three-phase merge.
#[derive(Debug, Clone)]
pub struct MergePipeline {
    pub phases: Phases,
    pub fallback: FallbackFormat,
    pub marker: String,
}

impl Default for MergePipeline {
    fn default() -> Self {
        Self {
            phases: Phases::default(),
            fallback: FallbackFormat::default(),
            marker: crate::record::BOUNDARY_MARKER.to_string(),
        }
    }
}

impl MergePipeline {
    pub fn new(phases: Phases, fallback: FallbackFormat, marker: impl Into<String>) -> Self {
        Self {
            phases,
            fallback,
            marker: marker.into(),
        }
    }

    /// Run the enabled phases in priority order.
    pub fn merge(
        &self,
        records: &[EncodingRecord],
        decompositions: Option<&[DecompositionRecord]>,
    ) -> Vec<MergedEntry> {
        let mut out = Vec::with_capacity(records.len() * 2);

        if self.phases.short {
            let before = out.len();
            for r in records {
                let short = r.short_code_stripped(&self.marker);
                if short.is_empty() {
                    continue;
                }
                out.push(MergedEntry {
                    code: short,
                    character: r.character.clone(),
                    phase: MergePhase::Short,
                });
            }
            debug!(entries = out.len() - before, "short code phase");
        }

        if self.phases.full {
            let before = out.len();
            for r in records {
                let full = r.full_code_stripped(&self.marker);
                if full.is_empty() || full == r.short_code_stripped(&self.marker) {
                    continue;
                }
                out.push(MergedEntry {
                    code: full,
                    character: r.character.clone(),
                    phase: MergePhase::Full,
                });
            }
            debug!(entries = out.len() - before, "full code phase");
        }

        if self.phases.decomposition {
            let before = out.len();
            for d in decompositions.unwrap_or_default() {
                out.push(MergedEntry {
                    code: self.fallback.format(&d.sequence),
                    character: d.character.clone(),
                    phase: MergePhase::Decomposition,
                });
            }
            debug!(entries = out.len() - before, "decomposition phase");
        }

        out
    }
}
