//! End-to-end batch run: load, derive every table in memory, publish.
//!
//! Deriving never touches the filesystem, so a run that fails while
//! loading leaves previous outputs untouched.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::box_listing::{build_box_listing, BoxEntry};
use crate::config::Config;
use crate::error::Result;
use crate::evaluation::{build_evaluation_listing, EvaluationEntry};
use crate::loader::{load_decomposition_table, load_encoding_table};
use crate::merge::{MergePhase, MergePipeline, MergedEntry};
use crate::output::{
    publish, render_box, render_evaluation, render_merged, render_reverse, PendingTable,
};
use crate::record::{DecompositionRecord, EncodingRecord};
use crate::reverse::{build_reverse_index, ReverseEntry};

/// All derived tables of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTables {
    pub reverse: Vec<ReverseEntry>,
    pub box_listing: Vec<BoxEntry>,
    pub merged: Vec<MergedEntry>,
    pub evaluation: Vec<EvaluationEntry>,
}

/// Derive every table from already-loaded records.
pub fn derive(
    config: &Config,
    records: &[EncodingRecord],
    decompositions: Option<&[DecompositionRecord]>,
) -> DerivedTables {
    let marker = config.boundary_marker.as_str();
    let pipeline = MergePipeline::new(config.phases, config.fallback.clone(), marker);
    DerivedTables {
        reverse: build_reverse_index(records, marker),
        box_listing: build_box_listing(records, marker),
        merged: pipeline.merge(records, decompositions),
        evaluation: build_evaluation_listing(records),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    pub short: usize,
    pub full: usize,
    pub decomposition: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub encoding_rows: usize,
    pub decomposition_rows: usize,
    /// Rows padded or truncated under the fill policy.
    pub filled_rows: usize,
    pub reverse_codes: usize,
    pub box_rows: usize,
    pub merged_rows: usize,
    pub merged_by_phase: PhaseCounts,
    pub evaluation_rows: usize,
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    fn from_tables(tables: &DerivedTables) -> Self {
        let mut by_phase = PhaseCounts::default();
        for e in &tables.merged {
            match e.phase {
                MergePhase::Short => by_phase.short += 1,
                MergePhase::Full => by_phase.full += 1,
                MergePhase::Decomposition => by_phase.decomposition += 1,
            }
        }
        Self {
            reverse_codes: tables.reverse.len(),
            box_rows: tables.box_listing.len(),
            merged_rows: tables.merged.len(),
            merged_by_phase: by_phase,
            evaluation_rows: tables.evaluation.len(),
            ..Self::default()
        }
    }
}

/// Render the derived tables against the configured output locations.
pub fn render(config: &Config, tables: &DerivedTables) -> Result<Vec<PendingTable>> {
    Ok(vec![
        PendingTable {
            path: config.reverse_path(),
            contents: render_reverse(&tables.reverse)?,
        },
        PendingTable {
            path: config.box_path(),
            contents: render_box(&tables.box_listing)?,
        },
        PendingTable {
            path: config.merged_path(),
            contents: render_merged(&tables.merged)?,
        },
        PendingTable {
            path: config.evaluation_path(),
            contents: render_evaluation(&tables.evaluation)?,
        },
    ])
}

/// Execute one complete run.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let encoding = load_encoding_table(&config.encoding, config.row_policy)?;
    info!(
        path = %config.encoding.display(),
        rows = encoding.rows.len(),
        filled = encoding.filled,
        "loaded encoding table"
    );

    let decomposition = match &config.decomposition {
        Some(path) => {
            let table = load_decomposition_table(path, config.row_policy)?;
            info!(
                path = %path.display(),
                rows = table.rows.len(),
                filled = table.filled,
                "loaded decomposition table"
            );
            Some(table)
        }
        None => None,
    };

    let tables = derive(
        config,
        &encoding.rows,
        decomposition.as_ref().map(|t| t.rows.as_slice()),
    );
    let pending = render(config, &tables)?;
    let written = publish(&pending)?;

    let mut summary = RunSummary::from_tables(&tables);
    summary.encoding_rows = encoding.rows.len();
    summary.decomposition_rows = decomposition.as_ref().map_or(0, |t| t.rows.len());
    summary.filled_rows = encoding.filled + decomposition.as_ref().map_or(0, |t| t.filled);
    summary.written = written;
    info!(
        reverse = summary.reverse_codes,
        merged = summary.merged_rows,
        boxes = summary.box_rows,
        evaluation = summary.evaluation_rows,
        "run complete"
    );
    Ok(summary)
}
