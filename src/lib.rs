//! Derivation of lookup tables from a character encoding table.
//!
//! A base table of (character, full code, full rank, short code, short rank)
//! rows, optionally joined with a character decomposition table, is turned
//! into a reverse index, a per-character box listing, a priority-merged
//! lookup table and an evaluation listing.

pub mod box_listing;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod io_utils;
pub mod loader;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod reverse;

pub use box_listing::{build_box_listing, BoxEntry};
pub use config::{Config, OutputNames};
pub use error::{Result, TableError};
pub use evaluation::{build_evaluation_listing, EvaluationEntry};
pub use loader::{
    load_decomposition_table, load_encoding_table, read_decomposition_table,
    read_encoding_table, RowPolicy, Table,
};
pub use merge::{FallbackFormat, MergePhase, MergePipeline, MergedEntry, Phases};
pub use pipeline::{derive, run, DerivedTables, RunSummary};
pub use record::{present_code, DecompositionRecord, EncodingRecord, BOUNDARY_MARKER};
pub use reverse::{build_reverse_index, CodeKey, ReverseEntry, ReverseIndex};
