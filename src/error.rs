use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    /// A required source table does not exist or cannot be opened.
    #[error("missing input '{}': {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row with an unexpected column count, raised only under the strict policy.
    #[error("malformed row in '{}' at line {line}: expected {expected} fields, found {found}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Undecodable tabular input.
    #[error("table read error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid run configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration file that could not be parsed.
    #[error("config file '{}': {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Failure while writing or publishing a derived table.
    #[error("output '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
