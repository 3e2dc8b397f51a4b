use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::loader::RowPolicy;
use crate::merge::{FallbackFormat, Phases};
use crate::record::BOUNDARY_MARKER;

/// File names of the derived tables, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub reverse: String,
    #[serde(rename = "box")]
    pub box_listing: String,
    pub merged: String,
    pub evaluation: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            reverse: "reverse.txt".to_string(),
            box_listing: "box.txt".to_string(),
            merged: "dazhu.txt".to_string(),
            evaluation: "ceping.txt".to_string(),
        }
    }
}

impl OutputNames {
    fn all(&self) -> [&str; 4] {
        [
            self.reverse.as_str(),
            self.box_listing.as_str(),
            self.merged.as_str(),
            self.evaluation.as_str(),
        ]
    }
}

/// Run configuration for one derivation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Five-column encoding table.
    pub encoding: PathBuf,
    /// Optional two-column decomposition table.
    pub decomposition: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub outputs: OutputNames,
    pub row_policy: RowPolicy,
    pub phases: Phases,
    pub fallback: FallbackFormat,
    pub boundary_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: PathBuf::from("encoding.txt"),
            decomposition: None,
            output_dir: PathBuf::from("."),
            outputs: OutputNames::default(),
            row_policy: RowPolicy::default(),
            phases: Phases::default(),
            fallback: FallbackFormat::default(),
            boundary_marker: BOUNDARY_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Read a YAML configuration file. Missing keys take their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| TableError::MissingInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| TableError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Reject configurations that would publish ambiguous or colliding tables.
    pub fn validate(&self) -> Result<()> {
        let names = self.outputs.all();
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(TableError::Config("output file names must not be empty".into()));
        }
        let unique: HashSet<&str> = names.iter().copied().collect();
        if unique.len() != names.len() {
            return Err(TableError::Config("output file names must be distinct".into()));
        }
        let p = &self.phases;
        if !p.short && !p.full && !p.decomposition {
            return Err(TableError::Config("all merge phases are disabled".into()));
        }
        let f = &self.fallback;
        if self.phases.decomposition && (f.tag.is_empty() || f.open.is_empty() || f.close.is_empty()) {
            return Err(TableError::Config(
                "fallback tag and brackets must be non-empty".into(),
            ));
        }
        Ok(())
    }

    pub fn reverse_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.reverse)
    }

    pub fn box_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.box_listing)
    }

    pub fn merged_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.merged)
    }

    pub fn evaluation_path(&self) -> PathBuf {
        self.output_dir.join(&self.outputs.evaluation)
    }
}
