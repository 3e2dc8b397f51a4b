//! Tab-delimited rendering of derived tables and all-or-nothing publishing.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::box_listing::BoxEntry;
use crate::error::{Result, TableError};
use crate::evaluation::EvaluationEntry;
use crate::merge::MergedEntry;
use crate::reverse::ReverseEntry;

/// Separator between candidates in a reverse-index row.
pub const CANDIDATE_SEPARATOR: &str = " ";

fn render_pairs<'a, I>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for (a, b) in rows {
        wtr.write_record([a, b])?;
    }
    wtr.into_inner().map_err(|e| TableError::Io(e.into_error()))
}

pub fn render_reverse(entries: &[ReverseEntry]) -> Result<Vec<u8>> {
    let joined: Vec<(String, &str)> = entries
        .iter()
        .map(|e| (e.candidates.join(CANDIDATE_SEPARATOR), e.code.as_str()))
        .collect();
    render_pairs(joined.iter().map(|(c, code)| (*code, c.as_str())))
}

pub fn render_box(entries: &[BoxEntry]) -> Result<Vec<u8>> {
    render_pairs(entries.iter().map(|e| (e.character.as_str(), e.code.as_str())))
}

pub fn render_merged(entries: &[MergedEntry]) -> Result<Vec<u8>> {
    render_pairs(entries.iter().map(|e| (e.code.as_str(), e.character.as_str())))
}

pub fn render_evaluation(entries: &[EvaluationEntry]) -> Result<Vec<u8>> {
    render_pairs(entries.iter().map(|e| (e.character.as_str(), e.code.as_str())))
}

/// A rendered table waiting to be published.
#[derive(Debug, Clone)]
pub struct PendingTable {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

fn output_error(path: &Path) -> impl FnOnce(std::io::Error) -> TableError + '_ {
    move |source| TableError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Write every table to a temporary file next to its destination, then
/// rename them into place. Nothing is replaced unless every write succeeded.
pub fn publish(tables: &[PendingTable]) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(tables.len());
    for table in tables {
        let parent = match table.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(output_error(&table.path))?;
        let mut tmp = NamedTempFile::new_in(parent).map_err(output_error(&table.path))?;
        tmp.write_all(&table.contents)
            .and_then(|_| tmp.flush())
            .map_err(output_error(&table.path))?;
        staged.push((tmp, &table.path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in staged {
        tmp.persist(path)
            .map_err(|e| output_error(path)(e.error))?;
        info!(path = %path.display(), "published table");
        written.push(path.clone());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergePhase;

    #[test]
    fn reverse_rows_join_candidates_with_space() {
        let entries = vec![ReverseEntry {
            code: "ab".into(),
            candidates: vec!["甲".into(), "乙".into()],
        }];
        assert_eq!(render_reverse(&entries).unwrap(), "ab\t甲 乙\n".as_bytes());
    }

    #[test]
    fn fields_are_never_quoted() {
        let entries = vec![MergedEntry {
            code: "a\"b".into(),
            character: "字".into(),
            phase: MergePhase::Short,
        }];
        assert_eq!(render_merged(&entries).unwrap(), "a\"b\t字\n".as_bytes());
    }

    #[test]
    fn box_row_with_trailing_space_survives() {
        let entries = vec![
            BoxEntry { character: "甲".into(), code: "a ".into() },
            BoxEntry { character: "乙".into(), code: "".into() },
        ];
        assert_eq!(render_box(&entries).unwrap(), "甲\ta \n乙\t\n".as_bytes());
    }

    #[test]
    fn publish_writes_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let tables = vec![
            PendingTable { path: dir.path().join("a.txt"), contents: b"x\ty\n".to_vec() },
            PendingTable { path: dir.path().join("sub/b.txt"), contents: b"z\tw\n".to_vec() },
        ];
        let written = publish(&tables).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"x\ty\n");
        assert_eq!(fs::read(dir.path().join("sub/b.txt")).unwrap(), b"z\tw\n");
    }
}
