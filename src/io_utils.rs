use std::fmt;
use std::io;
use std::path::Path;

use crate::error::TableError;

/// Operator-facing failure: what the run was doing, plus a hint for the
/// underlying table error.
#[derive(Debug)]
pub struct CliError {
    pub context: String,
    pub hint: String,
    pub cause: TableError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.hint)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

fn io_suggestion(err: &io::Error) -> &'static str {
    use io::ErrorKind::*;
    match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "The table or its directory is not accessible to this user.",
        InvalidData => "Tables must be UTF-8 text.",
        WriteZero => "The output volume is full.",
        _ => "Check the path and the output directory.",
    }
}

/// Describe an I/O failure on a table file, with a suggestion.
pub fn describe_io(operation: &str, path: &Path, err: &io::Error) -> String {
    format!("{operation} '{}' failed: {err}. {}", path.display(), io_suggestion(err))
}

/// Return an actionable hint for a table error.
pub fn cli_hint(err: &TableError) -> String {
    use TableError::*;
    match err {
        MissingInput { path, source } => describe_io("reading", path, source),
        MalformedRow { .. } => format!("{err}. Fix the row or rerun without --strict."),
        Csv(e) => format!("{e}. Inputs must be UTF-8, tab-delimited text."),
        Config(msg) => format!("{msg}. Invalid configuration."),
        ConfigFile { .. } => format!("{err}. Check the YAML syntax and field names."),
        Output { path, source } => describe_io("writing", path, source),
        Io(io) => format!("{io}. {}", io_suggestion(io)),
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn table_cli_error(context: &str, err: TableError) -> CliError {
    CliError {
        context: context.to_string(),
        hint: cli_hint(&err),
        cause: err,
    }
}
