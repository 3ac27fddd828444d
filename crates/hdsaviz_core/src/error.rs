use std::io;
use std::path::PathBuf;

/// Errors raised while turning a block of text into a table.
///
/// Line numbers are 1-based and relative to the start of the file, so a
/// message can be matched directly against an editor view.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no header row found")]
    MissingHeader,

    #[error("duplicate column {name:?} in header")]
    DuplicateColumn { name: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("required column {name:?} not found")]
    MissingColumn { name: String },

    #[error("line {line}: column {column:?} value {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("line {line}: second blank-line separator (first one at line {first})")]
    MultipleBlankLines { first: usize, line: usize },

    #[error("{block} block is empty")]
    EmptyBlock { block: &'static str },
}

/// Errors raised while loading files and directories.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot drop column {column:?} from {}: no such column", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("unsupported field separator {separator:?}")]
    InvalidSeparator { separator: String },

    #[error("file name {name:?} yields an empty output-measure identifier")]
    EmptyIdentifier { name: String },
}

impl ReadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        ReadError::Parse {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
