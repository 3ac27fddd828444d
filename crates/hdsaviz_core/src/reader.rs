//! Generic delimited-file reader.

use std::fs;
use std::path::Path;

use crate::error::{ReadError, Result};
use crate::table::{Delimiter, Table, parse_table};

/// How to read a delimited file.
///
/// `drop: None` keeps every column. `Some(list)` removes the listed columns
/// and fails if any of them is missing; an empty list is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadOptions {
    pub delimiter: Delimiter,
    pub row_limit: Option<usize>,
    pub drop: Option<Vec<String>>,
}

impl ReadOptions {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..Default::default()
        }
    }

    pub fn row_limit(mut self, rows: usize) -> Self {
        self.row_limit = Some(rows);
        self
    }

    pub fn drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop = Some(columns.into_iter().map(Into::into).collect());
        self
    }
}

/// Read a delimited file with a header row into a [`Table`].
///
/// Rows and columns keep their source order. Reading stops after
/// `row_limit` data rows when set.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| ReadError::io(path, e))?;
    let mut table = parse_table(&text, options.delimiter, 1, options.row_limit)
        .map_err(|e| ReadError::parse(path, e))?;

    if let Some(columns) = &options.drop {
        table
            .drop_columns(columns)
            .map_err(|column| ReadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "Read table"
    );
    Ok(table)
}
