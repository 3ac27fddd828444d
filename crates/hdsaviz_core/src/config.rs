//! Dataset configuration: which files to scan and how to read companion tables.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReadError, Result};
use crate::reader::{ReadOptions, read_table};
use crate::table::{Delimiter, Table};

/// Selects analysis files inside a results directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File-name prefix that marks SALib output (`analysis_`).
    pub prefix: String,
    /// File-name suffix stripped along with the prefix (`.txt`).
    pub extension: String,
    /// Exact file names skipped even though they match.
    pub exclude: BTreeSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            prefix: "analysis_".into(),
            extension: ".txt".into(),
            exclude: BTreeSet::new(),
        }
    }
}

impl ScanConfig {
    pub fn with_exclusions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether `file_name` follows the analysis naming convention.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && file_name.ends_with(&self.extension)
    }

    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.contains(file_name)
    }

    /// Output-measure identifier for a matching file name.
    ///
    /// `analysis_CO.txt` → `CO`. Returns `None` when the name does not match;
    /// the identifier may be empty when the name is exactly prefix + extension.
    pub fn identifier<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let rest = file_name.strip_prefix(self.prefix.as_str())?;
        rest.strip_suffix(self.extension.as_str())
    }
}

/// A companion table (input parameters, model results) and how to load it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    /// Path to the file; relative paths resolve against the dataset directory.
    pub path: PathBuf,
    /// Field separator, `,` unless stated.
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub row_limit: Option<usize>,
    /// Columns to remove. Absent means "keep everything".
    #[serde(default)]
    pub drop: Option<Vec<String>>,
}

fn default_separator() -> String {
    ",".into()
}

impl TableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: default_separator(),
            row_limit: None,
            drop: None,
        }
    }

    pub fn resolve(&self, base: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base.join(&self.path)
        }
    }

    pub fn read_options(&self) -> Result<ReadOptions> {
        let delimiter =
            Delimiter::parse(&self.separator).ok_or_else(|| ReadError::InvalidSeparator {
                separator: self.separator.clone(),
            })?;
        Ok(ReadOptions {
            delimiter,
            row_limit: self.row_limit,
            drop: self.drop.clone(),
        })
    }

    /// Load the table relative to `base`.
    pub fn read(&self, base: &Path) -> Result<Table> {
        read_table(&self.resolve(base), &self.read_options()?)
    }
}
