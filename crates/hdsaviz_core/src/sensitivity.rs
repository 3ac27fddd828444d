//! Reader for SALib sensitivity-analysis output files.
//!
//! Each analysis file holds one output measure. The first block lists
//! first/total-order indices per parameter; an optional second block,
//! separated by a single blank line, lists second-order indices per
//! parameter pair.
//!
//! Parsing happens in two phases: [`split_blocks`] finds the block
//! boundaries, then each block is parsed as a whitespace-delimited table.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::ScanConfig;
use crate::error::{ParseError, ReadError, Result};
use crate::model::{FirstOrderTable, SecondOrderTable};
use crate::table::{Delimiter, parse_table};

/// A slice of the file text plus the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub text: &'a str,
    pub first_line: usize,
}

/// The first-order block and, when the file has one, the second-order block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocks<'a> {
    pub first: Block<'a>,
    pub second: Option<Block<'a>>,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split analysis-file text on its blank-line separator.
///
/// Blank lines at the very end of the file are ignored. A blank line before
/// any content, or a second separator, is an error.
pub fn split_blocks(text: &str) -> std::result::Result<Blocks<'_>, ParseError> {
    // (byte offset, line) pairs, up to the last non-blank line
    let mut lines = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }
    while lines.last().is_some_and(|(_, line)| is_blank(line)) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(ParseError::EmptyBlock {
            block: "first-order",
        });
    }

    let mut blanks = lines
        .iter()
        .enumerate()
        .filter(|(_, (_, line))| is_blank(line))
        .map(|(i, _)| i);

    let Some(separator) = blanks.next() else {
        return Ok(Blocks {
            first: Block {
                text,
                first_line: 1,
            },
            second: None,
        });
    };
    if let Some(extra) = blanks.next() {
        return Err(ParseError::MultipleBlankLines {
            first: separator + 1,
            line: extra + 1,
        });
    }
    if separator == 0 {
        return Err(ParseError::EmptyBlock {
            block: "first-order",
        });
    }

    let (second_start, _) = lines[separator + 1];
    Ok(Blocks {
        first: Block {
            text: &text[..lines[separator].0],
            first_line: 1,
        },
        second: Some(Block {
            text: &text[second_start..],
            first_line: separator + 2,
        }),
    })
}

/// Parse one analysis file and apply the clamp and rename passes.
pub fn parse_analysis(
    text: &str,
) -> std::result::Result<(FirstOrderTable, Option<SecondOrderTable>), ParseError> {
    let blocks = split_blocks(text)?;

    let table = parse_table(
        blocks.first.text,
        Delimiter::Whitespace,
        blocks.first.first_line,
        None,
    )?;
    let mut first = FirstOrderTable::from_table(&table)?;
    first.clamp_negative();
    first.normalize_parameter_names();

    let second = match blocks.second {
        Some(block) => {
            let table = parse_table(block.text, Delimiter::Whitespace, block.first_line, None)?;
            let mut second = SecondOrderTable::from_table(&table)?;
            second.clamp_negative();
            Some(second)
        }
        None => None,
    };

    Ok((first, second))
}

/// Indices for one output measure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensitivityEntry {
    pub first_order: FirstOrderTable,
    /// `None` when the analysis computed no second-order indices.
    pub second_order: Option<SecondOrderTable>,
}

/// Output-measure identifier → indices, ordered by identifier.
///
/// Built once by [`read_sensitivity_dir`]; there is no way to add or
/// remove entries afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SensitivityResultSet {
    entries: BTreeMap<String, SensitivityEntry>,
}

impl SensitivityResultSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SensitivityEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SensitivityEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All parameter names across every first-order table, first-seen order.
    pub fn parameters(&self) -> Vec<String> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut out = Vec::new();
        for entry in self.entries.values() {
            for name in entry.first_order.parameters() {
                if seen.insert(name) {
                    out.push(name.to_owned());
                }
            }
        }
        out
    }
}

impl FromIterator<(String, SensitivityEntry)> for SensitivityResultSet {
    fn from_iter<T: IntoIterator<Item = (String, SensitivityEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SensitivityResultSet {
    type Item = (String, SensitivityEntry);
    type IntoIter = std::collections::btree_map::IntoIter<String, SensitivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Read and parse one analysis file.
pub fn read_analysis_file(path: &Path) -> Result<SensitivityEntry> {
    let text = fs::read_to_string(path).map_err(|e| ReadError::io(path, e))?;
    let (first_order, second_order) =
        parse_analysis(&text).map_err(|e| ReadError::parse(path, e))?;
    Ok(SensitivityEntry {
        first_order,
        second_order,
    })
}

/// Read every qualifying analysis file in `dir`.
///
/// Any I/O or parse failure aborts the scan; no partial set is returned.
pub fn read_sensitivity_dir(dir: &Path, config: &ScanConfig) -> Result<SensitivityResultSet> {
    let listing = fs::read_dir(dir).map_err(|e| ReadError::io(dir, e))?;

    let mut file_names = Vec::new();
    let mut excluded = Vec::new();
    for entry in listing {
        let entry = entry.map_err(|e| ReadError::io(dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        if !config.matches(&name) || !entry.path().is_file() {
            continue;
        }
        if config.is_excluded(&name) {
            tracing::debug!(file = %name, "Skipping excluded analysis file");
            excluded.push(name);
            continue;
        }
        file_names.push(name);
    }
    file_names.sort();

    for name in config.exclude.iter().filter(|n| !excluded.contains(n)) {
        tracing::warn!(file = %name, dir = %dir.display(), "Excluded analysis file not present");
    }

    let mut entries = BTreeMap::new();
    for name in file_names {
        let identifier = match config.identifier(&name) {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => return Err(ReadError::EmptyIdentifier { name }),
        };
        let entry = read_analysis_file(&dir.join(&name))?;
        tracing::debug!(
            output = %identifier,
            parameters = entry.first_order.len(),
            pairs = ?entry.second_order.as_ref().map(SecondOrderTable::len),
            "Loaded analysis file"
        );
        entries.insert(identifier, entry);
    }

    tracing::info!(
        dir = %dir.display(),
        outputs = entries.len(),
        excluded = excluded.len(),
        "Loaded sensitivity results"
    );
    Ok(SensitivityResultSet { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_blank_line() {
        let text = "Parameter S1\nk1 0.1\n";
        let blocks = split_blocks(text).unwrap();

        assert_eq!(blocks.first.text, text);
        assert!(blocks.second.is_none());
    }

    #[test]
    fn test_split_at_blank_line() {
        let text = "Parameter S1\nk1 0.1\nk2 0.2\n\nParameter_1 Parameter_2 S2\nk1 k2 0.05\n";
        let blocks = split_blocks(text).unwrap();

        assert_eq!(blocks.first.text, "Parameter S1\nk1 0.1\nk2 0.2\n");
        let second = blocks.second.unwrap();
        assert_eq!(second.text, "Parameter_1 Parameter_2 S2\nk1 k2 0.05\n");
        assert_eq!(second.first_line, 5);
    }

    #[test]
    fn test_split_handles_crlf() {
        let text = "Parameter S1\r\nk1 0.1\r\n\r\nParameter_1 Parameter_2 S2\r\n";
        let blocks = split_blocks(text).unwrap();

        assert_eq!(blocks.first.text, "Parameter S1\r\nk1 0.1\r\n");
        assert_eq!(blocks.second.unwrap().text, "Parameter_1 Parameter_2 S2\r\n");
    }

    #[test]
    fn test_trailing_blank_lines_are_not_separators() {
        let text = "Parameter S1\nk1 0.1\n\n\n";
        let blocks = split_blocks(text).unwrap();

        assert!(blocks.second.is_none());
    }

    #[test]
    fn test_second_separator_is_an_error() {
        let text = "Parameter S1\nk1 0.1\n\nParameter_1 Parameter_2 S2\nk1 k2 0.1\n\nextra\n";
        let err = split_blocks(text).unwrap_err();

        assert!(matches!(
            err,
            ParseError::MultipleBlankLines { first: 3, line: 6 }
        ));
    }

    #[test]
    fn test_double_blank_gap_is_an_error() {
        let text = "Parameter S1\nk1 0.1\n\n\nParameter_1 Parameter_2 S2\n";
        assert!(matches!(
            split_blocks(text),
            Err(ParseError::MultipleBlankLines { .. })
        ));
    }

    #[test]
    fn test_leading_blank_line_is_an_error() {
        let text = "\nParameter S1\nk1 0.1\n";
        assert!(matches!(
            split_blocks(text),
            Err(ParseError::EmptyBlock { .. })
        ));
        assert!(matches!(
            split_blocks("\n\n"),
            Err(ParseError::EmptyBlock { .. })
        ));
    }

    #[test]
    fn test_parse_analysis_cleans_tables() {
        let text = "\
Parameter S1 S1_conf ST ST_conf
rxn1 -0.02 0.01 0.30 0.02
RXN2 0.25 0.02 0.40 0.03

Parameter_1 Parameter_2 S2 S2_conf
rxn1 RXN2 -0.01 0.005
";
        let (first, second) = parse_analysis(text).unwrap();

        assert_eq!(first.rows()[0].parameter, "k1");
        assert_eq!(first.rows()[0].s1, 0.0);
        assert_eq!(first.rows()[1].parameter, "k2");
        assert_eq!(first.rows()[1].st, Some(0.40));

        let second = second.unwrap();
        assert_eq!(second.rows()[0].s2, 0.0);
        // pair names are left as written
        assert_eq!(second.rows()[0].parameter_1, "rxn1");
    }

    #[test]
    fn test_second_block_header_only_is_empty_table() {
        let text = "Parameter S1\nk1 0.1\n\nParameter_1 Parameter_2 S2\n";
        let (_, second) = parse_analysis(text).unwrap();

        let second = second.unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_malformed_second_block_reports_line() {
        let text = "Parameter S1\nk1 0.1\n\nParameter_1 Parameter_2 S2\nk1 k2\n";
        let err = parse_analysis(text).unwrap_err();

        assert!(matches!(err, ParseError::RaggedRow { line: 5, .. }));
    }
}
