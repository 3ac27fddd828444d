//! Untyped delimited-text tables.
//!
//! A [`Table`] keeps every cell as the text it was read from, in source row
//! and column order. Typed views (see [`crate::model`]) are built on top of
//! it by looking columns up by name.

use rustc_hash::FxHashMap;

use crate::error::ParseError;

/// Field separator for delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Comma-separated values with CSV quoting rules.
    #[default]
    Comma,
    /// Any single byte, with CSV quoting rules (e.g. `b'\t'`, `b';'`).
    Byte(u8),
    /// Runs of spaces or tabs, as written by SALib's text output.
    Whitespace,
}

impl Delimiter {
    /// Map a user-supplied separator string to a delimiter.
    ///
    /// `" "` and `"whitespace"` select [`Delimiter::Whitespace`]; `"\t"` and
    /// `"tab"` select tabs; any other single ASCII character is used as-is.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "," => Some(Delimiter::Comma),
            " " | "whitespace" => Some(Delimiter::Whitespace),
            "\t" | "tab" => Some(Delimiter::Byte(b'\t')),
            _ => {
                let mut bytes = s.bytes();
                match (bytes.next(), bytes.next()) {
                    (Some(b), None) if b.is_ascii() => Some(Delimiter::Byte(b)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<String>>,
    /// 1-based source line of each row, for error messages.
    lines: Vec<usize>,
}

impl Table {
    /// Build a table from a header and rows of equal width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, ParseError> {
        let lines = (0..rows.len()).map(|i| i + 2).collect();
        Self::with_lines(columns, rows, lines)
    }

    fn with_lines(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        lines: Vec<usize>,
    ) -> Result<Self, ParseError> {
        if columns.is_empty() {
            return Err(ParseError::MissingHeader);
        }
        let mut index = FxHashMap::default();
        for (i, name) in columns.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ParseError::DuplicateColumn { name: name.clone() });
            }
        }
        for (row, &line) in rows.iter().zip(&lines) {
            if row.len() != columns.len() {
                return Err(ParseError::RaggedRow {
                    line,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            columns,
            index,
            rows,
            lines,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate the cells of one column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Text cells of a column that must exist.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>, ParseError> {
        self.column(name)
            .map(|cells| cells.map(str::to_owned).collect())
            .ok_or_else(|| ParseError::MissingColumn {
                name: name.to_owned(),
            })
    }

    /// Numeric cells of a column that must exist.
    pub fn number_column(&self, name: &str) -> Result<Vec<f64>, ParseError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| ParseError::MissingColumn {
                name: name.to_owned(),
            })?;
        self.numbers_at(idx)
    }

    /// Numeric cells of a column if the column exists.
    pub fn optional_number_column(&self, name: &str) -> Result<Option<Vec<f64>>, ParseError> {
        match self.column_index(name) {
            Some(idx) => self.numbers_at(idx).map(Some),
            None => Ok(None),
        }
    }

    fn numbers_at(&self, idx: usize) -> Result<Vec<f64>, ParseError> {
        self.rows
            .iter()
            .zip(&self.lines)
            .map(|(row, &line)| {
                let value = row[idx].trim();
                value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    column: self.columns[idx].clone(),
                    value: value.to_owned(),
                })
            })
            .collect()
    }

    /// Remove the named columns, keeping the order of the rest.
    ///
    /// Fails with the first name that is not a column; the table is left
    /// unchanged in that case.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), String> {
        let mut doomed = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match self.column_index(name) {
                Some(idx) => doomed.push(idx),
                None => return Err(name.to_owned()),
            }
        }
        if doomed.is_empty() {
            return Ok(());
        }

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|i| !doomed.contains(i))
            .collect();
        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = keep.iter().map(|&i| std::mem::take(&mut row[i])).collect();
        }
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Ok(())
    }
}

/// Parse a block of delimited text with a header row.
///
/// `first_line` is the 1-based file line the block starts on; it only
/// affects error messages. `row_limit` caps the number of data rows read.
pub fn parse_table(
    text: &str,
    delimiter: Delimiter,
    first_line: usize,
    row_limit: Option<usize>,
) -> Result<Table, ParseError> {
    match delimiter {
        Delimiter::Whitespace => parse_whitespace(text, first_line, row_limit),
        Delimiter::Comma => parse_csv(text, b',', first_line, row_limit),
        Delimiter::Byte(b) => parse_csv(text, b, first_line, row_limit),
    }
}

fn parse_whitespace(
    text: &str,
    first_line: usize,
    row_limit: Option<usize>,
) -> Result<Table, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (first_line + i, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(ParseError::MissingHeader)?;
    let columns: Vec<String> = header.split_whitespace().map(str::to_owned).collect();

    let limit = row_limit.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    let mut row_lines = Vec::new();
    for (line_no, line) in lines.take(limit) {
        rows.push(line.split_whitespace().map(str::to_owned).collect());
        row_lines.push(line_no);
    }

    Table::with_lines(columns, rows, row_lines)
}

fn parse_csv(
    text: &str,
    delimiter: u8,
    first_line: usize,
    row_limit: Option<usize>,
) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|_| ParseError::MissingHeader)?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    if columns.len() == 1 && columns[0].is_empty() {
        return Err(ParseError::MissingHeader);
    }

    let limit = row_limit.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    let mut row_lines = Vec::new();
    for record in reader.records().take(limit) {
        let record = record.map_err(|e| csv_error(e, first_line))?;
        let line = record
            .position()
            .map(|p| first_line + p.line() as usize - 1)
            .unwrap_or(first_line);
        rows.push(record.iter().map(str::to_owned).collect());
        row_lines.push(line);
    }

    Table::with_lines(columns, rows, row_lines)
}

fn csv_error(err: csv::Error, first_line: usize) -> ParseError {
    let line = err
        .position()
        .map(|p| first_line + p.line() as usize - 1)
        .unwrap_or(first_line);
    ParseError::InvalidRecord {
        line,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_table_keeps_order() {
        let text = "Parameter S1 ST\nk1 0.5 0.7\nk2  0.1\t0.2\n";
        let table = parse_table(text, Delimiter::Whitespace, 1, None).unwrap();

        assert_eq!(table.columns(), ["Parameter", "S1", "ST"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "ST"), Some("0.2"));
        assert_eq!(table.number_column("S1").unwrap(), vec![0.5, 0.1]);
    }

    #[test]
    fn test_whitespace_ragged_row_reports_file_line() {
        let text = "Parameter S1\nk1 0.5\nk2\n";
        let err = parse_table(text, Delimiter::Whitespace, 10, None).unwrap_err();

        assert!(matches!(
            err,
            ParseError::RaggedRow {
                line: 12,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_csv_row_limit() {
        let text = "a,b\n1,2\n3,4\n5,6\n";
        let table = parse_table(text, Delimiter::Comma, 1, Some(2)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "a"), Some("3"));
    }

    #[test]
    fn test_csv_ragged_row() {
        let text = "a,b\n1,2\n3\n";
        let err = parse_table(text, Delimiter::Comma, 1, None).unwrap_err();

        assert!(matches!(err, ParseError::RaggedRow { line: 3, .. }));
    }

    #[test]
    fn test_empty_text_has_no_header() {
        let err = parse_table("", Delimiter::Whitespace, 1, None).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));

        let err = parse_table("", Delimiter::Comma, 1, None).unwrap_err();
        assert!(matches!(err, ParseError::MissingHeader));
    }

    #[test]
    fn test_invalid_number_names_column_and_line() {
        let text = "Parameter S1\nk1 0.5\nk2 oops\n";
        let table = parse_table(text, Delimiter::Whitespace, 1, None).unwrap();
        let err = table.number_column("S1").unwrap_err();

        match err {
            ParseError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "S1");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_drop_columns() {
        let mut table = Table::new(
            vec!["End_time".into(), "Oxygen".into(), "k1".into(), "k2".into()],
            vec![vec!["1".into(), "2".into(), "3".into(), "4".into()]],
        )
        .unwrap();

        table.drop_columns(&["End_time", "Oxygen"]).unwrap();

        assert_eq!(table.columns(), ["k1", "k2"]);
        assert_eq!(table.rows()[0], ["3", "4"]);
        assert_eq!(table.column_index("k2"), Some(1));
    }

    #[test]
    fn test_drop_missing_column_leaves_table_unchanged() {
        let mut table = Table::new(vec!["a".into(), "b".into()], vec![]).unwrap();

        let err = table.drop_columns(&["a", "zzz"]).unwrap_err();

        assert_eq!(err, "zzz");
        assert_eq!(table.columns(), ["a", "b"]);
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let err = Table::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_delimiter_parse() {
        assert_eq!(Delimiter::parse(","), Some(Delimiter::Comma));
        assert_eq!(Delimiter::parse(" "), Some(Delimiter::Whitespace));
        assert_eq!(Delimiter::parse("tab"), Some(Delimiter::Byte(b'\t')));
        assert_eq!(Delimiter::parse(";"), Some(Delimiter::Byte(b';')));
        assert_eq!(Delimiter::parse(";;"), None);
    }
}
