//! Turns CSV text into raw, loosely typed rows.
//!
//! The first non-blank line is the header. Every following non-blank line
//! becomes a `RawRow` keyed by header name. Rows whose cell count does not
//! match the header are still yielded: missing trailing cells are simply
//! absent and surplus cells are dropped, leaving it to the schema check to
//! complain about missing columns.

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use std::collections::{BTreeMap, HashSet};

/// One data line of the submitted CSV. Header names and cell values are
/// trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based data row number; blank lines and the header are not counted.
    pub number: usize,
    pub cells: BTreeMap<String, String>,
}

impl RawRow {
    /// Cell value for `column`, treating empty cells as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("CSV is empty; a header line is required")]
    MissingHeader,
    #[error("header column {0} has no name")]
    EmptyHeader(usize),
    #[error("header column '{0}' appears more than once")]
    DuplicateHeader(String),
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    #[error("CSV is not valid UTF-8")]
    NotUtf8,
    #[error("malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ParseError::Malformed {
            line,
            message: err.to_string(),
        }
    }
}

/// Single-pass iterator over the data rows of a CSV document.
pub struct RowParser<'a> {
    headers: Vec<String>,
    records: StringRecordsIntoIter<&'a [u8]>,
    next_number: usize,
}

impl RowParser<'_> {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RowParser<'_> {
    type Item = Result<RawRow, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            // the reader drops empty lines; whitespace-only ones trim to a single empty cell
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            self.next_number += 1;
            let cells = self
                .headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.to_string()))
                .collect();

            return Some(Ok(RawRow {
                number: self.next_number,
                cells,
            }));
        }
    }
}

/// Reads and checks the header of `text` and returns an iterator over its rows.
///
/// Structural problems with the whole document (no header, broken header,
/// unterminated quotes) are reported here; problems the CSV reader only finds
/// further down surface as an `Err` item from the iterator.
pub fn parse(text: &str) -> Result<RowParser<'_>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if has_unterminated_quote(text) {
        return Err(ParseError::UnterminatedQuote);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(ParseError::MissingHeader);
    }

    let mut seen = HashSet::new();
    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() {
            return Err(ParseError::EmptyHeader(idx + 1));
        }
        if !seen.insert(header.as_str()) {
            return Err(ParseError::DuplicateHeader(header.clone()));
        }
    }

    Ok(RowParser {
        headers,
        records: reader.into_records(),
        next_number: 0,
    })
}

/// Scans `text` with RFC 4180 quoting rules and reports whether it ends inside
/// a quoted field. A quote only opens a quoted field at the start of a field;
/// inside one, `""` is an escaped quote.
fn has_unterminated_quote(text: &str) -> bool {
    #[derive(PartialEq)]
    enum State {
        FieldStart,
        Unquoted,
        Quoted,
        QuoteInQuoted,
    }

    let mut state = State::FieldStart;
    for ch in text.chars() {
        state = match (state, ch) {
            (State::FieldStart, '"') => State::Quoted,
            (State::FieldStart, ',' | '\n' | '\r') => State::FieldStart,
            (State::FieldStart, _) => State::Unquoted,
            (State::Unquoted, ',' | '\n' | '\r') => State::FieldStart,
            (State::Unquoted, _) => State::Unquoted,
            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,
            (State::QuoteInQuoted, '"') => State::Quoted,
            (State::QuoteInQuoted, ',' | '\n' | '\r') => State::FieldStart,
            (State::QuoteInQuoted, _) => State::Unquoted,
        };
    }
    state == State::Quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<RawRow> {
        parse(text)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn maps_cells_to_header_names() {
        let rows = rows("tagNumber,type\nA1,dairy\nA2,beef\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].get("tagNumber"), Some("A1"));
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].get("type"), Some("beef"));
    }

    #[test]
    fn blank_lines_are_skipped_without_consuming_row_numbers() {
        let rows = rows("tagNumber\n\nA1\n   \n\r\nA2\n");
        let numbers: Vec<_> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(rows[1].get("tagNumber"), Some("A2"));
    }

    #[test]
    fn delimiter_only_lines_are_rows() {
        let rows = rows("tagNumber,type,sex\nA1,dairy,female\n,,\nA2,beef,male\n");
        let numbers: Vec<_> = rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(rows[1].get("tagNumber"), None);
        assert_eq!(rows[1].cells.len(), 3);
    }

    #[test]
    fn short_and_long_rows_do_not_abort_parsing() {
        let rows = rows("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), None);
        assert!(!rows[0].cells.contains_key("c"));
        assert_eq!(rows[1].cells.len(), 3);
    }

    #[test]
    fn quoted_fields_keep_commas_and_escaped_quotes() {
        let rows = rows("name,notes\n\"Bess, the cow\",\"said \"\"moo\"\"\"\n");
        assert_eq!(rows[0].get("name"), Some("Bess, the cow"));
        assert_eq!(rows[0].get("notes"), Some("said \"moo\""));
    }

    #[test]
    fn cells_and_headers_are_trimmed() {
        let rows = rows(" tagNumber , type \n A1 , dairy \n");
        assert_eq!(rows[0].get("tagNumber"), Some("A1"));
        assert_eq!(rows[0].get("type"), Some("dairy"));
    }

    #[test]
    fn empty_cells_read_as_absent() {
        let rows = rows("tagNumber,name\n,Bess\n");
        assert_eq!(rows[0].get("tagNumber"), None);
        assert_eq!(rows[0].cells.get("tagNumber").map(String::as_str), Some(""));
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let rows = rows("\u{feff}tagNumber\nA1\n");
        assert_eq!(rows[0].get("tagNumber"), Some("A1"));
    }

    #[test]
    fn header_only_document_has_no_rows() {
        assert!(rows("tagNumber,type\n").is_empty());
    }

    #[test]
    fn parsing_is_repeatable() {
        let text = "tagNumber,type\nA1,dairy\n\nA2,\"beef\"\n";
        assert_eq!(rows(text), rows(text));
    }

    #[test]
    fn structural_problems_are_fatal() {
        assert!(matches!(parse(""), Err(ParseError::MissingHeader)));
        assert!(matches!(parse("\n\n"), Err(ParseError::MissingHeader)));
        assert!(matches!(parse("a,,c\n1,2,3"), Err(ParseError::EmptyHeader(2))));
        assert!(matches!(
            parse("a,b,a\n1,2,3"),
            Err(ParseError::DuplicateHeader(h)) if h == "a"
        ));
        assert!(matches!(
            parse("a,b\n\"open,2\n3,4\n"),
            Err(ParseError::UnterminatedQuote)
        ));
    }

    #[test]
    fn stray_quotes_inside_unquoted_fields_are_literal() {
        assert!(!has_unterminated_quote("notes\n12\" pipe\n"));
        assert!(!has_unterminated_quote("a\n\"x\"\"y\"\n"));
        assert!(has_unterminated_quote("a\n\"x\"\"y\n"));
    }
}
