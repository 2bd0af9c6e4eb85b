//! Tabular splitting of raw text into field rows.
//!
//! Uploaded files are usually comma separated, but a paste from a spreadsheet
//! arrives tab separated, so the delimiter is sniffed unless configured.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{CsvHandlerError, Result};
use crate::domain::models::{Field, FieldRow};

/// Delimiters tried by auto-detection, in order of preference
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Lines inspected when sniffing the delimiter
const SNIFF_LINES: usize = 10;

/// Configuration for splitting lines into fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplitterConfig {
    /// Fixed delimiter; `None` sniffs one of `,` `\t` `|` `;`
    pub delimiter: Option<char>,
    /// Strip surrounding whitespace from every field
    pub trim_fields: bool,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            trim_fields: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabularSplitter {
    config: SplitterConfig,
}

impl TabularSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Split `text` into rows of untyped fields, skipping empty lines
    ///
    /// Fails unless at least one row has two or more fields.
    pub fn split(&self, text: &str) -> Result<Vec<FieldRow>> {
        if text.trim().is_empty() {
            return Err(CsvHandlerError::ParseError("input is empty".to_string()));
        }

        let delimiter = match self.config.delimiter {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => {
                return Err(CsvHandlerError::ParseError(format!(
                    "delimiter {:?} is not a single ASCII character",
                    c
                )))
            }
            None => Self::detect_delimiter(text),
        };
        debug!("Splitting {} bytes on delimiter {:?}", text.len(), delimiter as char);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .trim(if self.config.trim_fields { Trim::All } else { Trim::None })
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CsvHandlerError::ParseError(e.to_string()))?;
            if record.len() <= 1 && record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(record.iter().map(Field::infer).collect::<FieldRow>());
        }

        if !rows.iter().any(|row| row.len() >= 2) {
            return Err(CsvHandlerError::ParseError(
                "no line contains an address and an amount".to_string(),
            ));
        }

        debug!("Split input into {} rows", rows.len());
        Ok(rows)
    }

    /// Pick the candidate delimiter that splits the most leading lines into two or more fields
    pub fn detect_delimiter(text: &str) -> u8 {
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(SNIFF_LINES)
            .collect();

        let mut best = (CANDIDATE_DELIMITERS[0], 0usize);
        for &candidate in &CANDIDATE_DELIMITERS {
            let hits = lines
                .iter()
                .filter(|line| line.as_bytes().contains(&candidate))
                .count();
            if hits > best.1 {
                best = (candidate, hits);
            }
        }
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(rows: &[FieldRow]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_split_comma_separated() {
        let rows = TabularSplitter::new()
            .split("address,amount\n0x1,100\r\n0x2, 2.5\n")
            .unwrap();

        assert_eq!(
            texts(&rows),
            vec![vec!["address", "amount"], vec!["0x1", "100"], vec!["0x2", "2.5"]]
        );
        assert_eq!(rows[1][1], Field::Number("100".to_string()));
        assert_eq!(rows[0][1], Field::Text("amount".to_string()));
    }

    #[test]
    fn test_skips_empty_lines() {
        let rows = TabularSplitter::new().split("\n0x1,1\n\n\n0x2,2\n\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_detects_tab_separated_paste() {
        let text = "0xaaa\t1.5\n0xbbb\t2\n";
        assert_eq!(TabularSplitter::detect_delimiter(text), b'\t');

        let rows = TabularSplitter::new().split(text).unwrap();
        assert_eq!(texts(&rows), vec![vec!["0xaaa", "1.5"], vec!["0xbbb", "2"]]);
    }

    #[test]
    fn test_detect_defaults_to_comma() {
        assert_eq!(TabularSplitter::detect_delimiter("just one column\n"), b',');
        assert_eq!(TabularSplitter::detect_delimiter("a;b\nc,d\n"), b',');
    }

    #[test]
    fn test_fixed_delimiter() {
        let splitter = TabularSplitter::with_config(SplitterConfig {
            delimiter: Some(';'),
            trim_fields: true,
        });
        let rows = splitter.split("0x1;10,5\n").unwrap();
        assert_eq!(texts(&rows), vec![vec!["0x1", "10,5"]]);

        let splitter = TabularSplitter::with_config(SplitterConfig {
            delimiter: Some('→'),
            trim_fields: true,
        });
        assert!(matches!(splitter.split("a→b"), Err(CsvHandlerError::ParseError(_))));
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let rows = TabularSplitter::new().split("0x1,\"1,000\"\n").unwrap();
        assert_eq!(rows[0][1], Field::Text("1,000".to_string()));
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let rows = TabularSplitter::new().split("0x1,1,memo\n0x2,2\ntrailer\n").unwrap();
        assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn test_parse_errors() {
        let splitter = TabularSplitter::new();
        assert!(matches!(splitter.split(""), Err(CsvHandlerError::ParseError(_))));
        assert!(matches!(splitter.split("  \n\n"), Err(CsvHandlerError::ParseError(_))));
        assert!(matches!(
            splitter.split("only\none\ncolumn\n"),
            Err(CsvHandlerError::ParseError(_))
        ));
    }
}
