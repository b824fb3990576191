// Dweve YASD - Bulk Record Transfer Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Delimited (CSV / TSV) sources.

use crate::error::CsvError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use yasd_core::{Encoding, Row, RowCounter, RowReader};

/// Configuration for delimited input.
///
/// # Examples
///
/// ```
/// use yasd_csv::ReadConfig;
///
/// let config = ReadConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert_eq!(config.start_row, 0);
///
/// let tsv = ReadConfig::tsv();
/// assert_eq!(tsv.delimiter, b'\t');
/// ```
#[derive(Debug, Clone)]
pub struct ReadConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Source encoding (default: UTF-8)
    pub encoding: Encoding,
    /// Number of leading rows to skip (default: 0)
    pub start_row: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: Encoding::Utf8,
            start_row: 0,
        }
    }
}

impl ReadConfig {
    /// Tab-delimited configuration.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }
}

/// Reads rows from a delimited source.
///
/// Quoted fields may contain delimiters and line breaks. Rows of any width
/// are returned; width checking against the header happens in
/// [`HeaderedRows`](yasd_core::HeaderedRows). Blank lines are skipped by
/// the parser and do not count as rows.
pub struct DelimitedReader<R: Read> {
    inner: csv::Reader<yasd_core::DecodeReader<R>>,
    counter: RowCounter,
    record: csv::StringRecord,
}

impl DelimitedReader<File> {
    /// Open a delimited file.
    pub fn open(path: impl AsRef<Path>, config: ReadConfig) -> yasd_core::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| yasd_core::Error::io(path, e))?;
        Ok(Self::from_reader(file, config))
    }
}

impl<R: Read> DelimitedReader<R> {
    /// Wrap any byte source.
    pub fn from_reader(reader: R, config: ReadConfig) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(config.encoding.decode_reader(reader));

        Self {
            inner,
            counter: RowCounter::new(config.start_row),
            record: csv::StringRecord::new(),
        }
    }
}

impl<R: Read> RowReader for DelimitedReader<R> {
    fn next_row(&mut self) -> yasd_core::Result<Option<Row>> {
        let more = self
            .inner
            .read_record(&mut self.record)
            .map_err(CsvError::from_csv)?;
        if !more {
            return Ok(None);
        }
        let cells = self.record.iter().map(str::to_string).collect();
        Ok(Some(self.counter.next(cells)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &[u8], config: ReadConfig) -> Vec<Row> {
        let mut reader = DelimitedReader::from_reader(input, config);
        let mut rows = Vec::new();
        while let Some(row) = reader.next_row().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_quoted_fields() {
        let rows = read_all(
            b"Name,Note\n\"Acme, Inc\",\"two\nlines\"\n",
            ReadConfig::default(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells, vec!["Acme, Inc", "two\nlines"]);
        assert_eq!(rows[1].number, 2);
    }

    #[test]
    fn test_tsv() {
        let rows = read_all(b"A\tB\n1\t2\n", ReadConfig::tsv());
        assert_eq!(rows[1].cells, vec!["1", "2"]);
    }

    #[test]
    fn test_start_row_consumes_rows() {
        let config = ReadConfig {
            start_row: 2,
            ..Default::default()
        };
        let rows = read_all(b"title\nexported\nName\nAcme\n", config);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].skipped && rows[1].skipped);
        assert_eq!(rows[2].cells, vec!["Name"]);
        assert_eq!(rows[3].cells, vec!["Acme"]);
    }

    #[test]
    fn test_ragged_rows_are_returned() {
        let rows = read_all(b"A,B\n1\n", ReadConfig::default());
        assert_eq!(rows[1].cells, vec!["1"]);
    }

    #[test]
    fn test_shift_jis_source() {
        let config = ReadConfig {
            encoding: Encoding::ShiftJis,
            ..Default::default()
        };
        // "名前\nあ" in Shift-JIS
        let input: &[u8] = &[0x96, 0xbc, 0x91, 0x4f, b'\n', 0x82, 0xa0, b'\n'];
        let rows = read_all(input, config);
        assert_eq!(rows[0].cells, vec!["名前"]);
        assert_eq!(rows[1].cells, vec!["あ"]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = DelimitedReader::open("/nonexistent/in.csv", ReadConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("/nonexistent/in.csv"));
    }
}
