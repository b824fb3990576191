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

//! Fixed-width sources.
//!
//! Each line is cut into fields at byte offsets given by a list of widths.
//! Widths count encoded bytes, so every slice is decoded on its own; a slice
//! boundary that falls inside a multi-byte character is a decode error.
//! Fixed-width files carry no header line. The reader emits a synthetic
//! header (row number 0) built from configured column names, or
//! `Field1..FieldN`, before the first physical line.

use crate::error::CsvError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use yasd_core::{Encoding, Error, Row, RowCounter, RowReader};

/// Field widths and optional column names.
///
/// # Examples
///
/// ```
/// use yasd_csv::FixedWidthLayout;
///
/// let layout = FixedWidthLayout::parse("6, 7,3").unwrap();
/// assert_eq!(layout.widths(), &[6, 7, 3]);
/// assert_eq!(layout.header(), vec!["Field1", "Field2", "Field3"]);
///
/// let layout = layout.with_columns(vec!["Code".into(), "Name".into(), "Qty".into()]).unwrap();
/// assert_eq!(layout.header(), vec!["Code", "Name", "Qty"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedWidthLayout {
    widths: Vec<usize>,
    columns: Option<Vec<String>>,
}

impl FixedWidthLayout {
    /// Create a layout from byte widths.
    pub fn new(widths: Vec<usize>) -> Result<Self, CsvError> {
        if widths.is_empty() {
            return Err(CsvError::Layout("no field widths given".to_string()));
        }
        if let Some(pos) = widths.iter().position(|&w| w == 0) {
            return Err(CsvError::Layout(format!("width 0 at position {}", pos + 1)));
        }
        Ok(Self {
            widths,
            columns: None,
        })
    }

    /// Parse a comma-separated width list such as `6,7,3`.
    pub fn parse(list: &str) -> Result<Self, CsvError> {
        let widths = list
            .split(',')
            .map(|w| {
                w.trim()
                    .parse::<usize>()
                    .map_err(|_| CsvError::Layout(format!("'{}' is not a width", w.trim())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(widths)
    }

    /// Name the columns. The number of names must match the widths.
    pub fn with_columns(mut self, columns: Vec<String>) -> Result<Self, CsvError> {
        if columns.len() != self.widths.len() {
            return Err(CsvError::Layout(format!(
                "{} column names for {} widths",
                columns.len(),
                self.widths.len()
            )));
        }
        self.columns = Some(columns);
        Ok(self)
    }

    /// Byte widths.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Header cells.
    pub fn header(&self) -> Vec<String> {
        match &self.columns {
            Some(columns) => columns.clone(),
            None => (1..=self.widths.len())
                .map(|i| format!("Field{i}"))
                .collect(),
        }
    }

    fn split(&self, line: &[u8], number: usize, encoding: Encoding) -> yasd_core::Result<Vec<String>> {
        let mut cells = Vec::with_capacity(self.widths.len());
        let mut start = 0;
        for width in &self.widths {
            let end = start + width;
            if line.len() < end {
                return Err(Error::ShortLine {
                    line: number,
                    needed: end,
                    actual: line.len(),
                });
            }
            let text = encoding
                .decode_field(&line[start..end])
                .ok_or(Error::Decode {
                    encoding: encoding.name(),
                    line: number,
                })?;
            cells.push(text.trim().to_string());
            start = end;
        }
        Ok(cells)
    }
}

/// Reads rows from a fixed-width source.
pub struct FixedWidthReader<R: BufRead> {
    input: R,
    layout: FixedWidthLayout,
    encoding: Encoding,
    counter: RowCounter,
    header_sent: bool,
    buf: Vec<u8>,
}

impl FixedWidthReader<BufReader<File>> {
    /// Open a fixed-width file.
    pub fn open(
        path: impl AsRef<Path>,
        layout: FixedWidthLayout,
        encoding: Encoding,
        start_row: usize,
    ) -> yasd_core::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_reader(
            BufReader::new(file),
            layout,
            encoding,
            start_row,
        ))
    }
}

impl<R: BufRead> FixedWidthReader<R> {
    /// Wrap any buffered byte source.
    pub fn from_reader(
        input: R,
        layout: FixedWidthLayout,
        encoding: Encoding,
        start_row: usize,
    ) -> Self {
        Self {
            input,
            layout,
            encoding,
            counter: RowCounter::new(start_row),
            header_sent: false,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> RowReader for FixedWidthReader<R> {
    fn next_row(&mut self) -> yasd_core::Result<Option<Row>> {
        if !self.header_sent {
            self.header_sent = true;
            return Ok(Some(Row::new(0, self.layout.header())));
        }

        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }

        let number = self.counter.count() + 1;
        let row = self.counter.next(Vec::new());
        if row.skipped {
            return Ok(Some(row));
        }
        let cells = self.layout.split(&self.buf, number, self.encoding)?;
        Ok(Some(Row::new(number, cells)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(input: &'static [u8], widths: &str, encoding: Encoding) -> FixedWidthReader<&'static [u8]> {
        FixedWidthReader::from_reader(input, FixedWidthLayout::parse(widths).unwrap(), encoding, 0)
    }

    #[test]
    fn test_split_and_trim() {
        let mut r = reader(b"ABC123Acme   42\nXYZ999Beta    7\n", "6,7,2", Encoding::Utf8);
        assert_eq!(r.next_row().unwrap().unwrap().cells, vec!["Field1", "Field2", "Field3"]);
        let row = r.next_row().unwrap().unwrap();
        assert_eq!(row.number, 1);
        assert_eq!(row.cells, vec!["ABC123", "Acme", "42"]);
        assert_eq!(r.next_row().unwrap().unwrap().cells, vec!["XYZ999", "Beta", "7"]);
        assert!(r.next_row().unwrap().is_none());
    }

    #[test]
    fn test_widths_count_encoded_bytes() {
        // "あい" + "x" in Shift-JIS, CRLF terminated
        let mut r = reader(&[0x82, 0xa0, 0x82, 0xa2, b'x', b'\r', b'\n'], "4,1", Encoding::ShiftJis);
        r.next_row().unwrap();
        assert_eq!(r.next_row().unwrap().unwrap().cells, vec!["あい", "x"]);
    }

    #[test]
    fn test_split_character_is_decode_error() {
        let mut r = reader(&[0x82, 0xa0, 0x82, 0xa2], "3,1", Encoding::ShiftJis);
        r.next_row().unwrap();
        assert!(matches!(
            r.next_row(),
            Err(Error::Decode { line: 1, .. })
        ));
    }

    #[test]
    fn test_short_line_names_line() {
        let mut r = reader(b"abcdef\nabc\n", "3,3", Encoding::Utf8);
        r.next_row().unwrap();
        r.next_row().unwrap();
        match r.next_row() {
            Err(Error::ShortLine { line, needed, actual }) => {
                assert_eq!(line, 2);
                assert_eq!(needed, 6);
                assert_eq!(actual, 3);
            }
            other => panic!("expected ShortLine, got {other:?}"),
        }
    }

    #[test]
    fn test_start_row_skips_without_splitting() {
        let layout = FixedWidthLayout::parse("2").unwrap();
        let mut r = FixedWidthReader::from_reader(&b"x\nab\n"[..], layout, Encoding::Utf8, 1);
        r.next_row().unwrap();
        assert!(r.next_row().unwrap().unwrap().skipped);
        assert_eq!(r.next_row().unwrap().unwrap().cells, vec!["ab"]);
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(FixedWidthLayout::parse("").is_err());
        assert!(FixedWidthLayout::parse("3,0").is_err());
        assert!(FixedWidthLayout::parse("3,x").is_err());
        let layout = FixedWidthLayout::parse("3,3").unwrap();
        assert!(layout.with_columns(vec!["A".into()]).is_err());
    }
}
