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

//! Source rows and the reader trait every input format implements.

use crate::error::{Error, Result};
use crate::mapping::{apply_mapping, FieldMap};

/// One row of cells read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Row number in the source (1-based).
    pub number: usize,
    /// Cell values in column order, decoded to UTF-8.
    pub cells: Vec<String>,
    /// True for rows before the configured start row. Skipped rows carry
    /// no cells.
    pub skipped: bool,
}

impl Row {
    /// Create a data row.
    pub fn new(number: usize, cells: Vec<String>) -> Self {
        Self {
            number,
            cells,
            skipped: false,
        }
    }

    /// Create a skipped row.
    pub fn skipped(number: usize) -> Self {
        Self {
            number,
            cells: Vec::new(),
            skipped: true,
        }
    }
}

/// A source of rows.
///
/// Implementations return `Ok(None)` once the source is exhausted and keep
/// returning it afterwards. Resources are released on drop; `close` exists
/// for readers that want to surface errors from releasing them.
pub trait RowReader {
    /// Read the next row.
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Release the underlying source.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: RowReader + ?Sized> RowReader for Box<R> {
    fn next_row(&mut self) -> Result<Option<Row>> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Numbers rows and applies the start-row offset.
///
/// Rows whose 0-based index is below `start_row` are still consumed from
/// the source but come back as [`Row::skipped`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCounter {
    start_row: usize,
    index: usize,
}

impl RowCounter {
    /// Create a counter that skips the first `start_row` rows.
    pub fn new(start_row: usize) -> Self {
        Self {
            start_row,
            index: 0,
        }
    }

    /// Number of rows seen so far.
    pub fn count(&self) -> usize {
        self.index
    }

    /// Wrap the cells of the next physical row.
    pub fn next(&mut self, cells: Vec<String>) -> Row {
        let index = self.index;
        self.index += 1;
        if index < self.start_row {
            Row::skipped(index + 1)
        } else {
            Row::new(index + 1, cells)
        }
    }
}

/// A reader split into its header row and width-checked data rows.
///
/// The first non-skipped row is the header. Every later data row must have
/// exactly as many cells as the header.
pub struct HeaderedRows<R> {
    reader: R,
    header: Vec<String>,
}

impl<R: RowReader> HeaderedRows<R> {
    /// Read up to and including the header row.
    pub fn new(mut reader: R) -> Result<Self> {
        loop {
            match reader.next_row()? {
                None => return Err(Error::MissingHeader),
                Some(row) if row.skipped => continue,
                Some(row) => {
                    return Ok(Self {
                        reader,
                        header: row.cells,
                    })
                }
            }
        }
    }

    /// Header cells, after any mapping.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Rename the header through a field map. Call at most once.
    pub fn map_header(&mut self, map: Option<&FieldMap>) {
        let header = std::mem::take(&mut self.header);
        self.header = apply_mapping(header, map);
    }

    /// Read the next data row, skipping rows before the start row.
    pub fn next_data_row(&mut self) -> Result<Option<Row>> {
        loop {
            match self.reader.next_row()? {
                None => return Ok(None),
                Some(row) if row.skipped => continue,
                Some(row) => {
                    if row.cells.len() != self.header.len() {
                        return Err(Error::RowWidth {
                            row: row.number,
                            expected: self.header.len(),
                            actual: row.cells.len(),
                        });
                    }
                    return Ok(Some(row));
                }
            }
        }
    }

    /// Close the underlying reader.
    pub fn close(mut self) -> Result<()> {
        self.reader.close()
    }
}
