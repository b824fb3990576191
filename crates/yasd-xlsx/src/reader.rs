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

//! Spreadsheet sources (`.xlsx`, `.xlsm`, `.xls`, `.ods`).

use crate::error::SheetError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use yasd_core::{Error, Row, RowCounter, RowReader};

/// Default sheet read by load commands.
pub const DEFAULT_SHEET: &str = "import";

/// Reads rows from one worksheet.
///
/// Rows run from the first row of the sheet to the last populated row, and
/// every row spans column A to the last populated column, so leading empty
/// rows and cells are kept as empty strings.
pub struct SheetReader {
    range: Range<Data>,
    next: u32,
    end: Option<(u32, u32)>,
    counter: RowCounter,
}

impl SheetReader {
    /// Open `sheet` in the workbook at `path`.
    pub fn open(path: impl AsRef<Path>, sheet: &str, start_row: usize) -> yasd_core::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            ));
        }
        let mut workbook = open_workbook_auto(path).map_err(SheetError::from)?;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(Error::MissingSheet(sheet.to_string()));
        }
        let range = workbook
            .worksheet_range(sheet)
            .map_err(SheetError::from)?;
        Ok(Self::from_range(range, start_row))
    }

    /// Read from an already loaded cell range.
    pub fn from_range(range: Range<Data>, start_row: usize) -> Self {
        let end = range.end();
        Self {
            range,
            next: 0,
            end,
            counter: RowCounter::new(start_row),
        }
    }
}

impl RowReader for SheetReader {
    fn next_row(&mut self) -> yasd_core::Result<Option<Row>> {
        let Some((last_row, last_col)) = self.end else {
            return Ok(None);
        };
        if self.next > last_row {
            return Ok(None);
        }
        let row = self.next;
        self.next += 1;

        let cells = (0..=last_col)
            .map(|col| {
                self.range
                    .get_value((row, col))
                    .map(cell_text)
                    .unwrap_or_default()
            })
            .collect();
        Ok(Some(self.counter.next(cells)))
    }
}

/// Text form of a cell.
///
/// Numbers use their shortest form (`42`, `1.5`); dates stored as serial
/// numbers are rendered as the serial number.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => e.to_string(),
    }
}
