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

//! Spreadsheet target (`.xlsx`).

use crate::error::SheetError;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Write;
use yasd_core::{Record, RecordWriter};

/// Writes records into one worksheet of a new workbook.
///
/// Cells are buffered in memory; the workbook is serialized to the sink in
/// [`finish`](RecordWriter::finish). Every cell is written as text so
/// identifiers keep their leading zeros.
pub struct SheetWriter<W: Write> {
    out: W,
    sheet: Option<Worksheet>,
    row: u32,
}

impl<W: Write> SheetWriter<W> {
    /// Create a writer with one worksheet named `sheet_name`.
    pub fn new(out: W, sheet_name: &str) -> yasd_core::Result<Self> {
        let mut sheet = Worksheet::new();
        sheet.set_name(sheet_name).map_err(SheetError::from)?;
        Ok(Self {
            out,
            sheet: Some(sheet),
            row: 0,
        })
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_cells<'a>(&mut self, cells: impl Iterator<Item = &'a str>) -> Result<(), SheetError> {
        let Some(sheet) = self.sheet.as_mut() else {
            return Ok(());
        };
        for (index, cell) in cells.enumerate() {
            let col = u16::try_from(index).map_err(|_| SheetError::TooManyColumns(index + 1))?;
            sheet.write_string(self.row, col, cell)?;
        }
        self.row += 1;
        Ok(())
    }
}

impl<W: Write> RecordWriter for SheetWriter<W> {
    fn header(&mut self, columns: &[String]) -> yasd_core::Result<()> {
        self.write_cells(columns.iter().map(String::as_str))?;
        Ok(())
    }

    fn write(&mut self, columns: &[String], record: &Record) -> yasd_core::Result<()> {
        self.write_cells(columns.iter().map(|column| record.resolve(column)))?;
        Ok(())
    }

    fn finish(&mut self) -> yasd_core::Result<()> {
        let Some(sheet) = self.sheet.take() else {
            return Ok(());
        };
        let mut workbook = Workbook::new();
        workbook.push_worksheet(sheet);
        let bytes = workbook.save_to_buffer().map_err(SheetError::from)?;
        self.out.write_all(&bytes)?;
        self.out.flush()?;
        Ok(())
    }
}
