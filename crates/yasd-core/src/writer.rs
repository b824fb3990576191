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

//! Export targets.

use crate::error::Result;
use crate::record::Record;
use std::io::Write;

/// Renders query results.
///
/// The export pipeline calls [`header`](RecordWriter::header) once, then
/// [`write`](RecordWriter::write) for every record with the same column
/// list, and finally [`finish`](RecordWriter::finish), also when the
/// export stops on an error.
pub trait RecordWriter {
    /// Emit the header for `columns`. Formats without a header row may use
    /// this to start the document.
    fn header(&mut self, columns: &[String]) -> Result<()>;

    /// Emit one record, resolving each column against it.
    fn write(&mut self, columns: &[String], record: &Record) -> Result<()>;

    /// Close the document and flush the sink.
    fn finish(&mut self) -> Result<()>;
}

impl<W: RecordWriter + ?Sized> RecordWriter for Box<W> {
    fn header(&mut self, columns: &[String]) -> Result<()> {
        (**self).header(columns)
    }

    fn write(&mut self, columns: &[String], record: &Record) -> Result<()> {
        (**self).write(columns, record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Dumps every record with its pretty `Debug` form. Columns are ignored.
pub struct DebugWriter<W: Write> {
    out: W,
}

impl<W: Write> DebugWriter<W> {
    /// Create a debug writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordWriter for DebugWriter<W> {
    fn header(&mut self, _columns: &[String]) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, _columns: &[String], record: &Record) -> Result<()> {
        writeln!(self.out, "{record:#?}")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    #[test]
    fn test_debug_writer_dumps_record() {
        let mut record = Record::new("Account").with_id("001");
        record.set_field("Name", FieldValue::text("Acme"));

        let mut writer = DebugWriter::new(Vec::new());
        writer.header(&["Name".to_string()]).unwrap();
        writer.write(&["Name".to_string()], &record).unwrap();
        writer.finish().unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("type_name: \"Account\""));
        assert!(out.contains("\"Acme\""));
    }
}
