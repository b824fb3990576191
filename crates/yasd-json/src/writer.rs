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

//! JSON array and JSON Lines targets.
//!
//! Each record becomes one object keyed by the requested columns, in column
//! order, with resolved text values.

use crate::error::JsonError;
use serde_json::{Map, Value};
use std::io::Write;
use yasd_core::{EncodeWriter, Encoding, Record, RecordWriter};

fn record_object(columns: &[String], record: &Record) -> Value {
    let map: Map<String, Value> = columns
        .iter()
        .map(|column| {
            (
                column.clone(),
                Value::String(record.resolve(column).to_string()),
            )
        })
        .collect();
    Value::Object(map)
}

/// Streams records as one JSON array.
///
/// # Examples
///
/// ```
/// use yasd_core::{Encoding, FieldValue, Record, RecordWriter};
/// use yasd_json::JsonWriter;
///
/// let columns = vec!["Id".to_string(), "Name".to_string()];
/// let mut record = Record::new("Account").with_id("001");
/// record.set_field("Name", FieldValue::text("Acme"));
///
/// let mut writer = JsonWriter::new(Vec::new(), Encoding::Utf8);
/// writer.header(&columns).unwrap();
/// writer.write(&columns, &record).unwrap();
/// writer.finish().unwrap();
///
/// let out = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(out, "[\n{\"Id\":\"001\",\"Name\":\"Acme\"}\n]\n");
/// ```
pub struct JsonWriter<W: Write> {
    out: EncodeWriter<W>,
    started: bool,
    entries: usize,
}

impl<W: Write> JsonWriter<W> {
    /// Create a writer.
    pub fn new(out: W, encoding: Encoding) -> Self {
        Self {
            out: encoding.encode_writer(out),
            started: false,
            entries: 0,
        }
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn start(&mut self) -> Result<(), JsonError> {
        if !self.started {
            self.out.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> RecordWriter for JsonWriter<W> {
    fn header(&mut self, _columns: &[String]) -> yasd_core::Result<()> {
        self.start()?;
        Ok(())
    }

    fn write(&mut self, columns: &[String], record: &Record) -> yasd_core::Result<()> {
        self.start()?;
        let separator: &[u8] = if self.entries == 0 { b"\n" } else { b",\n" };
        self.out.write_all(separator)?;
        serde_json::to_writer(&mut self.out, &record_object(columns, record))
            .map_err(JsonError::Serialize)?;
        self.entries += 1;
        Ok(())
    }

    fn finish(&mut self) -> yasd_core::Result<()> {
        self.start()?;
        let close: &[u8] = if self.entries == 0 { b"]\n" } else { b"\n]\n" };
        self.out.write_all(close)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesWriter<W: Write> {
    out: EncodeWriter<W>,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Create a writer.
    pub fn new(out: W, encoding: Encoding) -> Self {
        Self {
            out: encoding.encode_writer(out),
        }
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> RecordWriter for JsonLinesWriter<W> {
    fn header(&mut self, _columns: &[String]) -> yasd_core::Result<()> {
        Ok(())
    }

    fn write(&mut self, columns: &[String], record: &Record) -> yasd_core::Result<()> {
        serde_json::to_writer(&mut self.out, &record_object(columns, record))
            .map_err(JsonError::Serialize)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> yasd_core::Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::FieldValue;

    fn columns() -> Vec<String> {
        vec!["Name".to_string(), "Owner.Name".to_string()]
    }

    fn records() -> Vec<Record> {
        let mut owner = Record::new("User");
        owner.set_field("Name", FieldValue::text("Ada"));
        let mut first = Record::new("Account");
        first.set_field("Name", FieldValue::text("Acme"));
        first.set_field("Owner", FieldValue::reference(owner));
        let mut second = Record::new("Account");
        second.set_field("Name", FieldValue::text("Beta"));
        vec![first, second]
    }

    #[test]
    fn test_array_output_is_valid_json() {
        let mut writer = JsonWriter::new(Vec::new(), Encoding::Utf8);
        writer.header(&columns()).unwrap();
        for record in records() {
            writer.write(&columns(), &record).unwrap();
        }
        writer.finish().unwrap();

        let value: Value = serde_json::from_slice(&writer.into_inner()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"Name": "Acme", "Owner.Name": "Ada"},
                {"Name": "Beta", "Owner.Name": ""}
            ])
        );
    }

    #[test]
    fn test_empty_array() {
        let mut writer = JsonWriter::new(Vec::new(), Encoding::Utf8);
        writer.header(&columns()).unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.into_inner(), b"[]\n");
    }

    #[test]
    fn test_finish_without_header_still_closes_array() {
        let mut writer = JsonWriter::new(Vec::new(), Encoding::Utf8);
        writer.finish().unwrap();
        assert_eq!(writer.into_inner(), b"[]\n");
    }

    #[test]
    fn test_json_lines() {
        let mut writer = JsonLinesWriter::new(Vec::new(), Encoding::Utf8);
        writer.header(&columns()).unwrap();
        for record in records() {
            writer.write(&columns(), &record).unwrap();
        }
        writer.finish().unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "{\"Name\":\"Acme\",\"Owner.Name\":\"Ada\"}\n{\"Name\":\"Beta\",\"Owner.Name\":\"\"}\n"
        );
    }
}
