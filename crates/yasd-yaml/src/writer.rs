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

//! YAML sequence target.

use crate::error::YamlError;
use serde_yaml::{Mapping, Value};
use std::io::Write;
use yasd_core::{EncodeWriter, Encoding, Record, RecordWriter};

/// Writes records as a YAML sequence of mappings, one entry per record.
///
/// Entries are serialized as they arrive, so the whole result set is never
/// held in memory. An export with no records produces `[]`.
///
/// # Examples
///
/// ```
/// use yasd_core::{Encoding, FieldValue, Record, RecordWriter};
/// use yasd_yaml::YamlWriter;
///
/// let columns = vec!["Name".to_string(), "Owner.Name".to_string()];
/// let mut record = Record::new("Account");
/// record.set_field("Name", FieldValue::text("Acme"));
///
/// let mut writer = YamlWriter::new(Vec::new(), Encoding::Utf8);
/// writer.header(&columns).unwrap();
/// writer.write(&columns, &record).unwrap();
/// writer.finish().unwrap();
///
/// let out = String::from_utf8(writer.into_inner()).unwrap();
/// assert_eq!(out, "- Name: Acme\n  Owner.Name: ''\n");
/// ```
pub struct YamlWriter<W: Write> {
    out: EncodeWriter<W>,
    entries: usize,
}

impl<W: Write> YamlWriter<W> {
    /// Create a writer.
    pub fn new(out: W, encoding: Encoding) -> Self {
        Self {
            out: encoding.encode_writer(out),
            entries: 0,
        }
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> RecordWriter for YamlWriter<W> {
    fn header(&mut self, _columns: &[String]) -> yasd_core::Result<()> {
        Ok(())
    }

    fn write(&mut self, columns: &[String], record: &Record) -> yasd_core::Result<()> {
        let mut entry = Mapping::with_capacity(columns.len());
        for column in columns {
            entry.insert(
                Value::String(column.clone()),
                Value::String(record.resolve(column).to_string()),
            );
        }
        let text = serde_yaml::to_string(&vec![Value::Mapping(entry)])
            .map_err(|e| YamlError::Serialize(e.to_string()))?;
        self.out.write_all(text.as_bytes())?;
        self.entries += 1;
        Ok(())
    }

    fn finish(&mut self) -> yasd_core::Result<()> {
        if self.entries == 0 {
            self.out.write_all(b"[]\n")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
