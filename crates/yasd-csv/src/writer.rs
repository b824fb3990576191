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

//! Delimited (CSV / TSV) targets.

use crate::error::CsvError;
use std::io::Write;
use yasd_core::{EncodeWriter, Encoding, Record, RecordWriter};

/// Configuration for delimited output.
#[derive(Debug, Clone)]
pub struct WriteConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Target encoding (default: UTF-8)
    pub encoding: Encoding,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: Encoding::Utf8,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

/// Writes records as delimited rows.
///
/// # Examples
///
/// ```
/// use yasd_core::{FieldValue, Record, RecordWriter};
/// use yasd_csv::{DelimitedWriter, WriteConfig};
///
/// let columns = vec!["Id".to_string(), "Name".to_string()];
/// let mut record = Record::new("Account").with_id("001");
/// record.set_field("Name", FieldValue::text("Acme, Inc"));
///
/// let mut out = Vec::new();
/// let mut writer = DelimitedWriter::new(&mut out, WriteConfig::default());
/// writer.header(&columns).unwrap();
/// writer.write(&columns, &record).unwrap();
/// writer.finish().unwrap();
/// drop(writer);
///
/// assert_eq!(String::from_utf8(out).unwrap(), "Id,Name\n001,\"Acme, Inc\"\n");
/// ```
pub struct DelimitedWriter<W: Write> {
    inner: csv::Writer<EncodeWriter<W>>,
}

impl<W: Write> DelimitedWriter<W> {
    /// Create a writer over any sink.
    pub fn new(out: W, config: WriteConfig) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(config.delimiter)
            .quote_style(config.quote_style)
            .from_writer(config.encoding.encode_writer(out));
        Self { inner }
    }

    /// Write one raw row.
    pub fn write_row<I, T>(&mut self, cells: I) -> yasd_core::Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner
            .write_record(cells)
            .map_err(CsvError::from_csv)?;
        Ok(())
    }

    /// Flush buffered rows to the sink.
    pub fn flush(&mut self) -> yasd_core::Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

impl<W: Write> RecordWriter for DelimitedWriter<W> {
    fn header(&mut self, columns: &[String]) -> yasd_core::Result<()> {
        self.write_row(columns)
    }

    fn write(&mut self, columns: &[String], record: &Record) -> yasd_core::Result<()> {
        self.write_row(columns.iter().map(|column| record.resolve(column)))
    }

    fn finish(&mut self) -> yasd_core::Result<()> {
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::FieldValue;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_dotted_columns() {
        let mut account = Record::new("Account");
        account.set_field("Name", FieldValue::text("Acme"));
        let mut contact = Record::new("Contact").with_id("003");
        contact.set_field("Account", FieldValue::reference(account));

        let cols = columns(&["id", "Account.Name", "Account.Owner.Name"]);
        let mut out = Vec::new();
        {
            let mut writer = DelimitedWriter::new(&mut out, WriteConfig::default());
            writer.header(&cols).unwrap();
            writer.write(&cols, &contact).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,Account.Name,Account.Owner.Name\n003,Acme,\n"
        );
    }

    #[test]
    fn test_tab_delimited_shift_jis() {
        let mut record = Record::new("Account");
        record.set_field("Name", FieldValue::text("あ"));
        let cols = columns(&["Name", "Code"]);

        let config = WriteConfig {
            delimiter: b'\t',
            encoding: Encoding::ShiftJis,
            ..Default::default()
        };
        let mut out = Vec::new();
        {
            let mut writer = DelimitedWriter::new(&mut out, config);
            writer.write(&cols, &record).unwrap();
            writer.finish().unwrap();
        }
        assert_eq!(out, vec![0x82, 0xa0, b'\t', b'\n']);
    }
}
