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

//! Structured-document sources.
//!
//! A document is decoded eagerly into a table. The header is the union of
//! the keys of every entry, in first-seen order, and is emitted as a
//! synthetic row (number 0) that the start-row offset does not apply to.
//! Each entry becomes one row in header order:
//!
//! - missing keys and `null` render as the empty string
//! - strings render as-is, numbers and booleans in their JSON text form
//! - arrays and objects render as compact JSON

use crate::error::{type_name, JsonError};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use yasd_core::{Encoding, Row, RowCounter, RowReader};

/// JSON document layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// One top-level array of objects.
    Array,
    /// One object per line (`.jsonl`, `.ndjson`).
    Lines,
}

/// Reads rows from a decoded document.
pub struct DocumentReader {
    header: Option<Vec<String>>,
    rows: std::vec::IntoIter<Vec<String>>,
    counter: RowCounter,
}

impl DocumentReader {
    /// Open a JSON or JSON Lines file.
    pub fn open(
        path: impl AsRef<Path>,
        layout: JsonLayout,
        encoding: Encoding,
        start_row: usize,
    ) -> yasd_core::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| yasd_core::Error::io(path, e))?;
        Self::from_reader(file, layout, encoding, start_row)
    }

    /// Decode a JSON or JSON Lines byte source.
    pub fn from_reader<R: Read>(
        reader: R,
        layout: JsonLayout,
        encoding: Encoding,
        start_row: usize,
    ) -> yasd_core::Result<Self> {
        let decoded = encoding.decode_reader(reader);
        let entries = match layout {
            JsonLayout::Array => read_array(decoded)?,
            JsonLayout::Lines => read_lines(BufReader::new(decoded))?,
        };
        Ok(Self::from_entries(entries, start_row))
    }

    /// Build a reader from already-decoded objects.
    pub fn from_entries(entries: Vec<Map<String, Value>>, start_row: usize) -> Self {
        let mut header = Vec::new();
        let mut seen = HashSet::new();
        for entry in &entries {
            for key in entry.keys() {
                if seen.insert(key.as_str()) {
                    header.push(key.clone());
                }
            }
        }

        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|entry| {
                header
                    .iter()
                    .map(|key| entry.get(key).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            header: Some(header),
            rows: rows.into_iter(),
            counter: RowCounter::new(start_row),
        }
    }

    /// Build a reader from a decoded array value.
    pub fn from_value(value: Value, start_row: usize) -> Result<Self, JsonError> {
        Ok(Self::from_entries(objects(value)?, start_row))
    }
}

impl RowReader for DocumentReader {
    fn next_row(&mut self) -> yasd_core::Result<Option<Row>> {
        if let Some(header) = self.header.take() {
            return Ok(Some(Row::new(0, header)));
        }
        Ok(self.rows.next().map(|cells| self.counter.next(cells)))
    }
}

/// Text form of one JSON value as a cell.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn objects(value: Value) -> Result<Vec<Map<String, Value>>, JsonError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(JsonError::InvalidRoot(type_name(&other))),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            other => Err(JsonError::NotAnObject {
                entry: i + 1,
                found: type_name(&other),
            }),
        })
        .collect()
}

fn read_array<R: Read>(reader: R) -> Result<Vec<Map<String, Value>>, JsonError> {
    let value: Value = serde_json::from_reader(reader).map_err(|e| JsonError::parse(e, 0))?;
    objects(value)
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<Map<String, Value>>, JsonError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| JsonError::parse(e, index))?;
        match value {
            Value::Object(map) => entries.push(map),
            other => {
                return Err(JsonError::NotAnObject {
                    entry: index + 1,
                    found: type_name(&other),
                })
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::HeaderedRows;

    fn table(input: &str, layout: JsonLayout) -> (Vec<String>, Vec<Vec<String>>) {
        table_from(input, layout, 0)
    }

    fn table_from(
        input: &str,
        layout: JsonLayout,
        start_row: usize,
    ) -> (Vec<String>, Vec<Vec<String>>) {
        let reader =
            DocumentReader::from_reader(input.as_bytes(), layout, Encoding::Utf8, start_row)
                .unwrap();
        let mut rows = HeaderedRows::new(reader).unwrap();
        let header = rows.header().to_vec();
        let mut data = Vec::new();
        while let Some(row) = rows.next_data_row().unwrap() {
            data.push(row.cells);
        }
        (header, data)
    }

    #[test]
    fn test_header_is_union_in_first_seen_order() {
        let (header, rows) = table(
            r#"[{"Name": "Acme", "Phone": "1"}, {"Code": 7, "Name": "Beta"}]"#,
            JsonLayout::Array,
        );
        assert_eq!(header, vec!["Name", "Phone", "Code"]);
        assert_eq!(rows[0], vec!["Acme", "1", ""]);
        assert_eq!(rows[1], vec!["Beta", "", "7"]);
    }

    #[test]
    fn test_value_rendering() {
        let (_, rows) = table(
            r#"[{"a": null, "b": true, "c": 1.5, "d": [1, 2], "e": {"x": "y"}}]"#,
            JsonLayout::Array,
        );
        assert_eq!(rows[0], vec!["", "true", "1.5", "[1,2]", r#"{"x":"y"}"#]);
    }

    #[test]
    fn test_json_lines_skip_blank_lines() {
        let (header, rows) = table("{\"Id\": \"1\"}\n\n{\"Id\": \"2\"}\n", JsonLayout::Lines);
        assert_eq!(header, vec!["Id"]);
        assert_eq!(rows, vec![vec!["1"], vec!["2"]]);
    }

    #[test]
    fn test_json_lines_error_names_line() {
        let err = DocumentReader::from_reader(
            "{\"Id\": \"1\"}\n{oops}\n".as_bytes(),
            JsonLayout::Lines,
            Encoding::Utf8,
            0,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_rejects_non_object_entries() {
        let err = DocumentReader::from_reader(
            r#"[{"a": 1}, "b"]"#.as_bytes(),
            JsonLayout::Array,
            Encoding::Utf8,
            0,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("Entry 2 must be an object"));
    }

    #[test]
    fn test_rejects_object_root() {
        assert!(DocumentReader::from_reader(
            r#"{"a": 1}"#.as_bytes(),
            JsonLayout::Array,
            Encoding::Utf8,
            0
        )
        .is_err());
    }

    #[test]
    fn test_start_row_applies_to_entries() {
        let (_, rows) = table_from(
            r#"[{"a": "1"}, {"a": "2"}, {"a": "3"}]"#,
            JsonLayout::Array,
            2,
        );
        assert_eq!(rows, vec![vec!["3"]]);
    }
}
