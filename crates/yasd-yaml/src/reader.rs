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

//! YAML sequence sources.
//!
//! The document must be a sequence of mappings. It is converted to the JSON
//! data model and tabulated by [`DocumentReader`], so header order, start
//! row handling and cell rendering match the JSON source.

use crate::error::YamlError;
use serde_json::{Map, Value as JsonValue};
use serde_yaml::Value as YamlValue;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use yasd_core::{Encoding, Row, RowReader};
use yasd_json::DocumentReader;

/// Reads rows from a YAML sequence of mappings.
pub struct YamlReader {
    inner: DocumentReader,
}

impl YamlReader {
    /// Open a YAML file.
    pub fn open(
        path: impl AsRef<Path>,
        encoding: Encoding,
        start_row: usize,
    ) -> yasd_core::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| yasd_core::Error::io(path, e))?;
        Self::from_reader(file, encoding, start_row)
    }

    /// Decode a YAML byte source.
    pub fn from_reader<R: Read>(
        reader: R,
        encoding: Encoding,
        start_row: usize,
    ) -> yasd_core::Result<Self> {
        let mut text = String::new();
        encoding.decode_reader(reader).read_to_string(&mut text)?;
        if text.trim().is_empty() {
            return Ok(Self {
                inner: DocumentReader::from_entries(Vec::new(), start_row),
            });
        }

        let value: YamlValue = serde_yaml::from_str(&text).map_err(YamlError::from)?;
        let value = match value {
            YamlValue::Null => JsonValue::Array(Vec::new()),
            seq @ YamlValue::Sequence(_) => to_json(seq, "$")?,
            other => {
                return Err(YamlError::InvalidRoot {
                    found: kind(&other),
                }
                .into())
            }
        };
        let inner = DocumentReader::from_value(value, start_row).map_err(YamlError::from)?;
        Ok(Self { inner })
    }
}

impl RowReader for YamlReader {
    fn next_row(&mut self) -> yasd_core::Result<Option<Row>> {
        self.inner.next_row()
    }
}

fn to_json(value: YamlValue, path: &str) -> Result<JsonValue, YamlError> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => number(&n),
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(items) => JsonValue::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| to_json(item, &format!("{path}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    YamlValue::String(s) => s,
                    other => {
                        return Err(YamlError::NonStringKey {
                            key_type: kind(&other),
                            path: path.to_string(),
                        })
                    }
                };
                let child = to_json(value, &format!("{path}.{key}"))?;
                map.insert(key, child);
            }
            JsonValue::Object(map)
        }
        YamlValue::Tagged(tagged) => to_json(tagged.value, path)?,
    })
}

fn number(n: &serde_yaml::Number) -> JsonValue {
    if let Some(i) = n.as_i64() {
        JsonValue::from(i)
    } else if let Some(u) = n.as_u64() {
        JsonValue::from(u)
    } else {
        // NaN and infinities have no JSON form; keep their YAML spelling
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(n.to_string()))
    }
}

fn kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::HeaderedRows;

    fn rows(input: &str) -> yasd_core::Result<(Vec<String>, Vec<Vec<String>>)> {
        let reader = YamlReader::from_reader(input.as_bytes(), Encoding::Utf8, 0)?;
        let mut rows = HeaderedRows::new(reader)?;
        let header = rows.header().to_vec();
        let mut data = Vec::new();
        while let Some(row) = rows.next_data_row()? {
            data.push(row.cells);
        }
        Ok((header, data))
    }

    #[test]
    fn test_sequence_of_mappings() {
        let (header, data) = rows(
            "- Name: Acme\n  Employees: 12\n- Name: Beta\n  Active: true\n  Tags: [a, b]\n",
        )
        .unwrap();
        assert_eq!(header, vec!["Name", "Employees", "Active", "Tags"]);
        assert_eq!(data[0], vec!["Acme", "12", "", ""]);
        assert_eq!(data[1], vec!["Beta", "", "true", r#"["a","b"]"#]);
    }

    #[test]
    fn test_empty_document() {
        let (header, data) = rows("").unwrap();
        assert!(header.is_empty());
        assert!(data.is_empty());
    }

    #[test]
    fn test_rejects_mapping_root() {
        let err = rows("Name: Acme\n").unwrap_err();
        assert!(err.to_string().contains("Root must be a YAML sequence, found mapping"));
    }

    #[test]
    fn test_rejects_non_string_keys() {
        let err = rows("- 1: one\n").unwrap_err();
        assert!(err.to_string().contains("Non-string keys"), "{err}");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(rows("- [unclosed\n").is_err());
    }
}
