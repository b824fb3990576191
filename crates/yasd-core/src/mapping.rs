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

//! Header renaming through an external mapping file.
//!
//! A mapping file is a flat YAML map from source column name to destination
//! field name:
//!
//! ```yaml
//! customer_name: Name
//! customer_no: AccountNumber__c
//! owner_mail: Owner.Email
//! ```
//!
//! Lookup is exact and case-sensitive. Columns without an entry keep their
//! name.

use crate::error::{Error, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;

/// Source column name to destination field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: HashMap<String, String>,
}

impl FieldMap {
    /// Load a mapping file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text).map_err(|message| Error::Mapping {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err("expected a map of column names".to_string()),
        };

        let mut entries = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = scalar(&key).ok_or("keys must be scalar column names")?;
            let value = scalar(&value)
                .ok_or_else(|| format!("value for '{key}' must be a field name"))?;
            entries.insert(key, value);
        }
        Ok(Self { entries })
    }

    /// Build a map from pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Destination name for a source column, if mapped.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rename every header cell that has an entry.
    pub fn apply(&self, headers: Vec<String>) -> Vec<String> {
        headers
            .into_iter()
            .map(|header| match self.get(&header) {
                Some(mapped) => mapped.to_string(),
                None => header,
            })
            .collect()
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Apply an optional field map to a header row.
pub fn apply_mapping(headers: Vec<String>, map: Option<&FieldMap>) -> Vec<String> {
    match map {
        Some(map) => map.apply(headers),
        None => headers,
    }
}
