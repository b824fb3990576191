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

//! The record model exchanged with the remote API.

use std::collections::{BTreeMap, BTreeSet};

/// Name of the identifier column.
///
/// Identifier detection on input is an exact match against this name.
/// Column resolution on output matches it case-insensitively.
pub const ID_FIELD: &str = "Id";

/// A field value: a scalar, an explicit null, or a nested reference object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Explicit null returned by the remote API.
    Null,
    /// Scalar text value.
    Text(String),
    /// Nested record reached through a relationship.
    Reference(Box<Record>),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a reference value.
    pub fn reference(record: Record) -> Self {
        Self::Reference(Box::new(record))
    }

    /// Get the text of a scalar value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the nested record of a reference value.
    pub fn as_reference(&self) -> Option<&Record> {
        match self {
            Self::Reference(r) => Some(r),
            _ => None,
        }
    }
}

/// One entity instance sent to or received from the remote API.
///
/// A field name is either in the value mapping or in the null-set, never
/// both: [`Record::set_field`] and [`Record::set_null`] keep the two
/// disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Destination type name (e.g. `Account`).
    pub type_name: String,
    /// Remote identifier; absent for inserts.
    pub id: Option<String>,
    fields: BTreeMap<String, FieldValue>,
    fields_to_null: BTreeSet<String>,
}

impl Record {
    /// Create an empty record of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Build a reference object `{type, key_field: value}`.
    pub fn reference(
        type_name: impl Into<String>,
        key_field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut record = Self::new(type_name);
        record.set_field(key_field, FieldValue::text(value));
        record
    }

    /// Set a field value, removing it from the null-set.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        self.fields_to_null.remove(&name);
        self.fields.insert(name, value);
    }

    /// Request that a field be cleared, removing any value for it.
    pub fn set_null(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.fields.remove(&name);
        self.fields_to_null.insert(name);
    }

    /// Field values, ordered by name.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Fields explicitly requested to be cleared.
    pub fn fields_to_null(&self) -> &BTreeSet<String> {
        &self.fields_to_null
    }

    /// Look up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a field, falling back to a case-insensitive match.
    pub fn field_ignore_case(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).or_else(|| {
            self.fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    /// Resolve a column name or dotted path to display text.
    ///
    /// Plain names match case-insensitively. Dotted paths walk nested
    /// reference objects one segment at a time. An `Id` segment reads the
    /// record identifier. Any missing segment, null, or path ending on a
    /// nested object yields the empty string.
    pub fn resolve(&self, path: &str) -> &str {
        let mut current = self;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let last = segments.peek().is_none();

            if last && segment.eq_ignore_ascii_case(ID_FIELD) {
                if let Some(id) = current.id.as_deref() {
                    return id;
                }
            }

            match current.field_ignore_case(segment) {
                Some(FieldValue::Text(text)) if last => return text,
                Some(FieldValue::Reference(nested)) if !last => current = nested,
                _ => return "",
            }
        }

        ""
    }
}
