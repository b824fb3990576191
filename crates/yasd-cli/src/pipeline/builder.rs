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

//! Turns source rows into records.

use crate::pipeline::reference::ReferenceCache;
use yasd_core::{Error, FieldValue, Operation, Record, RecordApi, Result, Row, ID_FIELD};

/// What one header column contributes to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Skip,
    Id,
    Field(String),
    Reference {
        field: String,
        type_name: String,
        key: String,
    },
}

/// Builds one record per row for a fixed header and operation.
///
/// The header is classified once:
///
/// - `Id` (exact match) carries the identifier for update, upsert, delete
///   and undelete, and is ignored for insert.
/// - `Rel.Field` becomes a reference to the type behind relationship `Rel`
///   (`__R` is normalized to `__r`), keyed on `Field`.
/// - Any other non-empty name is a plain field.
///
/// Delete and undelete read only the identifier; they fail here when the
/// header has no `Id` column.
#[derive(Debug)]
pub struct RecordBuilder {
    type_name: String,
    columns: Vec<Column>,
    insert_nulls: bool,
}

impl RecordBuilder {
    /// Classify `header`, describing `type_name` through `cache` when a
    /// reference column needs it.
    pub fn new<A: RecordApi + ?Sized>(
        operation: &Operation,
        type_name: &str,
        header: &[String],
        insert_nulls: bool,
        cache: &mut ReferenceCache,
        api: &mut A,
    ) -> Result<Self> {
        if operation.is_id_only() && !header.iter().any(|h| h == ID_FIELD) {
            return Err(Error::config(format!(
                "{operation} needs an {ID_FIELD} column in the source"
            )));
        }

        let mut columns = Vec::with_capacity(header.len());
        for name in header {
            let column = if name == ID_FIELD {
                if operation.uses_id() {
                    Column::Id
                } else {
                    Column::Skip
                }
            } else if operation.is_id_only() || name.is_empty() {
                Column::Skip
            } else if let Some((relationship, key)) = name.split_once('.') {
                let field = relationship.replace("__R", "__r");
                let referenced = cache.referenced_type(api, type_name, &field)?;
                Column::Reference {
                    field,
                    type_name: referenced,
                    key: key.to_string(),
                }
            } else {
                Column::Field(name.clone())
            };
            columns.push(column);
        }

        Ok(Self {
            type_name: type_name.to_string(),
            columns,
            insert_nulls,
        })
    }

    /// Build the record for one data row.
    ///
    /// An empty `Id` cell leaves the identifier unset. With `insert_nulls`,
    /// an empty cell puts its field in the null-set; for a reference column
    /// that is the relationship field.
    pub fn build(&self, row: &Row) -> Record {
        let mut record = Record::new(self.type_name.as_str());
        for (column, cell) in self.columns.iter().zip(&row.cells) {
            match column {
                Column::Skip => {}
                Column::Id => {
                    if !cell.is_empty() {
                        record.id = Some(cell.clone());
                    }
                }
                Column::Field(name) if cell.is_empty() && self.insert_nulls => {
                    record.set_null(name.as_str())
                }
                Column::Field(name) => record.set_field(name.as_str(), FieldValue::text(cell)),
                Column::Reference { field, .. } if cell.is_empty() && self.insert_nulls => {
                    record.set_null(field.as_str())
                }
                Column::Reference {
                    field,
                    type_name,
                    key,
                } => record.set_field(
                    field.as_str(),
                    FieldValue::reference(Record::reference(
                        type_name.as_str(),
                        key.as_str(),
                        cell.as_str(),
                    )),
                ),
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_test::{fixtures, MockApi};

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Row {
        Row::new(2, cells.iter().map(|s| s.to_string()).collect())
    }

    fn builder(operation: Operation, names: &[&str], insert_nulls: bool) -> Result<RecordBuilder> {
        let mut api = MockApi::new().with_description(fixtures::contact_description());
        let mut cache = ReferenceCache::new();
        RecordBuilder::new(
            &operation,
            "Contact",
            &header(names),
            insert_nulls,
            &mut cache,
            &mut api,
        )
    }

    #[test]
    fn test_insert_ignores_id() {
        let b = builder(Operation::Insert, &["Id", "LastName"], false).unwrap();
        let record = b.build(&row(&["003A", "Lovelace"]));
        assert_eq!(record.id, None);
        assert_eq!(record.field("LastName"), Some(&FieldValue::text("Lovelace")));
        assert!(record.field("Id").is_none());
    }

    #[test]
    fn test_update_sets_id() {
        let b = builder(Operation::Update, &["Id", "LastName"], false).unwrap();
        let record = b.build(&row(&["003A", "Lovelace"]));
        assert_eq!(record.id.as_deref(), Some("003A"));
        assert_eq!(record.fields().len(), 1);
    }

    #[test]
    fn test_id_match_is_exact() {
        let b = builder(Operation::Update, &["ID", "LastName"], false).unwrap();
        let record = b.build(&row(&["003A", "Lovelace"]));
        assert_eq!(record.id, None);
        assert_eq!(record.field("ID"), Some(&FieldValue::text("003A")));
    }

    #[test]
    fn test_null_policy() {
        let with_nulls = builder(Operation::Update, &["Id", "Email", "LastName"], true).unwrap();
        let record = with_nulls.build(&row(&["003A", "", "Lovelace"]));
        assert!(record.fields_to_null().contains("Email"));
        assert!(record.field("Email").is_none());

        let without = builder(Operation::Update, &["Id", "Email", "LastName"], false).unwrap();
        let record = without.build(&row(&["003A", "", "Lovelace"]));
        assert!(record.fields_to_null().is_empty());
        assert_eq!(record.field("Email"), Some(&FieldValue::text("")));
    }

    #[test]
    fn test_reference_columns() {
        let b = builder(
            Operation::Insert,
            &["LastName", "Account.Code__c", "Company__R.Name"],
            true,
        )
        .unwrap();
        let record = b.build(&row(&["Lovelace", "A-1", ""]));

        let account = record.field("Account").and_then(FieldValue::as_reference).unwrap();
        assert_eq!(account.type_name, "Account");
        assert_eq!(account.field("Code__c"), Some(&FieldValue::text("A-1")));

        assert!(record.field("Company__r").is_none());
        assert!(record.fields_to_null().contains("Company__r"));
        assert_eq!(record.fields_to_null().len(), 1);
    }

    #[test]
    fn test_empty_reference_cell_null_policy() {
        let names = ["LastName", "Account.Code__c"];
        let with_nulls = builder(Operation::Update, &names, true).unwrap();
        let record = with_nulls.build(&row(&["Lovelace", ""]));
        assert!(record.fields_to_null().contains("Account"));
        assert!(record.field("Account").is_none());
        assert_eq!(record.field("LastName"), Some(&FieldValue::text("Lovelace")));

        let without = builder(Operation::Update, &names, false).unwrap();
        let record = without.build(&row(&["Lovelace", ""]));
        assert!(record.fields_to_null().is_empty());
        let account = record.field("Account").and_then(FieldValue::as_reference).unwrap();
        assert_eq!(account.field("Code__c"), Some(&FieldValue::text("")));
    }

    #[test]
    fn test_unknown_relationship_is_config_error() {
        let err = builder(Operation::Insert, &["Nope.Name"], false).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_delete_needs_id_column() {
        let err = builder(Operation::Delete, &["Name"], false).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let b = builder(Operation::Delete, &["Name", "Id", "Account.Name"], false).unwrap();
        let record = b.build(&row(&["x", "003A", "y"]));
        assert_eq!(record.id.as_deref(), Some("003A"));
        assert!(record.fields().is_empty());
    }
}
