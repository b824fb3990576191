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

//! The seam between the transfer pipeline and the remote record service.

use crate::error::Result;
use crate::record::Record;
use std::collections::HashMap;
use std::fmt;

/// Separator used when several remote error messages are joined into one
/// error-stream cell.
pub const ERROR_SEPARATOR: &str = ":";

/// Outcome of one record in a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordResult {
    /// The record was accepted; `id` is its remote identifier.
    Success {
        /// Remote identifier
        id: String,
    },
    /// The record was rejected.
    Failure {
        /// Error messages, in the order the service returned them
        errors: Vec<String>,
    },
}

impl RecordResult {
    /// Shorthand for a success.
    pub fn success(id: impl Into<String>) -> Self {
        Self::Success { id: id.into() }
    }

    /// Shorthand for a failure with a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            errors: vec![message.into()],
        }
    }

    /// True for [`RecordResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error messages joined with [`ERROR_SEPARATOR`]; empty on success.
    pub fn joined_errors(&self) -> String {
        match self {
            Self::Success { .. } => String::new(),
            Self::Failure { errors } => errors.join(ERROR_SEPARATOR),
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPage {
    /// Records on this page.
    pub records: Vec<Record>,
    /// Locator for the next page; `None` on the last page.
    pub locator: Option<String>,
}

impl QueryPage {
    /// True when no further pages follow.
    pub fn is_done(&self) -> bool {
        self.locator.is_none()
    }
}

/// Metadata of one field of a remote type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescription {
    /// Field API name
    pub name: String,
    /// Remote field type (`string`, `reference`, ...)
    pub field_type: String,
    /// Relationship name for reference fields (`Account` for `AccountId`)
    pub relationship_name: Option<String>,
    /// Types a reference field may point to
    pub reference_to: Vec<String>,
}

/// Metadata of a remote type, as returned by `describe`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDescription {
    /// Type API name
    pub name: String,
    /// Field descriptions in service order
    pub fields: Vec<FieldDescription>,
}

impl TypeDescription {
    /// Relationship name to referenced type name.
    ///
    /// Fields without a relationship name or without a target type are
    /// ignored. When a polymorphic field can point at several types the
    /// first one wins.
    pub fn relationships(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                let relationship = field.relationship_name.as_ref()?;
                let target = field.reference_to.first()?;
                Some((relationship.clone(), target.clone()))
            })
            .collect()
    }

    /// Field names in service order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// The mutation a load run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create new records
    Insert,
    /// Update records by identifier
    Update,
    /// Insert or update keyed on an external-id field
    Upsert {
        /// External-id field name
        external_id_field: String,
    },
    /// Move records to the recycle bin
    Delete,
    /// Restore records from the recycle bin
    Undelete,
}

impl Operation {
    /// Remote operation name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert => "create",
            Self::Update => "update",
            Self::Upsert { .. } => "upsert",
            Self::Delete => "delete",
            Self::Undelete => "undelete",
        }
    }

    /// True when only identifiers are sent.
    pub fn is_id_only(&self) -> bool {
        matches!(self, Self::Delete | Self::Undelete)
    }

    /// True when the `Id` column carries the record identifier.
    pub fn uses_id(&self) -> bool {
        !matches!(self, Self::Insert)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remote record service.
///
/// Every batch method returns exactly one [`RecordResult`] per input, in
/// input order. An `Err` means the whole call failed.
pub trait RecordApi {
    /// Identifier of the organization the session belongs to.
    fn organization_id(&self) -> &str;

    /// Create records.
    fn create(&mut self, records: &[Record]) -> Result<Vec<RecordResult>>;

    /// Update records by identifier.
    fn update(&mut self, records: &[Record]) -> Result<Vec<RecordResult>>;

    /// Insert or update records keyed on `external_id_field`.
    fn upsert(&mut self, external_id_field: &str, records: &[Record])
        -> Result<Vec<RecordResult>>;

    /// Delete records by identifier.
    fn delete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>>;

    /// Restore deleted records by identifier.
    fn undelete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>>;

    /// Run a query and return its first page.
    fn query(&mut self, query: &str) -> Result<QueryPage>;

    /// Fetch the page after `locator`.
    fn query_more(&mut self, locator: &str) -> Result<QueryPage>;

    /// Describe a remote type.
    fn describe(&mut self, type_name: &str) -> Result<TypeDescription>;
}

impl<A: RecordApi + ?Sized> RecordApi for Box<A> {
    fn organization_id(&self) -> &str {
        (**self).organization_id()
    }

    fn create(&mut self, records: &[Record]) -> Result<Vec<RecordResult>> {
        (**self).create(records)
    }

    fn update(&mut self, records: &[Record]) -> Result<Vec<RecordResult>> {
        (**self).update(records)
    }

    fn upsert(
        &mut self,
        external_id_field: &str,
        records: &[Record],
    ) -> Result<Vec<RecordResult>> {
        (**self).upsert(external_id_field, records)
    }

    fn delete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>> {
        (**self).delete(ids)
    }

    fn undelete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>> {
        (**self).undelete(ids)
    }

    fn query(&mut self, query: &str) -> Result<QueryPage> {
        (**self).query(query)
    }

    fn query_more(&mut self, locator: &str) -> Result<QueryPage> {
        (**self).query_more(locator)
    }

    fn describe(&mut self, type_name: &str) -> Result<TypeDescription> {
        (**self).describe(type_name)
    }
}
