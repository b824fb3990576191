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

//! In-memory [`RecordApi`] that records every call.

use std::collections::{HashMap, VecDeque};
use yasd_core::{Error, QueryPage, Record, RecordApi, RecordResult, Result, TypeDescription};

/// One call received by [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(Vec<Record>),
    Update(Vec<Record>),
    Upsert {
        external_id_field: String,
        records: Vec<Record>,
    },
    Delete(Vec<String>),
    Undelete(Vec<String>),
    Query(String),
    QueryMore(String),
    Describe(String),
}

impl Call {
    /// Number of records or ids in a batch call; `None` for other calls.
    pub fn batch_len(&self) -> Option<usize> {
        match self {
            Call::Create(records) | Call::Update(records) => Some(records.len()),
            Call::Upsert { records, .. } => Some(records.len()),
            Call::Delete(ids) | Call::Undelete(ids) => Some(ids.len()),
            _ => None,
        }
    }
}

/// Identifier the mock assigns to the `ordinal`-th submitted record (0-based).
pub fn mock_id(ordinal: usize) -> String {
    format!("001{:012}", ordinal + 1)
}

/// A scripted remote API.
///
/// Batch calls succeed record by record unless a failure was registered
/// for that record's ordinal (counted across all batch calls). Query calls
/// hand out the scripted pages in order.
///
/// # Examples
///
/// ```
/// use yasd_core::{Record, RecordApi, RecordResult};
/// use yasd_test::MockApi;
///
/// let mut api = MockApi::new().fail_record(1, "DUPLICATE_VALUE");
/// let results = api.create(&[Record::new("Account"), Record::new("Account")]).unwrap();
/// assert!(results[0].is_success());
/// assert_eq!(results[1], RecordResult::failure("DUPLICATE_VALUE"));
/// assert_eq!(api.batch_sizes(), vec![2]);
/// ```
#[derive(Debug, Default)]
pub struct MockApi {
    organization_id: String,
    calls: Vec<Call>,
    failures: HashMap<usize, Vec<String>>,
    submitted: usize,
    pages: VecDeque<QueryPage>,
    descriptions: HashMap<String, TypeDescription>,
    call_error: Option<String>,
    drop_last_result: bool,
}

impl MockApi {
    /// Create a mock for organization `00D000000000001`.
    pub fn new() -> Self {
        Self {
            organization_id: "00D000000000001".to_string(),
            ..Default::default()
        }
    }

    /// Use a different organization id.
    pub fn with_organization(mut self, id: &str) -> Self {
        self.organization_id = id.to_string();
        self
    }

    /// Reject the `ordinal`-th submitted record (0-based) with `message`.
    pub fn fail_record(mut self, ordinal: usize, message: &str) -> Self {
        self.failures
            .entry(ordinal)
            .or_default()
            .push(message.to_string());
        self
    }

    /// Answer queries with `pages`, in order.
    pub fn with_pages(mut self, pages: Vec<QueryPage>) -> Self {
        self.pages = pages.into();
        self
    }

    /// Answer `describe` for the described type.
    pub fn with_description(mut self, description: TypeDescription) -> Self {
        self.descriptions
            .insert(description.name.clone(), description);
        self
    }

    /// Fail every batch call as a whole.
    pub fn failing_calls(mut self, message: &str) -> Self {
        self.call_error = Some(message.to_string());
        self
    }

    /// Return one result fewer than records submitted.
    pub fn short_results(mut self) -> Self {
        self.drop_last_result = true;
        self
    }

    /// Every call received, in order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Sizes of the batch calls received, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls.iter().filter_map(Call::batch_len).collect()
    }

    /// Number of `describe` calls received.
    pub fn describe_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Describe(_)))
            .count()
    }

    /// Records of every create/update/upsert call, flattened.
    pub fn submitted_records(&self) -> Vec<&Record> {
        self.calls
            .iter()
            .flat_map(|call| match call {
                Call::Create(records) | Call::Update(records) => records.iter().collect(),
                Call::Upsert { records, .. } => records.iter().collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    fn results(&mut self, operation: &str, count: usize) -> Result<Vec<RecordResult>> {
        if let Some(message) = &self.call_error {
            return Err(Error::api(operation, message.clone()));
        }
        let mut results: Vec<RecordResult> = (0..count)
            .map(|i| {
                let ordinal = self.submitted + i;
                match self.failures.get(&ordinal) {
                    Some(errors) => RecordResult::Failure {
                        errors: errors.clone(),
                    },
                    None => RecordResult::success(mock_id(ordinal)),
                }
            })
            .collect();
        self.submitted += count;
        if self.drop_last_result {
            results.pop();
        }
        Ok(results)
    }
}

impl RecordApi for MockApi {
    fn organization_id(&self) -> &str {
        &self.organization_id
    }

    fn create(&mut self, records: &[Record]) -> Result<Vec<RecordResult>> {
        self.calls.push(Call::Create(records.to_vec()));
        self.results("create", records.len())
    }

    fn update(&mut self, records: &[Record]) -> Result<Vec<RecordResult>> {
        self.calls.push(Call::Update(records.to_vec()));
        self.results("update", records.len())
    }

    fn upsert(&mut self, external_id_field: &str, records: &[Record]) -> Result<Vec<RecordResult>> {
        self.calls.push(Call::Upsert {
            external_id_field: external_id_field.to_string(),
            records: records.to_vec(),
        });
        self.results("upsert", records.len())
    }

    fn delete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>> {
        self.calls.push(Call::Delete(ids.to_vec()));
        self.results("delete", ids.len())
    }

    fn undelete(&mut self, ids: &[String]) -> Result<Vec<RecordResult>> {
        self.calls.push(Call::Undelete(ids.to_vec()));
        self.results("undelete", ids.len())
    }

    fn query(&mut self, query: &str) -> Result<QueryPage> {
        self.calls.push(Call::Query(query.to_string()));
        Ok(self.pages.pop_front().unwrap_or_default())
    }

    fn query_more(&mut self, locator: &str) -> Result<QueryPage> {
        self.calls.push(Call::QueryMore(locator.to_string()));
        self.pages
            .pop_front()
            .ok_or_else(|| Error::api("queryMore", format!("INVALID_QUERY_LOCATOR: {locator}")))
    }

    fn describe(&mut self, type_name: &str) -> Result<TypeDescription> {
        self.calls.push(Call::Describe(type_name.to_string()));
        self.descriptions
            .get(type_name)
            .cloned()
            .ok_or_else(|| Error::api("describeSObject", format!("INVALID_TYPE: {type_name}")))
    }
}
