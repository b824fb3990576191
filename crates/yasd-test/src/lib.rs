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

//! Shared test fixtures and utilities for the YASD crates.
//!
//! - [`fixtures`]: source documents in every input format, type
//!   descriptions and query records
//! - [`MockApi`]: an in-memory [`yasd_core::RecordApi`] that records every
//!   call and can be scripted to reject records, fail whole calls or serve
//!   query pages
//!
//! # Quick Start
//!
//! ```rust
//! use yasd_test::{fixtures, MockApi};
//!
//! let csv = fixtures::temp_file(".csv", fixtures::names_csv(450).as_bytes());
//! let api = MockApi::new()
//!     .with_description(fixtures::contact_description())
//!     .fail_record(3, "REQUIRED_FIELD_MISSING");
//! # drop((csv, api));
//! ```

/// Canonical test fixtures.
pub mod fixtures;

mod mock;

pub use mock::{mock_id, Call, MockApi};

#[cfg(test)]
mod tests {
    use super::*;
    use yasd_core::{QueryPage, Record, RecordApi, RecordResult};

    #[test]
    fn test_failures_count_across_calls() {
        let mut api = MockApi::new().fail_record(2, "boom");
        let first = api.create(&[Record::new("A"), Record::new("A")]).unwrap();
        assert!(first.iter().all(RecordResult::is_success));
        let second = api.create(&[Record::new("A")]).unwrap();
        assert_eq!(second[0].joined_errors(), "boom");
        assert_eq!(api.batch_sizes(), vec![2, 1]);
    }

    #[test]
    fn test_pages_in_order() {
        let mut api = MockApi::new().with_pages(vec![
            QueryPage {
                records: vec![fixtures::account("001", "Acme", None)],
                locator: Some("01g-500".into()),
            },
            QueryPage::default(),
        ]);
        assert_eq!(api.query("SELECT Id FROM Account").unwrap().records.len(), 1);
        assert!(api.query_more("01g-500").unwrap().is_done());
        assert!(api.query_more("01g-1000").is_err());
    }

    #[test]
    fn test_describe_unknown_type() {
        let mut api = MockApi::new().with_description(fixtures::account_description());
        assert!(api.describe("Account").is_ok());
        assert!(api.describe("Nope").is_err());
        assert_eq!(api.describe_count(), 2);
    }

    #[test]
    fn test_names_csv() {
        assert_eq!(fixtures::names_csv(2), "Name\nAccount 1\nAccount 2\n");
    }
}
