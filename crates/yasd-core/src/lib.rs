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

//! Core data model for YASD bulk record transfers.
//!
//! This crate holds everything the format crates and the transfer pipeline
//! share:
//!
//! - [`Row`] and the [`RowReader`] trait implemented by every source format
//! - [`HeaderedRows`], which splits a source into a header and width-checked data rows
//! - [`Record`] and [`FieldValue`], the canonical unit exchanged with the remote API
//! - [`FieldMap`] for header renaming
//! - [`Encoding`] for Shift-JIS / EUC-JP / UTF-8 transcoding
//! - [`RecordWriter`] for export targets
//! - [`RecordApi`], the seam to the remote record service
//!
//! # Examples
//!
//! ```
//! use yasd_core::{FieldValue, Record};
//!
//! let mut owner = Record::new("User");
//! owner.set_field("Name", FieldValue::text("Ada"));
//!
//! let mut account = Record::new("Account").with_id("001000000000001");
//! account.set_field("Name", FieldValue::text("Acme"));
//! account.set_field("Owner", FieldValue::reference(owner));
//!
//! assert_eq!(account.resolve("name"), "Acme");
//! assert_eq!(account.resolve("Owner.Name"), "Ada");
//! assert_eq!(account.resolve("ID"), "001000000000001");
//! assert_eq!(account.resolve("Owner.Manager.Name"), "");
//! ```

mod api;
mod encoding;
mod error;
mod mapping;
mod record;
mod row;
mod writer;

pub use api::{
    FieldDescription, Operation, QueryPage, RecordApi, RecordResult, TypeDescription,
    ERROR_SEPARATOR,
};
pub use encoding::{DecodeReader, EncodeWriter, Encoding};
pub use error::{Error, Result};
pub use mapping::{apply_mapping, FieldMap};
pub use record::{FieldValue, Record, ID_FIELD};
pub use row::{HeaderedRows, Row, RowCounter, RowReader};
pub use writer::{DebugWriter, RecordWriter};
