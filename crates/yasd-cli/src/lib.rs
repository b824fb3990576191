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

//! YASD command-line library.
//!
//! Moves records between flat files and a remote record API in batches of
//! 200, reporting every record's outcome to a success or error file.
//!
//! # Commands
//!
//! ## Loading
//!
//! - **insert**, **update**, **upsert**: build one record per source row
//! - **delete**, **undelete**: send the identifiers of the `Id` column
//!
//! Sources are delimited text (CSV/TSV), spreadsheets, JSON, JSON lines,
//! YAML or fixed-width text, in UTF-8, Shift-JIS or EUC-JP. A YAML mapping
//! file can rename source columns to field names. Columns such as
//! `Owner.Email` become references to the related record.
//!
//! ## Exporting
//!
//! - **export**: run a query, page through the results and write them as
//!   CSV, TSV, JSON, JSON lines, YAML, `.xlsx` or a debug dump
//!
//! ## Credentials
//!
//! - **generate-key**: create an AES-256 key file (owner-only permissions)
//! - **encrypt**: encrypt a password with that key for use with `--key`
//!
//! # Library use
//!
//! The [`pipeline`] module works against any
//! [`RecordApi`](yasd_core::RecordApi):
//!
//! ```
//! use yasd_cli::pipeline::{load, LoadRequest, ReferenceCache, ResponseRouter};
//! use yasd_core::{Encoding, HeaderedRows, Operation};
//! use yasd_csv::{DelimitedReader, ReadConfig};
//! use yasd_test::MockApi;
//!
//! # fn main() -> yasd_core::Result<()> {
//! let source = "Name\nAcme\nBeta\n";
//! let rows = HeaderedRows::new(DelimitedReader::from_reader(
//!     source.as_bytes(),
//!     ReadConfig::default(),
//! ))?;
//!
//! let mut api = MockApi::new();
//! let mut cache = ReferenceCache::new();
//! let (mut ok, mut failed) = (Vec::<u8>::new(), Vec::<u8>::new());
//! let mut router = ResponseRouter::new(&mut ok, &mut failed, Encoding::Utf8);
//! let request = LoadRequest {
//!     operation: &Operation::Insert,
//!     type_name: "Account",
//!     mapping: None,
//!     insert_nulls: false,
//! };
//!
//! let summary = load(rows, &mut api, &mut cache, &mut router, request)?;
//! assert_eq!(summary.successes, 2);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod formats;
pub mod logging;
pub mod pipeline;

pub use error::CliError;
