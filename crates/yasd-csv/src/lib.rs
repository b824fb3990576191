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

//! Delimited and fixed-width file support for YASD.
//!
//! # Sources
//!
//! - [`DelimitedReader`]: CSV or TSV, any single-byte delimiter, quoted
//!   fields with embedded delimiters and line breaks
//! - [`FixedWidthReader`]: lines cut at byte widths, each field decoded and
//!   trimmed separately
//!
//! Both implement [`yasd_core::RowReader`] and transcode from the
//! configured [`yasd_core::Encoding`].
//!
//! # Targets
//!
//! - [`DelimitedWriter`]: implements [`yasd_core::RecordWriter`]; also used
//!   for the success and error streams of load runs
//!
//! # Examples
//!
//! ```
//! use yasd_core::{HeaderedRows, RowReader};
//! use yasd_csv::{DelimitedReader, ReadConfig};
//!
//! let input = "Name,Phone\nAcme,555-0100\n";
//! let reader = DelimitedReader::from_reader(input.as_bytes(), ReadConfig::default());
//! let mut rows = HeaderedRows::new(reader).unwrap();
//!
//! assert_eq!(rows.header(), ["Name", "Phone"]);
//! let row = rows.next_data_row().unwrap().unwrap();
//! assert_eq!(row.cells, vec!["Acme", "555-0100"]);
//! ```

mod error;
mod fixed;
mod reader;
mod writer;

pub use error::{CsvError, Result};
pub use fixed::{FixedWidthLayout, FixedWidthReader};
pub use reader::{DelimitedReader, ReadConfig};
pub use writer::{DelimitedWriter, WriteConfig};
